// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Copy and swap rewrite of a table.
//!
//! The new definition is created under a temporary name, filled by a
//! [`TableCopier`], and swapped in through two renames before the old
//! table is dropped. Completed steps are undone in reverse order when a
//! later step fails.

use sqlayer_catalog::{TableDef, TableId, TableName};
use tracing::{debug, instrument, warn};

use crate::{
	config::AlterConfig,
	interface::{DdlFunctions, Session},
};

/// Moves rows from the table being rewritten into its replacement.
pub trait TableCopier {
	fn copy_table(&self, session: &Session, source: &TableName, destination: &TableName) -> crate::Result<()>;
}

/// Copier for tables without stored rows
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCopier;

impl TableCopier for NoopCopier {
	fn copy_table(&self, _session: &Session, _source: &TableName, _destination: &TableName) -> crate::Result<()> {
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
	CreatedNew,
	RenamedOriginal,
	RenamedNew,
}

#[derive(Debug, Clone)]
pub struct RewritePlan {
	name: TableName,
	temp_new: TableName,
	temp_old: TableName,
	definition: TableDef,
}

impl RewritePlan {
	/// Plan replacing table `name` by `definition`.
	pub fn new(config: &AlterConfig, name: TableName, definition: TableDef) -> Self {
		Self {
			temp_new: TableName::new(name.schema.as_str(), config.temp_table_name_new.as_str()),
			temp_old: TableName::new(name.schema.as_str(), config.temp_table_name_old.as_str()),
			name,
			definition,
		}
	}

	pub fn name(&self) -> &TableName {
		&self.name
	}

	pub fn temp_new(&self) -> &TableName {
		&self.temp_new
	}

	pub fn temp_old(&self) -> &TableName {
		&self.temp_old
	}

	/// Run every step and return the id of the replacement table.
	#[instrument(name = "ddl::rewrite::execute", level = "debug", skip_all, fields(table = %self.name))]
	pub fn execute<D>(&self, ddl: &D, session: &Session, copier: &dyn TableCopier) -> crate::Result<TableId>
	where
		D: DdlFunctions + ?Sized,
	{
		let mut done = Vec::with_capacity(3);
		match self.run(ddl, session, copier, &mut done) {
			Ok(id) => {
				debug!(table = %id, "table rewritten");
				Ok(id)
			}
			Err(err) => {
				warn!(code = %err.code(), steps = done.len(), "rewrite failed, rolling back");
				self.rollback(ddl, session, &done);
				Err(err)
			}
		}
	}

	fn run<D>(&self, ddl: &D, session: &Session, copier: &dyn TableCopier, done: &mut Vec<Step>) -> crate::Result<TableId>
	where
		D: DdlFunctions + ?Sized,
	{
		let mut definition = self.definition.clone();
		definition.name = self.temp_new.clone();
		let id = ddl.create_table(session, definition)?;
		done.push(Step::CreatedNew);

		copier.copy_table(session, &self.name, &self.temp_new)?;

		ddl.rename_table(session, &self.name, &self.temp_old)?;
		done.push(Step::RenamedOriginal);

		ddl.rename_table(session, &self.temp_new, &self.name)?;
		done.push(Step::RenamedNew);

		ddl.drop_table(session, &self.temp_old)?;
		Ok(id)
	}

	fn rollback<D>(&self, ddl: &D, session: &Session, done: &[Step])
	where
		D: DdlFunctions + ?Sized,
	{
		for step in done.iter().rev() {
			let result = match step {
				Step::RenamedNew => ddl.rename_table(session, &self.name, &self.temp_new),
				Step::RenamedOriginal => ddl.rename_table(session, &self.temp_old, &self.name),
				Step::CreatedNew => ddl.drop_table(session, &self.temp_new),
			};
			if let Err(err) = result {
				warn!(?step, code = %err.code(), "rollback step failed");
			}
		}
	}
}
