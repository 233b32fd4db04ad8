// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Catalog mutation interface the planner commits through.

use std::sync::Arc;

use sqlayer_catalog::{Catalog, TableDef, TableId, TableName};

use crate::{change::TableChange, classify::ChangeLevel, context::QueryContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Session {
	pub id: u64,
}

impl Session {
	pub fn new(id: u64) -> Self {
		Self {
			id,
		}
	}
}

/// Target definition of an altered table inside the catalog clone it was
/// staged on. The clone also holds the group the table ends up in.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedTable {
	pub catalog: Catalog,
	pub table: TableId,
}

impl StagedTable {
	pub fn new(catalog: Catalog, table: TableId) -> Self {
		Self {
			catalog,
			table,
		}
	}

	pub fn def(&self) -> crate::Result<&TableDef> {
		self.catalog.table(self.table)
	}
}

pub trait DdlFunctions {
	/// Snapshot of the live catalog.
	fn catalog(&self, session: &Session) -> Arc<Catalog>;

	fn rename_table(&self, session: &Session, current: &TableName, new_name: &TableName) -> crate::Result<()>;

	fn create_table(&self, session: &Session, table: TableDef) -> crate::Result<TableId>;

	fn drop_table(&self, session: &Session, name: &TableName) -> crate::Result<()>;

	/// Apply a planned alteration and report how expensive it was.
	fn alter_table(
		&self,
		session: &Session,
		name: &TableName,
		target: StagedTable,
		column_changes: &[TableChange],
		index_changes: &[TableChange],
		ctx: &dyn QueryContext,
	) -> crate::Result<ChangeLevel>;

	/// `None` updates every index of the table.
	fn update_table_statistics(
		&self,
		session: &Session,
		name: &TableName,
		indexes: Option<&[String]>,
	) -> crate::Result<()>;
}

pub trait DmlFunctions {
	fn truncate_table(&self, session: &Session, table: TableId, cascade: bool) -> crate::Result<()>;
}
