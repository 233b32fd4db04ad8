// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use sqlayer_type::{
	diagnostic::catalog::{column_not_found, duplicate_index_name, index_not_found},
	error, return_error,
};
use tracing::instrument;

use crate::{Catalog, id::TableId};

/// Reserved name of the primary key index
pub const PRIMARY: &str = "PRIMARY";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexColumn {
	pub column: String,
	pub ascending: bool,
}

impl IndexColumn {
	pub fn new(column: impl Into<String>) -> Self {
		Self {
			column: column.into(),
			ascending: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexDef {
	pub name: String,
	pub columns: Vec<IndexColumn>,
	pub unique: bool,
	pub primary: bool,
}

impl IndexDef {
	pub fn new<S: Into<String>>(name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
		Self {
			name: name.into(),
			columns: columns.into_iter().map(IndexColumn::new).collect(),
			unique: false,
			primary: false,
		}
	}

	pub fn unique<S: Into<String>>(name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
		Self {
			unique: true,
			..Self::new(name, columns)
		}
	}

	pub fn primary<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
		Self {
			unique: true,
			primary: true,
			..Self::new(PRIMARY, columns)
		}
	}

	pub fn column_names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().map(|c| c.column.as_str())
	}

	pub fn references(&self, column: &str) -> bool {
		self.columns.iter().any(|c| c.column == column)
	}
}

impl Catalog {
	#[instrument(name = "catalog::index::add", level = "trace", skip(self, index), fields(index = %index.name))]
	pub fn add_index(&mut self, table: TableId, index: IndexDef) -> crate::Result<()> {
		let def = self.table_mut(table)?;
		if def.index(&index.name).is_some() {
			return_error!(duplicate_index_name(&def.name, &index.name));
		}
		if let Some(missing) = index.columns.iter().find(|c| def.column(&c.column).is_none()) {
			return_error!(column_not_found(&missing.column));
		}
		def.indexes.push(index);
		Ok(())
	}

	#[instrument(name = "catalog::index::remove", level = "trace", skip(self))]
	pub fn remove_index(&mut self, table: TableId, name: &str) -> crate::Result<IndexDef> {
		let def = self.table_mut(table)?;
		let Some(idx) = def.indexes.iter().position(|i| i.name == name) else {
			return_error!(index_not_found(&def.name, name));
		};
		Ok(def.indexes.remove(idx))
	}

	/// Remove every index of the table, including the primary key.
	pub fn remove_indexes(&mut self, table: TableId) -> crate::Result<Vec<IndexDef>> {
		Ok(std::mem::take(&mut self.table_mut(table)?.indexes))
	}

	pub fn index(&self, table: TableId, name: &str) -> crate::Result<&IndexDef> {
		let def = self.table(table)?;
		def.index(name).ok_or_else(|| error!(index_not_found(&def.name, name)))
	}
}
