// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use sqlayer_type::{
	TypeDescriptor,
	diagnostic::catalog::{column_not_found, duplicate_column_name},
	error, return_error,
};
use tracing::instrument;

use crate::{Catalog, id::SequenceId, id::TableId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnDefault {
	/// Literal text, evaluated against the column type on insert
	Literal(String),
	/// Name of a function such as `CURRENT_TIMESTAMP`
	Function(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub position: usize,
	pub descriptor: TypeDescriptor,
	pub nullable: bool,
	pub default: Option<ColumnDefault>,
	pub identity: Option<SequenceId>,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
		Self {
			name: name.into(),
			position: 0,
			descriptor: descriptor.into(),
			nullable: true,
			default: None,
			identity: None,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}

	pub fn with_default(mut self, default: ColumnDefault) -> Self {
		self.default = Some(default);
		self
	}
}

impl Catalog {
	/// Append a column at the next position.
	#[instrument(name = "catalog::column::add", level = "trace", skip(self, column), fields(column = %column.name))]
	pub fn add_column(&mut self, table: TableId, mut column: ColumnDef) -> crate::Result<()> {
		let def = self.table_mut(table)?;
		if def.column(&column.name).is_some() {
			return_error!(duplicate_column_name(&def.name, &column.name));
		}
		column.position = def.columns.len();
		def.columns.push(column);
		Ok(())
	}

	/// Remove a column and close the gap in positions.
	#[instrument(name = "catalog::column::drop", level = "trace", skip(self))]
	pub fn drop_column(&mut self, table: TableId, name: &str) -> crate::Result<ColumnDef> {
		let def = self.table_mut(table)?;
		let Some(idx) = def.columns.iter().position(|c| c.name == name) else {
			return_error!(column_not_found(name));
		};
		let column = def.columns.remove(idx);
		for (position, column) in def.columns.iter_mut().enumerate() {
			column.position = position;
		}
		Ok(column)
	}

	/// Remove every column of the table, in position order.
	pub fn drop_columns(&mut self, table: TableId) -> crate::Result<Vec<ColumnDef>> {
		Ok(std::mem::take(&mut self.table_mut(table)?.columns))
	}

	pub fn column(&self, table: TableId, name: &str) -> crate::Result<&ColumnDef> {
		self.table(table)?.column(name).ok_or_else(|| error!(column_not_found(name)))
	}

	pub fn column_mut(&mut self, table: TableId, name: &str) -> crate::Result<&mut ColumnDef> {
		self.table_mut(table)?.column_mut(name).ok_or_else(|| error!(column_not_found(name)))
	}
}
