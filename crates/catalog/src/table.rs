// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sqlayer_type::{
	diagnostic::catalog::{duplicate_table_name, table_not_found},
	error, internal, return_error,
};
use tracing::instrument;

use crate::{
	Catalog,
	column::ColumnDef,
	id::{GroupId, JoinId, TableId},
	index::{IndexDef, PRIMARY},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableName {
	pub schema: String,
	pub name: String,
}

impl TableName {
	pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			name: name.into(),
		}
	}
}

impl Display for TableName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.schema, self.name)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
	pub id: TableId,
	pub name: TableName,
	pub columns: Vec<ColumnDef>,
	/// Secondary indexes and the primary key, which is named [`PRIMARY`]
	pub indexes: Vec<IndexDef>,
	pub parent_join: Option<JoinId>,
	/// `None` until the table is assigned to a group
	pub group: Option<GroupId>,
	pub is_virtual: bool,
}

impl TableDef {
	pub fn new(id: TableId, name: TableName) -> Self {
		Self {
			id,
			name,
			columns: vec![],
			indexes: vec![],
			parent_join: None,
			group: None,
			is_virtual: false,
		}
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDef> {
		self.columns.iter_mut().find(|c| c.name == name)
	}

	pub fn index(&self, name: &str) -> Option<&IndexDef> {
		self.indexes.iter().find(|i| i.name == name)
	}

	pub fn primary_key(&self) -> Option<&IndexDef> {
		self.index(PRIMARY)
	}

	pub fn is_root(&self) -> bool {
		self.parent_join.is_none()
	}
}

impl Catalog {
	#[instrument(name = "catalog::table::add", level = "trace", skip(self))]
	pub fn add_table(&mut self, name: TableName) -> crate::Result<TableId> {
		if self.find_table_by_name(&name).is_some() {
			return_error!(duplicate_table_name(&name));
		}
		let id = TableId(self.allocate_id());
		self.tables.insert(id, TableDef::new(id, name));
		Ok(id)
	}

	/// Insert a fully built definition under a freshly allocated id.
	pub fn create_table(&mut self, mut table: TableDef) -> crate::Result<TableId> {
		if self.find_table_by_name(&table.name).is_some() {
			return_error!(duplicate_table_name(&table.name));
		}
		let id = TableId(self.allocate_id());
		table.id = id;
		table.parent_join = None;
		table.group = None;
		for (position, column) in table.columns.iter_mut().enumerate() {
			column.position = position;
		}
		self.tables.insert(id, table);
		Ok(id)
	}

	pub fn find_table(&self, id: TableId) -> Option<&TableDef> {
		self.tables.get(&id)
	}

	pub fn find_table_by_name(&self, name: &TableName) -> Option<&TableDef> {
		self.tables.values().find(|t| &t.name == name)
	}

	pub fn table(&self, id: TableId) -> crate::Result<&TableDef> {
		self.tables.get(&id).ok_or_else(|| error!(internal!("table {} is not in the catalog", id)))
	}

	pub fn table_mut(&mut self, id: TableId) -> crate::Result<&mut TableDef> {
		self.tables.get_mut(&id).ok_or_else(|| error!(internal!("table {} is not in the catalog", id)))
	}

	pub fn table_by_name(&self, name: &TableName) -> crate::Result<&TableDef> {
		self.find_table_by_name(name).ok_or_else(|| error!(table_not_found(&name.schema, &name.name)))
	}

	#[instrument(name = "catalog::table::rename", level = "trace", skip(self))]
	pub fn rename_table(&mut self, id: TableId, new_name: TableName) -> crate::Result<()> {
		if let Some(existing) = self.find_table_by_name(&new_name) {
			if existing.id != id {
				return_error!(duplicate_table_name(&new_name));
			}
		}
		self.table_mut(id)?.name = new_name;
		Ok(())
	}

	/// Remove a table with its parent join. Children are detached and become roots.
	#[instrument(name = "catalog::table::remove", level = "trace", skip(self))]
	pub fn remove_table(&mut self, id: TableId) -> crate::Result<TableDef> {
		self.table(id)?;
		let children: Vec<TableId> = self.child_joins(id).map(|j| j.child).collect();
		for child in children {
			self.clear_parent_join(child)?;
		}
		if self.table(id)?.parent_join.is_some() {
			self.clear_parent_join(id)?;
		}
		let table = self.tables.shift_remove(&id).ok_or_else(|| error!(internal!("table {} is not in the catalog", id)))?;
		let orphaned: Vec<_> = table
			.columns
			.iter()
			.filter_map(|c| c.identity)
			.filter(|seq| !self.tables.values().any(|t| t.columns.iter().any(|c| c.identity == Some(*seq))))
			.collect();
		for sequence in orphaned {
			self.sequences.shift_remove(&sequence);
		}
		self.groups.retain(|_, group| group.root != id);
		Ok(table)
	}
}
