// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use sqlayer_type::{
	diagnostic::{
		alter::{join_column_mismatch, join_column_type_mismatch, join_to_multiple_parents},
		catalog::{column_not_found, join_cycle},
	},
	error, internal, return_error,
};
use tracing::{instrument, trace};

use crate::{
	Catalog,
	id::{JoinId, TableId},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinColumn {
	pub parent: String,
	pub child: String,
}

impl JoinColumn {
	pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
		Self {
			parent: parent.into(),
			child: child.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinDef {
	pub id: JoinId,
	pub parent: TableId,
	pub child: TableId,
	pub columns: Vec<JoinColumn>,
}

impl Catalog {
	pub fn join(&self, id: JoinId) -> crate::Result<&JoinDef> {
		self.joins.get(&id).ok_or_else(|| error!(internal!("join {} is not in the catalog", id)))
	}

	pub fn parent_join(&self, table: TableId) -> crate::Result<Option<&JoinDef>> {
		match self.table(table)?.parent_join {
			Some(join) => Ok(Some(self.join(join)?)),
			None => Ok(None),
		}
	}

	pub fn child_joins(&self, table: TableId) -> impl Iterator<Item = &JoinDef> {
		self.joins.values().filter(move |j| j.parent == table)
	}

	/// The table and every table below it, parents before children.
	pub fn subtree(&self, table: TableId) -> Vec<TableId> {
		let mut result = vec![table];
		let mut idx = 0;
		while idx < result.len() {
			let current = result[idx];
			for join in self.child_joins(current) {
				if !result.contains(&join.child) {
					result.push(join.child);
				}
			}
			idx += 1;
		}
		result
	}

	/// Join `child` under `parent`, pairing the given child and parent columns.
	///
	/// The child subtree moves into the parent's group.
	#[instrument(name = "catalog::join::add", level = "trace", skip(self, columns))]
	pub fn add_join(&mut self, parent: TableId, child: TableId, columns: Vec<JoinColumn>) -> crate::Result<JoinId> {
		let parent_def = self.table(parent)?;
		let child_def = self.table(child)?;

		if child_def.parent_join.is_some() {
			return_error!(join_to_multiple_parents(&child_def.name));
		}
		let parent_pk = parent_def.primary_key().map(|pk| pk.columns.len()).unwrap_or(columns.len());
		if columns.is_empty() || columns.len() != parent_pk {
			return_error!(join_column_mismatch(&child_def.name, &parent_def.name, columns.len(), parent_pk));
		}
		for pair in &columns {
			let Some(parent_column) = parent_def.column(&pair.parent) else {
				return_error!(column_not_found(&pair.parent));
			};
			let Some(child_column) = child_def.column(&pair.child) else {
				return_error!(column_not_found(&pair.child));
			};
			if !child_column.descriptor.is_compatible_with(&parent_column.descriptor) {
				return_error!(join_column_type_mismatch(
					&pair.child,
					&child_column.descriptor,
					&pair.parent,
					&parent_column.descriptor
				));
			}
		}
		if parent == child || self.subtree(child).contains(&parent) {
			return_error!(join_cycle(&child_def.name, &parent_def.name));
		}

		let group = parent_def.group;
		let id = JoinId(self.allocate_id());
		self.joins.insert(id, JoinDef { id, parent, child, columns });
		self.table_mut(child)?.parent_join = Some(id);
		for table in self.subtree(child) {
			self.table_mut(table)?.group = group;
		}
		trace!(join = %id, "joined tables");
		Ok(id)
	}

	/// Detach a table from its parent. The table subtree is left ungrouped.
	#[instrument(name = "catalog::join::clear_parent", level = "trace", skip(self))]
	pub fn clear_parent_join(&mut self, table: TableId) -> crate::Result<Option<JoinDef>> {
		let Some(join) = self.table_mut(table)?.parent_join.take() else {
			return Ok(None);
		};
		let removed = self.joins.shift_remove(&join);
		for member in self.subtree(table) {
			self.table_mut(member)?.group = None;
		}
		Ok(removed)
	}

	/// Rename the columns of `table` referenced by its parent and child joins.
	///
	/// `rename` yields `None` for a column that no longer exists. A join
	/// losing a column is removed and returned; its child is left ungrouped.
	#[instrument(name = "catalog::join::remap_columns", level = "trace", skip(self, rename))]
	pub fn remap_join_columns<F>(&mut self, table: TableId, rename: F) -> crate::Result<Vec<JoinDef>>
	where
		F: Fn(&str) -> Option<String>,
	{
		let joins: Vec<JoinId> =
			self.joins.values().filter(|j| j.child == table || j.parent == table).map(|j| j.id).collect();

		let mut broken = Vec::new();
		for id in joins {
			let Some(join) = self.joins.get_mut(&id) else {
				continue;
			};
			let child_side = join.child == table;
			let mut intact = true;
			for pair in join.columns.iter_mut() {
				let column = if child_side { &mut pair.child } else { &mut pair.parent };
				match rename(column.as_str()) {
					Some(name) => *column = name,
					None => intact = false,
				}
			}
			if !intact {
				let child = join.child;
				broken.extend(self.clear_parent_join(child)?);
			}
		}
		Ok(broken)
	}
}
