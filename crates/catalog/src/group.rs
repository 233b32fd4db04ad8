// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use sqlayer_type::{error, internal};
use tracing::{debug, instrument};

use crate::{
	Catalog,
	id::{GroupId, TableId},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
	pub id: GroupId,
	pub name: String,
	pub root: TableId,
}

impl Catalog {
	pub fn group(&self, id: GroupId) -> crate::Result<&GroupDef> {
		self.groups.get(&id).ok_or_else(|| error!(internal!("group {} is not in the catalog", id)))
	}

	/// Tables of a group, parents before children.
	pub fn group_tables(&self, id: GroupId) -> Vec<TableId> {
		match self.groups.get(&id) {
			Some(group) => self.subtree(group.root),
			None => vec![],
		}
	}

	/// Assign every table to the group of its root.
	///
	/// A root keeps its group when it already roots it. Otherwise a new group
	/// named after the root is created. Groups left without tables are removed.
	#[instrument(name = "catalog::group::regroup", level = "debug", skip(self))]
	pub fn regroup(&mut self) {
		let roots: Vec<TableId> = self.tables.values().filter(|t| t.is_root()).map(|t| t.id).collect();

		for root in roots {
			let current = self.tables.get(&root).and_then(|t| t.group);
			let group = match current {
				Some(group) if self.groups.get(&group).is_some_and(|g| g.root == root) => group,
				_ => {
					let id = GroupId(self.allocate_id());
					let name = self.tables.get(&root).map(|t| t.name.name.clone()).unwrap_or_default();
					debug!(group = %id, root = %root, "created group");
					self.groups.insert(id, GroupDef { id, name, root });
					id
				}
			};
			for member in self.subtree(root) {
				if let Some(table) = self.tables.get_mut(&member) {
					table.group = Some(group);
				}
			}
		}

		let tables = &self.tables;
		self.groups.retain(|id, group| {
			tables.get(&group.root).is_some_and(|root| root.group == Some(*id) && root.is_root())
		});
	}
}
