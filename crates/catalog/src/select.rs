// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_type::{
	diagnostic::catalog::{duplicate_table_name, join_cycle},
	return_error,
};
use tracing::{debug, instrument};

use crate::{Catalog, TableDef, id::TableId};

/// Chooses the tables copied by [`Catalog::clone_selected`]
pub trait Selector {
	fn select(&self, catalog: &Catalog, table: &TableDef) -> bool;
}

/// Selects every table
pub struct AllSelector;

impl Selector for AllSelector {
	fn select(&self, _catalog: &Catalog, _table: &TableDef) -> bool {
		true
	}
}

/// Selects the tables sharing a root with a given table
#[derive(Debug, Clone, Copy)]
pub struct GroupSelector {
	root: TableId,
}

impl GroupSelector {
	pub fn for_table(catalog: &Catalog, table: TableId) -> crate::Result<Self> {
		Ok(Self {
			root: catalog.root_of(table)?,
		})
	}
}

impl Selector for GroupSelector {
	fn select(&self, catalog: &Catalog, table: &TableDef) -> bool {
		catalog.root_of(table.id).is_ok_and(|root| root == self.root)
	}
}

impl Catalog {
	/// Walk parent joins up to the root of the table's tree.
	pub fn root_of(&self, table: TableId) -> crate::Result<TableId> {
		let mut current = table;
		let mut steps = 0;
		while let Some(join) = self.table(current)?.parent_join {
			current = self.join(join)?.parent;
			steps += 1;
			if steps > self.tables.len() {
				return_error!(join_cycle(&self.table(table)?.name, &self.table(current)?.name));
			}
		}
		Ok(current)
	}

	/// Deep copy of the selected tables together with the joins between
	/// them, their groups and the sequences their columns use. Ids are kept.
	#[instrument(name = "catalog::clone_selected", level = "debug", skip_all)]
	pub fn clone_selected(&self, selector: &impl Selector) -> Catalog {
		let mut result = Catalog {
			next_id: self.next_id,
			..Catalog::default()
		};

		for table in self.tables.values().filter(|t| selector.select(self, t)) {
			result.tables.insert(table.id, table.clone());
		}
		for join in self.joins.values() {
			if result.tables.contains_key(&join.parent) && result.tables.contains_key(&join.child) {
				result.joins.insert(join.id, join.clone());
			}
		}
		let joins = &result.joins;
		for table in result.tables.values_mut() {
			if table.parent_join.is_some_and(|join| !joins.contains_key(&join)) {
				table.parent_join = None;
			}
		}
		for id in result.tables.keys().copied().collect::<Vec<_>>() {
			result.copy_dependencies_from(self, id);
		}

		debug!(tables = result.tables.len(), joins = result.joins.len(), "cloned catalog");
		result
	}

	/// Splice a table of `other` into this catalog, keeping its id and group.
	/// The copy is not joined to any parent.
	#[instrument(name = "catalog::copy_table_from", level = "trace", skip(self, other))]
	pub fn copy_table_from(&mut self, other: &Catalog, id: TableId) -> crate::Result<()> {
		let mut table = other.table(id)?.clone();
		if self.tables.contains_key(&id) || self.find_table_by_name(&table.name).is_some() {
			return_error!(duplicate_table_name(&table.name));
		}
		table.parent_join = None;
		self.tables.insert(id, table);
		self.next_id = self.next_id.max(other.next_id);
		self.copy_dependencies_from(other, id);
		Ok(())
	}

	fn copy_dependencies_from(&mut self, other: &Catalog, id: TableId) {
		let Some(table) = self.tables.get(&id) else {
			return;
		};
		let group = table.group;
		let sequences: Vec<_> = table.columns.iter().filter_map(|c| c.identity).collect();

		if let Some(group) = group.and_then(|g| other.groups.get(&g)) {
			self.groups.entry(group.id).or_insert_with(|| group.clone());
		}
		for sequence in sequences.iter().filter_map(|s| other.sequences.get(s)) {
			self.sequences.entry(sequence.id).or_insert_with(|| sequence.clone());
		}
	}
}
