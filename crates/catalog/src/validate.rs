// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_type::{
	diagnostic::{alter::join_column_type_mismatch, catalog::column_not_found},
	error, internal, return_error,
};
use tracing::instrument;

use crate::Catalog;

impl Catalog {
	/// Check the structural invariants of the catalog.
	#[instrument(name = "catalog::validate", level = "debug", skip(self))]
	pub fn validate(&self) -> crate::Result<()> {
		for table in self.tables.values() {
			for (expected, column) in table.columns.iter().enumerate() {
				if column.position != expected {
					return_error!(internal!(
						"column {} of {} has position {}, expected {}",
						column.name,
						table.name,
						column.position,
						expected
					));
				}
				if let Some(sequence) = column.identity {
					self.sequence(sequence)?;
				}
			}
			for index in &table.indexes {
				if let Some(missing) = index.columns.iter().find(|c| table.column(&c.column).is_none()) {
					return Err(error!(column_not_found(&missing.column)));
				}
			}
			if let Some(join) = table.parent_join {
				let join = self.join(join)?;
				if join.child != table.id {
					return_error!(internal!("join {} does not point back to {}", join.id, table.name));
				}
				let parent = self.table(join.parent)?;
				if parent.group != table.group {
					return_error!(internal!("{} is not in the group of its parent {}", table.name, parent.name));
				}
			}
			self.root_of(table.id)?;
		}
		for join in self.joins.values() {
			let child = self.table(join.child)?;
			if child.parent_join != Some(join.id) {
				return_error!(internal!("join {} is not the parent join of its child", join.id));
			}
			let parent = self.table(join.parent)?;
			for pair in &join.columns {
				let Some(parent_column) = parent.column(&pair.parent) else {
					return_error!(column_not_found(&pair.parent));
				};
				let Some(child_column) = child.column(&pair.child) else {
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
		}
		Ok(())
	}
}
