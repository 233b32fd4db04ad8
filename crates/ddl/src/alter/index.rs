// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_catalog::{Catalog, IndexColumn, IndexDef, PRIMARY, TableDef};
use sqlayer_type::{
	diagnostic::catalog::{index_not_found, unique_not_found},
	return_error,
};
use tracing::trace;

use crate::{
	ast::{AstConstraint, AstConstraintKind},
	change::{ChangeKind, TableChange, find_old_name, new_name},
	namer::DefaultIndexNamer,
};

/// Dropped and modified indexes must exist on the original table.
pub(crate) fn check_index_changes(original: &TableDef, changes: &[TableChange]) -> crate::Result<()> {
	for change in changes.iter().filter(|c| c.kind != ChangeKind::Add) {
		let name = change.name();
		if original.index(name).is_some() {
			continue;
		}
		if name == PRIMARY {
			return_error!(index_not_found(&original.name, name));
		}
		return_error!(unique_not_found(&original.name, name));
	}
	Ok(())
}

/// Re-attach the original indexes that are not dropped, following column
/// renames. An index left without columns is dropped, one that lost
/// columns is modified; both are recorded when the statement did not list
/// them.
pub(crate) fn copy_indexes(
	staged: &mut Catalog,
	original: &TableDef,
	column_changes: &[TableChange],
	index_changes: &mut Vec<TableChange>,
) -> crate::Result<()> {
	for index in &original.indexes {
		let listed = find_old_name(index_changes, &index.name);
		if listed == Some(ChangeKind::Drop) {
			continue;
		}

		let columns: Vec<IndexColumn> = index
			.columns
			.iter()
			.filter_map(|column| {
				new_name(column_changes, &column.column).map(|name| IndexColumn {
					column: name.to_string(),
					ascending: column.ascending,
				})
			})
			.collect();

		if columns.is_empty() {
			trace!(index = %index.name, "index lost every column");
			index_changes.push(TableChange::drop(index.name.as_str()));
			continue;
		}
		if columns.len() != index.columns.len() && listed.is_none() {
			trace!(index = %index.name, "index lost columns");
			index_changes.push(TableChange::modify(index.name.as_str(), index.name.as_str()));
		}

		staged.add_index(
			original.id,
			IndexDef {
				columns,
				..index.clone()
			},
		)?;
	}
	Ok(())
}

pub(crate) fn add_constraints(
	staged: &mut Catalog,
	original: &TableDef,
	constraints: &[&AstConstraint],
	index_name_max_length: usize,
	index_changes: &mut Vec<TableChange>,
) -> crate::Result<()> {
	let mut namer = DefaultIndexNamer::for_table(original, index_name_max_length);
	for constraint in constraints {
		let index = match &constraint.kind {
			AstConstraintKind::PrimaryKey(columns) => {
				namer.primary();
				IndexDef::primary(columns.iter().map(String::as_str))
			}
			AstConstraintKind::Unique(columns) => {
				let name = namer.name(constraint.name.as_deref(), columns);
				IndexDef::unique(name, columns.iter().map(String::as_str))
			}
			AstConstraintKind::Check(_) => continue,
		};
		index_changes.push(TableChange::add(index.name.as_str()));
		staged.add_index(original.id, index)?;
	}
	Ok(())
}
