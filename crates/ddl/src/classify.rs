// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sqlayer_catalog::{Catalog, ColumnDef, IndexDef, TableDef, TableId};
use sqlayer_type::{
	diagnostic::catalog::{column_not_found, index_not_found},
	return_error,
};
use tracing::{instrument, trace};

use crate::{
	change::{ChangeKind, TableChange, find_old_name, new_name, original_name},
	interface::StagedTable,
};

/// Cost of applying an alteration. Ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeLevel {
	/// Catalog edits only
	Metadata,
	/// Indexes are rebuilt, rows are untouched
	Index,
	/// Every row is rewritten
	Table,
}

impl Display for ChangeLevel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			ChangeLevel::Metadata => "METADATA",
			ChangeLevel::Index => "INDEX",
			ChangeLevel::Table => "TABLE",
		})
	}
}

/// Classify the difference between a live table and its staged target.
///
/// Every change list entry must name columns or indexes present on the side
/// it refers to. The most expensive edit decides the level.
#[instrument(name = "ddl::classify", level = "debug", skip_all, fields(table = %table))]
pub fn classify(
	original: &Catalog,
	table: TableId,
	target: &StagedTable,
	column_changes: &[TableChange],
	index_changes: &[TableChange],
) -> crate::Result<ChangeLevel> {
	let before = original.table(table)?;
	let after = target.def()?;

	check_columns(before, after, column_changes)?;
	check_indexes(before, after, index_changes)?;

	let level = [
		column_level(before, after, column_changes),
		index_level(before, after, column_changes, index_changes),
		grouping_level(original, before, target, column_changes)?,
	]
	.into_iter()
	.max()
	.unwrap_or(ChangeLevel::Metadata);

	trace!(%level, "classified");
	Ok(level)
}

fn check_columns(before: &TableDef, after: &TableDef, changes: &[TableChange]) -> crate::Result<()> {
	for change in changes {
		if let Some(old) = change.old_name.as_deref() {
			if before.column(old).is_none() {
				return_error!(column_not_found(old));
			}
		}
		if let Some(new) = change.new_name.as_deref() {
			if after.column(new).is_none() {
				return_error!(column_not_found(new));
			}
		}
	}
	Ok(())
}

fn check_indexes(before: &TableDef, after: &TableDef, changes: &[TableChange]) -> crate::Result<()> {
	for change in changes {
		let (side, name) = match change.kind {
			ChangeKind::Add => (after, change.new_name.as_deref()),
			ChangeKind::Drop | ChangeKind::Modify => (before, change.old_name.as_deref()),
		};
		if let Some(name) = name {
			if side.index(name).is_none() {
				return_error!(index_not_found(&side.name, name));
			}
		}
	}
	Ok(())
}

fn column_level(before: &TableDef, after: &TableDef, changes: &[TableChange]) -> ChangeLevel {
	if before.columns.iter().any(|c| new_name(changes, &c.name).is_none()) {
		return ChangeLevel::Table;
	}

	let mut previous = None;
	for column in &after.columns {
		let Some(old) = original_name(changes, &column.name).and_then(|name| before.column(name)) else {
			return ChangeLevel::Table;
		};
		if rewrites_rows(old, column) {
			return ChangeLevel::Table;
		}
		if previous.is_some_and(|position| old.position < position) {
			return ChangeLevel::Table;
		}
		previous = Some(old.position);
	}
	ChangeLevel::Metadata
}

/// Type changes and `NOT NULL` tightening touch every row.
fn rewrites_rows(before: &ColumnDef, after: &ColumnDef) -> bool {
	before.descriptor != after.descriptor || (before.nullable && !after.nullable)
}

fn index_level(
	before: &TableDef,
	after: &TableDef,
	column_changes: &[TableChange],
	index_changes: &[TableChange],
) -> ChangeLevel {
	let mut level = ChangeLevel::Metadata;
	for change in index_changes {
		let primary = [change.old_name.as_deref(), change.new_name.as_deref()]
			.into_iter()
			.flatten()
			.any(|name| is_primary(before, name) || is_primary(after, name));
		level = level.max(if primary { ChangeLevel::Table } else { ChangeLevel::Index });
	}

	for index in &after.indexes {
		if index_changes.iter().any(|c| c.new_name.as_deref() == Some(index.name.as_str())) {
			continue;
		}
		let unchanged = before.index(&index.name).is_some_and(|old| same_index(old, index, column_changes));
		if !unchanged {
			level = level.max(if index.primary { ChangeLevel::Table } else { ChangeLevel::Index });
		}
	}
	for index in &before.indexes {
		let listed = find_old_name(index_changes, &index.name).is_some();
		if !listed && after.index(&index.name).is_none() {
			level = level.max(if index.primary { ChangeLevel::Table } else { ChangeLevel::Index });
		}
	}
	level
}

fn is_primary(table: &TableDef, name: &str) -> bool {
	table.index(name).is_some_and(|index| index.primary)
}

fn same_index(before: &IndexDef, after: &IndexDef, column_changes: &[TableChange]) -> bool {
	before.unique == after.unique
		&& before.primary == after.primary
		&& before.columns.len() == after.columns.len()
		&& before.columns.iter().zip(&after.columns).all(|(old, new)| {
			old.ascending == new.ascending && new_name(column_changes, &old.column) == Some(new.column.as_str())
		})
}

fn grouping_level(
	original: &Catalog,
	before: &TableDef,
	target: &StagedTable,
	column_changes: &[TableChange],
) -> crate::Result<ChangeLevel> {
	let old_join = original.parent_join(before.id)?;
	let new_join = target.catalog.parent_join(target.table)?;

	let same = match (old_join, new_join) {
		(None, None) => true,
		(Some(old), Some(new)) => {
			old.parent == new.parent
				&& old.columns.len() == new.columns.len()
				&& old.columns.iter().zip(&new.columns).all(|(o, n)| {
					o.parent == n.parent && new_name(column_changes, &o.child) == Some(n.child.as_str())
				})
		}
		_ => false,
	};
	Ok(if same { ChangeLevel::Metadata } else { ChangeLevel::Table })
}

#[cfg(test)]
mod tests {
	use sqlayer_catalog::{ColumnDef, IndexDef, JoinColumn, TableName};
	use sqlayer_type::{Type, TypeDescriptor, diagnostic::code};

	use super::*;

	fn parent_and_child() -> (Catalog, TableId, TableId) {
		let mut catalog = Catalog::new();
		let c = catalog.add_table(TableName::new("test", "c")).unwrap();
		catalog.add_column(c, ColumnDef::new("cid", Type::BigInt).not_null()).unwrap();
		catalog.add_index(c, IndexDef::primary(["cid"])).unwrap();

		let o = catalog.add_table(TableName::new("test", "o")).unwrap();
		catalog.add_column(o, ColumnDef::new("oid", Type::BigInt).not_null()).unwrap();
		catalog.add_column(o, ColumnDef::new("cid", Type::BigInt)).unwrap();
		catalog.add_column(o, ColumnDef::new("note", TypeDescriptor::varchar(32))).unwrap();
		catalog.add_index(o, IndexDef::primary(["oid"])).unwrap();
		catalog.add_index(o, IndexDef::new("cid_note", ["cid", "note"])).unwrap();
		catalog.regroup();
		(catalog, c, o)
	}

	fn staged(catalog: &Catalog, table: TableId) -> StagedTable {
		StagedTable::new(catalog.clone(), table)
	}

	#[test]
	fn test_unchanged_is_metadata() {
		let (catalog, _, o) = parent_and_child();
		let level = classify(&catalog, o, &staged(&catalog, o), &[], &[]).unwrap();
		assert_eq!(level, ChangeLevel::Metadata);
	}

	#[test]
	fn test_level_order() {
		assert!(ChangeLevel::Metadata < ChangeLevel::Index);
		assert!(ChangeLevel::Index < ChangeLevel::Table);
		assert_eq!(ChangeLevel::Table.to_string(), "TABLE");
	}

	mod columns {
		use super::*;

		#[test]
		fn test_rename_is_metadata() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			let def = target.catalog.table_mut(o).unwrap();
			def.column_mut("note").unwrap().name = "remark".into();
			def.indexes[1].columns[1].column = "remark".into();

			let level = classify(&catalog, o, &target, &[TableChange::modify("note", "remark")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Metadata);
		}

		#[test]
		fn test_relaxing_null_is_metadata() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.column_mut(o, "oid").unwrap().nullable = true;

			let level = classify(&catalog, o, &target, &[TableChange::modify("oid", "oid")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Metadata);
		}

		#[test]
		fn test_not_null_is_table() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.column_mut(o, "note").unwrap().nullable = false;

			let level = classify(&catalog, o, &target, &[TableChange::modify("note", "note")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Table);
		}

		#[test]
		fn test_type_change_is_table() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.column_mut(o, "note").unwrap().descriptor = TypeDescriptor::varchar(64);

			let level = classify(&catalog, o, &target, &[TableChange::modify("note", "note")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Table);
		}

		#[test]
		fn test_add_is_table() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.add_column(o, ColumnDef::new("extra", Type::Int)).unwrap();

			let level = classify(&catalog, o, &target, &[TableChange::add("extra")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Table);
		}

		#[test]
		fn test_unknown_column_fails() {
			let (catalog, _, o) = parent_and_child();
			let err = classify(&catalog, o, &staged(&catalog, o), &[TableChange::drop("missing")], &[])
				.unwrap_err();
			assert_eq!(err.code, code::NO_SUCH_COLUMN);
		}
	}

	mod indexes {
		use super::*;

		#[test]
		fn test_secondary_drop_is_index() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.remove_index(o, "cid_note").unwrap();

			let level = classify(&catalog, o, &target, &[], &[TableChange::drop("cid_note")]).unwrap();
			assert_eq!(level, ChangeLevel::Index);
		}

		#[test]
		fn test_primary_drop_is_table() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.remove_index(o, "PRIMARY").unwrap();

			let level = classify(&catalog, o, &target, &[], &[TableChange::drop("PRIMARY")]).unwrap();
			assert_eq!(level, ChangeLevel::Table);
		}

		#[test]
		fn test_unlisted_difference_is_detected() {
			let (catalog, _, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.table_mut(o).unwrap().indexes[1].unique = true;

			let level = classify(&catalog, o, &target, &[], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Index);
		}

		#[test]
		fn test_unknown_index_fails() {
			let (catalog, _, o) = parent_and_child();
			let err = classify(&catalog, o, &staged(&catalog, o), &[], &[TableChange::drop("nope")]).unwrap_err();
			assert_eq!(err.code, code::NO_SUCH_INDEX);
		}
	}

	mod grouping {
		use super::*;

		#[test]
		fn test_new_parent_is_table() {
			let (catalog, c, o) = parent_and_child();
			let mut target = staged(&catalog, o);
			target.catalog.add_join(c, o, vec![JoinColumn::new("cid", "cid")]).unwrap();

			let level = classify(&catalog, o, &target, &[], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Table);
		}

		#[test]
		fn test_renamed_join_column_is_metadata() {
			let (mut catalog, c, o) = parent_and_child();
			catalog.add_join(c, o, vec![JoinColumn::new("cid", "cid")]).unwrap();
			catalog.regroup();

			let mut target = staged(&catalog, o);
			let join = target.catalog.table(o).unwrap().parent_join.unwrap();
			target.catalog.column_mut(o, "cid").unwrap().name = "customer".into();
			target.catalog.table_mut(o).unwrap().indexes[1].columns[0].column = "customer".into();
			let mut joined = target.catalog.join(join).unwrap().clone();
			joined.columns[0].child = "customer".into();
			target.catalog.clear_parent_join(o).unwrap();
			target.catalog.add_join(c, o, joined.columns).unwrap();

			let level =
				classify(&catalog, o, &target, &[TableChange::modify("cid", "customer")], &[]).unwrap();
			assert_eq!(level, ChangeLevel::Metadata);
		}
	}
}
