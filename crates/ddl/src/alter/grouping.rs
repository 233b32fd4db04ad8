// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_catalog::{Catalog, JoinColumn, TableDef};
use sqlayer_type::{
	diagnostic::{
		alter::{join_column_mismatch, join_to_multiple_parents, no_such_grouping_fk},
		catalog::join_to_unknown_table,
	},
	return_error,
};
use tracing::{debug, instrument};

use crate::{alter::route::ForeignKeyEdit, ast::AstForeignKey};

/// Apply grouping foreign key edits to the staged copy of `table`.
///
/// `live` is the catalog the statement was planned against; a parent
/// outside the staged group is copied from it.
#[instrument(name = "ddl::alter::grouping", level = "trace", skip_all, fields(table = %original.name))]
pub(crate) fn apply_foreign_keys(
	staged: &mut Catalog,
	live: &Catalog,
	original: &TableDef,
	default_schema: &str,
	edits: &[ForeignKeyEdit<'_>],
) -> crate::Result<()> {
	for edit in edits {
		match edit {
			ForeignKeyEdit::Drop => {
				if staged.clear_parent_join(original.id)?.is_none() {
					// a root has no grouping foreign key to drop
					return_error!(no_such_grouping_fk(&original.name));
				}
				debug!("detached from parent");
			}
			ForeignKeyEdit::Add(fk) => add_foreign_key(staged, live, original, default_schema, fk)?,
		}
	}
	Ok(())
}

fn add_foreign_key(
	staged: &mut Catalog,
	live: &Catalog,
	original: &TableDef,
	default_schema: &str,
	fk: &AstForeignKey,
) -> crate::Result<()> {
	if original.parent_join.is_some() || staged.parent_join(original.id)?.is_some() {
		return_error!(join_to_multiple_parents(&original.name));
	}

	let parent_name = fk.parent.resolve(default_schema);
	let parent = match staged.find_table_by_name(&parent_name) {
		Some(parent) => parent.id,
		None => {
			let Some(parent) = live.find_table_by_name(&parent_name) else {
				return_error!(join_to_unknown_table(&original.name, &parent_name));
			};
			let id = parent.id;
			staged.copy_table_from(live, id)?;
			debug!(parent = %parent_name, "parent copied into staged group");
			id
		}
	};

	let parent_columns = parent_columns(staged.table(parent)?, fk);
	if parent_columns.len() != fk.columns.len() {
		return_error!(join_column_mismatch(&original.name, &parent_name, fk.columns.len(), parent_columns.len()));
	}
	let columns = parent_columns
		.into_iter()
		.zip(&fk.columns)
		.map(|(parent, child)| JoinColumn::new(parent, child.as_str()))
		.collect();

	staged.table_mut(original.id)?.group = None;
	staged.add_join(parent, original.id, columns)?;
	debug!(parent = %parent_name, "joined to parent");
	Ok(())
}

/// The listed parent columns, or the parent's primary key when none are.
fn parent_columns(parent: &TableDef, fk: &AstForeignKey) -> Vec<String> {
	if !fk.parent_columns.is_empty() {
		return fk.parent_columns.clone();
	}
	parent.primary_key().map(|pk| pk.column_names().map(str::to_string).collect()).unwrap_or_default()
}
