// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::str::FromStr;

use sqlayer_catalog::{Catalog, ColumnDef, ColumnDefault, SequenceDef, TableDef, TableId};
use sqlayer_type::{
	TypeDescriptor,
	diagnostic::{
		alter::{column_already_generated, column_not_generated, unsupported_sql},
		catalog::column_not_found,
	},
	return_error,
};
use tracing::{debug, trace};

use crate::{
	alter::route::ColumnEdit,
	ast::{AstColumnDefinition, AstColumnModification, AstIdentity, AstIdentityChange},
	cast,
	change::{ChangeKind, TableChange, new_name},
	context::QueryContext,
};

/// Every non-add change must name a column of the original table.
pub(crate) fn check_column_changes(original: &TableDef, changes: &[TableChange]) -> crate::Result<()> {
	for change in changes.iter().filter(|c| c.kind != ChangeKind::Add) {
		let name = change.name();
		if original.column(name).is_none() {
			return_error!(column_not_found(name));
		}
	}
	Ok(())
}

/// Drop every column and index of the staged copy, then re-add the
/// surviving columns in their original order under their new names.
pub(crate) fn reset_table(
	staged: &mut Catalog,
	original: &TableDef,
	column_changes: &[TableChange],
) -> crate::Result<()> {
	let table = original.id;
	staged.drop_columns(table)?;
	staged.remove_indexes(table)?;

	for column in &original.columns {
		if let Some(name) = new_name(column_changes, &column.name) {
			let mut copy = column.clone();
			copy.name = name.to_string();
			staged.add_column(table, copy)?;
		}
	}

	let broken = staged.remap_join_columns(table, |name| new_name(column_changes, name).map(str::to_string))?;
	for join in broken {
		debug!(parent = %join.parent, child = %join.child, "join lost a column, detached");
	}
	Ok(())
}

pub(crate) fn apply_column_edits(
	staged: &mut Catalog,
	table: TableId,
	edits: &[ColumnEdit<'_>],
	ctx: &dyn QueryContext,
) -> crate::Result<()> {
	for edit in edits {
		match edit {
			ColumnEdit::Add(definition) => add_column(staged, table, definition)?,
			ColumnEdit::Modify {
				name,
				modification,
			} => modify_column(staged, table, name, modification, ctx)?,
		}
	}
	Ok(())
}

fn add_column(staged: &mut Catalog, table: TableId, definition: &AstColumnDefinition) -> crate::Result<()> {
	let mut column = ColumnDef::new(definition.name.as_str(), definition.descriptor.clone());
	column.nullable = definition.nullable;
	column.default = definition.default.clone();
	if let Some(identity) = definition.identity {
		column.identity = Some(create_identity(staged, table, &definition.name, identity)?);
		column.default = None;
	}
	trace!(column = %column.name, "adding column");
	staged.add_column(table, column)
}

fn modify_column(
	staged: &mut Catalog,
	table: TableId,
	name: &str,
	modification: &AstColumnModification,
	ctx: &dyn QueryContext,
) -> crate::Result<()> {
	let table_name = staged.table(table)?.name.clone();
	let Some(column) = staged.table(table)?.column(name).cloned() else {
		return_error!(column_not_found(name));
	};

	match modification {
		AstColumnModification::Default(default) => {
			if let Some(sequence) = column.identity {
				staged.remove_sequence(sequence)?;
			}
			let target = staged.column_mut(table, name)?;
			target.identity = None;
			target.default = default.clone();
		}
		AstColumnModification::Null => staged.column_mut(table, name)?.nullable = true,
		AstColumnModification::NotNull => staged.column_mut(table, name)?.nullable = false,
		AstColumnModification::Type(descriptor) => {
			let default = match column.default {
				Some(ColumnDefault::Literal(literal)) => {
					Some(ColumnDefault::Literal(reevaluate_default(&literal, descriptor, ctx)))
				}
				other => other,
			};
			let target = staged.column_mut(table, name)?;
			target.descriptor = descriptor.clone();
			target.default = default;
		}
		AstColumnModification::Identity(AstIdentityChange::Create(identity)) => {
			if column.identity.is_some() {
				return_error!(column_already_generated(&table_name, name));
			}
			let sequence = create_identity(staged, table, name, *identity)?;
			let target = staged.column_mut(table, name)?;
			target.identity = Some(sequence);
			target.default = None;
		}
		AstColumnModification::Identity(AstIdentityChange::SetIncrement(increment)) => {
			let Some(current) = column.identity else {
				return_error!(column_not_generated(&table_name, name));
			};
			let previous = staged.remove_sequence(current)?;
			let sequence = staged.add_sequence(SequenceDef {
				increment: *increment,
				..previous
			});
			staged.column_mut(table, name)?.identity = Some(sequence);
		}
		AstColumnModification::Identity(AstIdentityChange::Restart(_)) => {
			return_error!(unsupported_sql(format!("ALTER COLUMN {} RESTART WITH", name)));
		}
	}
	Ok(())
}

fn create_identity(
	staged: &mut Catalog,
	table: TableId,
	column: &str,
	identity: AstIdentity,
) -> crate::Result<sqlayer_catalog::SequenceId> {
	let table_name = &staged.table(table)?.name;
	let sequence = SequenceDef::new(
		table_name.schema.as_str(),
		format!("{}_{}_seq", table_name.name, column),
		identity.start,
		identity.increment,
	);
	Ok(staged.add_sequence(sequence))
}

/// Convert a literal default to an integer target type, clamping it into
/// the type's range. Other targets keep the literal.
fn reevaluate_default(literal: &str, descriptor: &TypeDescriptor, ctx: &dyn QueryContext) -> String {
	let Some((min, max)) = descriptor.integer_range() else {
		return literal.to_string();
	};
	let min = min.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
	let max = max.clamp(i64::MIN as i128, i64::MAX as i128) as i64;

	let value = match f64::from_str(literal.trim()) {
		Ok(value) => value,
		Err(_) => f64::from_str(&cast::truncate_non_digits(literal, ctx)).unwrap_or_default(),
	};
	let result = cast::round(max, min, value, ctx).to_string();
	if result != literal {
		debug!(from = literal, to = %result, "default re-evaluated");
	}
	result
}
