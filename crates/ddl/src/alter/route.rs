// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_catalog::{PRIMARY, TableDef};
use sqlayer_type::{
	diagnostic::{
		alter::{unsupported_check_constraint, unsupported_fk_index},
		catalog::{column_not_found, unique_not_found},
	},
	return_error,
};
use tracing::trace;

use crate::{
	ast::{
		AstColumnDefinition, AstColumnModification, AstConstraint, AstConstraintKind, AstDropConstraint,
		AstForeignKey, AstTableElement, QualifiedName,
	},
	change::TableChange,
};

pub(crate) enum ColumnEdit<'a> {
	Add(&'a AstColumnDefinition),
	Modify {
		name: &'a str,
		modification: &'a AstColumnModification,
	},
}

pub(crate) enum ForeignKeyEdit<'a> {
	Add(&'a AstForeignKey),
	Drop,
}

/// Elements of one statement, sorted into the buckets the pipeline works on.
#[derive(Default)]
pub(crate) struct Routed<'a> {
	pub column_changes: Vec<TableChange>,
	pub index_changes: Vec<TableChange>,
	pub columns: Vec<ColumnEdit<'a>>,
	pub constraints: Vec<&'a AstConstraint>,
	pub foreign_keys: Vec<ForeignKeyEdit<'a>>,
}

pub(crate) enum Route<'a> {
	Pipeline(Routed<'a>),
	RenameTable(&'a QualifiedName),
	Unsupported,
}

/// Walk the elements once. The first rename-table or unhandled element
/// decides the whole statement.
pub(crate) fn route<'a>(table: &TableDef, elements: &'a [AstTableElement]) -> crate::Result<Route<'a>> {
	if elements.is_empty() {
		return Ok(Route::Unsupported);
	}

	let mut routed = Routed::default();
	for element in elements {
		trace!(%element, "routing element");
		match element {
			AstTableElement::AddColumn(definition) => {
				routed.column_changes.push(TableChange::add(definition.name.as_str()));
				routed.columns.push(ColumnEdit::Add(definition));
			}
			AstTableElement::DropColumn {
				name,
			} => routed.column_changes.push(TableChange::drop(name.as_str())),
			AstTableElement::ModifyColumn {
				name,
				modification,
			} => {
				routed.column_changes.push(TableChange::modify(name.as_str(), name.as_str()));
				routed.columns.push(ColumnEdit::Modify {
					name: name.as_str(),
					modification,
				});
			}
			AstTableElement::AddForeignKey(fk) => {
				if !fk.grouping {
					return_error!(unsupported_fk_index());
				}
				routed.foreign_keys.push(ForeignKeyEdit::Add(fk));
			}
			AstTableElement::DropForeignKey {
				grouping,
				..
			} => {
				if !grouping {
					return_error!(unsupported_fk_index());
				}
				routed.foreign_keys.push(ForeignKeyEdit::Drop);
			}
			AstTableElement::AddConstraint(constraint) => {
				if let AstConstraintKind::Check(_) = constraint.kind {
					return_error!(unsupported_check_constraint());
				}
				routed.constraints.push(constraint);
			}
			AstTableElement::DropConstraint(constraint) => {
				let name = match constraint {
					AstDropConstraint::PrimaryKey => PRIMARY,
					AstDropConstraint::Unique(name) | AstDropConstraint::Named(name) => {
						if table.index(name).is_some_and(|index| !index.unique) {
							return_error!(unique_not_found(&table.name, name));
						}
						name.as_str()
					}
					AstDropConstraint::Check(_) => return_error!(unsupported_check_constraint()),
				};
				routed.index_changes.push(TableChange::drop(name));
			}
			AstTableElement::RenameTable {
				new_name,
			} => return Ok(Route::RenameTable(new_name)),
			AstTableElement::RenameColumn {
				name,
				new_name,
			} => {
				if table.column(name).is_none() {
					return_error!(column_not_found(name));
				}
				routed.column_changes.push(TableChange::modify(name.as_str(), new_name.as_str()));
			}
			AstTableElement::Other(_) => return Ok(Route::Unsupported),
		}
	}
	Ok(Route::Pipeline(routed))
}
