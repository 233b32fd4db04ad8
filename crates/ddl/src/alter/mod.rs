// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Planning of `ALTER TABLE` and `ALTER GROUP` statements.
//!
//! A statement is either forwarded directly (statistics, truncate, rename)
//! or staged on a clone of the table's group: the table is rebuilt from its
//! original columns and indexes with the statement's edits applied, and the
//! result is handed to [`DdlFunctions::alter_table`] together with the
//! column and index change lists.

mod column;
mod grouping;
mod index;
mod route;

use sqlayer_catalog::{Catalog, GroupSelector, TableId};
use sqlayer_type::{
	diagnostic::{alter::unsupported_sql, catalog::index_not_found},
	error, return_error,
};
use tracing::{debug, instrument};

use crate::{
	ast::{AstAlterGroup, AstAlterTable, AstAlterTableOperation, AstTableElement},
	classify::ChangeLevel,
	config::AlterConfig,
	context::QueryContext,
	interface::{DdlFunctions, DmlFunctions, Session, StagedTable},
};
use route::{Route, Routed};

#[derive(Debug, Clone, Default)]
pub struct AlterTableDdl {
	config: AlterConfig,
}

impl AlterTableDdl {
	pub fn new(config: AlterConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &AlterConfig {
		&self.config
	}

	/// Plan and apply one `ALTER TABLE` statement.
	///
	/// Returns the change level reported by `ddl`, or `None` for the
	/// statistics and truncate forms which do not alter the definition.
	#[instrument(name = "ddl::alter_table", level = "debug", skip_all, fields(table = %ast.table))]
	pub fn alter_table(
		&self,
		ddl: &dyn DdlFunctions,
		dml: &dyn DmlFunctions,
		session: &Session,
		default_schema: &str,
		ast: &AstAlterTable,
		ctx: &dyn QueryContext,
	) -> crate::Result<Option<ChangeLevel>> {
		let catalog = ddl.catalog(session);
		let name = ast.table.resolve(default_schema);
		let table = catalog.table_by_name(&name)?;

		match &ast.operation {
			AstAlterTableOperation::UpdateStatistics {
				index,
			} => {
				let indexes = match index {
					Some(index) => {
						if table.index(index).is_none() {
							return_error!(index_not_found(&name, index));
						}
						Some(std::slice::from_ref(index))
					}
					None => None,
				};
				ddl.update_table_statistics(session, &name, indexes)?;
				Ok(None)
			}
			AstAlterTableOperation::Truncate {
				cascade,
			} => {
				dml.truncate_table(session, table.id, *cascade)?;
				Ok(None)
			}
			AstAlterTableOperation::Elements(elements) => {
				match self.plan_elements(ddl, session, default_schema, &catalog, table.id, elements, ctx)? {
					Some(level) => Ok(Some(level)),
					None => Err(error!(unsupported_sql(ast)).with_statement(ast.to_string())),
				}
			}
		}
	}

	/// Plan one `ALTER GROUP` statement as the grouping foreign key change
	/// it stands for on the child table.
	#[instrument(name = "ddl::alter_group", level = "debug", skip_all)]
	pub fn alter_group(
		&self,
		ddl: &dyn DdlFunctions,
		session: &Session,
		default_schema: &str,
		ast: &AstAlterGroup,
		ctx: &dyn QueryContext,
	) -> crate::Result<ChangeLevel> {
		let statement = ast.to_alter_table();
		let AstAlterTableOperation::Elements(elements) = &statement.operation else {
			return_error!(unsupported_sql(&statement));
		};

		let catalog = ddl.catalog(session);
		let table = catalog.table_by_name(&statement.table.resolve(default_schema))?.id;
		self.plan_elements(ddl, session, default_schema, &catalog, table, elements, ctx)?
			.ok_or_else(|| error!(unsupported_sql(&statement)).with_statement(statement.to_string()))
	}

	/// Stage `elements` against `table` of `catalog` and hand the result to
	/// `ddl`. `None` means the element list has nothing this planner handles.
	#[allow(clippy::too_many_arguments)]
	pub fn plan_elements(
		&self,
		ddl: &dyn DdlFunctions,
		session: &Session,
		default_schema: &str,
		catalog: &Catalog,
		table: TableId,
		elements: &[AstTableElement],
		ctx: &dyn QueryContext,
	) -> crate::Result<Option<ChangeLevel>> {
		let original = catalog.table(table)?;
		let routed = match route::route(original, elements)? {
			Route::Pipeline(routed) => routed,
			Route::RenameTable(new_name) => {
				let new_name = new_name.resolve(default_schema);
				ddl.rename_table(session, &original.name, &new_name)?;
				debug!(to = %new_name, "table renamed");
				return Ok(Some(ChangeLevel::Metadata));
			}
			Route::Unsupported => {
				debug!("statement has no supported elements");
				return Ok(None);
			}
		};
		let Routed {
			column_changes,
			mut index_changes,
			columns,
			constraints,
			foreign_keys,
		} = routed;

		ctx.check_cancelled()?;
		column::check_column_changes(original, &column_changes)?;

		let mut staged = catalog.clone_selected(&GroupSelector::for_table(catalog, table)?);
		column::reset_table(&mut staged, original, &column_changes)?;
		column::apply_column_edits(&mut staged, table, &columns, ctx)?;

		ctx.check_cancelled()?;
		index::check_index_changes(original, &index_changes)?;
		index::copy_indexes(&mut staged, original, &column_changes, &mut index_changes)?;
		index::add_constraints(
			&mut staged,
			original,
			&constraints,
			self.config.index_name_max_length,
			&mut index_changes,
		)?;

		grouping::apply_foreign_keys(&mut staged, catalog, original, default_schema, &foreign_keys)?;
		staged.validate()?;

		ctx.check_cancelled()?;
		debug!(
			columns = column_changes.len(),
			indexes = index_changes.len(),
			"staged alteration"
		);
		let level = ddl.alter_table(
			session,
			&original.name,
			StagedTable::new(staged, table),
			&column_changes,
			&index_changes,
			ctx,
		)?;
		debug!(%level, "table altered");
		Ok(Some(level))
	}
}
