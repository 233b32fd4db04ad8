// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory implementation of the catalog mutation interface.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use sqlayer_catalog::{Catalog, JoinColumn, TableDef, TableId, TableName};
use sqlayer_ddl::{
	AlterConfig, ChangeLevel, DdlFunctions, DmlFunctions, QueryContext, RewritePlan, RewriteStrategy, Session,
	StagedTable, TableChange, TableCopier, classify,
};
use sqlayer_row::{MemoryRowSource, RowSource};
use sqlayer_type::{
	diagnostic::catalog::{duplicate_table_name, table_not_found},
	return_error,
};
use tracing::{debug, instrument};

/// Calls made against a [`MemoryDdl`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlEvent {
	Created(TableName),
	Renamed {
		from: TableName,
		to: TableName,
	},
	Dropped(TableName),
	Statistics {
		table: TableName,
		indexes: Option<Vec<String>>,
	},
	Truncated {
		table: TableId,
		cascade: bool,
	},
	Altered {
		table: TableName,
		level: ChangeLevel,
		column_changes: Vec<TableChange>,
		index_changes: Vec<TableChange>,
	},
}

pub struct MemoryDdl {
	catalog: RwLock<Arc<Catalog>>,
	config: AlterConfig,
	rows: MemoryRowSource,
	copier: Option<Box<dyn TableCopier + Send + Sync>>,
	events: Mutex<Vec<DdlEvent>>,
}

impl MemoryDdl {
	pub fn new(catalog: Catalog) -> Self {
		Self::with_config(catalog, AlterConfig::default())
	}

	pub fn with_config(catalog: Catalog, config: AlterConfig) -> Self {
		Self {
			catalog: RwLock::new(Arc::new(catalog)),
			config,
			rows: MemoryRowSource::new(),
			copier: None,
			events: Mutex::new(vec![]),
		}
	}

	/// Copy rows with `copier` instead of moving the stored rows.
	pub fn with_copier(mut self, copier: impl TableCopier + Send + Sync + 'static) -> Self {
		self.copier = Some(Box::new(copier));
		self
	}

	pub fn snapshot(&self) -> Arc<Catalog> {
		self.catalog.read().clone()
	}

	pub fn table(&self, schema: &str, name: &str) -> sqlayer_type::Result<TableDef> {
		self.snapshot().table_by_name(&TableName::new(schema, name)).cloned()
	}

	pub fn rows(&self) -> &MemoryRowSource {
		&self.rows
	}

	pub fn events(&self) -> Vec<DdlEvent> {
		self.events.lock().clone()
	}

	pub fn altered(&self) -> Vec<DdlEvent> {
		self.events().into_iter().filter(|e| matches!(e, DdlEvent::Altered { .. })).collect()
	}

	fn record(&self, event: DdlEvent) {
		debug!(?event, "ddl");
		self.events.lock().push(event);
	}

	fn modify<T>(&self, f: impl FnOnce(&mut Catalog) -> sqlayer_type::Result<T>) -> sqlayer_type::Result<T> {
		let mut guard = self.catalog.write();
		let mut catalog = (**guard).clone();
		let result = f(&mut catalog)?;
		*guard = Arc::new(catalog);
		Ok(result)
	}

	fn find(&self, name: &TableName) -> sqlayer_type::Result<TableId> {
		Ok(self.snapshot().table_by_name(name)?.id)
	}

	/// Replace the definition of `table` by the staged one, keeping its id.
	fn apply_in_place(&self, table: TableId, target: &StagedTable) -> sqlayer_type::Result<()> {
		self.modify(|catalog| {
			let staged = target.def()?;
			let previous: Vec<_> = catalog.table(table)?.columns.iter().filter_map(|c| c.identity).collect();
			let children: Vec<TableId> = catalog.child_joins(table).map(|j| j.child).collect();
			for child in children {
				catalog.clear_parent_join(child)?;
			}
			catalog.clear_parent_join(table)?;

			let def = catalog.table_mut(table)?;
			def.name = staged.name.clone();
			def.columns = staged.columns.clone();
			def.indexes = staged.indexes.clone();

			adopt_sequences(catalog, table, target)?;
			for sequence in previous {
				let used = catalog.tables().any(|t| t.columns.iter().any(|c| c.identity == Some(sequence)));
				if !used {
					catalog.remove_sequence(sequence)?;
				}
			}
			attach_joins(catalog, table, target)?;
			catalog.regroup();
			catalog.validate()
		})
	}

	/// Rebuild `name` under a temporary table, then adopt the staged joins
	/// and sequences on the replacement.
	fn copy_and_swap(&self, session: &Session, name: &TableName, target: &StagedTable) -> sqlayer_type::Result<()> {
		self.check_swap(name, target)?;
		let plan = RewritePlan::new(&self.config, name.clone(), target.def()?.clone());
		let id = match &self.copier {
			Some(copier) => plan.execute(self, session, copier.as_ref())?,
			None => plan.execute(self, session, self)?,
		};
		self.modify(|catalog| swap_in(catalog, id, target))
	}

	/// Replay the swap on a scratch catalog. Nothing is renamed or dropped
	/// unless the replacement can adopt the staged joins.
	fn check_swap(&self, name: &TableName, target: &StagedTable) -> sqlayer_type::Result<()> {
		let mut scratch = (*self.snapshot()).clone();
		let old = scratch.table_by_name(name)?.id;
		let mut definition = target.def()?.clone();
		definition.name = TableName::new(name.schema.as_str(), self.config.temp_table_name_new.as_str());
		let id = scratch.create_table(definition)?;
		scratch.remove_table(old)?;
		scratch.rename_table(id, name.clone())?;
		scratch.regroup();
		swap_in(&mut scratch, id, target)
	}
}

/// Give the replacement `table` the sequences and joins of the staged copy.
fn swap_in(catalog: &mut Catalog, table: TableId, target: &StagedTable) -> sqlayer_type::Result<()> {
	adopt_sequences(catalog, table, target)?;
	for child in target.catalog.child_joins(target.table).map(|j| j.child) {
		if catalog.find_table(child).is_some() {
			catalog.clear_parent_join(child)?;
		}
	}
	attach_joins(catalog, table, target)?;
	catalog.regroup();
	catalog.validate()
}

/// Point the identity columns of `table` at live sequences, registering the
/// staged ones the live catalog does not hold.
fn adopt_sequences(catalog: &mut Catalog, table: TableId, target: &StagedTable) -> sqlayer_type::Result<()> {
	let identities: Vec<_> =
		catalog.table(table)?.columns.iter().filter_map(|c| c.identity.map(|s| (c.name.clone(), s))).collect();
	for (column, sequence) in identities {
		let staged = target.catalog.sequence(sequence)?;
		if catalog.sequence(sequence).is_ok_and(|live| live == staged) {
			continue;
		}
		let id = catalog.add_sequence(staged.clone());
		if let Some(def) = catalog.table_mut(table)?.column_mut(&column) {
			def.identity = Some(id);
		}
	}
	Ok(())
}

/// Join `table` to the parent and children the staged catalog gives it.
fn attach_joins(catalog: &mut Catalog, table: TableId, target: &StagedTable) -> sqlayer_type::Result<()> {
	if let Some(join) = target.catalog.parent_join(target.table)? {
		catalog.add_join(join.parent, table, join.columns.clone())?;
	}
	let children: Vec<(TableId, Vec<JoinColumn>)> =
		target.catalog.child_joins(target.table).map(|j| (j.child, j.columns.clone())).collect();
	for (child, columns) in children {
		if catalog.find_table(child).is_some() {
			catalog.add_join(table, child, columns)?;
		}
	}
	Ok(())
}

impl DdlFunctions for MemoryDdl {
	fn catalog(&self, _session: &Session) -> Arc<Catalog> {
		self.snapshot()
	}

	fn rename_table(&self, _session: &Session, current: &TableName, new_name: &TableName) -> sqlayer_type::Result<()> {
		self.modify(|catalog| {
			let Some(table) = catalog.find_table_by_name(current).map(|t| t.id) else {
				return_error!(table_not_found(&current.schema, &current.name));
			};
			if catalog.find_table_by_name(new_name).is_some() {
				return_error!(duplicate_table_name(new_name));
			}
			catalog.rename_table(table, new_name.clone())
		})?;
		self.record(DdlEvent::Renamed {
			from: current.clone(),
			to: new_name.clone(),
		});
		Ok(())
	}

	fn create_table(&self, _session: &Session, table: TableDef) -> sqlayer_type::Result<TableId> {
		let name = table.name.clone();
		let id = self.modify(|catalog| catalog.create_table(table))?;
		self.record(DdlEvent::Created(name));
		Ok(id)
	}

	fn drop_table(&self, _session: &Session, name: &TableName) -> sqlayer_type::Result<()> {
		let id = self.modify(|catalog| {
			let id = catalog.table_by_name(name)?.id;
			catalog.remove_table(id)?;
			catalog.regroup();
			Ok(id)
		})?;
		self.rows.truncate(id);
		self.record(DdlEvent::Dropped(name.clone()));
		Ok(())
	}

	#[instrument(name = "testing::memory_ddl::alter_table", level = "debug", skip_all, fields(table = %name))]
	fn alter_table(
		&self,
		session: &Session,
		name: &TableName,
		target: StagedTable,
		column_changes: &[TableChange],
		index_changes: &[TableChange],
		ctx: &dyn QueryContext,
	) -> sqlayer_type::Result<ChangeLevel> {
		let live = self.snapshot();
		let table = live.table_by_name(name)?.id;
		let level = classify(&live, table, &target, column_changes, index_changes)?;
		ctx.check_cancelled()?;

		match (self.config.rewrite, level) {
			(RewriteStrategy::CopyAndSwap, ChangeLevel::Table) => self.copy_and_swap(session, name, &target)?,
			_ => self.apply_in_place(table, &target)?,
		}
		self.record(DdlEvent::Altered {
			table: name.clone(),
			level,
			column_changes: column_changes.to_vec(),
			index_changes: index_changes.to_vec(),
		});
		Ok(level)
	}

	fn update_table_statistics(
		&self,
		_session: &Session,
		name: &TableName,
		indexes: Option<&[String]>,
	) -> sqlayer_type::Result<()> {
		self.find(name)?;
		self.record(DdlEvent::Statistics {
			table: name.clone(),
			indexes: indexes.map(<[String]>::to_vec),
		});
		Ok(())
	}
}

impl DmlFunctions for MemoryDdl {
	fn truncate_table(&self, _session: &Session, table: TableId, cascade: bool) -> sqlayer_type::Result<()> {
		let removed = self.rows.truncate(table);
		if cascade {
			let snapshot = self.snapshot();
			for child in snapshot.subtree(table).into_iter().skip(1) {
				self.rows.truncate(child);
			}
		}
		debug!(%table, removed, "truncated");
		self.record(DdlEvent::Truncated {
			table,
			cascade,
		});
		Ok(())
	}
}

/// Moves the stored rows of the source table to the destination.
impl TableCopier for MemoryDdl {
	fn copy_table(&self, _session: &Session, source: &TableName, destination: &TableName) -> sqlayer_type::Result<()> {
		let snapshot = self.snapshot();
		let source = snapshot.table_by_name(source)?;
		let destination = self.find(destination)?;
		for row in self.rows.rows(source)? {
			self.rows.insert(destination, row);
		}
		Ok(())
	}
}
