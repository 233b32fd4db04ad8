// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use sqlayer_catalog::{TableDef, TableId};
use sqlayer_type::{diagnostic::catalog::table_not_found, return_error};
use tracing::trace;

/// Produces the row records of a table
pub trait RowSource: Send + Sync {
	fn name(&self) -> &'static str;

	fn rows(&self, table: &TableDef) -> crate::Result<Vec<Vec<u8>>>;
}

/// Row records held in memory, keyed by table
#[derive(Default)]
pub struct MemoryRowSource {
	rows: RwLock<HashMap<TableId, Vec<Vec<u8>>>>,
}

impl MemoryRowSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, table: TableId, record: Vec<u8>) {
		self.rows.write().entry(table).or_default().push(record);
	}

	/// Remove every row of the table, returning how many were removed.
	pub fn truncate(&self, table: TableId) -> usize {
		self.rows.write().remove(&table).map(|rows| rows.len()).unwrap_or(0)
	}

	pub fn count(&self, table: TableId) -> usize {
		self.rows.read().get(&table).map(Vec::len).unwrap_or(0)
	}
}

impl RowSource for MemoryRowSource {
	fn name(&self) -> &'static str {
		"memory"
	}

	fn rows(&self, table: &TableDef) -> crate::Result<Vec<Vec<u8>>> {
		Ok(self.rows.read().get(&table.id).cloned().unwrap_or_default())
	}
}

type Factory = Box<dyn Fn(&TableDef) -> crate::Result<Vec<Vec<u8>>> + Send + Sync>;

/// Rows of virtual tables, produced on demand by registered factories
#[derive(Default)]
pub struct VirtualRowSource {
	factories: RwLock<HashMap<TableId, Factory>>,
}

impl VirtualRowSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<F>(&self, table: TableId, factory: F)
	where
		F: Fn(&TableDef) -> crate::Result<Vec<Vec<u8>>> + Send + Sync + 'static,
	{
		self.factories.write().insert(table, Box::new(factory));
	}
}

impl RowSource for VirtualRowSource {
	fn name(&self) -> &'static str {
		"virtual"
	}

	fn rows(&self, table: &TableDef) -> crate::Result<Vec<Vec<u8>>> {
		let factories = self.factories.read();
		let Some(factory) = factories.get(&table.id) else {
			return_error!(table_not_found(&table.name.schema, &table.name.name));
		};
		factory(table)
	}
}

/// The pair of row sources a plan reads from, chosen per table
#[derive(Clone)]
pub struct RowSources {
	store: Arc<dyn RowSource>,
	virtual_tables: Arc<dyn RowSource>,
}

impl RowSources {
	pub fn new(store: Arc<dyn RowSource>, virtual_tables: Arc<dyn RowSource>) -> Self {
		Self { store, virtual_tables }
	}

	pub fn select(&self, table: &TableDef) -> &dyn RowSource {
		let source = if table.is_virtual { &self.virtual_tables } else { &self.store };
		trace!(table = %table.name, source = source.name(), "selected row source");
		source.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use sqlayer_catalog::TableName;
	use sqlayer_type::diagnostic::code;

	use super::*;

	fn table(id: u64, is_virtual: bool) -> TableDef {
		TableDef {
			is_virtual,
			..TableDef::new(TableId(id), TableName::new("test", format!("t{}", id)))
		}
	}

	fn sources() -> (Arc<MemoryRowSource>, Arc<VirtualRowSource>, RowSources) {
		let store = Arc::new(MemoryRowSource::new());
		let virtual_tables = Arc::new(VirtualRowSource::new());
		let sources = RowSources::new(store.clone(), virtual_tables.clone());
		(store, virtual_tables, sources)
	}

	#[test]
	fn test_select_by_virtual_flag() {
		let (_, _, sources) = sources();
		assert_eq!(sources.select(&table(1, false)).name(), "memory");
		assert_eq!(sources.select(&table(2, true)).name(), "virtual");
	}

	#[test]
	fn test_memory_rows() {
		let (store, _, sources) = sources();
		store.insert(TableId(1), vec![1]);
		store.insert(TableId(1), vec![2]);
		assert_eq!(sources.select(&table(1, false)).rows(&table(1, false)).unwrap(), vec![vec![1], vec![2]]);
		assert_eq!(store.truncate(TableId(1)), 2);
		assert_eq!(store.count(TableId(1)), 0);
	}

	#[test]
	fn test_virtual_factory() {
		let (_, virtual_tables, sources) = sources();
		virtual_tables.register(TableId(2), |def| Ok(vec![def.name.name.as_bytes().to_vec()]));
		let t2 = table(2, true);
		assert_eq!(sources.select(&t2).rows(&t2).unwrap(), vec![b"t2".to_vec()]);
	}

	#[test]
	fn test_virtual_without_factory() {
		let (_, _, sources) = sources();
		let t3 = table(3, true);
		assert_eq!(sources.select(&t3).rows(&t3).unwrap_err().code, code::NO_SUCH_TABLE);
	}
}
