// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fluent construction of catalogs for tests.
//!
//! ```ignore
//! let catalog = CatalogBuilder::new("test")
//!     .table("c").column("cid", Type::BigInt).not_null().pk(["cid"])
//!     .table("o").column("oid", Type::BigInt).column("cid", Type::BigInt).pk(["oid"])
//!     .join_to("c", [("cid", "cid")])
//!     .build()?;
//! ```

use sqlayer_catalog::{Catalog, ColumnDef, ColumnDefault, IndexDef, JoinColumn, SequenceDef, TableName};
use sqlayer_type::TypeDescriptor;

struct TableSpec {
	name: TableName,
	columns: Vec<ColumnSpec>,
	indexes: Vec<IndexDef>,
	parent: Option<(TableName, Vec<JoinColumn>)>,
}

struct ColumnSpec {
	def: ColumnDef,
	identity: Option<(i64, i64)>,
}

pub struct CatalogBuilder {
	schema: String,
	tables: Vec<TableSpec>,
}

impl CatalogBuilder {
	pub fn new(schema: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			tables: vec![],
		}
	}

	/// Start a table in the builder's schema.
	pub fn table(self, name: impl Into<String>) -> Self {
		let schema = self.schema.clone();
		self.table_in(schema, name)
	}

	pub fn table_in(mut self, schema: impl Into<String>, name: impl Into<String>) -> Self {
		self.tables.push(TableSpec {
			name: TableName::new(schema, name),
			columns: vec![],
			indexes: vec![],
			parent: None,
		});
		self
	}

	/// Append a nullable column to the current table.
	pub fn column(mut self, name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
		self.current().columns.push(ColumnSpec {
			def: ColumnDef::new(name, descriptor),
			identity: None,
		});
		self
	}

	pub fn not_null(mut self) -> Self {
		if let Some(column) = self.current().columns.last_mut() {
			column.def.nullable = false;
		}
		self
	}

	pub fn default_value(mut self, literal: impl Into<String>) -> Self {
		if let Some(column) = self.current().columns.last_mut() {
			column.def.default = Some(ColumnDefault::Literal(literal.into()));
		}
		self
	}

	/// Back the current column by a sequence.
	pub fn generated(mut self, start: i64, increment: i64) -> Self {
		if let Some(column) = self.current().columns.last_mut() {
			column.identity = Some((start, increment));
		}
		self
	}

	pub fn pk<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
		self.current().indexes.push(IndexDef::primary(columns));
		self
	}

	pub fn index<S: Into<String>>(mut self, name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
		self.current().indexes.push(IndexDef::new(name, columns));
		self
	}

	pub fn unique<S: Into<String>>(mut self, name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
		self.current().indexes.push(IndexDef::unique(name, columns));
		self
	}

	/// Join the current table under `parent` of the same schema. Pairs are
	/// `(child column, parent column)`.
	pub fn join_to<'a>(mut self, parent: impl Into<String>, columns: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let parent = TableName::new(self.schema.as_str(), parent);
		let columns = columns.into_iter().map(|(child, parent)| JoinColumn::new(parent, child)).collect();
		self.current().parent = Some((parent, columns));
		self
	}

	/// Create every table, then join them in declaration order.
	pub fn build(self) -> sqlayer_type::Result<Catalog> {
		let mut catalog = Catalog::new();
		let mut joins = vec![];

		for spec in self.tables {
			let id = catalog.add_table(spec.name.clone())?;
			for column in spec.columns {
				let mut def = column.def;
				if let Some((start, increment)) = column.identity {
					let sequence = SequenceDef::new(
						spec.name.schema.as_str(),
						format!("{}_{}_seq", spec.name.name, def.name),
						start,
						increment,
					);
					def.identity = Some(catalog.add_sequence(sequence));
				}
				catalog.add_column(id, def)?;
			}
			for index in spec.indexes {
				catalog.add_index(id, index)?;
			}
			if let Some(parent) = spec.parent {
				joins.push((id, parent));
			}
		}

		for (child, (parent, columns)) in joins {
			let parent = catalog.table_by_name(&parent)?.id;
			catalog.add_join(parent, child, columns)?;
		}
		catalog.regroup();
		catalog.validate()?;
		Ok(catalog)
	}

	fn current(&mut self) -> &mut TableSpec {
		if self.tables.is_empty() {
			let schema = self.schema.clone();
			self.tables.push(TableSpec {
				name: TableName::new(schema, "t"),
				columns: vec![],
				indexes: vec![],
				parent: None,
			});
		}
		let last = self.tables.len() - 1;
		&mut self.tables[last]
	}
}
