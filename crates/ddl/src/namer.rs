// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use sqlayer_catalog::{PRIMARY, TableDef};

/// Names constraints that were declared without one.
///
/// A generated name is the first key column, suffixed `_2`, `_3`, ... until
/// it is unused on the table.
#[derive(Debug, Clone)]
pub struct DefaultIndexNamer {
	taken: HashSet<String>,
	max_length: usize,
}

impl DefaultIndexNamer {
	pub fn for_table(table: &TableDef, max_length: usize) -> Self {
		Self {
			taken: table.indexes.iter().map(|i| i.name.clone()).collect(),
			max_length: max_length.max(1),
		}
	}

	/// Reserve `requested`, or a generated name when `None`.
	pub fn name(&mut self, requested: Option<&str>, columns: &[String]) -> String {
		let name = match requested {
			Some(name) => name.to_string(),
			None => self.generate(columns.first().map(String::as_str).unwrap_or("index")),
		};
		self.taken.insert(name.clone());
		name
	}

	/// Reserve [`PRIMARY`].
	pub fn primary(&mut self) -> String {
		self.taken.insert(PRIMARY.to_string());
		PRIMARY.to_string()
	}

	fn generate(&self, base: &str) -> String {
		let base = self.truncate(base, 0);
		if !self.taken.contains(&base) && base != PRIMARY {
			return base;
		}
		(2..)
			.map(|n| {
				let suffix = format!("_{}", n);
				format!("{}{}", self.truncate(&base, suffix.len()), suffix)
			})
			.find(|candidate| !self.taken.contains(candidate))
			.unwrap_or_default()
	}

	fn truncate(&self, name: &str, reserve: usize) -> String {
		let limit = self.max_length.saturating_sub(reserve).max(1);
		name.chars().take(limit).collect()
	}
}
