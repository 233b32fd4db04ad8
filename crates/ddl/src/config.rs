// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builder pattern for configuring the alter planner

use serde::{Deserialize, Serialize};

/// How a table level alteration is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RewriteStrategy {
	/// Replace the definition under the existing table id
	#[default]
	InPlace,
	/// Build the new definition under a temporary name, then swap names
	CopyAndSwap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterConfig {
	/// Name the new definition is created under during a copy and swap
	pub temp_table_name_new: String,
	/// Name the original table is moved to during a copy and swap
	pub temp_table_name_old: String,
	pub rewrite: RewriteStrategy,
	/// Upper bound for generated index names
	pub index_name_max_length: usize,
}

impl Default for AlterConfig {
	fn default() -> Self {
		Self {
			temp_table_name_new: "__TEMP_NEW".to_string(),
			temp_table_name_old: "__TEMP_OLD".to_string(),
			rewrite: RewriteStrategy::InPlace,
			index_name_max_length: 64,
		}
	}
}

pub struct AlterBuilder {
	temp_table_name_new: Option<String>,
	temp_table_name_old: Option<String>,
	rewrite: Option<RewriteStrategy>,
	index_name_max_length: Option<usize>,
}

impl Default for AlterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AlterBuilder {
	pub fn new() -> Self {
		Self {
			temp_table_name_new: None,
			temp_table_name_old: None,
			rewrite: None,
			index_name_max_length: None,
		}
	}

	pub fn temp_table_names(mut self, new: impl Into<String>, old: impl Into<String>) -> Self {
		self.temp_table_name_new = Some(new.into());
		self.temp_table_name_old = Some(old.into());
		self
	}

	/// Defaults to [`RewriteStrategy::InPlace`] if not set.
	pub fn rewrite(mut self, strategy: RewriteStrategy) -> Self {
		self.rewrite = Some(strategy);
		self
	}

	pub fn index_name_max_length(mut self, length: usize) -> Self {
		self.index_name_max_length = Some(length);
		self
	}

	pub fn build(self) -> AlterConfig {
		let defaults = AlterConfig::default();
		AlterConfig {
			temp_table_name_new: self.temp_table_name_new.unwrap_or(defaults.temp_table_name_new),
			temp_table_name_old: self.temp_table_name_old.unwrap_or(defaults.temp_table_name_old),
			rewrite: self.rewrite.unwrap_or(defaults.rewrite),
			index_name_max_length: self.index_name_max_length.unwrap_or(defaults.index_name_max_length),
		}
	}
}
