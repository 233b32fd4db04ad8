// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use sqlayer_type::{error, internal};
use tracing::instrument;

use crate::{Catalog, id::SequenceId};

/// Identity generator attached to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDef {
	pub id: SequenceId,
	pub schema: String,
	pub name: String,
	pub start: i64,
	pub increment: i64,
	pub min: i64,
	pub max: i64,
	pub cycle: bool,
}

impl SequenceDef {
	pub fn new(schema: impl Into<String>, name: impl Into<String>, start: i64, increment: i64) -> Self {
		Self {
			id: SequenceId(0),
			schema: schema.into(),
			name: name.into(),
			start,
			increment,
			min: 1,
			max: i64::MAX,
			cycle: false,
		}
	}
}

impl Catalog {
	/// Register a sequence under a fresh id, ignoring the id it carries.
	#[instrument(name = "catalog::sequence::add", level = "trace", skip(self, sequence), fields(sequence = %sequence.name))]
	pub fn add_sequence(&mut self, mut sequence: SequenceDef) -> SequenceId {
		let id = SequenceId(self.allocate_id());
		sequence.id = id;
		self.sequences.insert(id, sequence);
		id
	}

	#[instrument(name = "catalog::sequence::remove", level = "trace", skip(self))]
	pub fn remove_sequence(&mut self, id: SequenceId) -> crate::Result<SequenceDef> {
		self.sequences.shift_remove(&id).ok_or_else(|| error!(internal!("sequence {} is not in the catalog", id)))
	}

	pub fn sequence(&self, id: SequenceId) -> crate::Result<&SequenceDef> {
		self.sequences.get(&id).ok_or_else(|| error!(internal!("sequence {} is not in the catalog", id)))
	}

	pub fn find_sequence_by_name(&self, schema: &str, name: &str) -> Option<&SequenceDef> {
		self.sequences.values().find(|s| s.schema == schema && s.name == name)
	}
}
