// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
	group::GroupDef,
	id::{GroupId, JoinId, SequenceId, TableId},
	join::JoinDef,
	sequence::SequenceDef,
	table::TableDef,
};

/// Arena of catalog entities addressed by id handles.
///
/// Ids are allocated from a single counter. Clones produced by
/// [`Catalog::clone_selected`] keep the ids of the copied entities and the
/// counter, so entities created on a clone never collide with the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
	pub(crate) tables: IndexMap<TableId, TableDef>,
	pub(crate) joins: IndexMap<JoinId, JoinDef>,
	pub(crate) groups: IndexMap<GroupId, GroupDef>,
	pub(crate) sequences: IndexMap<SequenceId, SequenceDef>,
	pub(crate) next_id: u64,
}

impl Catalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn allocate_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
		self.tables.values()
	}

	pub fn joins(&self) -> impl Iterator<Item = &JoinDef> {
		self.joins.values()
	}

	pub fn groups(&self) -> impl Iterator<Item = &GroupDef> {
		self.groups.values()
	}

	pub fn sequences(&self) -> impl Iterator<Item = &SequenceDef> {
		self.sequences.values()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}
