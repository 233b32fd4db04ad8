// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use sqlayer_type::{Error, Result};

mod catalog;
pub mod column;
pub mod group;
pub mod id;
pub mod index;
pub mod join;
pub mod select;
pub mod sequence;
pub mod table;
mod validate;

pub use catalog::Catalog;
pub use column::{ColumnDef, ColumnDefault};
pub use group::GroupDef;
pub use id::{GroupId, JoinId, SequenceId, TableId};
pub use index::{IndexColumn, IndexDef, PRIMARY};
pub use join::{JoinColumn, JoinDef};
pub use select::{AllSelector, GroupSelector, Selector};
pub use sequence::SequenceDef;
pub use table::{TableDef, TableName};
