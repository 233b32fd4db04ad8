// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod builder;
pub mod ddl;
pub mod logging;

pub use builder::CatalogBuilder;
pub use ddl::{DdlEvent, MemoryDdl};
pub use logging::init_tracing;
pub use sqlayer_row::{FieldDef, RowBuilder, RowLayout};
