// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use sqlayer_type::{Error, Result};

pub mod alter;
pub mod ast;
pub mod cast;
pub mod change;
pub mod classify;
pub mod config;
pub mod context;
pub mod interface;
pub mod namer;
pub mod rewrite;

pub use alter::AlterTableDdl;
pub use change::{ChangeKind, TableChange};
pub use classify::{ChangeLevel, classify};
pub use config::{AlterBuilder, AlterConfig, RewriteStrategy};
pub use context::{ExecutionContext, QueryContext, TruncateNotice};
pub use interface::{DdlFunctions, DmlFunctions, Session, StagedTable};
pub use namer::DefaultIndexNamer;
pub use rewrite::{NoopCopier, RewritePlan, TableCopier};
