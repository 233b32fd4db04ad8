// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use sqlayer_type::{Error, Result};

mod builder;
pub mod charset;
pub mod decimal;
pub mod decode;
pub mod layout;
pub mod quote;
pub mod source;

pub use builder::RowBuilder;
pub use charset::{Charset, CharsetRegistry, EncodingError};
pub use decode::FieldDecoder;
pub use layout::{FieldDef, RowLayout};
pub use quote::Quote;
pub use source::{MemoryRowSource, RowSource, RowSources, VirtualRowSource};
