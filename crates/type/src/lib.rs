// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::{
	Error,
	diagnostic::{self, Diagnostic},
};
pub use value::{
	Decimal, TypeDescriptor,
	r#type::{Signedness, Type},
};

pub type Result<T> = std::result::Result<T, Error>;
