// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod decimal;
mod descriptor;
pub mod r#type;

pub use decimal::Decimal;
pub use descriptor::TypeDescriptor;
