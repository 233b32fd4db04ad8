// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, code};

/// Creates an internal error diagnostic with source location
pub fn internal_with_context(reason: impl Into<String>, file: &str, line: u32, column: u32, module_path: &str) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: code::INTERNAL_ERROR.to_string(),
		statement: None,
		message: format!("Internal error: {}", reason),
		label: Some(format!("Internal invariant violated at {}:{}:{}", file, line, column)),
		help: Some("This is an internal error that should never occur in normal operation.".to_string()),
		notes: vec![format!("Module: {}", module_path), format!("Version: {}", env!("CARGO_PKG_VERSION"))],
		cause: None,
	}
}
