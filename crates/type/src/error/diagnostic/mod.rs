// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod alter;
pub mod catalog;
pub mod code;
pub mod internal;
pub mod query;
pub mod render;
pub mod row;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub statement: Option<String>,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	/// Chain `cause` underneath this diagnostic.
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!("{}", self.code))
	}
}

#[cfg(test)]
mod tests {
	use super::{Diagnostic, catalog::column_not_found, row::encoding_exception};

	#[test]
	fn test_serde_round_trip_keeps_cause() {
		let diagnostic = column_not_found("c").with_cause(encoding_exception("bad byte"));
		let json = serde_json::to_string(&diagnostic).unwrap();
		let back: Diagnostic = serde_json::from_str(&json).unwrap();
		assert_eq!(back, diagnostic);
		assert!(back.cause.is_some());
	}
}
