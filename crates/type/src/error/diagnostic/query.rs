// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, code};

pub fn query_cancelled() -> Diagnostic {
	Diagnostic {
		code: code::QUERY_CANCELLED.to_string(),
		statement: None,
		message: "query was cancelled".to_string(),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
