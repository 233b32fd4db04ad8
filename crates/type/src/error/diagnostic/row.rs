// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, code};

pub fn source_is_null(field: usize) -> Diagnostic {
	Diagnostic {
		code: code::SOURCE_IS_NULL.to_string(),
		statement: None,
		message: format!("field {} is null", field),
		label: Some("typed read of a null value".to_string()),
		help: Some("check is_null() before reading the value".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn encoding_exception(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: code::ENCODING_EXCEPTION.to_string(),
		statement: None,
		message: reason.into(),
		label: Some("text could not be decoded with the declared charset".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_row(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: code::INVALID_ROW.to_string(),
		statement: None,
		message: reason.into(),
		label: Some("row record does not match its layout".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
