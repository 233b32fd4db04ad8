// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Display;

use super::{Diagnostic, code};

pub fn no_such_grouping_fk(table: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::NO_SUCH_GROUPING_FK.to_string(),
		statement: None,
		message: format!("table `{}` has no grouping foreign key", table),
		label: Some("table is the root of its group".to_string()),
		help: Some("only tables joined to a parent can drop their grouping foreign key".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn join_to_multiple_parents(table: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::JOIN_TO_MULTIPLE_PARENTS.to_string(),
		statement: None,
		message: format!("table `{}` already has a parent join", table),
		label: Some("a table can only have one parent".to_string()),
		help: Some("drop the existing grouping foreign key before adding a new one".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn join_column_mismatch(child: impl Display, parent: impl Display, child_count: usize, parent_count: usize) -> Diagnostic {
	Diagnostic {
		code: code::JOIN_COLUMN_MISMATCH.to_string(),
		statement: None,
		message: format!(
			"join from `{}` ({} columns) to `{}` ({} columns) does not match",
			child, child_count, parent, parent_count
		),
		label: Some("join column lists must match".to_string()),
		help: Some("reference the same number of columns with compatible types on both sides".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn join_column_type_mismatch(child_column: &str, child_type: impl Display, parent_column: &str, parent_type: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::JOIN_COLUMN_MISMATCH.to_string(),
		statement: None,
		message: format!(
			"join column `{}` of type `{}` is not compatible with parent column `{}` of type `{}`",
			child_column, child_type, parent_column, parent_type
		),
		label: Some("incompatible join column types".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_fk_index() -> Diagnostic {
	Diagnostic {
		code: code::UNSUPPORTED_FK_INDEX.to_string(),
		statement: None,
		message: "foreign keys are only supported as GROUPING foreign keys".to_string(),
		label: None,
		help: Some("declare the foreign key as GROUPING FOREIGN KEY".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_check_constraint() -> Diagnostic {
	Diagnostic {
		code: code::UNSUPPORTED_CHECK_CONSTRAINT.to_string(),
		statement: None,
		message: "CHECK constraints are not supported".to_string(),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_sql(what: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::UNSUPPORTED_SQL.to_string(),
		statement: None,
		message: format!("unsupported SQL: {}", what),
		label: Some("this alteration is not implemented".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn column_already_generated(table: impl Display, column: &str) -> Diagnostic {
	Diagnostic {
		code: code::COLUMN_ALREADY_GENERATED.to_string(),
		statement: None,
		message: format!("column `{}` on table `{}` is already generated", column, table),
		label: Some("column already has an identity generator".to_string()),
		help: Some("drop the default before adding a new identity".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn column_not_generated(table: impl Display, column: &str) -> Diagnostic {
	Diagnostic {
		code: code::COLUMN_NOT_GENERATED.to_string(),
		statement: None,
		message: format!("column `{}` on table `{}` is not generated", column, table),
		label: Some("column does not have an identity generator".to_string()),
		help: Some("only generated columns can have their increment altered".to_string()),
		notes: vec![],
		cause: None,
	}
}
