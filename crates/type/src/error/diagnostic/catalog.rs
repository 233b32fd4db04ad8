// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Display;

use super::{Diagnostic, code};

pub fn table_not_found(schema: &str, table: &str) -> Diagnostic {
	Diagnostic {
		code: code::NO_SUCH_TABLE.to_string(),
		statement: None,
		message: format!("table `{}.{}` not found", schema, table),
		label: Some("unknown table".to_string()),
		help: Some(format!("ensure table `{}` exists in schema `{}` or create it first", table, schema)),
		notes: vec![],
		cause: None,
	}
}

pub fn column_not_found(column: &str) -> Diagnostic {
	Diagnostic {
		code: code::NO_SUCH_COLUMN.to_string(),
		statement: None,
		message: format!("column `{}` not found", column),
		label: Some("this column does not exist on the referenced table".to_string()),
		help: Some("check for typos or ensure the column is defined on the table".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn index_not_found(table: impl Display, index: &str) -> Diagnostic {
	Diagnostic {
		code: code::NO_SUCH_INDEX.to_string(),
		statement: None,
		message: format!("index `{}` not found on table `{}`", index, table),
		label: Some("unknown index".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unique_not_found(table: impl Display, name: &str) -> Diagnostic {
	Diagnostic {
		code: code::NO_SUCH_UNIQUE.to_string(),
		statement: None,
		message: format!("unique constraint `{}` not found on table `{}`", name, table),
		label: Some("no unique index with this name".to_string()),
		help: Some("only unique indexes can be dropped as a UNIQUE constraint".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_table_name(table: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::DUPLICATE_TABLE_NAME.to_string(),
		statement: None,
		message: format!("table `{}` already exists", table),
		label: Some("duplicate table definition".to_string()),
		help: Some("choose a different table name or drop the existing table first".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn join_to_unknown_table(child: impl Display, parent: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::JOIN_TO_UNKNOWN_TABLE.to_string(),
		statement: None,
		message: format!("table `{}` cannot join to unknown parent table `{}`", child, parent),
		label: Some("unknown parent table".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn join_cycle(child: impl Display, parent: impl Display) -> Diagnostic {
	Diagnostic {
		code: code::JOIN_CYCLE.to_string(),
		statement: None,
		message: format!("joining `{}` to `{}` would create a cycle", child, parent),
		label: Some("groups must form a tree".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_column_name(table: impl Display, column: &str) -> Diagnostic {
	Diagnostic {
		code: code::DUPLICATE_COLUMN_NAME.to_string(),
		statement: None,
		message: format!("column `{}` already exists on table `{}`", column, table),
		label: Some("duplicate column definition".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_index_name(table: impl Display, index: &str) -> Diagnostic {
	Diagnostic {
		code: code::DUPLICATE_INDEX_NAME.to_string(),
		statement: None,
		message: format!("index `{}` already exists on table `{}`", index, table),
		label: Some("duplicate index definition".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
