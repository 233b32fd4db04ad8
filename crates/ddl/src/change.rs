// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
	Add,
	Drop,
	Modify,
}

impl Display for ChangeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			ChangeKind::Add => "ADD",
			ChangeKind::Drop => "DROP",
			ChangeKind::Modify => "MODIFY",
		})
	}
}

/// One column or index edit, named by its old and new names.
///
/// `Add` has no old name, `Drop` no new name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableChange {
	pub kind: ChangeKind,
	pub old_name: Option<String>,
	pub new_name: Option<String>,
}

impl TableChange {
	pub fn add(name: impl Into<String>) -> Self {
		Self {
			kind: ChangeKind::Add,
			old_name: None,
			new_name: Some(name.into()),
		}
	}

	pub fn drop(name: impl Into<String>) -> Self {
		Self {
			kind: ChangeKind::Drop,
			old_name: Some(name.into()),
			new_name: None,
		}
	}

	pub fn modify(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
		Self {
			kind: ChangeKind::Modify,
			old_name: Some(old_name.into()),
			new_name: Some(new_name.into()),
		}
	}

	/// The name the change refers to in the original table.
	pub fn name(&self) -> &str {
		self.old_name.as_deref().or(self.new_name.as_deref()).unwrap_or_default()
	}
}

impl Display for TableChange {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			ChangeKind::Add => write!(f, "ADD {}", self.new_name.as_deref().unwrap_or_default()),
			ChangeKind::Drop => write!(f, "DROP {}", self.old_name.as_deref().unwrap_or_default()),
			ChangeKind::Modify => write!(
				f,
				"MODIFY {}->{}",
				self.old_name.as_deref().unwrap_or_default(),
				self.new_name.as_deref().unwrap_or_default()
			),
		}
	}
}

/// Kind of the first change whose old name is `old_name`.
pub fn find_old_name(changes: &[TableChange], old_name: &str) -> Option<ChangeKind> {
	changes.iter().find(|c| c.old_name.as_deref() == Some(old_name)).map(|c| c.kind)
}

/// Name `old_name` carries after the changes, `None` once dropped.
///
/// Decided by the first change naming it, like [`find_old_name`].
pub fn new_name<'a>(changes: &'a [TableChange], old_name: &'a str) -> Option<&'a str> {
	match changes.iter().find(|c| c.old_name.as_deref() == Some(old_name)) {
		Some(change) if change.kind == ChangeKind::Drop => None,
		Some(change) => change.new_name.as_deref(),
		None => Some(old_name),
	}
}

/// Original name of the column or index now called `name`.
pub fn original_name<'a>(changes: &'a [TableChange], name: &'a str) -> Option<&'a str> {
	match changes.iter().find(|c| c.new_name.as_deref() == Some(name)) {
		Some(change) if change.kind == ChangeKind::Add => None,
		Some(change) => change.old_name.as_deref(),
		None => Some(name),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod find_old_name {
		use super::*;

		#[test]
		fn test_absent() {
			assert_eq!(find_old_name(&[TableChange::add("x")], "x"), None);
		}

		#[test]
		fn test_first_match_wins() {
			let changes = [TableChange::modify("a", "b"), TableChange::drop("a")];
			assert_eq!(find_old_name(&changes, "a"), Some(ChangeKind::Modify));

			let changes = [TableChange::drop("a"), TableChange::modify("a", "b")];
			assert_eq!(find_old_name(&changes, "a"), Some(ChangeKind::Drop));
		}
	}

	mod new_name {
		use super::*;

		#[test]
		fn test_untouched_keeps_name() {
			assert_eq!(new_name(&[], "a"), Some("a"));
		}

		#[test]
		fn test_rename() {
			assert_eq!(new_name(&[TableChange::modify("a", "b")], "a"), Some("b"));
		}

		#[test]
		fn test_dropped() {
			assert_eq!(new_name(&[TableChange::drop("a")], "a"), None);
		}

		#[test]
		fn test_agrees_with_find_old_name() {
			let changes = [TableChange::modify("a", "b"), TableChange::drop("a")];
			assert_eq!(new_name(&changes, "a"), Some("b"));
		}
	}

	#[test]
	fn test_original_name() {
		let changes = [TableChange::modify("a", "b"), TableChange::add("c")];
		assert_eq!(original_name(&changes, "b"), Some("a"));
		assert_eq!(original_name(&changes, "c"), None);
		assert_eq!(original_name(&changes, "d"), Some("d"));
	}

	#[test]
	fn test_display() {
		assert_eq!(TableChange::modify("a", "b").to_string(), "MODIFY a->b");
		assert_eq!(TableChange::drop("a").to_string(), "DROP a");
		assert_eq!(TableChange::add("a").to_string(), "ADD a");
	}
}
