// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Parsed `ALTER TABLE` and `ALTER GROUP` statements.
//!
//! Produced by the SQL parser; the planner only reads them.

use std::fmt::{Display, Formatter};

use sqlayer_catalog::{ColumnDefault, TableName};
use sqlayer_type::TypeDescriptor;

/// Possibly schema-qualified table name as written in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
	pub schema: Option<String>,
	pub name: String,
}

impl QualifiedName {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			schema: None,
			name: name.into(),
		}
	}

	pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			schema: Some(schema.into()),
			name: name.into(),
		}
	}

	/// Resolve against `default_schema` when no schema was written.
	pub fn resolve(&self, default_schema: &str) -> TableName {
		TableName::new(self.schema.as_deref().unwrap_or(default_schema), self.name.as_str())
	}
}

impl Display for QualifiedName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.schema {
			Some(schema) => write!(f, "{}.{}", schema, self.name),
			None => f.write_str(&self.name),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstAlterTable {
	pub table: QualifiedName,
	pub operation: AstAlterTableOperation,
}

impl AstAlterTable {
	pub fn elements(table: QualifiedName, elements: Vec<AstTableElement>) -> Self {
		Self {
			table,
			operation: AstAlterTableOperation::Elements(elements),
		}
	}
}

impl Display for AstAlterTable {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ALTER TABLE {}", self.table)?;
		match &self.operation {
			AstAlterTableOperation::UpdateStatistics {
				index: Some(index),
			} => write!(f, " UPDATE STATISTICS {}", index),
			AstAlterTableOperation::UpdateStatistics {
				index: None,
			} => f.write_str(" ALL UPDATE STATISTICS"),
			AstAlterTableOperation::Truncate {
				cascade,
			} => write!(f, " TRUNCATE{}", if *cascade { " CASCADE" } else { "" }),
			AstAlterTableOperation::Elements(elements) => {
				for (idx, element) in elements.iter().enumerate() {
					f.write_str(if idx == 0 { " " } else { ", " })?;
					write!(f, "{}", element)?;
				}
				Ok(())
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstAlterTableOperation {
	/// `None` updates every index of the table
	UpdateStatistics {
		index: Option<String>,
	},
	Truncate {
		cascade: bool,
	},
	Elements(Vec<AstTableElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTableElement {
	AddColumn(AstColumnDefinition),
	DropColumn {
		name: String,
	},
	ModifyColumn {
		name: String,
		modification: AstColumnModification,
	},
	AddForeignKey(AstForeignKey),
	DropForeignKey {
		grouping: bool,
		name: Option<String>,
	},
	AddConstraint(AstConstraint),
	DropConstraint(AstDropConstraint),
	RenameTable {
		new_name: QualifiedName,
	},
	RenameColumn {
		name: String,
		new_name: String,
	},
	/// Element the parser accepts but the planner does not handle
	Other(String),
}

impl Display for AstTableElement {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			AstTableElement::AddColumn(column) => write!(f, "ADD COLUMN {} {}", column.name, column.descriptor),
			AstTableElement::DropColumn {
				name,
			} => write!(f, "DROP COLUMN {}", name),
			AstTableElement::ModifyColumn {
				name,
				..
			} => write!(f, "ALTER COLUMN {}", name),
			AstTableElement::AddForeignKey(fk) => {
				write!(
					f,
					"ADD {}FOREIGN KEY({}) REFERENCES {}",
					if fk.grouping { "GROUPING " } else { "" },
					fk.columns.join(", "),
					fk.parent
				)?;
				if !fk.parent_columns.is_empty() {
					write!(f, "({})", fk.parent_columns.join(", "))?;
				}
				Ok(())
			}
			AstTableElement::DropForeignKey {
				grouping,
				..
			} => write!(f, "DROP {}FOREIGN KEY", if *grouping { "GROUPING " } else { "" }),
			AstTableElement::AddConstraint(_) => f.write_str("ADD CONSTRAINT"),
			AstTableElement::DropConstraint(_) => f.write_str("DROP CONSTRAINT"),
			AstTableElement::RenameTable {
				new_name,
			} => write!(f, "RENAME TO {}", new_name),
			AstTableElement::RenameColumn {
				name,
				new_name,
			} => write!(f, "RENAME COLUMN {} TO {}", name, new_name),
			AstTableElement::Other(text) => f.write_str(text),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstColumnDefinition {
	pub name: String,
	pub descriptor: TypeDescriptor,
	pub nullable: bool,
	pub default: Option<ColumnDefault>,
	pub identity: Option<AstIdentity>,
}

impl AstColumnDefinition {
	pub fn new(name: impl Into<String>, descriptor: impl Into<TypeDescriptor>) -> Self {
		Self {
			name: name.into(),
			descriptor: descriptor.into(),
			nullable: true,
			default: None,
			identity: None,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}

	pub fn with_default(mut self, default: ColumnDefault) -> Self {
		self.default = Some(default);
		self
	}

	pub fn generated(mut self, start: i64, increment: i64) -> Self {
		self.identity = Some(AstIdentity {
			start,
			increment,
		});
		self
	}
}

/// `GENERATED BY DEFAULT AS IDENTITY (START WITH .. INCREMENT BY ..)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstIdentity {
	pub start: i64,
	pub increment: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstColumnModification {
	/// `SET DEFAULT`, or `DROP DEFAULT` when `None`. Clears any identity.
	Default(Option<ColumnDefault>),
	Null,
	NotNull,
	Type(TypeDescriptor),
	Identity(AstIdentityChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstIdentityChange {
	Create(AstIdentity),
	SetIncrement(i64),
	Restart(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstForeignKey {
	pub name: Option<String>,
	pub grouping: bool,
	pub columns: Vec<String>,
	pub parent: QualifiedName,
	/// Empty means the parent's primary key
	pub parent_columns: Vec<String>,
}

impl AstForeignKey {
	pub fn grouping<S: Into<String>>(
		columns: impl IntoIterator<Item = S>,
		parent: QualifiedName,
		parent_columns: impl IntoIterator<Item = S>,
	) -> Self {
		Self {
			name: None,
			grouping: true,
			columns: columns.into_iter().map(Into::into).collect(),
			parent,
			parent_columns: parent_columns.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstConstraint {
	pub name: Option<String>,
	pub kind: AstConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstConstraintKind {
	PrimaryKey(Vec<String>),
	Unique(Vec<String>),
	Check(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstDropConstraint {
	PrimaryKey,
	Unique(String),
	/// `DROP CONSTRAINT name` without a constraint kind
	Named(String),
	Check(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstAlterGroup {
	/// `ALTER GROUP ADD TABLE child(columns) TO parent[(columns)]`
	AddTable {
		child: QualifiedName,
		columns: Vec<String>,
		parent: QualifiedName,
		parent_columns: Vec<String>,
	},
	/// `ALTER GROUP DROP TABLE table`
	DropTable {
		table: QualifiedName,
	},
}

impl AstAlterGroup {
	/// The equivalent grouping foreign key alteration on the child table.
	pub fn to_alter_table(&self) -> AstAlterTable {
		match self {
			AstAlterGroup::AddTable {
				child,
				columns,
				parent,
				parent_columns,
			} => AstAlterTable::elements(
				child.clone(),
				vec![AstTableElement::AddForeignKey(AstForeignKey {
					name: None,
					grouping: true,
					columns: columns.clone(),
					parent: parent.clone(),
					parent_columns: parent_columns.clone(),
				})],
			),
			AstAlterGroup::DropTable {
				table,
			} => AstAlterTable::elements(
				table.clone(),
				vec![AstTableElement::DropForeignKey {
					grouping: true,
					name: None,
				}],
			),
		}
	}
}
