// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Logical column types of the SQL layer
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A 1-byte integer
	TinyInt,
	/// A 2-byte integer
	SmallInt,
	/// A 3-byte integer
	MediumInt,
	/// A 4-byte integer
	Int,
	/// An 8-byte integer
	BigInt,
	/// A 4-byte floating point
	Float,
	/// An 8-byte floating point
	Double,
	/// A fixed-scale packed decimal
	Decimal,
	Char,
	Varchar,
	Text,
	Binary,
	VarBinary,
	Blob,
	/// 3-byte packed `year * 512 + month * 32 + day`
	Date,
	/// 8-byte `YYYYMMDDHHMMSS`
	DateTime,
	/// 3-byte signed `HHMMSS`
	Time,
	/// 4-byte unix seconds
	Timestamp,
	/// 1-byte offset from 1900
	Year,
}

impl Type {
	pub fn is_integer(&self) -> bool {
		matches!(self, Type::TinyInt | Type::SmallInt | Type::MediumInt | Type::Int | Type::BigInt)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float | Type::Double)
	}

	pub fn is_decimal(&self) -> bool {
		matches!(self, Type::Decimal)
	}

	pub fn is_number(&self) -> bool {
		self.is_integer() || self.is_floating_point() || self.is_decimal()
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Type::Char | Type::Varchar | Type::Text)
	}

	pub fn is_binary(&self) -> bool {
		matches!(self, Type::Binary | Type::VarBinary | Type::Blob)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Type::Date | Type::DateTime | Type::Time | Type::Timestamp | Type::Year)
	}

	/// Text and binary types are stored as a length prefix followed by payload
	pub fn is_variable_width(&self) -> bool {
		self.is_text() || self.is_binary()
	}

	/// Storage width of fixed-size types. `None` for decimals and variable-width types.
	pub fn size(&self) -> Option<usize> {
		match self {
			Type::TinyInt => Some(1),
			Type::SmallInt => Some(2),
			Type::MediumInt => Some(3),
			Type::Int => Some(4),
			Type::BigInt => Some(8),
			Type::Float => Some(4),
			Type::Double => Some(8),
			Type::Date => Some(3),
			Type::DateTime => Some(8),
			Type::Time => Some(3),
			Type::Timestamp => Some(4),
			Type::Year => Some(1),
			Type::Decimal
			| Type::Char
			| Type::Varchar
			| Type::Text
			| Type::Binary
			| Type::VarBinary
			| Type::Blob => None,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
		match self {
			Type::TinyInt => f.write_str("TINYINT"),
			Type::SmallInt => f.write_str("SMALLINT"),
			Type::MediumInt => f.write_str("MEDIUMINT"),
			Type::Int => f.write_str("INT"),
			Type::BigInt => f.write_str("BIGINT"),
			Type::Float => f.write_str("FLOAT"),
			Type::Double => f.write_str("DOUBLE"),
			Type::Decimal => f.write_str("DECIMAL"),
			Type::Char => f.write_str("CHAR"),
			Type::Varchar => f.write_str("VARCHAR"),
			Type::Text => f.write_str("TEXT"),
			Type::Binary => f.write_str("BINARY"),
			Type::VarBinary => f.write_str("VARBINARY"),
			Type::Blob => f.write_str("BLOB"),
			Type::Date => f.write_str("DATE"),
			Type::DateTime => f.write_str("DATETIME"),
			Type::Time => f.write_str("TIME"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
			Type::Year => f.write_str("YEAR"),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signedness {
	#[default]
	Signed,
	Unsigned,
}

impl Signedness {
	pub fn is_unsigned(&self) -> bool {
		matches!(self, Signedness::Unsigned)
	}
}
