// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{
	decimal::packed_size,
	r#type::{Signedness, Type},
};

const DEFAULT_CHARSET: &str = "utf8";
const TEXT_MAX_LENGTH: usize = 65_535;

/// A column type together with the attributes that determine its storage
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
	pub ty: Type,
	/// Declared length of char/binary types, in characters or bytes
	pub length: Option<usize>,
	pub precision: u8,
	pub scale: u8,
	pub signedness: Signedness,
	pub charset: Option<String>,
	pub collation: Option<String>,
}

impl TypeDescriptor {
	pub fn new(ty: Type) -> Self {
		let charset = ty.is_text().then(|| DEFAULT_CHARSET.to_string());
		Self {
			ty,
			length: None,
			precision: 0,
			scale: 0,
			signedness: Signedness::Signed,
			charset,
			collation: None,
		}
	}

	pub fn unsigned(ty: Type) -> Self {
		Self::new(ty).with_signedness(Signedness::Unsigned)
	}

	pub fn decimal(precision: u8, scale: u8) -> Self {
		Self {
			precision,
			scale,
			..Self::new(Type::Decimal)
		}
	}

	pub fn char(length: usize) -> Self {
		Self::new(Type::Char).with_length(length)
	}

	pub fn varchar(length: usize) -> Self {
		Self::new(Type::Varchar).with_length(length)
	}

	pub fn binary(length: usize) -> Self {
		Self::new(Type::Binary).with_length(length)
	}

	pub fn varbinary(length: usize) -> Self {
		Self::new(Type::VarBinary).with_length(length)
	}

	pub fn with_length(mut self, length: usize) -> Self {
		self.length = Some(length);
		self
	}

	pub fn with_signedness(mut self, signedness: Signedness) -> Self {
		self.signedness = signedness;
		self
	}

	pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
		self.charset = Some(charset.into());
		self
	}

	pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
		self.collation = Some(collation.into());
		self
	}

	pub fn is_unsigned(&self) -> bool {
		self.signedness.is_unsigned()
	}

	/// Maximum payload in bytes, excluding the length prefix
	pub fn max_payload(&self) -> usize {
		match self.ty {
			Type::Decimal => packed_size(self.precision, self.scale),
			Type::Char | Type::Varchar => {
				self.length.unwrap_or(1) * self.max_bytes_per_char()
			}
			Type::Binary | Type::VarBinary => self.length.unwrap_or(1),
			Type::Text | Type::Blob => TEXT_MAX_LENGTH,
			ty => ty.size().unwrap_or_default(),
		}
	}

	/// Width of the little-endian length prefix of variable-width fields
	pub fn prefix_size(&self) -> usize {
		if !self.ty.is_variable_width() {
			return 0;
		}
		match self.max_payload() {
			0..=0xFF => 1,
			0x100..=0xFFFF => 2,
			0x1_0000..=0xFF_FFFF => 3,
			_ => 4,
		}
	}

	/// Maximum storage of a field including its prefix
	pub fn max_storage(&self) -> usize {
		self.max_payload() + self.prefix_size()
	}

	/// Inclusive value range of integer types
	pub fn integer_range(&self) -> Option<(i128, i128)> {
		let bits = match self.ty {
			Type::TinyInt => 8,
			Type::SmallInt => 16,
			Type::MediumInt => 24,
			Type::Int => 32,
			Type::BigInt => 64,
			_ => return None,
		};
		if self.is_unsigned() {
			Some((0, (1i128 << bits) - 1))
		} else {
			Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
		}
	}

	/// Whether two columns may be paired by a join
	pub fn is_compatible_with(&self, other: &TypeDescriptor) -> bool {
		let (a, b) = (self.ty, other.ty);
		(a.is_integer() && b.is_integer())
			|| (a.is_floating_point() && b.is_floating_point())
			|| (a.is_decimal() && b.is_decimal())
			|| (a.is_text() && b.is_text())
			|| (a.is_binary() && b.is_binary())
			|| a == b
	}

	fn max_bytes_per_char(&self) -> usize {
		match self.charset.as_deref().map(str::to_ascii_lowercase).as_deref() {
			Some("latin1") | Some("ascii") | Some("binary") => 1,
			Some("utf8mb4") => 4,
			_ => 3,
		}
	}
}

impl From<Type> for TypeDescriptor {
	fn from(ty: Type) -> Self {
		Self::new(ty)
	}
}

impl Display for TypeDescriptor {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
		match self.ty {
			Type::Decimal => write!(f, "DECIMAL({}, {})", self.precision, self.scale)?,
			ty => match self.length {
				Some(length) if ty.is_variable_width() => write!(f, "{}({})", ty, length)?,
				_ => write!(f, "{}", ty)?,
			},
		}
		if self.is_unsigned() {
			f.write_str(" UNSIGNED")?;
		}
		Ok(())
	}
}
