// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod extract;
pub mod render;

use sqlayer_type::{
	Decimal, Type,
	diagnostic::row::{invalid_row, source_is_null},
	return_error,
};

use crate::{
	decimal,
	layout::{FieldDef, location_offset, location_width},
	quote::Quote,
};

/// Typed reads of one field of a row record.
///
/// Every getter fails with `SOURCE_IS_NULL` when the field is null.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder<'a> {
	bytes: &'a [u8],
	field: &'a FieldDef,
	location: u64,
}

impl<'a> FieldDecoder<'a> {
	pub fn new(bytes: &'a [u8], field: &'a FieldDef, location: u64) -> Self {
		Self { bytes, field, location }
	}

	/// Point this decoder at another field.
	pub fn bind(&mut self, bytes: &'a [u8], field: &'a FieldDef, location: u64) {
		self.bytes = bytes;
		self.field = field;
		self.location = location;
	}

	pub fn field(&self) -> &FieldDef {
		self.field
	}

	pub fn location(&self) -> u64 {
		self.location
	}

	pub fn is_null(&self) -> bool {
		self.location == 0
	}

	fn checked(&self) -> crate::Result<(usize, usize)> {
		if self.is_null() {
			return_error!(source_is_null(self.field.index));
		}
		let (offset, width) = (location_offset(self.location), location_width(self.location));
		if offset.checked_add(width).is_none_or(|end| end > self.bytes.len()) {
			return_error!(invalid_row(format!(
				"field {} spans {}..{} of a {} byte record",
				self.field.index,
				offset,
				offset.saturating_add(width),
				self.bytes.len()
			)));
		}
		Ok((offset, width))
	}

	fn signed(&self) -> crate::Result<i64> {
		let (offset, width) = self.checked()?;
		extract::signed_by_width(self.bytes, offset, width)
	}

	fn unsigned(&self) -> crate::Result<u64> {
		let (offset, width) = self.checked()?;
		extract::unsigned_by_width(self.bytes, offset, width)
	}

	/// Payload of a variable-width field, after its length prefix.
	fn payload(&self) -> crate::Result<&'a [u8]> {
		let (offset, width) = self.checked()?;
		let prefix = self.field.prefix_size;
		if prefix == 0 {
			return Ok(&self.bytes[offset..offset + width]);
		}
		if width < prefix {
			return_error!(invalid_row(format!("field {} is shorter than its length prefix", self.field.index)));
		}
		let length = extract::unsigned_by_width(self.bytes, offset, prefix)? as usize;
		if length != width - prefix {
			return_error!(invalid_row(format!(
				"field {} declares {} bytes but spans {}",
				self.field.index,
				length,
				width - prefix
			)));
		}
		Ok(&self.bytes[offset + prefix..offset + width])
	}

	pub fn get_int(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_long(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_uint(&self) -> crate::Result<u64> {
		self.unsigned()
	}

	pub fn get_ubigint(&self) -> crate::Result<u64> {
		self.unsigned()
	}

	pub fn get_float(&self) -> crate::Result<f32> {
		Ok(f32::from_bits(self.signed()? as i32 as u32))
	}

	pub fn get_double(&self) -> crate::Result<f64> {
		Ok(f64::from_bits(self.signed()? as u64))
	}

	pub fn get_decimal(&self) -> crate::Result<Decimal> {
		let (offset, width) = self.checked()?;
		decimal::decode(&self.bytes[offset..offset + width], self.field.precision(), self.field.scale())
	}

	pub fn get_string(&self) -> crate::Result<String> {
		let payload = self.payload()?;
		let charset = self.field.charset.unwrap_or(crate::Charset::Utf8);
		Ok(charset.decode(payload)?)
	}

	pub fn get_text(&self) -> crate::Result<String> {
		self.get_string()
	}

	pub fn get_var_binary(&self) -> crate::Result<&'a [u8]> {
		self.payload()
	}

	pub fn get_date(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_date_time(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_time(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_timestamp(&self) -> crate::Result<i64> {
		self.signed()
	}

	pub fn get_year(&self) -> crate::Result<i64> {
		Ok(self.signed()? & 0xFF)
	}

	/// Render the value as SQL text. Null renders as `NULL`.
	///
	/// Text that fails to decode is replaced by an `<encoding exception! ..>`
	/// placeholder instead of failing.
	pub fn append_as_string(&self, sink: &mut String, quote: Quote) -> crate::Result<()> {
		if self.is_null() {
			sink.push_str("NULL");
			return Ok(());
		}
		let ty = self.field.ty();
		quote.quote(sink, ty);
		match ty {
			Type::Char | Type::Varchar | Type::Text => {
				let payload = self.payload()?;
				let charset = self.field.charset.unwrap_or(crate::Charset::Utf8);
				if let Err(err) = quote.append_bytes(sink, payload, charset) {
					quote.append(sink, &format!("<encoding exception! {}>", err));
				}
			}
			Type::Decimal => {
				let (offset, width) = self.checked()?;
				sink.push_str(&decimal::decode_to_string(
					&self.bytes[offset..offset + width],
					self.field.precision(),
					self.field.scale(),
				)?);
			}
			Type::TinyInt | Type::SmallInt | Type::MediumInt | Type::Int | Type::BigInt => {
				if self.field.descriptor.is_unsigned() {
					sink.push_str(&self.get_uint()?.to_string());
				} else {
					sink.push_str(&self.get_long()?.to_string());
				}
			}
			Type::Float => sink.push_str(&self.get_float()?.to_string()),
			Type::Double => sink.push_str(&self.get_double()?.to_string()),
			Type::Binary | Type::VarBinary | Type::Blob => sink.push_str(&render::format_hex(self.get_var_binary()?)),
			Type::Date => sink.push_str(&render::format_date(self.get_date()?)),
			Type::DateTime => sink.push_str(&render::format_date_time(self.get_date_time()?)),
			Type::Time => sink.push_str(&render::format_time(self.get_time()?)),
			Type::Timestamp => sink.push_str(&render::format_timestamp(self.get_timestamp()?)?),
			Type::Year => sink.push_str(&render::format_year(self.get_year()?)),
		}
		quote.quote(sink, ty);
		Ok(())
	}
}
