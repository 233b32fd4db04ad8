// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_type::{Decimal, diagnostic::row::invalid_row, return_error};

use crate::{
	Charset, decimal,
	decode::{extract::integer_bytes, render},
	layout::{FieldDef, RowLayout},
};

/// Writes row records in the layout read by [`crate::FieldDecoder`].
///
/// Fields start out null.
pub struct RowBuilder<'a> {
	layout: &'a RowLayout,
	payloads: Vec<Option<Vec<u8>>>,
}

impl<'a> RowBuilder<'a> {
	pub fn new(layout: &'a RowLayout) -> Self {
		Self {
			layout,
			payloads: vec![None; layout.len()],
		}
	}

	fn fixed_width(&self, index: usize) -> crate::Result<usize> {
		let field = self.layout.field(index)?;
		match field.ty().size() {
			Some(width) => Ok(width),
			None => return_error!(invalid_row(format!("field {} of type {} is not fixed width", index, field.ty()))),
		}
	}

	pub fn set_null(&mut self, index: usize) -> crate::Result<()> {
		self.layout.field(index)?;
		self.payloads[index] = None;
		Ok(())
	}

	/// Store the low bytes of `value` at the field's declared width.
	pub fn set_int(&mut self, index: usize, value: i64) -> crate::Result<()> {
		let width = self.fixed_width(index)?;
		self.payloads[index] = Some(integer_bytes(value, width));
		Ok(())
	}

	pub fn set_uint(&mut self, index: usize, value: u64) -> crate::Result<()> {
		self.set_int(index, value as i64)
	}

	pub fn set_float(&mut self, index: usize, value: f32) -> crate::Result<()> {
		self.set_int(index, value.to_bits() as i32 as i64)
	}

	pub fn set_double(&mut self, index: usize, value: f64) -> crate::Result<()> {
		self.set_int(index, value.to_bits() as i64)
	}

	pub fn set_decimal(&mut self, index: usize, value: &Decimal) -> crate::Result<()> {
		let field = self.layout.field(index)?;
		self.payloads[index] = Some(decimal::encode(value.inner(), field.precision(), field.scale())?);
		Ok(())
	}

	pub fn set_string(&mut self, index: usize, value: &str) -> crate::Result<()> {
		let charset = self.layout.field(index)?.charset.unwrap_or(Charset::Utf8);
		let bytes = charset.encode(value)?;
		self.set_bytes(index, &bytes)
	}

	/// Store raw payload bytes, behind a length prefix for variable-width fields.
	pub fn set_bytes(&mut self, index: usize, value: &[u8]) -> crate::Result<()> {
		let field: &FieldDef = self.layout.field(index)?;
		let prefix = field.prefix_size;
		if prefix == 0 {
			self.payloads[index] = Some(value.to_vec());
			return Ok(());
		}
		let max = field.descriptor.max_payload();
		if value.len() > max {
			return_error!(invalid_row(format!(
				"{} bytes do not fit field {} of at most {} bytes",
				value.len(),
				index,
				max
			)));
		}
		let mut payload = integer_bytes(value.len() as i64, prefix);
		payload.extend_from_slice(value);
		self.payloads[index] = Some(payload);
		Ok(())
	}

	pub fn set_date(&mut self, index: usize, year: u32, month: u32, day: u32) -> crate::Result<()> {
		self.set_int(index, render::encode_date(year, month, day))
	}

	pub fn set_date_time(
		&mut self,
		index: usize,
		year: u32,
		month: u32,
		day: u32,
		hour: u32,
		minute: u32,
		second: u32,
	) -> crate::Result<()> {
		self.set_int(index, render::encode_date_time(year, month, day, hour, minute, second))
	}

	pub fn set_time(&mut self, index: usize, hour: i32, minute: u32, second: u32) -> crate::Result<()> {
		self.set_int(index, render::encode_time(hour, minute, second))
	}

	pub fn set_timestamp(&mut self, index: usize, unix_seconds: i64) -> crate::Result<()> {
		self.set_int(index, unix_seconds)
	}

	/// `0` stores the zero year, anything else an offset from 1900.
	pub fn set_year(&mut self, index: usize, year: u16) -> crate::Result<()> {
		let value = if year == 0 { 0 } else { year as i64 - 1900 };
		self.set_int(index, value)
	}

	pub fn build(self) -> Vec<u8> {
		let mut data = Vec::new();
		let mut ends = Vec::with_capacity(self.layout.len());
		for payload in self.payloads {
			if let Some(payload) = payload {
				data.extend_from_slice(&payload);
			}
			ends.push(data.len() as u32);
		}
		for end in ends {
			data.extend_from_slice(&end.to_le_bytes());
		}
		data
	}
}
