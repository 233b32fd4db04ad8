// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A row record is `[field payloads...][footer]`. The footer holds one
//! little-endian `u32` end offset per field. Field `i` starts where field
//! `i - 1` ends, or at 0. A field of zero width is null.
//!
//! Locations are packed as `(width << 32) | offset`; a location of `0`
//! means null.

use sqlayer_catalog::TableDef;
use sqlayer_type::{Type, TypeDescriptor, diagnostic::row::invalid_row, error, return_error};

use crate::{
	FieldDecoder,
	charset::{Charset, CharsetRegistry},
};

pub const FOOTER_ENTRY_SIZE: usize = 4;

pub fn pack_location(offset: usize, width: usize) -> u64 {
	if width == 0 {
		return 0;
	}
	((width as u64) << 32) | offset as u64
}

pub fn location_offset(location: u64) -> usize {
	(location & 0xFFFF_FFFF) as usize
}

pub fn location_width(location: u64) -> usize {
	(location >> 32) as usize
}

/// Storage metadata of one field of a row
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
	pub index: usize,
	pub descriptor: TypeDescriptor,
	pub prefix_size: usize,
	pub max_storage: usize,
	pub charset: Option<Charset>,
}

impl FieldDef {
	pub fn new(index: usize, descriptor: TypeDescriptor, registry: &CharsetRegistry) -> crate::Result<Self> {
		let charset = match descriptor.charset.as_deref() {
			Some(name) if descriptor.ty.is_text() => Some(registry.resolve(name)?),
			_ => None,
		};
		Ok(Self {
			index,
			prefix_size: descriptor.prefix_size(),
			max_storage: descriptor.max_storage(),
			charset,
			descriptor,
		})
	}

	pub fn ty(&self) -> Type {
		self.descriptor.ty
	}

	pub fn precision(&self) -> u8 {
		self.descriptor.precision
	}

	pub fn scale(&self) -> u8 {
		self.descriptor.scale
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
	fields: Vec<FieldDef>,
}

impl RowLayout {
	pub fn new(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> crate::Result<Self> {
		Self::with_registry(descriptors, &CharsetRegistry::default())
	}

	pub fn with_registry(
		descriptors: impl IntoIterator<Item = TypeDescriptor>,
		registry: &CharsetRegistry,
	) -> crate::Result<Self> {
		let fields = descriptors
			.into_iter()
			.enumerate()
			.map(|(index, descriptor)| FieldDef::new(index, descriptor, registry))
			.collect::<crate::Result<Vec<_>>>()?;
		Ok(Self { fields })
	}

	pub fn from_table(table: &TableDef) -> crate::Result<Self> {
		Self::new(table.columns.iter().map(|c| c.descriptor.clone()))
	}

	pub fn fields(&self) -> &[FieldDef] {
		&self.fields
	}

	pub fn field(&self, index: usize) -> crate::Result<&FieldDef> {
		self.fields.get(index).ok_or_else(|| {
			error!(invalid_row(format!("field {} out of range for a row of {} fields", index, self.fields.len())))
		})
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn footer_size(&self) -> usize {
		self.fields.len() * FOOTER_ENTRY_SIZE
	}

	/// Packed location of a field within `bytes`, `0` when null.
	pub fn location(&self, bytes: &[u8], index: usize) -> crate::Result<u64> {
		self.field(index)?;
		let footer = self.footer_size();
		if bytes.len() < footer {
			return_error!(invalid_row(format!(
				"record of {} bytes is shorter than its {} byte footer",
				bytes.len(),
				footer
			)));
		}
		let data_len = bytes.len() - footer;
		let start = match index {
			0 => 0,
			_ => read_end(bytes, data_len, index - 1),
		};
		let end = read_end(bytes, data_len, index);
		if end < start || end > data_len {
			return_error!(invalid_row(format!("field {} spans {}..{} outside of {} data bytes", index, start, end, data_len)));
		}
		Ok(pack_location(start, end - start))
	}

	/// Bind a decoder to one field of a record.
	pub fn decoder<'a>(&'a self, bytes: &'a [u8], index: usize) -> crate::Result<FieldDecoder<'a>> {
		let location = self.location(bytes, index)?;
		Ok(FieldDecoder::new(bytes, self.field(index)?, location))
	}
}

fn read_end(bytes: &[u8], data_len: usize, index: usize) -> usize {
	let at = data_len + index * FOOTER_ENTRY_SIZE;
	u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as usize
}
