// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-scale packed decimal.
//!
//! Digits are grouped in nines from the decimal point outwards; each full
//! group is a big-endian `u32`, partial groups take [`DIG_TO_BYTES`] bytes.
//! The integral partial group comes first, the fractional partial group
//! last. Negative values have every byte inverted, then the top bit of the
//! first byte is flipped for both signs.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::Sign;
use num_traits::Zero;
use sqlayer_type::{
	Decimal,
	diagnostic::row::invalid_row,
	error, return_error,
	value::decimal::{DIG_TO_BYTES, DIGITS_PER_WORD, packed_size},
};

struct Shape {
	integral: usize,
	fractional: usize,
}

impl Shape {
	fn new(precision: u8, scale: u8) -> Self {
		Self {
			integral: precision.saturating_sub(scale) as usize,
			fractional: scale as usize,
		}
	}
}

/// Encode `value` rounded half-up to `scale` digits.
pub fn encode(value: &BigDecimal, precision: u8, scale: u8) -> crate::Result<Vec<u8>> {
	let shape = Shape::new(precision, scale);
	let rounded = value.with_scale_round(scale as i64, RoundingMode::HalfUp);
	let (digits, _) = rounded.as_bigint_and_exponent();
	let negative = digits.sign() == Sign::Minus;

	let mut text = digits.magnitude().to_string();
	if text.len() <= shape.fractional {
		text = format!("{:0>width$}", text, width = shape.fractional + 1);
	}
	let (integral, fractional) = text.split_at(text.len() - shape.fractional);
	let integral = integral.trim_start_matches('0');
	if integral.len() > shape.integral {
		return_error!(invalid_row(format!("{} does not fit DECIMAL({}, {})", value, precision, scale)));
	}
	let integral = format!("{:0>width$}", integral, width = shape.integral);

	let mut result = Vec::with_capacity(packed_size(precision, scale));
	let leading = shape.integral % DIGITS_PER_WORD;
	write_group(&mut result, &integral[..leading]);
	for word in integral.as_bytes()[leading..].chunks(DIGITS_PER_WORD) {
		write_group(&mut result, ascii(word));
	}
	let full = shape.fractional - shape.fractional % DIGITS_PER_WORD;
	for word in fractional.as_bytes()[..full].chunks(DIGITS_PER_WORD) {
		write_group(&mut result, ascii(word));
	}
	write_group(&mut result, &fractional[full..]);

	if negative && !rounded.is_zero() {
		for byte in result.iter_mut() {
			*byte = !*byte;
		}
	}
	if let Some(first) = result.first_mut() {
		*first ^= 0x80;
	}
	Ok(result)
}

/// Decode to the canonical base-10 representation. Never empty.
pub fn decode_to_string(bytes: &[u8], precision: u8, scale: u8) -> crate::Result<String> {
	let shape = Shape::new(precision, scale);
	let expected = packed_size(precision, scale);
	if bytes.len() != expected {
		return_error!(invalid_row(format!(
			"DECIMAL({}, {}) needs {} bytes, found {}",
			precision,
			scale,
			expected,
			bytes.len()
		)));
	}
	if bytes.is_empty() {
		return Ok("0".to_string());
	}

	let negative = bytes[0] & 0x80 == 0;
	let mask = if negative { 0xFF } else { 0x00 };
	let mut buf: Vec<u8> = bytes.iter().map(|b| b ^ mask).collect();
	buf[0] ^= 0x80;

	let mut reader = GroupReader { bytes: &buf, at: 0 };
	let mut integral = String::new();
	let leading = shape.integral % DIGITS_PER_WORD;
	if leading > 0 {
		integral.push_str(&reader.read(leading).to_string());
	}
	for _ in 0..shape.integral / DIGITS_PER_WORD {
		integral.push_str(&format!("{:09}", reader.read(DIGITS_PER_WORD)));
	}
	let integral = integral.trim_start_matches('0');

	let mut fractional = String::new();
	for _ in 0..shape.fractional / DIGITS_PER_WORD {
		fractional.push_str(&format!("{:09}", reader.read(DIGITS_PER_WORD)));
	}
	let trailing = shape.fractional % DIGITS_PER_WORD;
	if trailing > 0 {
		fractional.push_str(&format!("{:0width$}", reader.read(trailing), width = trailing));
	}

	let is_zero = integral.is_empty() && fractional.bytes().all(|b| b == b'0');
	let mut result = String::with_capacity(precision as usize + 3);
	if negative && !is_zero {
		result.push('-');
	}
	result.push_str(if integral.is_empty() { "0" } else { integral });
	if !fractional.is_empty() {
		result.push('.');
		result.push_str(&fractional);
	}
	Ok(result)
}

pub fn decode(bytes: &[u8], precision: u8, scale: u8) -> crate::Result<Decimal> {
	let text = decode_to_string(bytes, precision, scale)?;
	BigDecimal::from_str(&text)
		.map(Decimal::new)
		.map_err(|e| error!(invalid_row(format!("decoded decimal {} is malformed: {}", text, e))))
}

fn ascii(digits: &[u8]) -> &str {
	std::str::from_utf8(digits).unwrap_or_default()
}

fn write_group(out: &mut Vec<u8>, digits: &str) {
	if digits.is_empty() {
		return;
	}
	let value: u32 = digits.parse().unwrap_or_default();
	let width = DIG_TO_BYTES[digits.len()];
	out.extend_from_slice(&value.to_be_bytes()[4 - width..]);
}

struct GroupReader<'a> {
	bytes: &'a [u8],
	at: usize,
}

impl GroupReader<'_> {
	fn read(&mut self, digits: usize) -> u32 {
		let width = DIG_TO_BYTES[digits];
		let value = self.bytes[self.at..self.at + width].iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
		self.at += width;
		value
	}
}
