// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_type::{diagnostic::row::invalid_row, return_error};

fn check(bytes: &[u8], offset: usize, width: usize) -> crate::Result<()> {
	if !(1..=8).contains(&width) {
		return_error!(invalid_row(format!("integer width {} is not within 1..=8", width)));
	}
	if offset + width > bytes.len() {
		return_error!(invalid_row(format!("integer at {}..{} past the end of the record", offset, offset + width)));
	}
	Ok(())
}

/// Little-endian unsigned integer of 1 to 8 bytes, zero-extended.
pub fn unsigned_by_width(bytes: &[u8], offset: usize, width: usize) -> crate::Result<u64> {
	check(bytes, offset, width)?;
	Ok(bytes[offset..offset + width].iter().rev().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

/// Little-endian signed integer of 1 to 8 bytes, sign-extended.
pub fn signed_by_width(bytes: &[u8], offset: usize, width: usize) -> crate::Result<i64> {
	let raw = unsigned_by_width(bytes, offset, width)?;
	let shift = 64 - width * 8;
	Ok(((raw << shift) as i64) >> shift)
}

/// Lowest `width` bytes of `value`, little-endian.
pub fn integer_bytes(value: i64, width: usize) -> Vec<u8> {
	value.to_le_bytes()[..width.min(8)].to_vec()
}

#[cfg(test)]
mod tests {
	use sqlayer_type::diagnostic::code;

	use super::*;

	mod signed_by_width {
		use super::*;

		#[test]
		fn test_sign_extends_every_width() {
			for width in 1..=8 {
				let bytes = integer_bytes(-2, width);
				assert_eq!(signed_by_width(&bytes, 0, width).unwrap(), -2, "width {}", width);
			}
		}

		#[test]
		fn test_three_bytes() {
			assert_eq!(signed_by_width(&[0xFF, 0xFF, 0x7F], 0, 3).unwrap(), 8_388_607);
			assert_eq!(signed_by_width(&[0x00, 0x00, 0x80], 0, 3).unwrap(), -8_388_608);
		}

		#[test]
		fn test_offset() {
			assert_eq!(signed_by_width(&[0xAA, 0x01, 0x02], 1, 2).unwrap(), 0x0201);
		}

		#[test]
		fn test_round_trip_reproduces_bytes() {
			for (value, width) in [(127i64, 1), (-32768, 2), (1_000_000, 3), (i32::MIN as i64, 4), (i64::MAX, 8)] {
				let bytes = integer_bytes(value, width);
				let read = signed_by_width(&bytes, 0, width).unwrap();
				assert_eq!(integer_bytes(read, width), bytes);
			}
		}
	}

	mod unsigned_by_width {
		use super::*;

		#[test]
		fn test_zero_extends() {
			assert_eq!(unsigned_by_width(&[0xFF], 0, 1).unwrap(), 255);
			assert_eq!(unsigned_by_width(&[0xFF; 8], 0, 8).unwrap(), u64::MAX);
			assert_eq!(unsigned_by_width(&[0x00, 0x00, 0x80], 0, 3).unwrap(), 0x80_0000);
		}

		#[test]
		fn test_invalid_width() {
			assert_eq!(unsigned_by_width(&[0; 9], 0, 9).unwrap_err().code, code::INVALID_ROW);
			assert_eq!(unsigned_by_width(&[0; 9], 0, 0).unwrap_err().code, code::INVALID_ROW);
		}

		#[test]
		fn test_past_end() {
			assert_eq!(unsigned_by_width(&[0; 2], 1, 2).unwrap_err().code, code::INVALID_ROW);
		}
	}
}
