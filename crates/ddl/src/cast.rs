// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Integer narrowing used when re-evaluating column defaults.
//!
//! Every conversion that changes the value reports a truncation notice.

use crate::context::QueryContext;

/// Round half up, then clamp into `[min, max]`.
pub fn round(max: i64, min: i64, value: f64, ctx: &dyn QueryContext) -> i64 {
	let rounded = (value + 0.5).floor() as i64;
	if rounded as f64 != value {
		ctx.report_truncate(&value.to_string(), &rounded.to_string());
	}
	get_in_range(max, min, rounded, ctx)
}

/// Saturate `value` to the nearest bound.
pub fn get_in_range(max: i64, min: i64, value: i64, ctx: &dyn QueryContext) -> i64 {
	if value > max {
		ctx.report_truncate(&value.to_string(), &max.to_string());
		max
	} else if value < min {
		ctx.report_truncate(&value.to_string(), &min.to_string());
		min
	} else {
		value
	}
}

/// Longest numeric prefix of `text`: digits with at most one `.`.
///
/// Text that starts with neither a digit nor a sign or dot followed by a
/// digit becomes `"0"`.
pub fn truncate_non_digits(text: &str, ctx: &dyn QueryContext) -> String {
	let text = text.trim();
	let bytes = text.as_bytes();

	let starts_numeric = match bytes {
		[first, ..] if first.is_ascii_digit() => true,
		[_, second, ..] => second.is_ascii_digit(),
		_ => false,
	};
	if !starts_numeric {
		ctx.report_truncate(text, "0");
		return "0".to_string();
	}

	let mut seen_dot = false;
	for (idx, &byte) in bytes.iter().enumerate().skip(1) {
		if byte.is_ascii_digit() {
			continue;
		}
		if byte == b'.' && !seen_dot {
			seen_dot = true;
			continue;
		}
		let prefix = &text[..idx];
		ctx.report_truncate(text, prefix);
		return prefix.to_string();
	}
	text.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::ExecutionContext;

	mod round {
		use super::*;

		#[test]
		fn test_inside_range_is_identity() {
			let ctx = ExecutionContext::new();
			for value in [-128.0, -1.0, 0.0, 42.0, 127.0] {
				assert_eq!(round(127, -128, value, &ctx), value as i64);
			}
			assert!(ctx.notices().is_empty());
		}

		#[test]
		fn test_idempotent() {
			let ctx = ExecutionContext::new();
			let once = round(127, -128, 12.4, &ctx);
			let twice = round(127, -128, once as f64, &ctx);
			assert_eq!(once, 12);
			assert_eq!(once, twice);
			assert_eq!(ctx.notices().len(), 1);
		}

		#[test]
		fn test_saturates_above() {
			let ctx = ExecutionContext::new();
			assert_eq!(round(127, -128, 300.0, &ctx), 127);
			let notices = ctx.notices();
			assert_eq!(notices.len(), 1);
			assert_eq!(notices[0].original, "300");
			assert_eq!(notices[0].truncated, "127");
		}

		#[test]
		fn test_saturates_below() {
			let ctx = ExecutionContext::new();
			assert_eq!(round(127, -128, -1000.0, &ctx), -128);
			assert_eq!(ctx.notices().len(), 1);
		}

		#[test]
		fn test_half_rounds_up() {
			let ctx = ExecutionContext::new();
			assert_eq!(round(127, -128, 2.5, &ctx), 3);
			assert_eq!(round(127, -128, -2.5, &ctx), -2);
			assert_eq!(ctx.notices().len(), 2);
		}
	}

	mod truncate_non_digits {
		use super::*;

		#[test]
		fn test_plain_number_is_kept() {
			let ctx = ExecutionContext::new();
			assert_eq!(truncate_non_digits(" 12.5 ", &ctx), "12.5");
			assert!(ctx.notices().is_empty());
		}

		#[test]
		fn test_trailing_garbage() {
			let ctx = ExecutionContext::new();
			assert_eq!(truncate_non_digits("42abc", &ctx), "42");
			assert_eq!(truncate_non_digits("1.2.3", &ctx), "1.2");
			assert_eq!(ctx.notices().len(), 2);
		}

		#[test]
		fn test_sign_prefix() {
			let ctx = ExecutionContext::new();
			assert_eq!(truncate_non_digits("-7", &ctx), "-7");
		}

		#[test]
		fn test_non_numeric_is_zero() {
			let ctx = ExecutionContext::new();
			assert_eq!(truncate_non_digits("abc", &ctx), "0");
			assert_eq!(truncate_non_digits("", &ctx), "0");
			assert_eq!(ctx.notices().len(), 2);
		}
	}
}
