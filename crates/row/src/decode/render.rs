// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::DateTime;
use sqlayer_type::{diagnostic::row::invalid_row, error};

/// `year * 512 + month * 32 + day`
pub fn format_date(value: i64) -> String {
	format!("{:04}-{:02}-{:02}", value / 512, (value / 32) % 16, value % 32)
}

/// `YYYYMMDDHHMMSS`
pub fn format_date_time(value: i64) -> String {
	format!(
		"{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
		value / 10_000_000_000,
		(value / 100_000_000) % 100,
		(value / 1_000_000) % 100,
		(value / 10_000) % 100,
		(value / 100) % 100,
		value % 100
	)
}

/// Signed `HHMMSS`
pub fn format_time(value: i64) -> String {
	let sign = if value < 0 { "-" } else { "" };
	let value = value.unsigned_abs();
	format!("{}{:02}:{:02}:{:02}", sign, value / 10_000, (value / 100) % 100, value % 100)
}

/// Seconds since the unix epoch, rendered in UTC
pub fn format_timestamp(value: i64) -> crate::Result<String> {
	DateTime::from_timestamp(value, 0)
		.map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
		.ok_or_else(|| error!(invalid_row(format!("timestamp {} is out of range", value))))
}

/// Offset from 1900; `0` is the zero year
pub fn format_year(value: i64) -> String {
	match value {
		0 => "0000".to_string(),
		n => (1900 + n).to_string(),
	}
}

pub fn format_hex(bytes: &[u8]) -> String {
	bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

pub fn encode_date(year: u32, month: u32, day: u32) -> i64 {
	(year * 512 + month * 32 + day) as i64
}

pub fn encode_date_time(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> i64 {
	(year as i64) * 10_000_000_000
		+ (month as i64) * 100_000_000
		+ (day as i64) * 1_000_000
		+ (hour as i64) * 10_000
		+ (minute as i64) * 100
		+ second as i64
}

pub fn encode_time(hour: i32, minute: u32, second: u32) -> i64 {
	let magnitude = (hour.unsigned_abs() as i64) * 10_000 + (minute as i64) * 100 + second as i64;
	if hour < 0 { -magnitude } else { magnitude }
}
