// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
	str::FromStr,
};

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use serde::{Deserialize, Serialize};

/// Bytes needed for 0..=9 leftover decimal digits of a packed decimal
pub const DIG_TO_BYTES: [usize; 10] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];

/// Decimal digits packed into each full 4-byte word
pub const DIGITS_PER_WORD: usize = 9;

/// Storage width of a packed `DECIMAL(precision, scale)` value
pub fn packed_size(precision: u8, scale: u8) -> usize {
	let integral = precision.saturating_sub(scale) as usize;
	let fractional = scale as usize;
	(integral / DIGITS_PER_WORD) * 4
		+ DIG_TO_BYTES[integral % DIGITS_PER_WORD]
		+ (fractional / DIGITS_PER_WORD) * 4
		+ DIG_TO_BYTES[fractional % DIGITS_PER_WORD]
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Decimal(BigDecimal);

impl Decimal {
	pub fn new(value: BigDecimal) -> Self {
		Self(value)
	}

	pub fn inner(&self) -> &BigDecimal {
		&self.0
	}

	pub fn into_inner(self) -> BigDecimal {
		self.0
	}
}

impl Deref for Decimal {
	type Target = BigDecimal;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<BigDecimal> for Decimal {
	fn from(value: BigDecimal) -> Self {
		Self(value)
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self(BigDecimal::from(value))
	}
}

impl FromStr for Decimal {
	type Err = ParseBigDecimalError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		BigDecimal::from_str(s.trim()).map(Self)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
