// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_type::Type;

use crate::charset::{Charset, EncodingError};

/// Quoting applied when rendering values as SQL text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quote {
	#[default]
	None,
	Single,
	Double,
}

impl Quote {
	fn char(&self) -> Option<char> {
		match self {
			Quote::None => None,
			Quote::Single => Some('\''),
			Quote::Double => Some('"'),
		}
	}

	/// Whether values of `ty` are wrapped in quotes
	pub fn applies_to(&self, ty: Type) -> bool {
		self.char().is_some() && (ty.is_text() || ty.is_binary() || ty.is_temporal())
	}

	/// Write an opening or closing quote for a value of `ty`.
	pub fn quote(&self, sink: &mut String, ty: Type) {
		if let Some(c) = self.char().filter(|_| self.applies_to(ty)) {
			sink.push(c);
		}
	}

	/// Write text, doubling embedded quote characters.
	pub fn append(&self, sink: &mut String, text: &str) {
		match self.char() {
			Some(quote) => {
				for c in text.chars() {
					if c == quote {
						sink.push(quote);
					}
					sink.push(c);
				}
			}
			None => sink.push_str(text),
		}
	}

	/// Decode `bytes` with `charset`, then [`Quote::append`] them.
	pub fn append_bytes(&self, sink: &mut String, bytes: &[u8], charset: Charset) -> Result<(), EncodingError> {
		let text = charset.decode(bytes)?;
		self.append(sink, &text);
		Ok(())
	}
}
