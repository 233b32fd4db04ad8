// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use sqlayer_type::{Error, diagnostic::row::encoding_exception, error};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
	#[error("invalid utf8 sequence after {valid_up_to} bytes")]
	InvalidUtf8 {
		valid_up_to: usize,
	},

	#[error("byte 0x{byte:02X} at {position} is not valid {charset}")]
	InvalidByte {
		charset: &'static str,
		byte: u8,
		position: usize,
	},

	#[error("character {character:?} cannot be encoded as {charset}")]
	Unmappable {
		charset: &'static str,
		character: char,
	},

	#[error("unknown charset {0}")]
	UnknownCharset(String),
}

impl From<EncodingError> for Error {
	fn from(err: EncodingError) -> Self {
		error!(encoding_exception(err.to_string()))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
	Utf8,
	Latin1,
	Ascii,
}

impl Charset {
	pub fn name(&self) -> &'static str {
		match self {
			Charset::Utf8 => "utf8",
			Charset::Latin1 => "latin1",
			Charset::Ascii => "ascii",
		}
	}

	pub fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
		match self {
			Charset::Utf8 => std::str::from_utf8(bytes).map(str::to_string).map_err(|e| {
				EncodingError::InvalidUtf8 {
					valid_up_to: e.valid_up_to(),
				}
			}),
			Charset::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
			Charset::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
				Some(position) => Err(EncodingError::InvalidByte {
					charset: self.name(),
					byte: bytes[position],
					position,
				}),
				None => Ok(bytes.iter().map(|&b| b as char).collect()),
			},
		}
	}

	pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
		let limit = match self {
			Charset::Utf8 => return Ok(text.as_bytes().to_vec()),
			Charset::Latin1 => 0xFF,
			Charset::Ascii => 0x7F,
		};
		text.chars()
			.map(|character| {
				if (character as u32) <= limit {
					Ok(character as u8)
				} else {
					Err(EncodingError::Unmappable {
						charset: self.name(),
						character,
					})
				}
			})
			.collect()
	}
}

/// Resolves charset names declared on columns
#[derive(Debug, Clone)]
pub struct CharsetRegistry {
	charsets: HashMap<String, Charset>,
}

impl CharsetRegistry {
	pub fn empty() -> Self {
		Self {
			charsets: HashMap::new(),
		}
	}

	pub fn register(&mut self, name: impl Into<String>, charset: Charset) {
		self.charsets.insert(name.into().to_ascii_lowercase(), charset);
	}

	pub fn resolve(&self, name: &str) -> Result<Charset, EncodingError> {
		self.charsets
			.get(&name.to_ascii_lowercase())
			.copied()
			.ok_or_else(|| EncodingError::UnknownCharset(name.to_string()))
	}
}

impl Default for CharsetRegistry {
	fn default() -> Self {
		let mut result = Self::empty();
		result.register("utf8", Charset::Utf8);
		result.register("utf-8", Charset::Utf8);
		result.register("utf8mb4", Charset::Utf8);
		result.register("latin1", Charset::Latin1);
		result.register("iso-8859-1", Charset::Latin1);
		result.register("ascii", Charset::Ascii);
		result.register("us-ascii", Charset::Ascii);
		result
	}
}

#[cfg(test)]
mod tests {
	use sqlayer_type::diagnostic::code;

	use super::*;

	mod resolve {
		use super::*;

		#[test]
		fn test_case_insensitive() {
			let registry = CharsetRegistry::default();
			assert_eq!(registry.resolve("UTF-8").unwrap(), Charset::Utf8);
			assert_eq!(registry.resolve("Latin1").unwrap(), Charset::Latin1);
		}

		#[test]
		fn test_unknown() {
			let registry = CharsetRegistry::default();
			assert_eq!(registry.resolve("ebcdic"), Err(EncodingError::UnknownCharset("ebcdic".to_string())));
		}
	}

	mod decode {
		use super::*;

		#[test]
		fn test_utf8() {
			assert_eq!(Charset::Utf8.decode("héllo".as_bytes()).unwrap(), "héllo");
		}

		#[test]
		fn test_invalid_utf8() {
			let err = Charset::Utf8.decode(&[b'h', 0xFF]).unwrap_err();
			assert_eq!(err, EncodingError::InvalidUtf8 { valid_up_to: 1 });
		}

		#[test]
		fn test_latin1_maps_every_byte() {
			assert_eq!(Charset::Latin1.decode(&[0x68, 0xE9]).unwrap(), "hé");
		}

		#[test]
		fn test_ascii_rejects_high_bytes() {
			let err = Charset::Ascii.decode(&[b'a', 0xE9]).unwrap_err();
			assert!(matches!(err, EncodingError::InvalidByte { byte: 0xE9, position: 1, .. }));
		}
	}

	mod encode {
		use super::*;

		#[test]
		fn test_latin1() {
			assert_eq!(Charset::Latin1.encode("hé").unwrap(), vec![0x68, 0xE9]);
		}

		#[test]
		fn test_unmappable() {
			assert!(Charset::Latin1.encode("€").is_err());
			assert!(Charset::Ascii.encode("é").is_err());
		}
	}

	#[test]
	fn test_into_error() {
		let err: Error = EncodingError::UnknownCharset("x".to_string()).into();
		assert_eq!(err.code, code::ENCODING_EXCEPTION);
		assert!(err.message.contains("unknown charset x"));
	}
}
