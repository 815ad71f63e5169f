//! Numeric attribute (and text) codecs
//!
//! libvirt writes some numbers in hex with a fixed number of digits (`domain="0x0000"`) and
//! accepts them with or without prefix depending on the field.

use crate::{
	errors,
	serializer::Serializer,
	Result,
};
use std::convert::TryFrom;

/// How to read a number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
	/// Plain decimal digits
	Decimal,
	/// Hex digits with optional `0x` prefix
	Hex,
	/// Detect by prefix: `0x` hex, `0o` or leading `0` octal, `0b` binary, decimal otherwise
	Auto,
}

/// How to write a number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberFormat {
	/// `%d`
	Decimal,
	/// `0x` followed by at least `width` lowercase hex digits (zero padded)
	Hex {
		/// minimum number of digits; `0` means unpadded
		width: usize,
	},
}

impl NumberFormat {
	/// Unpadded hex: `0x%x`
	pub const HEX: Self = NumberFormat::Hex { width: 0 };

	/// Format a value
	pub fn format(self, value: u64) -> String {
		match self {
			NumberFormat::Decimal => value.to_string(),
			NumberFormat::Hex { width } => format!("0x{:0width$x}", value, width = width),
		}
	}
}

/// Format an optional value; `None` means the attribute is left out.
pub fn format_uint<T: Into<u64>>(value: Option<T>, format: NumberFormat) -> Option<String> {
	value.map(|v| format.format(v.into()))
}

/// Parse an attribute value (named `key` for errors)
pub fn parse_uint<T: TryFrom<u64>>(key: &str, value: &str, radix: Radix) -> Result<T> {
	let (digits, base) = match radix {
		Radix::Decimal => (value, 10),
		Radix::Hex => (value.strip_prefix("0x").unwrap_or(value), 16),
		Radix::Auto => split_prefix(value),
	};
	// from_str_radix accepts a leading '+', the reference parser doesn't
	if digits.is_empty() || digits.starts_with('+') {
		return Err(errors::invalid_format(key, value));
	}
	u64::from_str_radix(digits, base)
		.ok()
		.and_then(|v| T::try_from(v).ok())
		.ok_or_else(|| errors::invalid_format(key, value))
}

fn split_prefix(value: &str) -> (&str, u32) {
	let lower = value.get(..2).map(str::to_ascii_lowercase);
	match lower.as_deref() {
		Some("0x") => (&value[2..], 16),
		Some("0o") => (&value[2..], 8),
		Some("0b") => (&value[2..], 2),
		_ if value.len() > 1 && value.starts_with('0') => (&value[1..], 8),
		_ => (value, 10),
	}
}

/// Serialize an optional numeric attribute
pub fn serialize_uint_attribute<S, T>(serializer: &mut S, key: &str, value: Option<T>, format: NumberFormat) -> Result<()>
where
	S: Serializer,
	T: Into<u64>,
{
	if let Some(text) = format_uint(value, format) {
		serializer.serialize_attribute(key, text.into())?;
	}
	Ok(())
}
