use crate::{
	errors,
	Result,
};
use std::borrow::Cow;

/// Trait to parse attributes and inner text
///
/// This is implemented my "marker" types to decide how to parse a type (the same type can be
/// parsed differently depending on the marker type)
///
/// `key` names the attribute or element the text came from; it is only used for errors.
pub trait Value<T> {
	/// Parse value from text
	fn parse_value(key: &str, text: Cow<'_, str>) -> Result<T>;
}

/// Implements `Value` for all types implementing `std::str::FromStr`; this is a good default.
pub struct ValueDefault;

impl<T: std::str::FromStr> Value<T> for ValueDefault {
	fn parse_value(key: &str, text: Cow<'_, str>) -> Result<T> {
		text.parse::<T>().map_err(|_| errors::invalid_format(key, &text))
	}
}

/// Implements `Value` for `String`.
pub struct ValueString;

impl Value<String> for ValueString {
	fn parse_value(_key: &str, text: Cow<'_, str>) -> Result<String> {
		Ok(text.into_owned())
	}
}
