use crate::Result;
use std::borrow::Cow;

/// Renders attribute values and element text
///
/// Marker types implement this, so a field picks its rendering independent of its type; the
/// derive uses `ValueString` for `String` fields and `ValueDefault` otherwise. Numbers with a
/// fixed libvirt layout (hex addresses) go through `crate::number` instead.
pub trait Value<T> {
	/// Render value as text
	fn serialize_value(data: &T) -> Result<Cow<'_, str>>;
}

/// Renders through `Display` (numbers, `String`)
pub struct ValueDefault;

impl<T: std::fmt::Display> Value<T> for ValueDefault {
	fn serialize_value(data: &T) -> Result<Cow<'_, str>> {
		Ok(Cow::Owned(data.to_string()))
	}
}

/// Borrows string data without copying
pub struct ValueString;

impl<T: AsRef<str>> Value<T> for ValueString {
	fn serialize_value(data: &T) -> Result<Cow<'_, str>> {
		Ok(Cow::Borrowed(data.as_ref()))
	}
}
