use crate::{
	serializer::{
		Element,
		Serializer,
	},
	Result,
};
use std::borrow::Cow;

/// Serializable element with a fixed tag.
///
/// Serializing is split in two steps so an element flattening a variant payload into its own
/// start tag can interleave the payload's attributes and content with its own fields.
pub trait FixedElement {
	/// Fixed tag
	const TAG: &'static str;

	/// Serialize all attributes of the element.
	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		let _ = serializer;
		Ok(())
	}

	/// Serialize inner text and elements (after all attributes).
	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		let _ = serializer;
		Ok(())
	}
}

impl<E: FixedElement> FixedElement for Box<E> {
	const TAG: &'static str = E::TAG;

	fn serialize_attributes<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		(**self).serialize_attributes(serializer)
	}

	fn serialize_content<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		(**self).serialize_content(serializer)
	}
}

impl<E: FixedElement> Element for E {
	fn tag(&self) -> Cow<'_, str> {
		Cow::Borrowed(Self::TAG)
	}

	fn serialize<S: Serializer>(&self, mut serializer: S) -> Result<()> {
		self.serialize_attributes(&mut serializer)?;
		self.serialize_content(&mut serializer)
	}
}
