use crate::{
	serializer::{
		Element,
		Serializer,
	},
	Result,
};
use std::borrow::Cow;

/// Element with a dynamic tag containing only text: `<tag>text</tag>`
#[derive(Clone, Debug)]
pub struct TextElement<'a> {
	tag: &'a str,
	text: Cow<'a, str>,
}

impl<'a> TextElement<'a> {
	/// New text element
	pub fn new(tag: &'a str, text: impl Into<Cow<'a, str>>) -> Self {
		Self { tag, text: text.into() }
	}
}

impl Element for TextElement<'_> {
	fn tag(&self) -> Cow<'_, str> {
		Cow::Borrowed(self.tag)
	}

	fn serialize<S: Serializer>(&self, mut serializer: S) -> Result<()> {
		serializer.serialize_text(Cow::Borrowed(&self.text))
	}
}
