use crate::{
	parser::{
		Attributes,
		ElementParser,
		ElementParserExt,
		ElementState,
	},
	Result,
};
use std::borrow::Cow;

/// `ElementState` collecting the text of a text-only element with any tag
///
/// Attributes and nested elements are ignored.
#[derive(Debug, Default)]
pub struct TextContent {
	text: String,
}

impl ElementState for TextContent {
	type Output = String;

	fn parse_element_start(_tag: &str) -> Option<Self> {
		Some(Self::default())
	}

	fn parse_element_attributes(&mut self, _attributes: &Attributes) -> Result<()> {
		Ok(())
	}

	fn parse_element_inner_text(&mut self, text: Cow<'_, str>) -> Result<()> {
		self.text.push_str(&text);
		Ok(())
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, _tag: &str, parser: P) -> Result<()> {
		parser.skip_element()
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(self.text)
	}
}
