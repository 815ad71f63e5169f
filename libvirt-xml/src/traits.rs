use crate::{
	parser,
	quick_xml::{
		serialize_document,
		serialize_document_with,
		Parser,
		SerializeOptions,
	},
	serializer,
	Result,
};

/// Combining `parser::Element` and `serializer::Element`.
///
/// Can be derived.
pub trait Element: parser::Element + serializer::Element {}

impl<E: parser::Element + serializer::Element> Element for E {}

/// Parse and render entry points for every element type
///
/// Sub-documents used for device hot-plug (`<disk>`, `<hostdev>`, ...) work the same way as full
/// `<domain>` or `<device>` documents.
pub trait Document: Element {
	/// Parse a document with this element as root
	fn from_xml(xml: &str) -> Result<Self> {
		Parser::new(xml).parse_document()
	}

	/// Render the element as indented document without XML declaration
	fn to_xml(&self) -> Result<String> {
		serialize_document(self)
	}

	/// Render the element with custom layout options
	fn to_xml_with(&self, options: &SerializeOptions) -> Result<String> {
		serialize_document_with(self, options)
	}
}

impl<E: Element> Document for E {}
