#![allow(missing_docs)] // names should be good enough
//! Error type and helper functions to generate common errors

use quick_xml::events::attributes::AttrError;

/// Everything that can go wrong while parsing or serializing a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unexpected eof: {msg}")]
	UnexpectedEof { msg: String },
	#[error("unexpected end tag")]
	UnexpectedEnd,
	#[error("unexpected decl <?xml ... ?>")]
	UnexpectedDecl,
	#[error("unexpected <!DOCTYPE ...>")]
	UnexpectedDocType,
	#[error("unexpected processing instructions <?...?>")]
	UnexpectedPI,
	#[error("unexpected (non-whitespace) text/CDATA")]
	UnexpectedText,
	#[error("unexpected element: {tag}")]
	UnexpectedElement { tag: String },
	#[error("unexpected attribute: {key}")]
	UnexpectedAttribute { key: String },
	#[error("inner element {tag:?} wasn't fully parsed")]
	InnerElementNotParsed { tag: String },
	#[error("missing element {tag:?}")]
	MissingElement { tag: String },
	#[error("missing element")]
	MissingUnknownElement,
	/// A mandatory (discriminator) attribute is absent
	#[error("missing attribute {key:?}")]
	MissingAttribute { key: String },
	/// Attribute or element text doesn't parse as the expected value
	#[error("invalid value {value:?} for {key:?}")]
	Format { key: String, value: String },
	/// Element content can't be decoded for the selected variant
	#[error("unsupported {key:?} value {value:?}")]
	UnsupportedVariant { key: String, value: String },
	#[error(transparent)]
	Xml(#[from] quick_xml::Error),
	#[error(transparent)]
	Attribute(#[from] AttrError),
}

pub fn unexpected_eof(msg: &str) -> Error {
	Error::UnexpectedEof { msg: msg.into() }
}

pub fn unexpected_end() -> Error {
	Error::UnexpectedEnd
}

pub fn unexpected_decl() -> Error {
	Error::UnexpectedDecl
}

pub fn unexpected_doctype() -> Error {
	Error::UnexpectedDocType
}

pub fn unexpected_pi() -> Error {
	Error::UnexpectedPI
}

pub fn unexpected_text() -> Error {
	Error::UnexpectedText
}

pub fn unexpected_element(tag: &str) -> Error {
	Error::UnexpectedElement { tag: tag.into() }
}

pub fn unexpected_attribute(key: &str) -> Error {
	Error::UnexpectedAttribute { key: key.into() }
}

pub fn inner_element_not_parsed(tag: &str) -> Error {
	Error::InnerElementNotParsed { tag: tag.into() }
}

pub fn missing_element(tag: &str) -> Error {
	Error::MissingElement { tag: tag.into() }
}

pub fn missing_unknown_element() -> Error {
	Error::MissingUnknownElement
}

pub fn missing_attribute(key: &str) -> Error {
	Error::MissingAttribute { key: key.into() }
}

pub fn invalid_format(key: &str, value: &str) -> Error {
	Error::Format { key: key.into(), value: value.into() }
}

pub fn unsupported_variant(key: &str, value: &str) -> Error {
	Error::UnsupportedVariant { key: key.into(), value: value.into() }
}
