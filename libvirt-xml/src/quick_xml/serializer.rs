use crate::{
	serializer::{
		self,
		Element,
	},
	Result,
};
use quick_xml::{
	events::{
		attributes::Attribute,
		BytesDecl,
		BytesEnd,
		BytesStart,
		BytesText,
		Event,
	},
	name::QName,
};
use std::{
	borrow::Cow,
	io,
};

/// Output layout settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
	/// Spaces per nesting level; `0` writes everything on a single line.
	pub indent: usize,
	/// Start the document with `<?xml version="1.0" encoding="UTF-8"?>`
	pub declaration: bool,
}

impl Default for SerializeOptions {
	/// The layout libvirt tooling compares against: two spaces, no declaration
	fn default() -> Self {
		Self {
			indent: 2,
			declaration: false,
		}
	}
}

/// Escape text and attribute values like libvirt's reference encoder does
fn escape(value: &str) -> Cow<'_, str> {
	if !value.contains(|c| matches!(c, '&' | '<' | '>' | '"' | '\'' | '\t' | '\n' | '\r')) {
		return Cow::Borrowed(value);
	}
	let mut escaped = String::with_capacity(value.len() + 8);
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&#34;"),
			'\'' => escaped.push_str("&#39;"),
			'\t' => escaped.push_str("&#x9;"),
			'\n' => escaped.push_str("&#xA;"),
			'\r' => escaped.push_str("&#xD;"),
			c => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// Serialize element into full document in memory, using the default layout
pub fn serialize_document<E: Element>(element: &E) -> Result<String> {
	serialize_document_with(element, &SerializeOptions::default())
}

/// Serialize element into full document in memory
pub fn serialize_document_with<E: Element>(element: &E, options: &SerializeOptions) -> Result<String> {
	let mut writer = quick_xml::Writer::new(Vec::new());
	let mut serializer = Serializer::new(&mut writer, options.indent);
	if options.declaration {
		serializer.serialize_declaration()?;
	}
	serializer.serialize_element(element)?;
	String::from_utf8(writer.into_inner())
		.map_err(|e| quick_xml::Error::NonDecodable(Some(e.utf8_error())).into())
}

/// Serializer adaptor for `quick_xml::Writer`
///
/// Never writes self-closing tags. With indentation enabled every start tag goes on a new line;
/// an end tag only does if the element contained other elements.
pub struct Serializer<'w, W: io::Write> {
	writer: &'w mut quick_xml::Writer<W>,
	indent: usize,
	depth: usize,
	// last written tag was a start tag
	indented_in: bool,
	// nothing written yet, no newline before the first tag
	at_start: bool,
}

impl<'w, W: io::Write> Serializer<'w, W> {
	/// New adaptor using the writer and `indent` spaces per level
	pub fn new(writer: &'w mut quick_xml::Writer<W>, indent: usize) -> Self {
		Self {
			writer,
			indent,
			depth: 0,
			indented_in: false,
			at_start: true,
		}
	}

	/// Write the XML declaration
	pub fn serialize_declaration(&mut self) -> Result<()> {
		self.writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
		self.at_start = false;
		Ok(())
	}

	/// Serialize single element
	pub fn serialize_element<E: Element>(&mut self, element: &E) -> Result<()> {
		let tag = element.tag().into_owned();
		let mut ser = SRef {
			start: Some(BytesStart::new(tag.clone())),
			tag,
			serializer: self,
		};
		element.serialize(&mut ser)?;
		ser.close()
	}

	fn write_whitespace(&mut self, text: &str) -> Result<()> {
		self.writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
		Ok(())
	}

	fn open_indent(&mut self) -> Result<()> {
		self.line_break()?;
		self.depth += 1;
		self.indented_in = true;
		Ok(())
	}

	fn close_indent(&mut self) -> Result<()> {
		self.depth = self.depth.saturating_sub(1);
		if self.indented_in {
			self.indented_in = false;
			return Ok(());
		}
		self.line_break()
	}

	fn line_break(&mut self) -> Result<()> {
		if self.indent == 0 {
			return Ok(());
		}
		let mut ws = String::new();
		if self.at_start {
			self.at_start = false;
		} else {
			ws.push('\n');
		}
		ws.extend(std::iter::repeat(' ').take(self.indent * self.depth));
		if ws.is_empty() {
			return Ok(());
		}
		self.write_whitespace(&ws)
	}
}

struct SRef<'a, 'w, W: io::Write> {
	serializer: &'a mut Serializer<'w, W>,
	start: Option<BytesStart<'static>>,
	tag: String,
}

impl<W: io::Write> SRef<'_, '_, W> {
	fn open(&mut self) -> Result<()> {
		if let Some(start) = self.start.take() {
			self.serializer.open_indent()?;
			self.serializer.writer.write_event(Event::Start(start))?;
		}
		Ok(())
	}

	fn close(mut self) -> Result<()> {
		self.open()?;
		self.serializer.close_indent()?;
		self.serializer.writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
		Ok(())
	}
}

impl<W: io::Write> serializer::Serializer for SRef<'_, '_, W> {
	fn serialize_attribute(&mut self, key: &str, value: Cow<'_, str>) -> Result<()> {
		match self.start.as_mut() {
			Some(start) => {
				let value = escape(&value);
				start.push_attribute(Attribute {
					key: QName(key.as_bytes()),
					value: Cow::Borrowed(value.as_bytes()),
				});
				Ok(())
			},
			None => Err(crate::errors::unexpected_attribute(key)),
		}
	}

	fn serialize_text(&mut self, text: Cow<'_, str>) -> Result<()> {
		self.open()?;
		self.serializer.writer.write_event(Event::Text(BytesText::from_escaped(escape(&text))))?;
		Ok(())
	}

	fn serialize_element<E: Element>(&mut self, element: &E) -> Result<()> {
		self.open()?;
		self.serializer.serialize_element(element)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::domain::{
		Domain,
		Input,
	};

	#[test]
	fn indented_layout() {
		let domain = Domain {
			kind: Some("kvm".into()),
			name: "test".into(),
			..Default::default()
		};
		assert_eq!(serialize_document(&domain).unwrap(), "<domain type=\"kvm\">\n  <name>test</name>\n</domain>");
	}

	#[test]
	fn empty_elements_are_not_self_closing() {
		let input = Input {
			kind: "tablet".into(),
			bus: Some("usb".into()),
			..Default::default()
		};
		assert_eq!(serialize_document(&input).unwrap(), "<input type=\"tablet\" bus=\"usb\"></input>");
	}

	#[test]
	fn compact_with_declaration() {
		let domain = Domain {
			kind: Some("kvm".into()),
			name: "a<b & 'c'".into(),
			..Default::default()
		};
		let options = SerializeOptions {
			indent: 0,
			declaration: true,
		};
		assert_eq!(
			serialize_document_with(&domain, &options).unwrap(),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?><domain type=\"kvm\"><name>a&lt;b &amp; &#39;c&#39;</name></domain>",
		);
	}

	#[test]
	fn declaration_with_indent() {
		let input = Input {
			kind: "mouse".into(),
			..Default::default()
		};
		let options = SerializeOptions {
			declaration: true,
			..Default::default()
		};
		assert_eq!(
			serialize_document_with(&input, &options).unwrap(),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<input type=\"mouse\"></input>",
		);
	}

	#[test]
	fn escape_reference_entities() {
		assert_eq!(escape("plain"), Cow::Borrowed("plain"));
		assert_eq!(escape("a\"b\nc\td\r"), "a&#34;b&#xA;c&#x9;d&#xD;");
	}
}
