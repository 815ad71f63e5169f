use crate::{
	errors,
	parser::{
		Attributes,
		Element,
		ElementParser,
		ElementParserExt,
		ElementState,
	},
	Result,
};
use quick_xml::events::{
	BytesStart,
	Event,
};
use std::borrow::Cow;

/// Parser adaptor for a `quick_xml::Reader` over an in-memory document
pub struct Parser<'a> {
	reader: quick_xml::Reader<&'a [u8]>,
	pending: Option<Event<'a>>,
}

impl<'a> Parser<'a> {
	/// Create a new adaptor reading the given document text
	pub fn new(input: &'a str) -> Self {
		Self {
			reader: quick_xml::Reader::from_str(input),
			pending: None,
		}
	}

	fn peek(&mut self) -> Result<Event<'a>> {
		match &self.pending {
			Some(event) => Ok(event.clone()),
			None => {
				let event = self.reader.read_event()?;
				self.pending = Some(event.clone());
				Ok(event)
			},
		}
	}

	fn clear(&mut self) {
		self.pending = None;
	}

	/// Parse a single (root) element from reading a document
	///
	/// Uses the default state type for the returned element.
	pub fn parse_document<E: Element>(&mut self) -> Result<E> {
		self.parse_document_for_state::<E::ParseState>()
	}

	/// Parse a single (root) element from reading a document
	///
	/// Uses the given state type.
	pub fn parse_document_for_state<S: ElementState>(&mut self) -> Result<S::Output> {
		let mut output = None;
		loop {
			match self.peek()? {
				Event::Eof => {
					if let Some(o) = output {
						return Ok(o);
					}
					return Err(errors::unexpected_eof("empty document"));
				},
				Event::End(_) => {
					return Err(errors::unexpected_end());
				},
				Event::Start(s) | Event::Empty(s) => {
					let tag = tag_name(&s);
					if output.is_some() {
						return Err(errors::unexpected_element(&tag));
					}
					let mut finished_inner = false;
					let p = PRef { parser: self, finished_element: &mut finished_inner };
					output = Some(p.parse_element::<S>(&tag)?);
					if !finished_inner {
						return Err(errors::inner_element_not_parsed(&tag));
					}
					continue;
				},
				// not supported
				Event::PI(_) => return Err(errors::unexpected_pi()),
				// ignore those at document level before the root element
				Event::Decl(_) => {
					if output.is_some() {
						return Err(errors::unexpected_decl());
					}
				},
				Event::DocType(_) => {
					if output.is_some() {
						return Err(errors::unexpected_doctype());
					}
				},
				// ignore comments
				Event::Comment(_) => (),
				Event::Text(t) => {
					if !t.unescape()?.trim().is_empty() {
						return Err(errors::unexpected_text());
					}
				},
				Event::CData(_) => return Err(errors::unexpected_text()),
			}
			// Start+Empty continue directly; everything else needs to be cleared so we don't read it again
			self.clear();
		}
	}
}

fn tag_name<'s>(start: &'s BytesStart<'_>) -> Cow<'s, str> {
	String::from_utf8_lossy(start.name().into_inner())
}

fn collect_attributes(start: &BytesStart<'_>) -> Result<Attributes> {
	let mut attributes = Attributes::new();
	for attr in start.attributes() {
		let attr = attr?;
		let key = String::from_utf8_lossy(attr.key.into_inner()).into_owned();
		let value = attr.unescape_value()?.into_owned();
		attributes.push(key, value);
	}
	Ok(attributes)
}

struct PRef<'x, 'a> {
	parser: &'x mut Parser<'a>,
	finished_element: &'x mut bool,
}

impl ElementParser for PRef<'_, '_> {
	fn parse_element_state<E: ElementState>(self, state: &mut E) -> Result<()> {
		let (start, closed) = match self.parser.peek()? {
			Event::Start(s) => (s, false),
			Event::Empty(s) => (s, true),
			_ => return Err(errors::missing_unknown_element()),
		};

		state.parse_element_attributes(&collect_attributes(&start)?)?;

		self.parser.clear(); // consume start tag

		// read inner (unless there is no inner)
		if closed {
			*self.finished_element = true;
			return Ok(());
		}

		loop {
			match self.parser.peek()? {
				Event::Eof => return Err(errors::unexpected_eof("unclosed element")),
				Event::End(_) => {
					self.parser.clear();
					*self.finished_element = true;
					return Ok(());
				},
				Event::Start(s) | Event::Empty(s) => {
					let tag = tag_name(&s);
					let mut finished_inner = false;
					let p = PRef { parser: self.parser, finished_element: &mut finished_inner };
					state.parse_element_inner_node(&tag, p)?;
					if !finished_inner {
						return Err(errors::inner_element_not_parsed(&tag));
					}
					continue;
				},
				// not supported
				Event::PI(_) => return Err(errors::unexpected_pi()),
				// within elements those shouldn't be there
				Event::Decl(_) => return Err(errors::unexpected_decl()),
				Event::DocType(_) => return Err(errors::unexpected_doctype()),
				// ignore comments
				Event::Comment(_) => (),
				Event::Text(t) => {
					state.parse_element_inner_text(t.unescape()?)?;
				},
				Event::CData(c) => {
					state.parse_element_inner_text(String::from_utf8_lossy(&c))?;
				},
			}
			// Start+Empty continue directly; everything else needs to be cleared so we don't read it again
			self.parser.clear();
		}
	}
}

#[cfg(test)]
mod test {
	use super::Parser;
	use crate::{
		domain::Input,
		Error,
	};

	#[test]
	fn declaration_and_comments_before_root() {
		let input: Input = Parser::new(
			"<?xml version=\"1.0\"?>\n<!-- tablet -->\n<input type=\"tablet\" bus=\"usb\"/>\n",
		)
		.parse_document()
		.unwrap();
		assert_eq!(input.kind, "tablet");
		assert_eq!(input.bus.as_deref(), Some("usb"));
	}

	#[test]
	fn malformed_document() {
		let err = Parser::new("<input type=\"tablet\">").parse_document::<Input>().unwrap_err();
		assert!(matches!(err, Error::UnexpectedEof { .. }), "{:?}", err);

		let err = Parser::new("<input type=\"tablet\"></disk>").parse_document::<Input>().unwrap_err();
		assert!(matches!(err, Error::Xml(_)), "{:?}", err);

		let err = Parser::new("").parse_document::<Input>().unwrap_err();
		assert!(matches!(err, Error::UnexpectedEof { .. }), "{:?}", err);
	}

	#[test]
	fn second_root_element() {
		let err = Parser::new("<input type=\"tablet\"/><input type=\"mouse\"/>")
			.parse_document::<Input>()
			.unwrap_err();
		assert!(matches!(err, Error::UnexpectedElement { .. }), "{:?}", err);
	}
}
