use crate::{
	parser::{
		Element,
		ElementParser,
		ElementState,
		Inner,
	},
	Result,
};
use std::borrow::Cow;

/// Result of `InnerState` parse methods to signal whether they successfully parsed the input or
/// another `InnerState` needs to take a shot.
#[derive(Debug)]
pub enum InnerParseResult<Input> {
	/// Parsed successfully
	Success,
	/// Need something else to take the input
	Next(Input),
}

/// State to parse multiple elements (on the same level)
pub trait InnerState: Default {
	/// Once fully parsed this is the resulting output type.
	type Output: Sized;

	/// Try parsing an element with the given tag
	///
	/// Should not fail if it doesn't recognize the tag; instead it needs to return the parser.
	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		let _ = tag;
		Ok(InnerParseResult::Next(parser))
	}

	/// Try parsing inner text
	///
	/// Should not fail if it doesn't take text (but may fail if it does but can't parse it).
	fn parse_inner_text<'t>(&mut self, text: Cow<'t, str>) -> Result<InnerParseResult<Cow<'t, str>>> {
		Ok(InnerParseResult::Next(text))
	}

	/// Finish parsing.
	fn parse_inner_finish(self) -> Result<Self::Output>;
}

fn parse_one<E: ElementState, P: ElementParser>(tag: &str, parser: P) -> Result<Result<E::Output, P>> {
	match E::parse_element_start(tag) {
		Some(mut state) => {
			parser.parse_element_state(&mut state)?;
			Ok(Ok(state.parse_element_finish()?))
		},
		None => Ok(Err(parser)),
	}
}

/// `InnerState` to parse a single element
pub struct ParseElementOnce<E: ElementState> {
	element: Option<E::Output>,
}

impl<E: ElementState> Default for ParseElementOnce<E> {
	fn default() -> Self {
		Self { element: None }
	}
}

impl<E: ElementState> InnerState for ParseElementOnce<E> {
	type Output = E::Output;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		if self.element.is_some() {
			return Ok(InnerParseResult::Next(parser));
		}
		Ok(match parse_one::<E, P>(tag, parser)? {
			Ok(element) => {
				self.element = Some(element);
				InnerParseResult::Success
			},
			Err(parser) => InnerParseResult::Next(parser),
		})
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		match self.element {
			Some(o) => Ok(o),
			None => E::parse_error_not_found(),
		}
	}
}

impl<E: Element> Inner for E {
	type ParseState = ParseElementOnce<E::ParseState>;
}

/// `InnerState` to parse a single optional element
pub struct ParseElementOptional<E: ElementState> {
	element: Option<E::Output>,
}

impl<E: ElementState> Default for ParseElementOptional<E> {
	fn default() -> Self {
		Self { element: None }
	}
}

impl<E: ElementState> InnerState for ParseElementOptional<E> {
	type Output = Option<E::Output>;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		if self.element.is_some() {
			return Ok(InnerParseResult::Next(parser));
		}
		Ok(match parse_one::<E, P>(tag, parser)? {
			Ok(element) => {
				self.element = Some(element);
				InnerParseResult::Success
			},
			Err(parser) => InnerParseResult::Next(parser),
		})
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		Ok(self.element)
	}
}

impl<E: Element> Inner for Option<E> {
	type ParseState = ParseElementOptional<E::ParseState>;
}

/// `InnerState` to parse multiple occurences of a single element
pub struct ParseElementList<E: ElementState> {
	elements: Vec<E::Output>,
}

impl<E: ElementState> Default for ParseElementList<E> {
	fn default() -> Self {
		Self {
			elements: Vec::new(),
		}
	}
}

impl<E: ElementState> InnerState for ParseElementList<E> {
	type Output = Vec<E::Output>;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		Ok(match parse_one::<E, P>(tag, parser)? {
			Ok(element) => {
				self.elements.push(element);
				InnerParseResult::Success
			},
			Err(parser) => InnerParseResult::Next(parser),
		})
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		Ok(self.elements)
	}
}

impl<E: Element> Inner for Vec<E> {
	type ParseState = ParseElementList<E::ParseState>;
}

/// `InnerState` for an optional variant element whose state may discard what it parsed
///
/// The element state produces `Option<T>`; `None` means the element was consumed but not
/// recognized (e.g. an unknown discriminator). Another occurence is accepted until one was
/// recognized.
pub struct ParseElementMaybe<E: ElementState> {
	element: Option<E::Output>,
}

impl<E: ElementState> Default for ParseElementMaybe<E> {
	fn default() -> Self {
		Self { element: None }
	}
}

impl<T, E> InnerState for ParseElementMaybe<E>
where
	E: ElementState<Output = Option<T>>,
{
	type Output = Option<T>;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		if matches!(self.element, Some(Some(_))) {
			return Ok(InnerParseResult::Next(parser));
		}
		Ok(match parse_one::<E, P>(tag, parser)? {
			Ok(element) => {
				self.element = Some(element);
				InnerParseResult::Success
			},
			Err(parser) => InnerParseResult::Next(parser),
		})
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		Ok(self.element.flatten())
	}
}

/// `InnerState` for a list of variant elements; unrecognized ones are dropped
pub struct ParseElementMaybeList<E: ElementState> {
	elements: Vec<E::Output>,
}

impl<E: ElementState> Default for ParseElementMaybeList<E> {
	fn default() -> Self {
		Self {
			elements: Vec::new(),
		}
	}
}

impl<T, E> InnerState for ParseElementMaybeList<E>
where
	E: ElementState<Output = Option<T>>,
{
	type Output = Vec<T>;

	fn parse_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<InnerParseResult<P>> {
		Ok(match parse_one::<E, P>(tag, parser)? {
			Ok(element) => {
				self.elements.push(element);
				InnerParseResult::Success
			},
			Err(parser) => InnerParseResult::Next(parser),
		})
	}

	fn parse_inner_finish(self) -> Result<Self::Output> {
		Ok(self.elements.into_iter().flatten().collect())
	}
}
