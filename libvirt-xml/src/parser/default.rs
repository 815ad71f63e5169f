use crate::{
	parser::{
		Attributes,
		ElementParser,
		ElementState,
		InnerState,
	},
	Result,
};
use std::borrow::Cow;

/// Element with a default parse state
///
/// Variant codecs look up payload states through this (`ElementDefaultParseState<Payload>`), and
/// derived structs use it for nested fields without an explicit `state`.
pub trait Element: Sized {
	/// Parse state to use for this element
	type ParseState: ElementState<Output = Self>;
}

/// Default parse state of an `Element`
pub type ElementDefaultParseState<E> = <E as Element>::ParseState;

/// Group of sibling elements with a default parse state
///
/// `E`, `Option<E>` and `Vec<E>` are `Inner` for every `Element` `E`.
pub trait Inner: Sized {
	/// Parse state to use for this inner data
	type ParseState: InnerState<Output = Self>;
}

/// Default parse state of an `Inner`
pub type InnerDefaultParseState<I> = <I as Inner>::ParseState;

/// Boxes the output of another state; used for recursive elements like disk backing chains.
pub struct BoxedParseState<S>(S);

impl<S: ElementState> ElementState for BoxedParseState<S> {
	type Output = Box<S::Output>;

	fn parse_element_start(tag: &str) -> Option<Self> {
		S::parse_element_start(tag).map(BoxedParseState)
	}

	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		self.0.parse_element_attributes(attributes)
	}

	fn parse_element_attribute(&mut self, key: &str, value: Cow<'_, str>) -> Result<()> {
		self.0.parse_element_attribute(key, value)
	}

	fn parse_element_inner_text(&mut self, text: Cow<'_, str>) -> Result<()> {
		self.0.parse_element_inner_text(text)
	}

	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		self.0.parse_element_inner_node(tag, parser)
	}

	fn parse_element_finish(self) -> Result<Self::Output> {
		Ok(Box::new(self.0.parse_element_finish()?))
	}

	fn parse_error_not_found<T>() -> Result<T> {
		S::parse_error_not_found()
	}
}

impl<E: Element> Element for Box<E> {
	type ParseState = BoxedParseState<E::ParseState>;
}
