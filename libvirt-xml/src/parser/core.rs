use crate::{
	errors,
	Result,
};
use std::borrow::Cow;

/// All attributes of an element start tag, in document order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
	entries: Vec<(String, String)>,
}

impl Attributes {
	/// Empty attribute list
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an (already unescaped) attribute
	pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.push((key.into(), value.into()));
	}

	/// Value of the first attribute named `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Iterate over `(key, value)` pairs
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Pass all attributes but the `discriminators` to the payload `state` of a variant element
	pub fn forward<E: ElementState>(&self, state: &mut E, discriminators: &[&str]) -> Result<()> {
		for (key, value) in self.iter() {
			if !discriminators.contains(&key) {
				state.parse_element_attribute(key, Cow::Borrowed(value))?;
			}
		}
		Ok(())
	}

	/// Number of attributes
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the start tag had no attributes
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// A state to parse exactly one element
///
/// The idea is that a parser will try different implementors of this to parse an element it finds;
/// the first implementor returning `Some(..)` on `parse_element_start` will be used to actually
/// parse it.
///
/// After a successful `parse_element_start` the parser needs to call `parse_element_attributes`
/// once with all attributes of the element, then `parse_element_inner_text` and
/// `parse_element_inner_node` until the closing tag of the element is hit, upon which it needs to
/// call `parse_element_finish`.
pub trait ElementState: Sized {
	/// Once fully parsed this is the resulting output type.
	type Output: Sized;

	/// Try creating state to parse an element with the passed `tag`.
	fn parse_element_start(tag: &str) -> Option<Self>;

	/// Parse all attributes of the start tag into state.
	///
	/// States selecting a variant by a discriminator attribute override this; the default
	/// implementation passes each attribute to `parse_element_attribute`.
	fn parse_element_attributes(&mut self, attributes: &Attributes) -> Result<()> {
		for (key, value) in attributes.iter() {
			self.parse_element_attribute(key, Cow::Borrowed(value))?;
		}
		Ok(())
	}

	/// Parse attribute into state
	///
	/// The default implementation will fail with "unexpected attribute".
	fn parse_element_attribute(&mut self, key: &str, value: Cow<'_, str>) -> Result<()> {
		let _ = value;
		Err(errors::unexpected_attribute(key))
	}

	/// Parse text or CDATA into state.
	///
	/// The default implementation will ignore whitespace and fail otherwise.
	fn parse_element_inner_text(&mut self, text: Cow<'_, str>) -> Result<()> {
		if !text.trim().is_empty() {
			return Err(errors::unexpected_text());
		}
		Ok(())
	}

	/// Parse inner elements.
	///
	/// The default implementation will fail with "unexpected element".
	fn parse_element_inner_node<P: ElementParser>(&mut self, tag: &str, parser: P) -> Result<()> {
		let _ = parser;
		Err(errors::unexpected_element(tag))
	}

	/// Finish parsing an element.
	///
	/// This is where you make sure you got all required data (unpacking their types) and can
	/// optionally check data for consistency.
	fn parse_element_finish(self) -> Result<Self::Output>;

	/// In case `parse_element_start` didn't get to accept any element (either because it always
	/// returned `None` or there just wasn't enough data), a parser can use this to generate an
	/// error.
	///
	/// `ParseElementOnce` uses this.
	fn parse_error_not_found<T>() -> Result<T> {
		Err(errors::missing_unknown_element())
	}
}

/// A parser that is ready to parse exactly one element (and nested data).
pub trait ElementParser: Sized {
	/// Start parsing an element with the prepared state
	///
	/// The parser must consume the complete element (including all nested content) from its input,
	/// even if the state ignores parts of it.
	///
	/// Users of this method will create the state using `ElementState::parse_element_start` and
	/// produce the final result using `ElementState::parse_element_finish` after calling this
	/// method.
	fn parse_element_state<E: ElementState>(self, state: &mut E) -> Result<()>;
}

#[cfg(test)]
mod test {
	use super::Attributes;

	#[test]
	fn attribute_lookup() {
		let mut attributes = Attributes::new();
		attributes.push("domain", "0x0000");
		attributes.push("type", "pci");
		assert_eq!(attributes.get("type"), Some("pci"));
		assert_eq!(attributes.get("bus"), None);
		assert_eq!(
			attributes.iter().map(|(k, _)| k).collect::<Vec<_>>(),
			vec!["domain", "type"],
		);
		assert_eq!(attributes.len(), 2);
	}
}
