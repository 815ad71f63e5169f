use crate::{
	serializer::{
		Element,
		Serializer,
	},
	Result,
};

/// Sibling elements written in field order
///
/// Optional children (`Option<E>`) are left out when `None`; repeated children (`Vec<E>`, like
/// `<disk>` devices or PCI `<address>` lists) are written one after the other.
pub trait Inner {
	/// Serialize all contained elements
	fn serialize_elements<S: Serializer>(&self, serializer: &mut S) -> Result<()>;
}

impl<E: Element> Inner for E {
	fn serialize_elements<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		serializer.serialize_element(self)
	}
}

impl<I: Inner> Inner for Option<I> {
	fn serialize_elements<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		match self {
			Some(inner) => inner.serialize_elements(serializer),
			None => Ok(()),
		}
	}
}

impl<I: Inner> Inner for Vec<I> {
	fn serialize_elements<S: Serializer>(&self, serializer: &mut S) -> Result<()> {
		self.iter().try_for_each(|inner| inner.serialize_elements(serializer))
	}
}
