#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/libvirt-xml/0.1.0")]
//! Typed bindings for the XML documents of the libvirt API: domains (and the device elements used
//! for hot-plugging), and node devices.
//!
//! Every element type can be parsed from and rendered to XML text through the [`Document`] trait:
//!
//! ```
//! use libvirt_xml::{domain::Address, Document};
//!
//! let address = Address::from_xml(r#"<address type="pci" domain="0" bus="0" slot="3"/>"#).unwrap();
//! assert_eq!(
//! 	address.to_xml().unwrap(),
//! 	r#"<address type="pci" domain="0x0000" bus="0x00" slot="0x03"></address>"#,
//! );
//! ```
//!
//! Rendering reproduces the layout libvirt tooling compares against: two spaces indentation, no
//! self-closing tags and no XML declaration.
//!
//! The documents are built on a generic interface to parse XML data: each type implements how to
//! parse and serialize it (mostly derived), while the `quick_xml` module adapts a concrete XML
//! reader and writer. Elements whose shape depends on a discriminator attribute (`<address
//! type=...>`, `<controller type=...>`, `<hostdev mode=... type=...>`, ...) are modelled as enums
//! with hand-written codecs; unknown discriminator values are skipped instead of failing.

extern crate self as libvirt_xml;

// offer an element to an `InnerState`; return from the calling `parse_element_inner_node` if it
// was taken, evaluate to the parser otherwise
macro_rules! try_inner {
	($state:expr, $tag:expr, $parser:expr) => {
		match $crate::parser::InnerState::parse_inner_node(&mut $state, $tag, $parser)? {
			$crate::parser::InnerParseResult::Next(p) => p,
			$crate::parser::InnerParseResult::Success => return Ok(()),
		}
	};
}

pub mod domain;
pub mod errors;
pub mod node_device;
pub mod number;
pub mod parser;
pub mod quick_xml;
pub mod serializer;
mod traits;

pub use self::errors::Error;
/// Result alias with out error type included
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub use self::traits::{
	Document,
	Element,
};

/// Derive `parser::Element` and `serializer::FixedElement`
pub use libvirt_xml_derive::Element;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;
