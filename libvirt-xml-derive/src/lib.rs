//! Derive `libvirt-xml` element implementations
//!
//! Deriving supports the following attributes on the struct:
//! - `#[xml_data(tag = "...")]`: XML tag; defaults to the struct name
//! - `#[xml_data(crate = "...")]`: Path of the `libvirt-xml` crate; defaults to `::libvirt_xml`
//! - `#[xml_data(deny_unknown)]`: Fail on unknown attributes, inner elements and non-whitespace
//!   text. Without it they are skipped, so documents written by newer libvirt versions still
//!   parse.
//!
//! And the following attributes on struct fields:
//! - `#[xml_data(attr)]`, `#[xml_data(attr = "...")]`: Field is an attribute of the element, keyed
//!   by field name or the given key. `Option<T>` fields are optional; others are required unless
//!   also marked `default`.
//! - `#[xml_data(child)]`, `#[xml_data(child = "...")]`: Field is a text-only child element
//!   (`<key>value</key>`). `Option<T>` and `Vec<T>` fields take zero/one and many occurences.
//! - `#[xml_data(text)]`: Field is the text content of the element.
//! - no `attr`/`child`/`text`: Field holds nested elements (anything implementing
//!   `parser::Inner` and `serializer::Inner`); `default` turns a missing element into
//!   `Default::default()`, `state = "..."` picks a different `parser::InnerState`.
//!
//! `String` values (also inside `Option` and `Vec`) are taken verbatim; everything else uses
//! `FromStr`/`Display` on the trimmed text.
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/libvirt-xml-derive/0.1.0")]

extern crate proc_macro;

mod element;
mod parser;
mod serialize;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `libvirt_xml::{parser::Element, serializer::FixedElement}`
#[proc_macro_derive(Element, attributes(xml_data))]
pub fn derive_element(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(match element::Element::from_input(&input) {
		Ok(element) => {
			let mut output = serialize::derive_fixed_element(&element);
			output.extend(parser::derive_element_parser(&element));
			output
		},
		Err(e) => e.write_errors(),
	})
}
