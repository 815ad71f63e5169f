use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens, TokenStreamExt};
use syn::Path;

use crate::element::{Element, Field, FieldKind, Multiplicity};

struct ElementAttribute<'a> {
	field: &'a Field,
	key: &'a str,
	optional: bool,
	krate: &'a Path,
}

impl ToTokens for ElementAttribute<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self { field, key, krate, .. } = self;
		let ident = &field.ident;
		let value_t = field.value_type();

		if self.optional {
			tokens.append_all(quote_spanned! {field.span=>
				if let ::std::option::Option::Some(#ident) = &self.#ident {
					serializer.serialize_attribute(#key, <#krate::serializer::#value_t as #krate::serializer::Value<_>>::serialize_value(#ident)?)?;
				}
			});
		} else {
			tokens.append_all(quote_spanned! {field.span=>
				serializer.serialize_attribute(#key, <#krate::serializer::#value_t as #krate::serializer::Value<_>>::serialize_value(&self.#ident)?)?;
			});
		}
	}
}

struct ElementText<'a> {
	field: &'a Field,
	optional: bool,
	krate: &'a Path,
}

impl ToTokens for ElementText<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self { field, krate, .. } = self;
		let ident = &field.ident;
		let value_t = field.value_type();

		if self.optional {
			tokens.append_all(quote_spanned! {field.span=>
				if let ::std::option::Option::Some(#ident) = &self.#ident {
					serializer.serialize_text(<#krate::serializer::#value_t as #krate::serializer::Value<_>>::serialize_value(#ident)?)?;
				}
			});
		} else {
			tokens.append_all(quote_spanned! {field.span=>
				serializer.serialize_text(<#krate::serializer::#value_t as #krate::serializer::Value<_>>::serialize_value(&self.#ident)?)?;
			});
		}
	}
}

struct ElementChild<'a> {
	field: &'a Field,
	key: &'a str,
	multiplicity: Multiplicity,
	krate: &'a Path,
}

impl ToTokens for ElementChild<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self { field, key, krate, .. } = self;
		let ident = &field.ident;
		let value_t = field.value_type();
		let write = quote! {
			serializer.serialize_element(&#krate::serializer::TextElement::new(
				#key,
				<#krate::serializer::#value_t as #krate::serializer::Value<_>>::serialize_value(#ident)?,
			))?;
		};

		tokens.append_all(match self.multiplicity {
			Multiplicity::Required => quote_spanned! {field.span=>
				let #ident = &self.#ident;
				#write
			},
			Multiplicity::Optional => quote_spanned! {field.span=>
				if let ::std::option::Option::Some(#ident) = &self.#ident {
					#write
				}
			},
			Multiplicity::List => quote_spanned! {field.span=>
				for #ident in &self.#ident {
					#write
				}
			},
		});
	}
}

struct ElementNested<'a> {
	field: &'a Field,
	krate: &'a Path,
}

impl ToTokens for ElementNested<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self { field, krate } = self;
		let ident = &field.ident;

		tokens.append_all(quote_spanned! {field.span=>
			#krate::serializer::Inner::serialize_elements(&self.#ident, serializer)?;
		});
	}
}

pub fn derive_fixed_element(el: &Element) -> TokenStream {
	let Element { ident, tag, krate, .. } = el;

	let mut attributes = TokenStream::new();
	let mut content = TokenStream::new();
	for field in &el.fields {
		match &field.kind {
			FieldKind::Attribute { key, optional, .. } => ElementAttribute {
				field,
				key,
				optional: *optional,
				krate,
			}
			.to_tokens(&mut attributes),
			FieldKind::Text { optional } => ElementText {
				field,
				optional: *optional,
				krate,
			}
			.to_tokens(&mut content),
			FieldKind::Child { key, multiplicity } => ElementChild {
				field,
				key,
				multiplicity: *multiplicity,
				krate,
			}
			.to_tokens(&mut content),
			FieldKind::Nested { .. } => ElementNested { field, krate }.to_tokens(&mut content),
		}
	}

	quote! {
		impl #krate::serializer::FixedElement for #ident {
			const TAG: &'static str = #tag;

			#[allow(unused_variables)]
			fn serialize_attributes<S: #krate::serializer::Serializer>(&self, serializer: &mut S) -> #krate::Result<()> {
				#attributes
				::std::result::Result::Ok(())
			}

			#[allow(unused_variables)]
			fn serialize_content<S: #krate::serializer::Serializer>(&self, serializer: &mut S) -> #krate::Result<()> {
				#content
				::std::result::Result::Ok(())
			}
		}
	}
}
