use crate::element::{Element, Field, FieldKind, Multiplicity};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

/// Expression turning `#text` (a `&str` or `String` binding) into the `Cow` handed to `Value`;
/// non-string values are trimmed first.
fn value_text(field: &Field, text: TokenStream, owned: bool) -> TokenStream {
	if field.is_string {
		if owned {
			quote!(::std::borrow::Cow::Owned(#text))
		} else {
			quote!(#text)
		}
	} else {
		quote!(::std::borrow::Cow::Borrowed(#text.trim()))
	}
}

fn state_field(krate: &syn::Path, field: &Field) -> TokenStream {
	let Field { ident, ty, span, .. } = field;
	let state_ty = match &field.kind {
		FieldKind::Attribute { optional: true, .. } => quote!(#ty),
		FieldKind::Attribute { .. } => quote!(::std::option::Option<#ty>),
		FieldKind::Text { .. } => quote!(::std::string::String),
		FieldKind::Child { multiplicity: Multiplicity::Required, .. } => quote!(::std::option::Option<#ty>),
		FieldKind::Child { .. } => quote!(#ty),
		FieldKind::Nested { state: Some(state), .. } => quote!(#state),
		FieldKind::Nested { default: true, .. } => {
			quote!(<::std::option::Option<#ty> as #krate::parser::Inner>::ParseState)
		},
		FieldKind::Nested { .. } => quote!(<#ty as #krate::parser::Inner>::ParseState),
	};
	quote_spanned! {*span=>
		#ident: #state_ty,
	}
}

fn finish_field(krate: &syn::Path, tag: &str, field: &Field) -> TokenStream {
	let Field { ident, span, .. } = field;
	let value_t = field.value_type();
	let value = match &field.kind {
		FieldKind::Attribute { optional: true, .. } => quote!(self.#ident),
		FieldKind::Attribute { default: true, .. } => quote!(self.#ident.unwrap_or_default()),
		FieldKind::Attribute { key, .. } => quote! {
			match self.#ident {
				::std::option::Option::Some(v) => v,
				::std::option::Option::None => return ::std::result::Result::Err(#krate::errors::missing_attribute(#key)),
			}
		},
		FieldKind::Text { optional } => {
			let text = value_text(field, quote!(self.#ident), true);
			let (empty, parsed) = if *optional {
				(
					quote!(::std::option::Option::None),
					quote!(::std::option::Option::Some(<#krate::parser::#value_t as #krate::parser::Value<_>>::parse_value(#tag, #text)?)),
				)
			} else {
				(
					quote!(::std::default::Default::default()),
					quote!(<#krate::parser::#value_t as #krate::parser::Value<_>>::parse_value(#tag, #text)?),
				)
			};
			let is_empty = if field.is_string {
				quote!(self.#ident.is_empty())
			} else {
				quote!(self.#ident.trim().is_empty())
			};
			quote! {
				if #is_empty {
					#empty
				} else {
					#parsed
				}
			}
		},
		FieldKind::Child { multiplicity: Multiplicity::Required, .. } => quote!(self.#ident.unwrap_or_default()),
		FieldKind::Child { .. } => quote!(self.#ident),
		FieldKind::Nested { default: true, state: None } => quote! {
			#krate::parser::InnerState::parse_inner_finish(self.#ident)?.unwrap_or_default()
		},
		FieldKind::Nested { .. } => quote! {
			#krate::parser::InnerState::parse_inner_finish(self.#ident)?
		},
	};
	quote_spanned! {*span=>
		#ident: #value,
	}
}

fn parse_attribute(krate: &syn::Path, field: &Field) -> Option<TokenStream> {
	let key = match &field.kind {
		FieldKind::Attribute { key, .. } => key,
		_ => return None,
	};
	let Field { ident, span, .. } = field;
	let value_t = field.value_type();
	let text = value_text(field, quote!(value), false);
	Some(quote_spanned! {*span=>
		if key == #key {
			self.#ident = ::std::option::Option::Some(<#krate::parser::#value_t as #krate::parser::Value<_>>::parse_value(key, #text)?);
			return ::std::result::Result::Ok(());
		}
	})
}

fn parse_child(krate: &syn::Path, field: &Field) -> Option<TokenStream> {
	let (key, multiplicity) = match &field.kind {
		FieldKind::Child { key, multiplicity } => (key, *multiplicity),
		_ => return None,
	};
	let Field { ident, span, .. } = field;
	let value_t = field.value_type();
	let text = value_text(field, quote!(text), true);
	let parsed = quote!(<#krate::parser::#value_t as #krate::parser::Value<_>>::parse_value(tag, #text)?);
	let store = if multiplicity == Multiplicity::List {
		quote!(self.#ident.push(#parsed);)
	} else {
		quote!(self.#ident = ::std::option::Option::Some(#parsed);)
	};
	Some(quote_spanned! {*span=>
		if tag == #key {
			let text = #krate::parser::ElementParserExt::parse_element::<#krate::parser::TextContent>(parser, tag)?;
			#store
			return ::std::result::Result::Ok(());
		}
	})
}

fn parse_nested(krate: &syn::Path, field: &Field) -> Option<TokenStream> {
	if let FieldKind::Nested { .. } = field.kind {
		let Field { ident, span, .. } = field;
		Some(quote_spanned! {*span=>
			let parser = match #krate::parser::InnerState::parse_inner_node(&mut self.#ident, tag, parser)? {
				#krate::parser::InnerParseResult::Next(p) => p,
				#krate::parser::InnerParseResult::Success => return ::std::result::Result::Ok(()),
			};
		})
	} else {
		None
	}
}

pub fn derive_element_parser(element: &Element) -> TokenStream {
	let Element { ident: name, tag, krate, .. } = element;
	let fields = &element.fields;

	let state_fields: TokenStream = fields.iter().map(|f| state_field(krate, f)).collect();
	let finish: TokenStream = fields.iter().map(|f| finish_field(krate, tag, f)).collect();
	let el_attrs: TokenStream = fields.iter().filter_map(|f| parse_attribute(krate, f)).collect();
	let el_children: TokenStream = fields.iter().filter_map(|f| parse_child(krate, f)).collect();
	let el_nested: TokenStream = fields.iter().filter_map(|f| parse_nested(krate, f)).collect();
	let el_text: TokenStream = fields
		.iter()
		.filter(|f| matches!(f.kind, FieldKind::Text { .. }))
		.map(|f| {
			let ident = &f.ident;
			quote! {
				self.#ident.push_str(&text);
				return ::std::result::Result::Ok(());
			}
		})
		.collect();

	let (handle_unknown_attribute, handle_unknown_element, handle_text) = if element.deny_unknown {
		(
			quote! {
				::std::result::Result::Err(#krate::errors::unexpected_attribute(key))
			},
			quote! {
				::std::result::Result::Err(#krate::errors::unexpected_element(tag))
			},
			quote! {
				if !text.trim().is_empty() {
					return ::std::result::Result::Err(#krate::errors::unexpected_text());
				}
				::std::result::Result::Ok(())
			},
		)
	} else {
		(
			quote! {
				::std::result::Result::Ok(())
			},
			quote! {
				#krate::parser::ElementParserExt::skip_element(parser)
			},
			quote! {
				::std::result::Result::Ok(())
			},
		)
	};

	quote! {
		const _: () = {
			#[derive(Default)]
			pub struct State {
				#state_fields
			}

			impl #krate::parser::FixedElementState for State {
				type Output = #name;

				const TAG: &'static str = #tag;

				#[allow(unused_variables)]
				fn parse_element_attribute(&mut self, key: &str, value: ::std::borrow::Cow<'_, str>) -> #krate::Result<()> {
					#el_attrs
					#handle_unknown_attribute
				}

				#[allow(unused_variables, unreachable_code)]
				fn parse_element_inner_text(&mut self, text: ::std::borrow::Cow<'_, str>) -> #krate::Result<()> {
					#el_text
					#handle_text
				}

				#[allow(unused_variables)]
				fn parse_element_inner_node<P: #krate::parser::ElementParser>(&mut self, tag: &str, parser: P) -> #krate::Result<()> {
					#el_children
					#el_nested
					#handle_unknown_element
				}

				fn parse_element_finish(self) -> #krate::Result<Self::Output> {
					::std::result::Result::Ok(#name {
						#finish
					})
				}
			}

			impl #krate::parser::Element for #name {
				type ParseState = State;
			}
		};
	}
}
