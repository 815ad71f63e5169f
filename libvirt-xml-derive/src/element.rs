use darling::{
	ast,
	util::{Flag, Override},
	FromDeriveInput, FromField,
};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, spanned::Spanned, Ident, Path, Type};

mod infer_type;

/// How often a text child element may appear
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
	/// Exactly once; missing elements produce `Default::default()`
	Required,
	/// `Option<T>`
	Optional,
	/// `Vec<T>`
	List,
}

pub enum FieldKind {
	/// `key="value"` on the element itself
	Attribute {
		key: String,
		optional: bool,
		default: bool,
	},
	/// Text content of the element
	Text {
		optional: bool,
	},
	/// `<key>value</key>` child element
	Child {
		key: String,
		multiplicity: Multiplicity,
	},
	/// Element(s) with their own `parser::Inner`/`serializer::Inner` implementation
	Nested {
		default: bool,
		state: Option<Type>,
	},
}

pub struct Field {
	pub ident: Ident,
	pub ty: Type,
	pub kind: FieldKind,
	pub is_string: bool,
	pub span: Span,
}

impl Field {
	/// "value type" used for parsing and serializing text.
	///
	/// Despite having the same `Ident`, these are actually distinct types in different modules.
	pub fn value_type(&self) -> TokenStream {
		if self.is_string {
			quote!(ValueString)
		} else {
			quote!(ValueDefault)
		}
	}
}

#[derive(FromField)]
#[darling(attributes(xml_data))]
pub struct RawField {
	ident: Option<Ident>,
	ty: Type,
	#[darling(default)]
	attr: Option<Override<String>>,
	#[darling(default)]
	child: Option<Override<String>>,
	#[darling(default)]
	text: Flag,
	#[darling(default)]
	default: Flag,
	#[darling(default)]
	state: Option<Type>,
}

impl RawField {
	fn to_field(&self) -> darling::Result<Field> {
		let span = self.ty.span();
		let ident = match &self.ident {
			Some(ident) => ident.clone(),
			None => return Err(darling::Error::custom("only named fields are supported").with_span(&self.ty)),
		};
		let exclusive = [self.attr.is_some(), self.child.is_some(), self.text.is_present()];
		if exclusive.iter().filter(|set| **set).count() > 1 {
			return Err(darling::Error::custom("`attr`, `child` and `text` are exclusive").with_span(&ident));
		}
		if self.state.is_some() && (self.attr.is_some() || self.child.is_some() || self.text.is_present()) {
			return Err(darling::Error::custom("`state` only applies to nested elements").with_span(&ident));
		}
		let name = || ident.to_string();
		let kind = if let Some(attr) = &self.attr {
			FieldKind::Attribute {
				key: attr.clone().unwrap_or_else(name),
				optional: infer_type::option(&self.ty),
				default: self.default.is_present(),
			}
		} else if let Some(child) = &self.child {
			let multiplicity = if infer_type::option(&self.ty) {
				Multiplicity::Optional
			} else if infer_type::vec(&self.ty) {
				Multiplicity::List
			} else {
				Multiplicity::Required
			};
			FieldKind::Child {
				key: child.clone().unwrap_or_else(name),
				multiplicity,
			}
		} else if self.text.is_present() {
			FieldKind::Text {
				optional: infer_type::option(&self.ty),
			}
		} else {
			FieldKind::Nested {
				default: self.default.is_present(),
				state: self.state.clone(),
			}
		};
		Ok(Field {
			is_string: infer_type::string(&self.ty),
			ident,
			ty: self.ty.clone(),
			kind,
			span,
		})
	}
}

fn default_crate_path() -> Path {
	parse_quote!(::libvirt_xml)
}

#[derive(FromDeriveInput)]
#[darling(attributes(xml_data), supports(struct_named, struct_unit))]
pub struct ElementInput {
	pub ident: Ident,
	pub data: ast::Data<(), RawField>,
	/// If set, the XML tag name to use instead of the deriving struct ident.
	#[darling(default)]
	pub tag: Option<String>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub krate: Path,
	/// Fail on unknown attributes, elements and non-whitespace text instead of skipping them
	#[darling(default)]
	pub deny_unknown: Flag,
}

/// Validated derive input
pub struct Element {
	pub ident: Ident,
	pub tag: String,
	pub krate: Path,
	pub deny_unknown: bool,
	pub fields: Vec<Field>,
}

impl Element {
	pub fn from_input(input: &syn::DeriveInput) -> darling::Result<Self> {
		let input = ElementInput::from_derive_input(input)?;
		let mut errors = darling::Error::accumulator();
		let fields: Vec<Field> = match input.data.as_ref().take_struct() {
			Some(fields) => fields.into_iter().filter_map(|f| errors.handle(f.to_field())).collect(),
			None => Vec::new(),
		};
		if fields.iter().filter(|f| matches!(f.kind, FieldKind::Text { .. })).count() > 1 {
			errors.push(darling::Error::custom("only one `text` field allowed").with_span(&input.ident));
		}
		errors.finish()?;
		Ok(Self {
			tag: input.tag.clone().unwrap_or_else(|| input.ident.to_string()),
			ident: input.ident,
			krate: input.krate,
			deny_unknown: input.deny_unknown.is_present(),
			fields,
		})
	}
}
