use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Infer whether a type (after removing `Option`/`Vec`) is `String`.
pub fn string(ty: &Type) -> bool {
	let ty = option_inner(ty).or_else(|| vec_inner(ty)).unwrap_or(ty);
	match selfless_last(ty) {
		Some(last) => last.ident == "String",
		None => false,
	}
}

/// Infer whether a type appears to be `Option<T>`.
pub fn option(ty: &Type) -> bool {
	option_inner(ty).is_some()
}

/// Infer whether a type appears to be `Vec<T>`.
pub fn vec(ty: &Type) -> bool {
	vec_inner(ty).is_some()
}

fn option_inner(ty: &Type) -> Option<&Type> {
	single_argument(ty, "Option")
}

fn vec_inner(ty: &Type) -> Option<&Type> {
	single_argument(ty, "Vec")
}

fn single_argument<'a>(ty: &'a Type, name: &str) -> Option<&'a Type> {
	let last = selfless_last(ty)?;
	if last.ident != name {
		return None;
	}
	match &last.arguments {
		PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
			Some(GenericArgument::Type(inner)) => Some(inner),
			_ => None,
		},
		_ => None,
	}
}

fn selfless_last(ty: &Type) -> Option<&PathSegment> {
	if let Type::Path(ty) = ty {
		if ty.qself.is_none() {
			return ty.path.segments.last();
		}
	}

	None
}

#[cfg(test)]
mod test {
	use syn::parse_quote;

	#[test]
	fn infer() {
		assert!(super::string(&parse_quote!(String)));
		assert!(super::string(&parse_quote!(Option<String>)));
		assert!(super::string(&parse_quote!(Vec<String>)));
		assert!(!super::string(&parse_quote!(Option<u32>)));
		assert!(super::option(&parse_quote!(Option<u32>)));
		assert!(!super::option(&parse_quote!(Vec<u32>)));
		assert!(super::vec(&parse_quote!(std::vec::Vec<Address>)));
	}
}
