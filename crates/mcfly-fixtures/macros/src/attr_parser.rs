//! Attribute parsing for `#[buildable(...)]`.

use syn::{Attribute, Error, LitStr, Result};

/// Parsed struct-level attributes.
#[derive(Debug, Default)]
pub(crate) struct StructAttrs {
	/// Class name override
	pub(crate) class: Option<String>,
	/// Path to the runtime crate, for callers going through a re-export
	pub(crate) krate: Option<syn::Path>,
}

/// Parsed field-level attributes.
#[derive(Debug, Default)]
pub(crate) struct FieldAttrs {
	/// Property name override
	pub(crate) rename: Option<String>,
	/// Whether the field is left out of settable properties
	pub(crate) skip: bool,
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs> {
	let mut result = StructAttrs::default();

	for attr in attrs.iter().filter(|a| a.path().is_ident("buildable")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("class") {
				if result.class.is_some() {
					return Err(meta.error("duplicate `class` attribute"));
				}
				let value: LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(Error::new(value.span(), "`class` must not be empty"));
				}
				result.class = Some(value.value());
				Ok(())
			} else if meta.path.is_ident("crate") {
				if result.krate.is_some() {
					return Err(meta.error("duplicate `crate` attribute"));
				}
				let value: LitStr = meta.value()?.parse()?;
				result.krate = Some(value.parse()?);
				Ok(())
			} else {
				Err(meta.error(format!(
					"unknown struct attribute `{}`",
					path_to_string(&meta.path)
				)))
			}
		})?;
	}

	Ok(result)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
	let mut result = FieldAttrs::default();

	for attr in attrs.iter().filter(|a| a.path().is_ident("buildable")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename") {
				if result.rename.is_some() {
					return Err(meta.error("duplicate `rename` attribute"));
				}
				let value: LitStr = meta.value()?.parse()?;
				result.rename = Some(value.value());
				Ok(())
			} else if meta.path.is_ident("skip") {
				if result.skip {
					return Err(meta.error("duplicate `skip` attribute"));
				}
				result.skip = true;
				Ok(())
			} else {
				Err(meta.error(format!(
					"unknown field attribute `{}`",
					path_to_string(&meta.path)
				)))
			}
		})?;
	}

	if result.skip && result.rename.is_some() {
		return Err(Error::new_spanned(
			&attrs[0],
			"`skip` and `rename` cannot be combined",
		));
	}

	Ok(result)
}

fn path_to_string(path: &syn::Path) -> String {
	path.segments
		.iter()
		.map(|s| s.ident.to_string())
		.collect::<Vec<_>>()
		.join("::")
}

#[cfg(test)]
mod tests {
	use super::*;
	use syn::parse_quote;

	#[test]
	fn test_struct_class_override() {
		let attrs: Vec<Attribute> = vec![parse_quote!(#[buildable(class = "Shop")])];
		let parsed = parse_struct_attrs(&attrs).unwrap();
		assert_eq!(parsed.class.as_deref(), Some("Shop"));
	}

	#[test]
	fn test_struct_crate_path() {
		let attrs: Vec<Attribute> = vec![parse_quote!(#[buildable(crate = "mcfly::fixtures")])];
		let parsed = parse_struct_attrs(&attrs).unwrap();
		let krate = parsed.krate.unwrap();
		assert_eq!(path_to_string(&krate), "mcfly::fixtures");
	}

	#[test]
	fn test_struct_unknown_attribute() {
		let attrs: Vec<Attribute> = vec![parse_quote!(#[buildable(table = "shop")])];
		assert!(parse_struct_attrs(&attrs).is_err());
	}

	#[test]
	fn test_struct_empty_class() {
		let attrs: Vec<Attribute> = vec![parse_quote!(#[buildable(class = "")])];
		assert!(parse_struct_attrs(&attrs).is_err());
	}

	#[test]
	fn test_field_rename_and_skip() {
		let rename: Vec<Attribute> = vec![parse_quote!(#[buildable(rename = "unitPrice")])];
		assert_eq!(
			parse_field_attrs(&rename).unwrap().rename.as_deref(),
			Some("unitPrice")
		);

		let skip: Vec<Attribute> = vec![parse_quote!(#[buildable(skip)])];
		assert!(parse_field_attrs(&skip).unwrap().skip);
	}

	#[test]
	fn test_field_duplicate_and_conflict() {
		let duplicate: Vec<Attribute> = vec![parse_quote!(#[buildable(skip, skip)])];
		assert!(parse_field_attrs(&duplicate).is_err());

		let conflict: Vec<Attribute> = vec![parse_quote!(#[buildable(skip, rename = "x")])];
		assert!(parse_field_attrs(&conflict).is_err());
	}

	#[test]
	fn test_other_attributes_are_ignored() {
		let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "x")])];
		let parsed = parse_field_attrs(&attrs).unwrap();
		assert!(!parsed.skip);
		assert!(parsed.rename.is_none());
	}
}
