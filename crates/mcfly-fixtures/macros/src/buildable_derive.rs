//! Implementation of `#[derive(Buildable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, Result, Type};

use crate::attr_parser::{parse_field_attrs, parse_struct_attrs};

struct PropertyField {
	ident: Ident,
	ty: Type,
	property: String,
}

pub(crate) fn derive_buildable_impl(input: DeriveInput) -> Result<TokenStream> {
	let name = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	let struct_attrs = parse_struct_attrs(&input.attrs)?;
	let class = struct_attrs.class.unwrap_or_else(|| name.to_string());
	let krate = struct_attrs
		.krate
		.unwrap_or_else(|| syn::parse_quote!(::mcfly_fixtures));

	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(Error::new_spanned(
					name,
					"Buildable can only be derived for structs with named fields",
				));
			}
		},
		_ => {
			return Err(Error::new_spanned(
				name,
				"Buildable can only be derived for structs",
			));
		}
	};

	let mut all_fields = Vec::new();
	let mut properties: Vec<PropertyField> = Vec::new();

	for field in fields {
		// Named fields always carry an ident
		let Some(ident) = field.ident.clone() else {
			continue;
		};
		let attrs = parse_field_attrs(&field.attrs)?;
		all_fields.push(ident.clone());

		if attrs.skip {
			continue;
		}

		let property = attrs.rename.unwrap_or_else(|| ident.to_string());
		if properties.iter().any(|p| p.property == property) {
			return Err(Error::new_spanned(
				&ident,
				format!("duplicate property name `{}`", property),
			));
		}
		properties.push(PropertyField {
			ident,
			ty: field.ty.clone(),
			property,
		});
	}

	let property_names: Vec<&str> = properties.iter().map(|p| p.property.as_str()).collect();
	let setters = properties.iter().map(|p| {
		let ident = &p.ident;
		let ty = &p.ty;
		let property = &p.property;
		quote! {
			#property => {
				self.#ident = #krate::__private::serde_json::from_value::<#ty>(value)
					.map_err(|source| #krate::FixtureError::InvalidPropertyValue {
						class: #class.to_string(),
						property: name.to_string(),
						source,
					})?;
				::core::result::Result::Ok(())
			}
		}
	});

	Ok(quote! {
		impl #impl_generics #krate::Entity for #name #ty_generics #where_clause {
			const CLASS_NAME: &'static str = #class;
		}

		impl #impl_generics #krate::Buildable for #name #ty_generics #where_clause {
			fn instantiate() -> Self {
				Self {
					#( #all_fields: ::core::default::Default::default(), )*
				}
			}

			fn property_names() -> &'static [&'static str] {
				&[ #( #property_names ),* ]
			}

			fn set_property(
				&mut self,
				name: &str,
				value: #krate::__private::serde_json::Value,
			) -> #krate::FixtureResult<()> {
				match name {
					#( #setters )*
					_ => ::core::result::Result::Err(#krate::FixtureError::UnknownProperty {
						class: #class.to_string(),
						property: name.to_string(),
					}),
				}
			}
		}
	})
}
