use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attribute_parser::{FieldMode, parse_entity_meta, parse_field_meta};
use crate::type_utils::{is_boxed, option_inner};

/// `impl Filterable` for a struct with named fields.
pub(crate) fn filterable_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Filterable can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "Filterable requires a struct with named fields",
        ));
    };

    let entity = parse_entity_meta(&input.attrs)?;
    let entity_name = entity.name.unwrap_or_else(|| name.to_string());
    let identity = entity.identity.map(|identity| {
        quote! { const IDENTITY: &'static str = #identity; }
    });

    let mut registrations = Vec::new();
    for field in &fields.named {
        let meta = parse_field_meta(&field.attrs)?;
        if meta.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = meta.rename.unwrap_or_else(|| ident.to_string());
        registrations.push(registration(&field_name, ident, &field.ty, meta.mode));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::querycrate::Filterable for #name #ty_generics #where_clause {
            const ENTITY_NAME: &'static str = #entity_name;
            #identity

            fn describe(schema: &mut ::querycrate::SchemaBuilder<Self>) {
                #(#registrations)*
            }
        }
    })
}

fn registration(
    field_name: &str,
    ident: &syn::Ident,
    ty: &syn::Type,
    mode: FieldMode,
) -> TokenStream {
    match mode {
        FieldMode::Value => quote! {
            schema.field(#field_name, |entity: &Self| &entity.#ident);
        },
        FieldMode::Nested => match option_inner(ty) {
            Some(inner) if is_boxed(inner) => quote! {
                schema.nested_optional(#field_name, |entity: &Self| entity.#ident.as_deref());
            },
            Some(_) => quote! {
                schema.nested_optional(#field_name, |entity: &Self| entity.#ident.as_ref());
            },
            None if is_boxed(ty) => quote! {
                schema.nested(#field_name, |entity: &Self| &*entity.#ident);
            },
            None => quote! {
                schema.nested(#field_name, |entity: &Self| &entity.#ident);
            },
        },
        FieldMode::Collection => quote! {
            schema.collection(#field_name, |entity: &Self| &entity.#ident[..]);
        },
    }
}

/// `impl FilterValue` for a fieldless enum.
pub(crate) fn filter_enum_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "FilterEnum can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "FilterEnum requires at least one variant",
        ));
    }

    let mut members = Vec::with_capacity(data.variants.len());
    let mut arms = Vec::with_capacity(data.variants.len());
    for (index, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "FilterEnum variants cannot carry data",
            ));
        }
        let meta = parse_field_meta(&variant.attrs)?;
        if meta.skip || meta.mode != FieldMode::Value {
            return Err(syn::Error::new_spanned(
                variant,
                "FilterEnum variants only accept `rename`",
            ));
        }
        let member = meta.rename.unwrap_or_else(|| variant.ident.to_string());
        let ident = &variant.ident;
        arms.push(quote! { Self::#ident => (#index, #member), });
        members.push(member);
    }

    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::querycrate::FilterValue for #name #ty_generics #where_clause {
            fn kind() -> ::querycrate::ValueKind {
                ::querycrate::ValueKind::Enum {
                    name: #type_name,
                    members: &[#(#members),*],
                }
            }

            fn to_field_value(&self) -> ::querycrate::FieldValue {
                let (index, name) = match self {
                    #(#arms)*
                };
                ::querycrate::FieldValue::Enum(::querycrate::EnumMember { index, name })
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn normalized(tokens: &TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    #[test]
    fn test_registration_per_mode() {
        let input: DeriveInput = parse_quote! {
            #[filterable(identity = "title")]
            struct Product {
                title: String,
                #[filterable(nested)]
                rating: Rating,
                #[filterable(nested)]
                parent: Option<Box<Category>>,
                #[filterable(collection, rename = "tags")]
                labels: Vec<Tag>,
                #[filterable(skip)]
                internal_notes: String,
            }
        };
        let code = normalized(&filterable_impl(&input).unwrap());
        assert!(code.contains("constENTITY_NAME:&'staticstr=\"Product\";"));
        assert!(code.contains("constIDENTITY:&'staticstr=\"title\";"));
        assert!(code.contains("schema.field(\"title\",|entity:&Self|&entity.title);"));
        assert!(code.contains("schema.nested(\"rating\",|entity:&Self|&entity.rating);"));
        assert!(code.contains("nested_optional(\"parent\",|entity:&Self|entity.parent.as_deref());"));
        assert!(code.contains("schema.collection(\"tags\",|entity:&Self|&entity.labels[..]);"));
        assert!(!code.contains("internal_notes"));
    }

    #[test]
    fn test_filterable_rejects_enums_and_tuple_structs() {
        let input: DeriveInput = parse_quote! { enum Status { Active } };
        assert!(filterable_impl(&input).is_err());
        let input: DeriveInput = parse_quote! { struct Id(i32); };
        assert!(filterable_impl(&input).is_err());
    }

    #[test]
    fn test_filter_enum_members_follow_declaration_order() {
        let input: DeriveInput = parse_quote! {
            enum SaleStatus {
                Active,
                #[filterable(rename = "Canceled")]
                Cancelled,
            }
        };
        let code = normalized(&filter_enum_impl(&input).unwrap());
        assert!(code.contains("members:&[\"Active\",\"Canceled\"]"));
        assert!(code.contains("Self::Active=>(0usize,\"Active\"),"));
        assert!(code.contains("Self::Cancelled=>(1usize,\"Canceled\"),"));
    }

    #[test]
    fn test_filter_enum_rejects_data_variants() {
        let input: DeriveInput = parse_quote! { enum Shape { Circle(f64) } };
        assert!(filter_enum_impl(&input).is_err());
    }
}
