use syn::parse::Parser;
use syn::{Lit, Meta, punctuated::Punctuated, token::Comma};

const ATTRIBUTE: &str = "filterable";

/// Struct-level `#[filterable(...)]` options.
#[derive(Debug, Default)]
pub(crate) struct EntityMeta {
    /// `name = "..."`, the entity name used in error messages
    pub name: Option<String>,
    /// `identity = "..."`, the default sort field
    pub identity: Option<String>,
}

/// How a field is registered in the descriptor table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FieldMode {
    #[default]
    Value,
    Nested,
    Collection,
}

/// Field-level (and enum variant level) `#[filterable(...)]` options.
#[derive(Debug, Default)]
pub(crate) struct FieldMeta {
    pub skip: bool,
    pub rename: Option<String>,
    pub mode: FieldMode,
}

/// Every item inside every `#[filterable(...)]` attribute.
fn filterable_metas(attrs: &[syn::Attribute]) -> syn::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident(ATTRIBUTE) {
            continue;
        }
        let Meta::List(meta_list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected #[filterable(...)] with a list of options",
            ));
        };
        let items: Punctuated<Meta, Comma> =
            Punctuated::parse_terminated.parse2(meta_list.tokens.clone())?;
        metas.extend(items);
    }
    Ok(metas)
}

fn string_value(nv: &syn::MetaNameValue) -> syn::Result<String> {
    if let syn::Expr::Lit(expr_lit) = &nv.value
        && let Lit::Str(s) = &expr_lit.lit
    {
        let value = s.value();
        if value.is_empty() {
            return Err(syn::Error::new_spanned(s, "value must not be empty"));
        }
        return Ok(value);
    }
    Err(syn::Error::new_spanned(&nv.value, "expected a string literal"))
}

/// Parses `#[filterable(name = "...", identity = "...")]` on the struct.
pub(crate) fn parse_entity_meta(attrs: &[syn::Attribute]) -> syn::Result<EntityMeta> {
    let mut meta = EntityMeta::default();
    for item in filterable_metas(attrs)? {
        match &item {
            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                meta.name = Some(string_value(nv)?);
            }
            Meta::NameValue(nv) if nv.path.is_ident("identity") => {
                meta.identity = Some(string_value(nv)?);
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    item,
                    "unknown filterable option; expected `name` or `identity`",
                ));
            }
        }
    }
    Ok(meta)
}

/// Parses `#[filterable(skip | rename = "..." | nested | collection)]`.
pub(crate) fn parse_field_meta(attrs: &[syn::Attribute]) -> syn::Result<FieldMeta> {
    let mut meta = FieldMeta::default();
    for item in filterable_metas(attrs)? {
        match &item {
            Meta::Path(path) if path.is_ident("skip") => meta.skip = true,
            Meta::Path(path) if path.is_ident("nested") => {
                set_mode(&mut meta, FieldMode::Nested, path)?;
            }
            Meta::Path(path) if path.is_ident("collection") => {
                set_mode(&mut meta, FieldMode::Collection, path)?;
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                meta.rename = Some(string_value(nv)?);
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    item,
                    "unknown filterable option; expected `skip`, `rename`, `nested` or `collection`",
                ));
            }
        }
    }
    Ok(meta)
}

fn set_mode(meta: &mut FieldMeta, mode: FieldMode, path: &syn::Path) -> syn::Result<()> {
    if meta.mode != FieldMode::Value && meta.mode != mode {
        return Err(syn::Error::new_spanned(
            path,
            "a field cannot be both `nested` and `collection`",
        ));
    }
    meta.mode = mode;
    Ok(())
}
