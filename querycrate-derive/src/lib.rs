mod attribute_parser;
mod codegen;
mod type_utils;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Generates a `querycrate::Filterable` implementation that registers every
/// named field in the entity's field descriptor table.
///
/// Leaf fields need a `FilterValue` type: strings, integers up to `i64`
/// (`u64` and `usize` are read as decimals; `i128`/`u128` are not
/// supported), floats, `Decimal`, `bool`, `Uuid`, `DateTime<Utc>`,
/// `NaiveDate`, `FilterEnum` enums and `Option`s of these. Owned
/// sub-objects and one-to-many collections are marked explicitly:
///
/// ```rust,ignore
/// #[derive(Filterable)]
/// #[filterable(name = "Cart", identity = "id")]
/// pub struct Cart {
///     pub id: i32,
///     pub user_id: i32,
///     #[filterable(nested)]
///     pub owner: Option<User>,
///     #[filterable(collection)]
///     pub items: Vec<CartItem>,
///     #[filterable(skip)]
///     pub session_token: String,
/// }
/// ```
///
/// Struct options: `name` (entity name in error messages, defaults to the
/// type name) and `identity` (default sort field, defaults to `id`).
/// Field options: `skip`, `rename = "..."`, `nested` (works on `T`,
/// `Box<T>`, `Option<T>` and `Option<Box<T>>`) and `collection` (anything
/// indexable by `[..]`, such as `Vec<T>`).
#[proc_macro_derive(Filterable, attributes(filterable))]
pub fn derive_filterable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    codegen::filterable_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generates a `querycrate::FilterValue` implementation for a fieldless
/// enum. Filter values match member names case-insensitively; sorting
/// follows declaration order.
///
/// ```rust,ignore
/// #[derive(FilterEnum)]
/// pub enum SaleStatus {
///     Active,
///     #[filterable(rename = "Canceled")]
///     Cancelled,
/// }
/// ```
#[proc_macro_derive(FilterEnum, attributes(filterable))]
pub fn derive_filter_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    codegen::filter_enum_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
