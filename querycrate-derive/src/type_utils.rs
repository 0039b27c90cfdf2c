//! Field type inspection.

/// The generic argument of a single-parameter wrapper named `wrapper`
/// (`Option<T>`, `Box<T>`), matched on the last path segment so that
/// `std::option::Option<T>` is recognised too.
fn wrapped_type<'a>(ty: &'a syn::Type, wrapper: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

/// Returns the `T` of an `Option<T>` field type.
pub(crate) fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    wrapped_type(ty, "Option")
}

pub(crate) fn is_boxed(ty: &syn::Type) -> bool {
    wrapped_type(ty, "Box").is_some()
}
