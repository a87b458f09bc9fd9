//! Paths of the `stow_store` items used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `stow_store` crate.
///
/// 1. For crates that depend on `stow_store`, `::stow_store` is returned.
/// 2. For crates that depend on `stow`, `::stow::store` is returned.
/// 3. Otherwise `::stow_store` is returned, which relies on an
///    `extern crate self as stow_store;` inside the crate itself.
///
/// Reading the manifest is relatively costly, so the path is resolved once
/// per invocation and passed along.
pub(crate) fn stow_store() -> syn::Path {
    stow_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("stow_store"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! item_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(stow_store_path: &syn::Path) -> TokenStream {
                quote! { #stow_store_path $(::$segment)+ }
            }
        )*
    };
}

item_paths! {
    reflect_ => Reflect;
    phases_ => Phases;
    macro_exports_ => __macro_exports;

    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    reflect_kind_ => info::ReflectKind;
    struct_info_ => info::StructInfo;
    enum_info_ => info::EnumInfo;
    named_field_ => info::NamedField;
    store_attr_ => info::StoreAttr;
    storable_ => info::Storable;

    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;

    struct_ => ops::Struct;
    enum_ => ops::Enum;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;

    handler_factory_ => handler::HandlerFactory;
    after_decode_fn_ => lifecycle::AfterDecodeFn;
}
