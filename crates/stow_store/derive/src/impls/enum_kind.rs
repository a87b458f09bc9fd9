use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectEnum;

/// Implement full reflect for a unit-only enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let stow_store_path = crate::path::stow_store();

    let typed_trait_tokens =
        impl_trait_typed(&stow_store_path, info.ident, enum_info_tokens(&stow_store_path, info));
    let enum_trait_tokens = impl_trait_enum(&stow_store_path, info);
    let reflect_trait_tokens = impl_trait_reflect(&stow_store_path, info.ident, quote!(Enum));

    quote! {
        #typed_trait_tokens

        #enum_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate the `TypeInfo::Enum` expression, with a constructor by ordinal.
fn enum_info_tokens(stow_store_path: &syn::Path, info: &ReflectEnum) -> TokenStream {
    let type_info_ = crate::path::type_info_(stow_store_path);
    let enum_info_ = crate::path::enum_info_(stow_store_path);
    let exports_ = crate::path::macro_exports_(stow_store_path);

    let names = info.variants.iter().map(ToString::to_string);
    let indices = 0..info.variants.len();
    let variants = &info.variants;

    quote! {
        #type_info_::Enum(#enum_info_::new::<Self>(
            &[ #(#names),* ],
            |index| match index {
                #(#indices => #exports_::Option::Some(#exports_::boxed(Self::#variants)),)*
                _ => #exports_::Option::None,
            },
        ))
    }
}

/// Generate `Enum` trait implementation tokens.
fn impl_trait_enum(stow_store_path: &syn::Path, info: &ReflectEnum) -> TokenStream {
    let enum_ = crate::path::enum_(stow_store_path);

    let ident = info.ident;
    let variants = &info.variants;
    let indices = 0..info.variants.len();
    let names = info.variants.iter().map(ToString::to_string);

    quote! {
        impl #enum_ for #ident {
            fn variant_index(&self) -> usize {
                match *self {
                    #(Self::#variants => #indices,)*
                }
            }

            fn variant_name(&self) -> &'static str {
                match *self {
                    #(Self::#variants => #names,)*
                }
            }
        }
    }
}
