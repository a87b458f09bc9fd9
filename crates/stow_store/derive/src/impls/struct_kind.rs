use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{Factory, ReflectStruct, StorableAttribute, StructField};

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let stow_store_path = crate::path::stow_store();

    let typed_trait_tokens =
        impl_trait_typed(&stow_store_path, info.ident, struct_info_tokens(&stow_store_path, info));
    let struct_trait_tokens = impl_trait_struct(&stow_store_path, info);
    let reflect_trait_tokens = impl_trait_reflect(&stow_store_path, info.ident, quote!(Struct));

    quote! {
        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate the `TypeInfo::Struct` expression.
fn struct_info_tokens(stow_store_path: &syn::Path, info: &ReflectStruct) -> TokenStream {
    let type_info_ = crate::path::type_info_(stow_store_path);
    let struct_info_ = crate::path::struct_info_(stow_store_path);

    let fields = info
        .fields
        .iter()
        .map(|field| field_info_tokens(stow_store_path, field));

    let with_base = info.base_index().map(|index| quote!(.with_base(#index)));
    let with_storable = with_storable_tokens(stow_store_path, info);
    let with_factory = with_factory_tokens(stow_store_path, info);
    let with_after_decode = with_after_decode_tokens(stow_store_path, info);

    quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(&[ #(#fields),* ])
                #with_base
                #with_storable
                #with_factory
                #with_after_decode
        )
    }
}

/// Generate a `NamedField` expression, e.g.
///
/// ```ignore
/// NamedField::new::<u32>("charge")
///     .with_store(StoreAttr::new(Phases::SAVE).with_handler(HandlerFactory::of::<H>()))
/// ```
fn field_info_tokens(stow_store_path: &syn::Path, field: &StructField) -> TokenStream {
    let named_field_ = crate::path::named_field_(stow_store_path);
    let ty = field.ty;
    let name = field.ident.to_string();

    let with_store = field.attrs.store.as_ref().map(|store| {
        let store_attr_ = crate::path::store_attr_(stow_store_path);
        let phases_ = crate::path::phases_(stow_store_path);

        let phases = if store.phases.is_empty() {
            quote!(#phases_::all())
        } else {
            let phases = &store.phases;
            quote!(#(#phases_::#phases)|*)
        };
        let with_handler = store.handler.as_ref().map(|handler| {
            let handler_factory_ = crate::path::handler_factory_(stow_store_path);
            quote!(.with_handler(#handler_factory_::of::<#handler>()))
        });

        quote! {
            .with_store(#store_attr_::new(#phases) #with_handler)
        }
    });

    quote! {
        #named_field_::new::<#ty>(#name) #with_store
    }
}

fn with_storable_tokens(stow_store_path: &syn::Path, info: &ReflectStruct) -> Option<TokenStream> {
    let (_, storable) = info.attrs.storable.as_ref()?;
    let storable_ = crate::path::storable_(stow_store_path);

    let tokens = match storable {
        StorableAttribute::Reflective => quote!(#storable_::reflective()),
        StorableAttribute::Handler(handler) => {
            let handler_factory_ = crate::path::handler_factory_(stow_store_path);
            quote!(#storable_::with_handler(#handler_factory_::of::<#handler>()))
        }
    };
    Some(quote!(.with_storable(#tokens)))
}

fn with_factory_tokens(stow_store_path: &syn::Path, info: &ReflectStruct) -> Option<TokenStream> {
    let (_, factory) = info.attrs.factory.as_ref()?;
    let exports_ = crate::path::macro_exports_(stow_store_path);

    let create = match factory {
        Factory::Default => quote!(<Self as ::core::default::Default>::default()),
        Factory::Path(path) => quote!(#path()),
    };
    Some(quote!(.with_factory(|| #exports_::boxed::<Self>(#create))))
}

fn with_after_decode_tokens(
    stow_store_path: &syn::Path,
    info: &ReflectStruct,
) -> Option<TokenStream> {
    if info.attrs.after_decode.is_empty() {
        return None;
    }
    let reflect_ = crate::path::reflect_(stow_store_path);
    let exports_ = crate::path::macro_exports_(stow_store_path);
    let after_decode_fn_ = crate::path::after_decode_fn_(stow_store_path);

    let hooks = info.attrs.after_decode.iter().map(|path| {
        quote! {
            (|object: &mut dyn #reflect_| #exports_::after_decode::<Self>(object, #path))
                as #after_decode_fn_
        }
    });
    Some(quote!(.with_after_decode(&[ #(#hooks),* ])))
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(stow_store_path: &syn::Path, info: &ReflectStruct) -> TokenStream {
    let struct_ = crate::path::struct_(stow_store_path);
    let reflect_ = crate::path::reflect_(stow_store_path);
    let exports_ = crate::path::macro_exports_(stow_store_path);

    let ident = info.ident;
    let field_count = info.fields.len();
    let field_indices = 0..field_count;
    let field_indices_mut = 0..field_count;
    let members = info.fields.iter().map(|field| field.ident);
    let members_mut = members.clone();

    quote! {
        impl #struct_ for #ident {
            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            fn field_at(&self, index: usize) -> #exports_::Option<&dyn #reflect_> {
                match index {
                    #(#field_indices => #exports_::Option::Some(&self.#members as &dyn #reflect_),)*
                    _ => #exports_::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #exports_::Option<&mut dyn #reflect_> {
                match index {
                    #(#field_indices_mut => #exports_::Option::Some(&mut self.#members_mut as &mut dyn #reflect_),)*
                    _ => #exports_::Option::None,
                }
            }
        }
    }
}
