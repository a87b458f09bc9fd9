use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// Generate implementation code for `Reflect`.
///
/// `kind` is the `ReflectKind`, `ReflectRef` and `ReflectMut` variant.
pub(crate) fn impl_trait_reflect(
    stow_store_path: &syn::Path,
    ident: &Ident,
    kind: TokenStream,
) -> TokenStream {
    let reflect_ = crate::path::reflect_(stow_store_path);
    let reflect_kind_ = crate::path::reflect_kind_(stow_store_path);
    let reflect_ref_ = crate::path::reflect_ref_(stow_store_path);
    let reflect_mut_ = crate::path::reflect_mut_(stow_store_path);
    let exports_ = crate::path::macro_exports_(stow_store_path);

    quote! {
        impl #reflect_ for #ident {
            fn set(
                &mut self,
                value: #exports_::Box<dyn #reflect_>,
            ) -> #exports_::Result<(), #exports_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #exports_::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }
        }
    }
}
