use proc_macro2::Span;
use quote::format_ident;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, Meta, Type};

use crate::{REFLECT_ATTRIBUTE_NAME, STORE_ATTRIBUTE_NAME};

const PHASES: &[&str] = &["save", "client", "sync", "update", "item"];

/// The `#[store]` attribute.
pub(crate) struct StoreAttribute {
    /// Upper-case `Phases` constants, empty means every phase.
    pub phases: Vec<Ident>,
    pub handler: Option<Type>,
}

/// Field-level attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub store: Option<StoreAttribute>,
    /// `#[reflect(base)]`
    pub base: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(STORE_ATTRIBUTE_NAME) {
                this.parse_store(attr)?;
            } else if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("base") {
                        this.base = Some(meta.path.span());
                        Ok(())
                    } else {
                        Err(meta.error("unknown reflect field option, expected `base`"))
                    }
                })?;
            }
        }

        if let (Some(_), Some(span)) = (&this.store, this.base) {
            return Err(syn::Error::new(span, "a base field cannot also be `#[store]`"));
        }
        Ok(this)
    }

    /// Returns `true` if the field is visible to reflection.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.store.is_some() || self.base.is_some()
    }

    fn parse_store(&mut self, attr: &Attribute) -> syn::Result<()> {
        if self.store.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `#[store]` attribute"));
        }

        let mut store = StoreAttribute {
            phases: Vec::new(),
            handler: None,
        };

        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("phase") {
                        meta.parse_nested_meta(|phase| {
                            let name = phase
                                .path
                                .get_ident()
                                .map(ToString::to_string)
                                .unwrap_or_default();
                            if !PHASES.contains(&name.as_str()) {
                                return Err(phase.error(format!(
                                    "unknown phase, expected one of {}",
                                    PHASES.join(", ")
                                )));
                            }
                            store.phases.push(format_ident!("{}", name.to_uppercase()));
                            Ok(())
                        })
                    } else if meta.path.is_ident("handler") {
                        store.handler = Some(meta.value()?.parse::<Type>()?);
                        Ok(())
                    } else {
                        Err(meta.error("unknown store option, expected `phase(..)` or `handler = Type`"))
                    }
                })?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[store]` or `#[store(phase(..), handler = Type)]`",
                ));
            }
        }

        self.store = Some(store);
        Ok(())
    }
}
