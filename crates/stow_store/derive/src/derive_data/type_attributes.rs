use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Meta, Path, Type};

use crate::{REFLECT_ATTRIBUTE_NAME, STORABLE_ATTRIBUTE_NAME};

/// The `#[storable]` attribute.
pub(crate) enum StorableAttribute {
    /// `#[storable]`
    Reflective,
    /// `#[storable(handler = Type)]`
    Handler(Type),
}

/// How new instances are created during decode.
pub(crate) enum Factory {
    /// `#[reflect(default)]`
    Default,
    /// `#[reflect(factory = path)]`
    Path(Path),
}

/// Type-level attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub storable: Option<(Span, StorableAttribute)>,
    pub factory: Option<(Span, Factory)>,
    pub after_decode: Vec<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(STORABLE_ATTRIBUTE_NAME) {
                this.parse_storable(attr)?;
            } else if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_reflect(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_storable(&mut self, attr: &Attribute) -> syn::Result<()> {
        if self.storable.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `#[storable]` attribute"));
        }

        let storable = match &attr.meta {
            Meta::Path(_) => StorableAttribute::Reflective,
            Meta::List(_) => {
                let mut handler = None;
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("handler") {
                        handler = Some(meta.value()?.parse::<Type>()?);
                        Ok(())
                    } else {
                        Err(meta.error("unknown storable option, expected `handler = Type`"))
                    }
                })?;
                match handler {
                    Some(ty) => StorableAttribute::Handler(ty),
                    None => StorableAttribute::Reflective,
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[storable]` or `#[storable(handler = Type)]`",
                ));
            }
        };

        self.storable = Some((attr.span(), storable));
        Ok(())
    }

    fn parse_reflect(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            self.set_factory(&meta, Factory::Default)
        } else if meta.path.is_ident("factory") {
            let path = meta.value()?.parse::<Path>()?;
            self.set_factory(&meta, Factory::Path(path))
        } else if meta.path.is_ident("after_decode") {
            self.after_decode.push(meta.value()?.parse::<Path>()?);
            Ok(())
        } else if meta.path.is_ident("base") {
            Err(meta.error("`base` is a field attribute"))
        } else {
            Err(meta.error(
                "unknown reflect option, expected `default`, `factory = path` or `after_decode = path`",
            ))
        }
    }

    fn set_factory(&mut self, meta: &ParseNestedMeta, factory: Factory) -> syn::Result<()> {
        if self.factory.is_some() {
            return Err(meta.error("a type can declare only one factory"));
        }
        self.factory = Some((meta.path.span(), factory));
        Ok(())
    }

    /// Rejects the struct-only attributes on an enum.
    pub fn validate_for_enum(&self) -> syn::Result<()> {
        if let Some((span, _)) = &self.storable {
            return Err(syn::Error::new(*span, "`#[storable]` applies to structs only"));
        }
        if let Some((span, _)) = &self.factory {
            return Err(syn::Error::new(
                *span,
                "enums are created from their first variant and take no factory",
            ));
        }
        if let Some(path) = self.after_decode.first() {
            return Err(syn::Error::new_spanned(path, "`after_decode` applies to structs only"));
        }
        Ok(())
    }
}
