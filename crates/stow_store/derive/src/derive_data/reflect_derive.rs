use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// Define

pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

/// A struct with named fields, or a unit struct.
pub(crate) struct ReflectStruct<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    /// Reflected fields only, in declaration order.
    pub fields: Vec<StructField<'a>>,
}

/// A reflected field.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// An enum with unit variants only.
pub(crate) struct ReflectEnum<'a> {
    pub ident: &'a Ident,
    pub variants: Vec<&'a Ident>,
}

// -----------------------------------------------------------------------------
// Parse

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`Reflect` cannot be derived for generic types",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let named = match &data.fields {
                    Fields::Named(fields) => fields.named.iter().collect(),
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(_) => {
                        return Err(syn::Error::new_spanned(
                            &input.ident,
                            "`Reflect` cannot be derived for tuple structs",
                        ));
                    }
                };

                let mut fields = Vec::new();
                for field in named {
                    let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                    if !field_attrs.is_active() {
                        continue;
                    }
                    let Some(ident) = &field.ident else {
                        continue;
                    };
                    fields.push(StructField {
                        ident,
                        ty: &field.ty,
                        attrs: field_attrs,
                    });
                }

                let mut bases = fields.iter().filter_map(|f| f.attrs.base);
                if let (Some(_), Some(second)) = (bases.next(), bases.next()) {
                    return Err(syn::Error::new(second, "a struct can embed only one base"));
                }

                Ok(Self::Struct(ReflectStruct {
                    ident: &input.ident,
                    attrs,
                    fields,
                }))
            }
            Data::Enum(data) => {
                attrs.validate_for_enum()?;

                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            "`Reflect` can only be derived for enums with unit variants",
                        ));
                    }
                    variants.push(&variant.ident);
                }

                Ok(Self::Enum(ReflectEnum {
                    ident: &input.ident,
                    variants,
                }))
            }
            Data::Union(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}

impl ReflectStruct<'_> {
    /// Returns the index of the base field among the reflected fields.
    pub fn base_index(&self) -> Option<usize> {
        self.fields.iter().position(|f| f.attrs.base.is_some())
    }
}
