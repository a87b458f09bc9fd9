use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::trace;
use stow_doc::Compound;

use crate::engine::{Context, null_key};
use crate::handler::{Decoded, Handler, HandlerFactory, Matched, reborrow};
use crate::info::{OptionalInfo, TypeInfo};
use crate::ops::{Optional, ReflectMut, ReflectRef};
use crate::registry::set_value;
use crate::{Reflect, Registry, StoreError, lifecycle};

// -----------------------------------------------------------------------------
// Slot

/// A declared type with its resolved handler chain.
///
/// Slots hold the null protocol shared by struct fields, container
/// elements and single values: an `Option` type is *nullable*, its `None`
/// is written as a `<name>-` marker key and its inner value goes through
/// the chain resolved for the inner type.
#[derive(Clone)]
pub struct Slot {
    ty: &'static TypeInfo,
    value_ty: &'static TypeInfo,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Slot {
    /// Resolves the chain for a value declared as `ty`.
    ///
    /// An explicit `handler` is checked against the value type and placed
    /// first. Fails with [`StoreError::NoHandlerFound`] if the chain is empty.
    pub fn resolve(
        registry: &Registry,
        ty: &'static TypeInfo,
        handler: Option<&HandlerFactory>,
        name: &str,
    ) -> Result<Self, StoreError> {
        let value_ty = ty.value_info();
        let mut handlers = Vec::new();

        if let Some(factory) = handler {
            let instance = factory.build();
            match instance.matches(registry, value_ty)? {
                Some(Matched::Itself) => handlers.push(instance),
                Some(Matched::Specialized(specialized)) => handlers.push(specialized),
                None => {
                    return Err(StoreError::HandlerMismatch {
                        handler: factory.name(),
                        type_path: value_ty.type_path(),
                        name: name.into(),
                    });
                }
            }
        }

        handlers.extend(registry.find_handlers(value_ty)?);

        if handlers.is_empty() {
            return Err(StoreError::NoHandlerFound {
                type_path: value_ty.type_path(),
                name: name.into(),
            });
        }

        Ok(Self {
            ty,
            value_ty,
            handlers,
        })
    }

    /// The declared type, possibly an `Option`.
    #[inline]
    pub fn ty(&self) -> &'static TypeInfo {
        self.ty
    }

    /// The type the handlers see, with one `Option` layer removed.
    #[inline]
    pub fn value_ty(&self) -> &'static TypeInfo {
        self.value_ty
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.ty.is_nullable()
    }

    #[inline]
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Returns `true` if `value` is the `None` of a nullable slot.
    pub fn holds_null(&self, value: &dyn Reflect) -> bool {
        self.is_nullable()
            && matches!(value.reflect_ref(), ReflectRef::Optional(option) if option.is_none())
    }

    /// Returns `true` if `node` holds a null marker for `name`.
    #[inline]
    pub fn is_null(node: &Compound, name: &str) -> bool {
        node.contains_key(&null_key(name))
    }

    // -------------------------------------------------------------------------
    // Encode

    /// Writes `value`, a value of the declared type, under `name`.
    pub fn write(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<(), StoreError> {
        let value = if self.is_nullable() {
            optional(value)?.value()
        } else {
            Some(value)
        };

        let Some(value) = value else {
            trace!("`{name}` is null");
            node.remove(name);
            node.put_bool(null_key(name), true);
            return Ok(());
        };

        node.remove(&null_key(name));
        self.encode_chain(cx, node, name, value)
    }

    fn encode_chain(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<(), StoreError> {
        for handler in &self.handlers {
            if handler.encode(cx, node, self.value_ty, name, value)? {
                trace!("`{name}` written by `{}`", handler.name());
                return Ok(());
            }
        }
        Err(StoreError::ChainExhausted {
            type_path: self.value_ty.type_path(),
            name: name.into(),
        })
    }

    // -------------------------------------------------------------------------
    // Decode

    /// Reads `name` into `target`, a value of the declared type.
    ///
    /// A null marker sets a nullable target to `None` and resets any other
    /// target to its default. Returns `false` if nothing in `node` applied,
    /// leaving `target` as is.
    pub fn read_in_place(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        name: &str,
        target: &mut dyn Reflect,
    ) -> Result<bool, StoreError> {
        if Self::is_null(node, name) {
            if !self.is_nullable() {
                trace!("`{name}` read as null, reset to its default");
                set_value(target, lifecycle::instantiate(self.value_ty)?)?;
                return Ok(true);
            }
            trace!("`{name}` read as null");
            replace_optional(optional_mut(target)?, None)?;
            return Ok(true);
        }

        if !self.is_nullable() {
            return match self.decode_chain(cx, node, name, Some(&mut *target))? {
                Decoded::Absent => Ok(false),
                Decoded::Updated => Ok(true),
                Decoded::Replaced(value) => {
                    set_value(target, value)?;
                    Ok(true)
                }
            };
        }

        let target = optional_mut(target)?;
        // A `None` with nothing stored under its name stays `None`.
        if target.is_none() && !node.contains_key(name) {
            return Ok(false);
        }
        match self.decode_chain(cx, node, name, target.value_mut())? {
            Decoded::Absent => Ok(false),
            Decoded::Updated => Ok(true),
            Decoded::Replaced(value) => {
                replace_optional(target, Some(value))?;
                Ok(true)
            }
        }
    }

    /// Reads `name` as a new value of the declared type.
    ///
    /// A nullable slot reads a missing entry as `None`. A null marker on a
    /// non-nullable slot reads as the type's default value. A non-nullable
    /// slot whose chain produces nothing is a [`StoreError::MalformedDocument`].
    pub fn read_new(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        name: &str,
    ) -> Result<Box<dyn Reflect>, StoreError> {
        let nullable = self.ty.as_optional();

        if Self::is_null(node, name) {
            return match nullable {
                Some(info) => wrap(info, name, None),
                None => lifecycle::instantiate(self.value_ty),
            };
        }
        if let Some(info) = nullable
            && !node.contains_key(name)
        {
            return wrap(info, name, None);
        }

        match self.decode_chain(cx, node, name, None)? {
            Decoded::Replaced(value) => match nullable {
                Some(info) => wrap(info, name, Some(value)),
                None => Ok(value),
            },
            _ => Err(StoreError::malformed(
                name,
                alloc::format!("no value of `{}` could be read", self.value_ty.type_path()),
            )),
        }
    }

    fn decode_chain(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        name: &str,
        mut existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        for handler in &self.handlers {
            let decoded = handler.decode(
                cx,
                node,
                self.value_ty,
                name,
                reborrow(&mut existing),
            )?;
            if !decoded.is_absent() {
                trace!("`{name}` read by `{}`", handler.name());
                return Ok(decoded);
            }
        }
        Ok(Decoded::Absent)
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn optional(value: &dyn Reflect) -> Result<&dyn Optional, StoreError> {
    match value.reflect_ref() {
        ReflectRef::Optional(value) => Ok(value),
        _ => Err(StoreError::TypeMismatch {
            expected: "Option<_>",
            found: value.reflect_type_info().type_path(),
        }),
    }
}

fn optional_mut(value: &mut dyn Reflect) -> Result<&mut dyn Optional, StoreError> {
    let found = value.reflect_type_info().type_path();
    match value.reflect_mut() {
        ReflectMut::Optional(value) => Ok(value),
        _ => Err(StoreError::TypeMismatch {
            expected: "Option<_>",
            found,
        }),
    }
}

fn replace_optional(
    target: &mut dyn Optional,
    value: Option<Box<dyn Reflect>>,
) -> Result<(), StoreError> {
    let expected = target.reflect_type_info().type_path();
    target.replace(value).map_err(|value| StoreError::TypeMismatch {
        expected,
        found: value.reflect_type_info().type_path(),
    })
}

fn wrap(
    info: &OptionalInfo,
    name: &str,
    value: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, StoreError> {
    info.wrap(value).map_err(|value| {
        StoreError::malformed(
            name,
            alloc::format!("decoded a `{}`", value.reflect_type_info().type_path()),
        )
    })
}
