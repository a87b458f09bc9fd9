use alloc::sync::Arc;

use log::trace;
use stow_doc::Compound;

use crate::engine::{SUPERCLASS_KEY, Slot, StorageEngine, null_key};
use crate::handler::{Decoded, Handler};
use crate::info::TypeInfo;
use crate::ops::{ReflectRef, field_path, field_path_mut};
use crate::{Phases, Reflect, Registry, StoreError};

// -----------------------------------------------------------------------------
// Context

/// One encode or decode walk: an engine and the active phases.
///
/// Handlers receive the context so they can recurse into nested objects
/// with the same engine, sharing its cache.
pub struct Context<'a> {
    engine: &'a mut StorageEngine,
    phases: Phases,
}

impl<'a> Context<'a> {
    #[inline]
    pub(crate) fn new(engine: &'a mut StorageEngine, phases: Phases) -> Self {
        Self { engine, phases }
    }

    #[inline]
    pub fn phases(&self) -> Phases {
        self.phases
    }

    #[inline]
    pub fn registry(&self) -> &Arc<Registry> {
        self.engine.registry()
    }

    /// Writes every stored field of `object` in the active phases, then its
    /// delegated base under [`SUPERCLASS_KEY`].
    pub fn store_object(&mut self, node: &mut Compound, object: &dyn Reflect) -> Result<(), StoreError> {
        let ty = object.reflect_type_info();
        let entry = self.engine.entry(ty)?;

        for field in &entry.fields {
            if !field.phases.intersects(self.phases) {
                continue;
            }
            let value = field_path(object, &field.path).ok_or_else(|| not_a_struct(ty))?;
            field.slot.write(self, node, field.name, value)?;
        }

        if let Some(delegation) = &entry.delegation {
            let base = field_path(object, &delegation.path).ok_or_else(|| not_a_struct(ty))?;
            if !encode_whole(self, node, delegation.ty, &delegation.handlers, base)? {
                return Err(StoreError::ChainExhausted {
                    type_path: delegation.ty.type_path(),
                    name: SUPERCLASS_KEY.into(),
                });
            }
        }

        Ok(())
    }

    /// Reads every stored field of `object` in the active phases, then its
    /// delegated base, then runs the after-decode callbacks.
    ///
    /// Fields without a value or a null marker in `node` are left untouched.
    pub fn read_object(&mut self, node: &Compound, object: &mut dyn Reflect) -> Result<(), StoreError> {
        let ty = object.reflect_type_info();
        let entry = self.engine.entry(ty)?;

        for field in &entry.fields {
            if !field.phases.intersects(self.phases) {
                continue;
            }
            let target = field_path_mut(object, &field.path).ok_or_else(|| not_a_struct(ty))?;
            if !field.slot.read_in_place(self, node, field.name, target)? {
                trace!("`{}` not present, kept", field.name);
            }
        }

        if let Some(delegation) = &entry.delegation {
            for handler in &delegation.handlers {
                let base = field_path_mut(object, &delegation.path).ok_or_else(|| not_a_struct(ty))?;
                match handler.decode(self, node, delegation.ty, SUPERCLASS_KEY, Some(base))? {
                    Decoded::Absent => continue,
                    Decoded::Updated => break,
                    Decoded::Replaced(_) => {
                        return Err(StoreError::DelegateReplaced {
                            type_path: delegation.ty.type_path(),
                        });
                    }
                }
            }
        }

        for (path, hook) in &entry.hooks {
            let target = field_path_mut(object, path).ok_or_else(|| not_a_struct(ty))?;
            hook(target);
        }

        Ok(())
    }

    /// Writes a standalone value with the null protocol, resolving its chain
    /// from the registry.
    ///
    /// A `None` only writes the null marker, so it needs no handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use stow_doc::Compound;
    /// use stow_store::{Phases, Registry, StorageEngine};
    ///
    /// let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
    /// let mut cx = engine.context(Phases::all());
    /// let mut node = Compound::new();
    ///
    /// cx.set_single_field(&mut node, "speed", &Some(1.5_f32)).unwrap();
    /// cx.set_single_field(&mut node, "name", &None::<String>).unwrap();
    ///
    /// let mut speed: Option<f32> = None;
    /// let mut name = Some(String::from("old"));
    /// assert!(cx.get_single_field(&node, "speed", &mut speed).unwrap());
    /// assert!(cx.get_single_field(&node, "name", &mut name).unwrap());
    ///
    /// assert_eq!(speed, Some(1.5));
    /// assert_eq!(name, None);
    /// ```
    pub fn set_single_field(
        &mut self,
        node: &mut Compound,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<(), StoreError> {
        if let ReflectRef::Optional(option) = value.reflect_ref()
            && option.is_none()
        {
            node.remove(name);
            node.put_bool(null_key(name), true);
            return Ok(());
        }
        let slot = Slot::resolve(self.registry(), value.reflect_type_info(), None, name)?;
        slot.write(self, node, name, value)
    }

    /// Reads a standalone value in place with the null protocol.
    ///
    /// Returns `false` if `node` holds nothing for `name`.
    pub fn get_single_field(
        &mut self,
        node: &Compound,
        name: &str,
        target: &mut dyn Reflect,
    ) -> Result<bool, StoreError> {
        let slot = Slot::resolve(self.registry(), target.reflect_type_info(), None, name)?;
        slot.read_in_place(self, node, name, target)
    }
}

/// Runs a whole-object chain, returning `true` once a handler took the value.
fn encode_whole(
    cx: &mut Context<'_>,
    node: &mut Compound,
    ty: &'static TypeInfo,
    handlers: &[Arc<dyn Handler>],
    value: &dyn Reflect,
) -> Result<bool, StoreError> {
    for handler in handlers {
        if handler.encode(cx, node, ty, SUPERCLASS_KEY, value)? {
            trace!("base `{}` written by `{}`", ty.type_path(), handler.name());
            return Ok(true);
        }
    }
    Ok(false)
}

#[cold]
fn not_a_struct(ty: &'static TypeInfo) -> StoreError {
    StoreError::NotAStruct {
        type_path: ty.type_path(),
    }
}
