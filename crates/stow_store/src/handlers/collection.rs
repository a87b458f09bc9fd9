use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;

use stow_doc::Compound;

use crate::handler::{Decoded, Handler, Matched};
use crate::handlers::update_or_create;
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};
use crate::{Context, Reflect, Registry, Slot, StoreError};

// -----------------------------------------------------------------------------
// CollectionHandler

/// Matches every list and set type and specializes into a
/// [`CollectionCodec`] for its element type.
///
/// Fails with [`StoreError::NoHandlerFound`] if the element type has no
/// handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionHandler;

impl Handler for CollectionHandler {
    fn matches(
        &self,
        registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        let element = match ty {
            TypeInfo::List(info) => info.item_info(),
            TypeInfo::Set(info) => info.value_info(),
            _ => return Ok(None),
        };
        let codec = CollectionCodec {
            element: Slot::resolve(registry, element, None, ty.type_path())?,
        };
        Ok(Some(Matched::Specialized(Arc::new(codec))))
    }

    fn encode(
        &self,
        _: &mut Context<'_>,
        _: &mut Compound,
        _: &'static TypeInfo,
        _: &str,
        _: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn decode(
        &self,
        _: &mut Context<'_>,
        _: &Compound,
        _: &'static TypeInfo,
        _: &str,
        _: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        Ok(Decoded::Absent)
    }
}

// -----------------------------------------------------------------------------
// CollectionCodec

/// Stores a list or set as a compound: `size` plus one entry per element
/// keyed by its position.
///
/// `None` elements are left out, the count and the missing index are
/// enough to restore them.
pub struct CollectionCodec {
    element: Slot,
}

impl CollectionCodec {
    #[inline]
    pub fn element(&self) -> &Slot {
        &self.element
    }

    fn fill(
        &self,
        cx: &mut Context<'_>,
        tag: &Compound,
        name: &str,
        target: &mut dyn Reflect,
    ) -> Result<(), StoreError> {
        let size = tag
            .get_int("size")?
            .ok_or_else(|| StoreError::malformed(name, "collection without a size"))?;
        let size = usize::try_from(size)
            .map_err(|_| StoreError::malformed(name, "collection with a negative size"))?;

        let found = target.reflect_type_info().type_path();
        match target.reflect_mut() {
            ReflectMut::List(list) => {
                list.clear();
                for index in 0..size {
                    let value = self.element.read_new(cx, tag, &index.to_string())?;
                    list.push(value).map_err(|value| mismatch(&self.element, value))?;
                }
            }
            ReflectMut::Set(set) => {
                set.clear();
                for index in 0..size {
                    let value = self.element.read_new(cx, tag, &index.to_string())?;
                    set.insert(value).map_err(|value| mismatch(&self.element, value))?;
                }
            }
            _ => return Err(not_a_collection(found)),
        }
        Ok(())
    }
}

impl Handler for CollectionCodec {
    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let mut tag = Compound::new();
        let (size, items): (usize, Box<dyn Iterator<Item = &dyn Reflect> + '_>) = match value.reflect_ref() {
            ReflectRef::List(list) => (list.len(), Box::new(list.iter())),
            ReflectRef::Set(set) => (set.len(), set.iter()),
            _ => return Ok(false),
        };

        tag.put_int("size", size as i32);
        for (index, item) in items.enumerate() {
            if self.element.holds_null(item) {
                continue;
            }
            self.element.write(cx, &mut tag, &index.to_string(), item)?;
        }

        node.put_compound(name, tag);
        Ok(true)
    }

    fn decode(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        let Some(tag) = node.get_compound(name)? else {
            return Ok(Decoded::Absent);
        };

        update_or_create(ty, existing, |target| self.fill(cx, tag, name, target))
    }
}

// -----------------------------------------------------------------------------
// Errors

#[cold]
pub(super) fn mismatch(slot: &Slot, value: Box<dyn Reflect>) -> StoreError {
    StoreError::TypeMismatch {
        expected: slot.ty().type_path(),
        found: value.reflect_type_info().type_path(),
    }
}

#[cold]
fn not_a_collection(found: &'static str) -> StoreError {
    StoreError::TypeMismatch {
        expected: "a list or set",
        found,
    }
}
