use alloc::sync::Arc;

use stow_doc::{Compound, List};

use crate::handler::{Decoded, Handler, Matched};
use crate::handlers::collection::mismatch;
use crate::handlers::update_or_create;
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};
use crate::{Context, Reflect, Registry, Slot, StoreError};

const KEY: &str = "key";
const VALUE: &str = "val";

// -----------------------------------------------------------------------------
// MapHandler

/// Matches every map type and specializes into a [`MapCodec`] for its key
/// and value types.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapHandler;

impl Handler for MapHandler {
    fn matches(
        &self,
        registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        let Some(info) = ty.as_map() else {
            return Ok(None);
        };
        let codec = MapCodec {
            key: Slot::resolve(registry, info.key_info(), None, ty.type_path())?,
            value: Slot::resolve(registry, info.value_info(), None, ty.type_path())?,
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
// MapCodec

/// Stores a map as a list of `{key, val}` compounds.
///
/// Keys and values each follow the null protocol, so `None` on either
/// side survives a round trip.
pub struct MapCodec {
    key: Slot,
    value: Slot,
}

impl MapCodec {
    #[inline]
    pub fn key(&self) -> &Slot {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &Slot {
        &self.value
    }

    fn fill(
        &self,
        cx: &mut Context<'_>,
        entries: &List,
        name: &str,
        target: &mut dyn Reflect,
    ) -> Result<(), StoreError> {
        let found = target.reflect_type_info().type_path();
        let ReflectMut::Map(map) = target.reflect_mut() else {
            return Err(StoreError::TypeMismatch {
                expected: "a map",
                found,
            });
        };

        map.clear();
        for entry in entries.compounds() {
            let entry =
                entry.map_err(|_| StoreError::malformed(name, "map entry is not a compound"))?;
            let key = self.key.read_new(cx, entry, KEY)?;
            let value = self.value.read_new(cx, entry, VALUE)?;
            map.insert(key, value).map_err(|value| mismatch(&self.value, value))?;
        }
        Ok(())
    }
}

impl Handler for MapCodec {
    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let ReflectRef::Map(map) = value.reflect_ref() else {
            return Ok(false);
        };

        let mut entries = List::new();
        for (key, value) in map.iter() {
            let mut entry = Compound::new();
            self.key.write(cx, &mut entry, KEY, key)?;
            self.value.write(cx, &mut entry, VALUE, value)?;
            entries.push(entry)?;
        }

        node.put_list(name, entries);
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
        let Some(entries) = node.get_list(name)? else {
            return Ok(Decoded::Absent);
        };

        update_or_create(ty, existing, |target| self.fill(cx, entries, name, target))
    }
}
