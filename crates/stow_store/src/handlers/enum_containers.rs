use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;

use log::warn;
use stow_doc::Compound;

use crate::handler::{Decoded, Handler, Matched};
use crate::handlers::collection::mismatch;
use crate::handlers::{ordinal, update_or_create};
use crate::info::{EnumInfo, TypeInfo};
use crate::ops::{Map, ReflectMut, ReflectRef, Set};
use crate::{Context, Reflect, Registry, Slot, StoreError};

/// Most variants a set can hold and still fit the `long` bitmask.
const MAX_SET_VARIANTS: usize = 64;

fn as_set(target: &mut dyn Reflect) -> Result<&mut dyn Set, StoreError> {
    let found = target.reflect_type_info().type_path();
    match target.reflect_mut() {
        ReflectMut::Set(set) => Ok(set),
        _ => Err(StoreError::TypeMismatch {
            expected: "a set",
            found,
        }),
    }
}

fn as_map(target: &mut dyn Reflect) -> Result<&mut dyn Map, StoreError> {
    let found = target.reflect_type_info().type_path();
    match target.reflect_mut() {
        ReflectMut::Map(map) => Ok(map),
        _ => Err(StoreError::TypeMismatch {
            expected: "a map",
            found,
        }),
    }
}

fn variant(info: &EnumInfo, index: usize, name: &str) -> Result<Box<dyn Reflect>, StoreError> {
    info.from_index(index).ok_or_else(|| {
        StoreError::malformed(name, alloc::format!("no variant {index} in `{}`", info.ty().path()))
    })
}

// -----------------------------------------------------------------------------
// EnumSetHandler

/// Stores a set of unit enum variants as a `long` bitmask of ordinals.
///
/// Applies to enums with at most 64 variants.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumSetHandler;

impl EnumSetHandler {
    fn element(ty: &'static TypeInfo) -> Option<&'static EnumInfo> {
        let info = ty.as_set()?.value_info().as_enum()?;
        (info.variant_len() <= MAX_SET_VARIANTS).then_some(info)
    }
}

impl Handler for EnumSetHandler {
    fn matches(
        &self,
        _registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        Ok(Self::element(ty).map(|_| Matched::Itself))
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let ReflectRef::Set(set) = value.reflect_ref() else {
            return Ok(false);
        };
        let mut bits = 0_u64;
        for item in set.iter() {
            let Some(index) = ordinal(item) else {
                return Ok(false);
            };
            bits |= 1 << index;
        }
        node.put_long(name, bits as i64);
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        let Some(info) = Self::element(ty) else {
            return Ok(Decoded::Absent);
        };
        let Some(bits) = node.get_long(name)? else {
            return Ok(Decoded::Absent);
        };
        let bits = bits as u64;
        if info.variant_len() < MAX_SET_VARIANTS && bits >> info.variant_len() != 0 {
            warn!("`{name}` has bits beyond the variants of `{}`, ignored", info.ty().path());
        }

        update_or_create(ty, existing, |target| {
            let set = as_set(target)?;
            set.clear();
            for index in (0..info.variant_len()).filter(|i| bits & (1 << i) != 0) {
                let value = variant(info, index, name)?;
                set.insert(value).map_err(|value| StoreError::TypeMismatch {
                    expected: info.ty().path(),
                    found: value.reflect_type_info().type_path(),
                })?;
            }
            Ok(())
        })
    }
}

// -----------------------------------------------------------------------------
// EnumToEnumMapHandler

/// Stores a map from one unit enum to another as an int array indexed by
/// key ordinal, holding the value ordinal or `-1` for a missing key.
///
/// Registered before [`EnumMapHandler`], which would otherwise take these maps.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumToEnumMapHandler;

impl EnumToEnumMapHandler {
    fn shape(ty: &'static TypeInfo) -> Option<(&'static EnumInfo, &'static EnumInfo)> {
        let info = ty.as_map()?;
        Some((info.key_info().as_enum()?, info.value_info().as_enum()?))
    }
}

impl Handler for EnumToEnumMapHandler {
    fn matches(
        &self,
        _registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        Ok(Self::shape(ty).map(|_| Matched::Itself))
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let (Some((keys, _)), ReflectRef::Map(map)) = (Self::shape(ty), value.reflect_ref()) else {
            return Ok(false);
        };

        let mut ordinals = vec![-1_i32; keys.variant_len()];
        for (key, value) in map.iter() {
            let (Some(key), Some(value)) = (ordinal(key), ordinal(value)) else {
                return Ok(false);
            };
            if let Some(slot) = ordinals.get_mut(key) {
                *slot = value as i32;
            }
        }
        node.put_int_array(name, ordinals);
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        let Some((keys, values)) = Self::shape(ty) else {
            return Ok(Decoded::Absent);
        };
        let Some(ordinals) = node.get_int_array(name)? else {
            return Ok(Decoded::Absent);
        };

        update_or_create(ty, existing, |target| {
            let map = as_map(target)?;
            map.clear();
            for (key, &stored) in ordinals.iter().enumerate().take(keys.variant_len()) {
                let Ok(stored) = usize::try_from(stored) else {
                    continue;
                };
                if stored >= values.variant_len() {
                    warn!("`{name}` maps to missing variant {stored} of `{}`", values.ty().path());
                    continue;
                }
                map.insert(variant(keys, key, name)?, variant(values, stored, name)?)
                    .map_err(|value| StoreError::TypeMismatch {
                        expected: ty.type_path(),
                        found: value.reflect_type_info().type_path(),
                    })?;
            }
            Ok(())
        })
    }
}

// -----------------------------------------------------------------------------
// EnumMapHandler

/// Matches maps keyed by a unit enum and specializes into an
/// [`EnumMapCodec`] for the value type.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumMapHandler;

impl Handler for EnumMapHandler {
    fn matches(
        &self,
        registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        let Some(info) = ty.as_map() else {
            return Ok(None);
        };
        let Some(keys) = info.key_info().as_enum() else {
            return Ok(None);
        };
        let codec = EnumMapCodec {
            keys,
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

/// Stores an enum-keyed map as a compound keyed by variant ordinal.
pub struct EnumMapCodec {
    keys: &'static EnumInfo,
    value: Slot,
}

impl Handler for EnumMapCodec {
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

        let mut tag = Compound::new();
        for (key, value) in map.iter() {
            let Some(key) = ordinal(key) else {
                return Ok(false);
            };
            self.value.write(cx, &mut tag, &key.to_string(), value)?;
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

        update_or_create(ty, existing, |target| {
            let map = as_map(target)?;
            map.clear();
            for index in 0..self.keys.variant_len() {
                let key = index.to_string();
                if !tag.contains_key(&key) && !Slot::is_null(tag, &key) {
                    continue;
                }
                let value = self.value.read_new(cx, tag, &key)?;
                map.insert(variant(self.keys, index, name)?, value)
                    .map_err(|value| mismatch(&self.value, value))?;
            }
            Ok(())
        })
    }
}
