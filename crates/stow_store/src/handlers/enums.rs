use stow_doc::Compound;

use log::warn;

use crate::handler::{Decoded, Handler, RootType};
use crate::info::{ReflectKind, TypeInfo};
use crate::{Context, Reflect, StoreError};

/// Stores a unit enum as the int ordinal of its variant.
///
/// Out-of-range ordinals are clamped into range on decode.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumHandler;

impl Handler for EnumHandler {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::Kind(ReflectKind::Enum))
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(index) = super::ordinal(value) else {
            return Ok(false);
        };
        node.put_int(name, index as i32);
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        ty: &'static TypeInfo,
        name: &str,
        _existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        let Some(info) = ty.as_enum() else {
            return Ok(Decoded::Absent);
        };
        let Some(stored) = node.get_int(name)? else {
            return Ok(Decoded::Absent);
        };

        let last = info.variant_len().saturating_sub(1);
        let index = (stored.max(0) as usize).min(last);
        if index as i64 != stored as i64 {
            warn!(
                "ordinal {stored} of `{name}` is out of range for `{}`, clamped to {index}",
                ty.type_path()
            );
        }

        info.from_index(index)
            .map(Decoded::Replaced)
            .ok_or(StoreError::InstantiationFailure {
                type_path: ty.type_path(),
                reason: "enum has no variants",
            })
    }
}
