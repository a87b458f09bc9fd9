use stow_doc::Compound;

use crate::handler::{Decoded, Handler, Matched};
use crate::handlers::update_or_create;
use crate::info::{Storable, StructInfo, TypeInfo};
use crate::{Context, Reflect, Registry, StoreError};

/// Stores a `#[storable]` struct field by field, in a nested compound.
///
/// Applies to structs that opt in without a custom handler. It recurses
/// into the engine of the current [`Context`], so nested objects share its
/// field table cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct StorableHandler;

impl Handler for StorableHandler {
    fn matches(
        &self,
        _registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        let reflective = ty
            .as_struct()
            .and_then(StructInfo::storable)
            .is_some_and(Storable::is_reflective);
        Ok(reflective.then_some(Matched::Itself))
    }

    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let mut tag = Compound::new();
        cx.store_object(&mut tag, value)?;
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
        update_or_create(ty, existing, |target| cx.read_object(tag, target))
    }
}
