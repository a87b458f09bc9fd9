use alloc::sync::Arc;
use alloc::vec::Vec;

use log::debug;

use crate::engine::{Slot, StorageEngine};
use crate::handler::Handler;
use crate::info::TypeInfo;
use crate::lifecycle::AfterDecodeFn;
use crate::{Phases, StoreError};

// -----------------------------------------------------------------------------
// FieldEntry

/// A stored field, as reached from the outermost object.
pub(crate) struct FieldEntry {
    /// Field indices from the object to the field, through embedded bases.
    pub path: Vec<usize>,
    pub name: &'static str,
    pub phases: Phases,
    pub slot: Slot,
}

impl FieldEntry {
    fn rebased(&self, base: usize) -> Self {
        Self {
            path: prefixed(base, &self.path),
            name: self.name,
            phases: self.phases,
            slot: self.slot.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// Delegation

/// A base stored as a whole through its own handler chain.
pub(crate) struct Delegation {
    pub path: Vec<usize>,
    pub ty: &'static TypeInfo,
    pub handlers: Vec<Arc<dyn Handler>>,
}

impl Delegation {
    fn rebased(&self, base: usize) -> Self {
        Self {
            path: prefixed(base, &self.path),
            ty: self.ty,
            handlers: self.handlers.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassEntry

/// The cached storage layout of one struct type.
pub(crate) struct ClassEntry {
    /// Inherited fields first, then the type's own in declaration order.
    pub fields: Vec<FieldEntry>,
    pub delegation: Option<Delegation>,
    /// Innermost base first.
    pub hooks: Vec<(Vec<usize>, AfterDecodeFn)>,
}

impl ClassEntry {
    pub fn build(engine: &mut StorageEngine, ty: &'static TypeInfo) -> Result<Self, StoreError> {
        let info = ty.as_struct().ok_or(StoreError::NotAStruct {
            type_path: ty.type_path(),
        })?;
        let registry = engine.registry().clone();

        let mut fields = Vec::new();
        let mut delegation = None;
        let mut hooks = Vec::new();

        if let Some((index, base)) = info.base_field() {
            let reflective = base
                .as_struct()
                .and_then(|base| base.storable())
                .is_some_and(|storable| storable.is_reflective());

            if reflective {
                let inherited = engine.entry(base)?;
                fields.extend(inherited.fields.iter().map(|f| f.rebased(index)));
                delegation = inherited.delegation.as_ref().map(|d| d.rebased(index));
                hooks.extend(
                    inherited
                        .hooks
                        .iter()
                        .map(|(path, hook)| (prefixed(index, path), *hook)),
                );
            } else {
                let handlers = registry.find_handlers(base)?;
                if handlers.is_empty() {
                    debug!(
                        "no handler for base `{}` of `{}`, skipping it",
                        base.type_path(),
                        ty.type_path()
                    );
                } else {
                    delegation = Some(Delegation {
                        path: alloc::vec![index],
                        ty: base,
                        handlers,
                    });
                }
            }
        }

        for (index, field) in info.fields().iter().enumerate() {
            let Some(store) = field.store() else {
                continue;
            };
            let slot = Slot::resolve(&registry, field.type_info(), store.handler(), field.name())?;
            fields.push(FieldEntry {
                path: alloc::vec![index],
                name: field.name(),
                phases: store.phases(),
                slot,
            });
        }

        hooks.extend(info.after_decode().iter().map(|hook| (Vec::new(), *hook)));

        Ok(Self {
            fields,
            delegation,
            hooks,
        })
    }
}

fn prefixed(head: usize, path: &[usize]) -> Vec<usize> {
    let mut full = Vec::with_capacity(path.len() + 1);
    full.push(head);
    full.extend_from_slice(path);
    full
}
