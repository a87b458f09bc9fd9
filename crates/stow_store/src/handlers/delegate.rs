use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;

use stow_doc::Compound;

use crate::handler::{Decoded, Handler, RootType};
use crate::info::{TypeInfo, Typed};
use crate::{Context, Reflect, StoreError};

/// Stores a `T` in the format of another handler for a `D`.
///
/// The value is converted on the way in and out. An existing value is
/// converted too, so the target can update it, and is left untouched when
/// the document has no entry for it. The built-in registry stores
/// `Vec<f64>` this way, as the bits of a packed `Vec<i64>`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stow_doc::Compound;
/// use stow_store::handlers::{DelegatingHandler, StringHandler};
/// use stow_store::{Phases, Registry, StorageEngine, derive::Reflect};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// struct Version {
///     #[store]
///     major: u32,
///     #[store]
///     minor: u32,
/// }
///
/// let mut registry = Registry::empty();
/// registry.register(DelegatingHandler::<Version, String>::new(
///     |v| format!("{}.{}", v.major, v.minor),
///     |s| {
///         let (major, minor) = s.split_once('.').unwrap_or(("0", "0"));
///         Version {
///             major: major.parse().unwrap_or(0),
///             minor: minor.parse().unwrap_or(0),
///         }
///     },
///     StringHandler,
/// ));
///
/// let mut engine = StorageEngine::new(Arc::new(registry));
/// let mut cx = engine.context(Phases::all());
/// let mut node = Compound::new();
///
/// cx.set_single_field(&mut node, "v", &Version { major: 1, minor: 20 }).unwrap();
/// assert_eq!(node.get_string("v"), Ok(Some("1.20")));
///
/// let mut version = Version { major: 0, minor: 0 };
/// cx.get_single_field(&node, "v", &mut version).unwrap();
/// assert_eq!(version, Version { major: 1, minor: 20 });
/// ```
pub struct DelegatingHandler<T, D> {
    into: fn(&T) -> D,
    from: fn(D) -> T,
    target: Arc<dyn Handler>,
}

impl<T: Reflect + Typed, D: Reflect + Typed> DelegatingHandler<T, D> {
    /// Creates the handler; `target` must store `D`.
    pub fn new(into: fn(&T) -> D, from: fn(D) -> T, target: impl Handler) -> Self {
        Self {
            into,
            from,
            target: Arc::new(target),
        }
    }
}

impl<T: Reflect + Typed, D: Reflect + Typed> Handler for DelegatingHandler<T, D> {
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn root_type(&self) -> Option<RootType> {
        Some(RootType::Type(TypeId::of::<T>()))
    }

    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(value) = value.downcast_ref::<T>() else {
            return Ok(false);
        };
        let converted = (self.into)(value);
        self.target.encode(cx, node, D::type_info(), name, &converted)
    }

    fn decode(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        if !node.contains_key(name) {
            return Ok(Decoded::Absent);
        }

        let existing = existing.and_then(|value| value.downcast_mut::<T>());
        let mut converted = existing.as_deref().map(self.into);
        let target = converted.as_mut().map(|value| value as &mut dyn Reflect);

        let value = match self.target.decode(cx, node, D::type_info(), name, target)? {
            Decoded::Absent => return Ok(Decoded::Absent),
            Decoded::Updated => match converted {
                Some(value) => value,
                None => return Ok(Decoded::Absent),
            },
            Decoded::Replaced(value) => value.take::<D>().map_err(|value| StoreError::TypeMismatch {
                expected: D::type_info().type_path(),
                found: value.reflect_type_info().type_path(),
            })?,
        };

        let value = (self.from)(value);
        match existing {
            Some(existing) => {
                *existing = value;
                Ok(Decoded::Updated)
            }
            None => Ok(Decoded::Replaced(Box::new(value))),
        }
    }
}
