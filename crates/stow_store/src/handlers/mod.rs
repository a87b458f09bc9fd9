//! Built-in handlers.
//!
//! [`Registry::with_builtins`] registers them in this order, which is also
//! their priority:
//!
//! 1. [`PrimitiveHandler`] for `bool`, `char`, the fixed-width integers,
//!    `f32` and `f64`.
//! 2. [`StringHandler`] and [`EnumHandler`].
//! 3. [`ArrayHandler`] for `Vec` of `i8`, `u8`, `i16`, `i32`, `char`,
//!    `f32` and `i64`, then a [`DelegatingHandler`] storing `Vec<f64>` as
//!    the bits of a `Vec<i64>`.
//! 4. [`EnumSetHandler`], ahead of the [`CollectionHandler`] it specializes.
//! 5. [`CollectionHandler`] for every list and set.
//! 6. [`EnumToEnumMapHandler`], then [`EnumMapHandler`], then [`MapHandler`].
//! 7. [`StorableHandler`] last, for `#[storable]` structs.
//!
//! [`Registry::with_builtins`]: crate::Registry::with_builtins

// -----------------------------------------------------------------------------
// Modules

mod arrays;
mod collection;
mod delegate;
mod enum_containers;
mod enums;
mod map;
mod primitive;
mod storable;
mod string;

// -----------------------------------------------------------------------------
// Exports

pub use arrays::{ArrayHandler, Packed};
pub use collection::{CollectionCodec, CollectionHandler};
pub use delegate::DelegatingHandler;
pub use enum_containers::{EnumMapCodec, EnumMapHandler, EnumSetHandler, EnumToEnumMapHandler};
pub use enums::EnumHandler;
pub use map::{MapCodec, MapHandler};
pub use primitive::{Primitive, PrimitiveHandler};
pub use storable::StorableHandler;
pub use string::StringHandler;

// -----------------------------------------------------------------------------
// Registration

use alloc::vec::Vec;

use crate::handler::Decoded;
use crate::info::TypeInfo;
use crate::ops::ReflectRef;
use crate::{Reflect, Registry, StoreError, lifecycle};

/// Registers every built-in handler on `registry`, in priority order.
pub fn register_builtins(registry: &mut Registry) {
    registry
        .register(PrimitiveHandler::<bool>::default())
        .register(PrimitiveHandler::<char>::default())
        .register(PrimitiveHandler::<i8>::default())
        .register(PrimitiveHandler::<i16>::default())
        .register(PrimitiveHandler::<i32>::default())
        .register(PrimitiveHandler::<i64>::default())
        .register(PrimitiveHandler::<u8>::default())
        .register(PrimitiveHandler::<u16>::default())
        .register(PrimitiveHandler::<u32>::default())
        .register(PrimitiveHandler::<u64>::default())
        .register(PrimitiveHandler::<f32>::default())
        .register(PrimitiveHandler::<f64>::default());

    registry.register(StringHandler).register(EnumHandler);

    registry
        .register(ArrayHandler::<i8>::default())
        .register(ArrayHandler::<u8>::default())
        .register(ArrayHandler::<i16>::default())
        .register(ArrayHandler::<i32>::default())
        .register(ArrayHandler::<char>::default())
        .register(ArrayHandler::<f32>::default())
        .register(ArrayHandler::<i64>::default())
        .register(DelegatingHandler::<Vec<f64>, Vec<i64>>::new(
            |values| values.iter().map(|v| v.to_bits() as i64).collect(),
            |bits| bits.into_iter().map(|b| f64::from_bits(b as u64)).collect(),
            ArrayHandler::<i64>::default(),
        ));

    registry
        .register(EnumSetHandler)
        .register(CollectionHandler)
        .register(EnumToEnumMapHandler)
        .register(EnumMapHandler)
        .register(MapHandler)
        .register(StorableHandler);
}

// -----------------------------------------------------------------------------
// Helpers

/// Returns the variant ordinal of a unit enum value.
fn ordinal(value: &dyn Reflect) -> Option<usize> {
    match value.reflect_ref() {
        ReflectRef::Enum(value) => Some(value.variant_index()),
        _ => None,
    }
}

/// Fills `existing` in place, or a new instance of `ty` when there is none.
fn update_or_create(
    ty: &'static TypeInfo,
    existing: Option<&mut dyn Reflect>,
    fill: impl FnOnce(&mut dyn Reflect) -> Result<(), StoreError>,
) -> Result<Decoded, StoreError> {
    match existing {
        Some(target) => {
            fill(target)?;
            Ok(Decoded::Updated)
        }
        None => {
            let mut created = lifecycle::instantiate(ty)?;
            fill(&mut *created)?;
            Ok(Decoded::Replaced(created))
        }
    }
}
