//! Items used by the code that `#[derive(Reflect)]` emits.

pub use alloc::boxed::Box;
pub use core::option::Option;
pub use core::result::Result;

use crate::Reflect;

/// Boxes the value returned by a declared factory or variant constructor.
#[inline]
pub fn boxed<T: Reflect>(value: T) -> Box<dyn Reflect> {
    Box::new(value)
}

/// Runs a typed after-decode callback on a value of type `T`.
#[inline]
pub fn after_decode<T: Reflect>(object: &mut dyn Reflect, hook: fn(&mut T)) {
    if let Some(object) = object.downcast_mut::<T>() {
        hook(object);
    }
}
