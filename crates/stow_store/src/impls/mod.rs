//! [`Typed`] and [`Reflect`] implementations for std types, plus the cells
//! used to cache type information.
//!
//! - leaves: `bool`, `char`, the fixed-width integers, `f32`, `f64`, `String`
//! - [`Optional`]: `Option<T>`
//! - [`List`]: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`
//! - [`Set`]: `HashSet<T, S>`, `BTreeSet<T>`
//! - [`Map`]: `HashMap<K, V, S>`, `BTreeMap<K, V>`
//!
//! [`Typed`]: crate::info::Typed
//! [`Reflect`]: crate::Reflect
//! [`Optional`]: crate::ops::Optional
//! [`List`]: crate::ops::List
//! [`Set`]: crate::ops::Set
//! [`Map`]: crate::ops::Map

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod list;
mod map;
mod option;
mod primitive;
mod set;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};

// -----------------------------------------------------------------------------
// Utilities

use alloc::boxed::Box;

use crate::Reflect;

/// A boxed `T::default()`, used as the empty constructor of containers.
#[inline]
pub(crate) fn boxed_default<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}
