//! Kind-specific access to reflected values.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`], reached through
//! [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`]:
//!
//! - [`Struct`]: reflected fields by index (e.g. a `#[derive(Reflect)]` struct).
//! - [`Enum`]: the current unit variant.
//! - [`List`]: ordered sequences (e.g. `Vec<T>`).
//! - [`Set`]: sets (e.g. `HashSet<T>`).
//! - [`Map`]: maps (e.g. `BTreeMap<K, V>`).
//! - [`Optional`]: `Option<T>`.
//!
//! [`field_path`] and [`field_path_mut`] follow a chain of field indices,
//! which is how the engine reaches fields of an embedded base.
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod kind;
mod list_ops;
mod map_ops;
mod optional_ops;
mod set_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};

pub use enum_ops::Enum;
pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use optional_ops::Optional;
pub use set_ops::Set;
pub use struct_ops::{Struct, field_path, field_path_mut};
