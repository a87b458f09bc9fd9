//! Static type information consumed by the storage engine.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` together with the type's path, for diagnostics.
//!
//! - [`TypeInfo`]: an enum describing the shape of a reflected type:
//!     - [`StructInfo`]: reflected fields in declaration order, the optional
//!       base field, the storable opt-in and lifecycle hooks.
//!     - [`EnumInfo`]: unit variants, with a constructor by ordinal.
//!     - [`ListInfo`], [`SetInfo`], [`MapInfo`]: element types and a
//!       constructor for an empty container.
//!     - [`OptionalInfo`]: `Option<T>`, which makes a field nullable.
//!     - [`OpaqueInfo`]: leaves such as numbers and strings.
//!
//! - [`NamedField`]: a reflected struct field, with its [`StoreAttr`] when
//!   the field is stored.
//!
//! - [`Typed`] / [`DynamicTyped`]: static and dynamic access to `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod container_info;
mod enum_info;
mod opaque_info;
mod struct_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use container_info::{ListInfo, MapInfo, OptionalInfo, SetInfo};
pub use enum_info::EnumInfo;
pub use opaque_info::OpaqueInfo;
pub use struct_info::{NamedField, StoreAttr, Storable, StructInfo};
pub use type_info::{ReflectKind, Type, TypeInfo};
pub use typed::{DynamicTyped, Typed};
