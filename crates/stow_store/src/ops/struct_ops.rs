use crate::Reflect;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Struct

/// Field access for a reflected struct.
///
/// Indices follow [`StructInfo::fields`](crate::info::StructInfo::fields),
/// which only lists stored fields and the base.
///
/// # Examples
///
/// ```
/// use stow_store::{Reflect, derive::Reflect, ops::ReflectRef};
///
/// #[derive(Reflect)]
/// #[storable]
/// struct Lamp {
///     #[store]
///     level: u8,
///     #[store]
///     lit: bool,
/// }
///
/// let lamp = Lamp { level: 7, lit: true };
/// let ReflectRef::Struct(s) = lamp.reflect_ref() else { unreachable!() };
///
/// assert_eq!(s.field_len(), 2);
/// assert_eq!(s.field_at(1).unwrap().downcast_ref::<bool>(), Some(&true));
/// ```
pub trait Struct: Reflect {
    fn field_len(&self) -> usize;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

// -----------------------------------------------------------------------------
// Field path

/// Follows `path` through nested structs, each entry a field index.
///
/// An empty path returns `object` itself.
pub fn field_path<'a>(object: &'a dyn Reflect, path: &[usize]) -> Option<&'a dyn Reflect> {
    let mut object = object;
    for &index in path {
        let ReflectRef::Struct(s) = object.reflect_ref() else {
            return None;
        };
        object = s.field_at(index)?;
    }
    Some(object)
}

/// Mutable variant of [`field_path`].
pub fn field_path_mut<'a>(
    object: &'a mut dyn Reflect,
    path: &[usize],
) -> Option<&'a mut dyn Reflect> {
    let mut object = object;
    for &index in path {
        let ReflectMut::Struct(s) = object.reflect_mut() else {
            return None;
        };
        object = s.field_at_mut(index)?;
    }
    Some(object)
}
