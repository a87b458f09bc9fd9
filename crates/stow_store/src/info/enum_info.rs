use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;
use crate::info::Type;

/// Static information about an enum with unit variants only.
///
/// Variants are identified by their ordinal, the declaration index.
///
/// # Examples
///
/// ```
/// use stow_store::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// enum Facing { North, East, South, West }
///
/// let info = Facing::type_info().as_enum().unwrap();
///
/// assert_eq!(info.variant_len(), 4);
/// assert_eq!(info.variant_name(2), Some("South"));
///
/// let west = info.from_index(3).unwrap();
/// assert_eq!(west.downcast_ref::<Facing>(), Some(&Facing::West));
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[&'static str]>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    /// Creates a new [`EnumInfo`], `from_index` builds the variant at an ordinal.
    pub fn new<T: Any>(
        variants: &[&'static str],
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            from_index,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    pub fn variant_names(&self) -> &[&'static str] {
        &self.variants
    }

    #[inline]
    pub fn variant_name(&self, index: usize) -> Option<&'static str> {
        self.variants.get(index).copied()
    }

    /// Returns the ordinal of the variant called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| *v == name)
    }

    /// Builds the variant at `index`, `None` if out of range.
    #[inline]
    pub fn from_index(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }
}
