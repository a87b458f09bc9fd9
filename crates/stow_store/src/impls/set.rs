use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, boxed_default};
use crate::info::{SetInfo, TypeInfo, Typed};
use crate::ops::Set;
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// HashSet

impl<T, S> Typed for HashSet<T, S>
where
    T: Reflect + Typed + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>(boxed_default::<Self>)))
    }
}

impl<T, S> Reflect for HashSet<T, S>
where
    T: Reflect + Typed + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    impl_reflect_cast_fn!(Set);
}

impl<T, S> Set for HashSet<T, S>
where
    T: Reflect + Typed + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(HashSet::iter(self).map(|v| v as &dyn Reflect))
    }

    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        HashSet::insert(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        HashSet::clear(self);
    }
}

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: Reflect + Typed + Ord> Typed for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>(boxed_default::<Self>)))
    }
}

impl<T: Reflect + Typed + Ord> Reflect for BTreeSet<T> {
    impl_reflect_cast_fn!(Set);
}

impl<T: Reflect + Typed + Ord> Set for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(BTreeSet::iter(self).map(|v| v as &dyn Reflect))
    }

    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        BTreeSet::insert(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        BTreeSet::clear(self);
    }
}
