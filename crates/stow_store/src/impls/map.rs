use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, boxed_default};
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// HashMap

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(boxed_default::<Self>))
        })
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    impl_reflect_cast_fn!(Map);
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(HashMap::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        let key = key.take::<K>()?;
        let value = value.take::<V>()?;
        HashMap::insert(self, key, value);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        HashMap::clear(self);
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Typed for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(boxed_default::<Self>))
        })
    }
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Reflect for BTreeMap<K, V> {
    impl_reflect_cast_fn!(Map);
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Map for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        let key = key.take::<K>()?;
        let value = value.take::<V>()?;
        BTreeMap::insert(self, key, value);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use std::collections::{HashMap, HashSet};

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectMut;

    #[test]
    fn hash_map_through_reflect() {
        let mut value: HashMap<u8, String> = HashMap::new();
        let ReflectMut::Map(map) = value.reflect_mut() else {
            panic!("expected a map");
        };

        map.insert(Box::new(1_u8), Box::new(String::from("one")))
            .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(value[&1], "one");
    }

    #[test]
    fn nested_infos() {
        let info = <HashMap<String, HashSet<i32>>>::type_info().as_map().unwrap();
        let value = info.value_info().as_set().unwrap();
        assert!(value.value_is::<i32>());
    }
}
