use alloc::boxed::Box;

use crate::Reflect;

/// Access to a map, e.g. `HashMap<K, V>` or `BTreeMap<K, V>`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use stow_store::ops::Map;
///
/// let mut tree = BTreeMap::<String, i32>::new();
/// let map: &mut dyn Map = &mut tree;
///
/// map.insert(Box::new(String::from("a")), Box::new(1_i32)).unwrap();
/// assert!(map.insert(Box::new(2_i32), Box::new(2_i32)).is_err());
/// assert_eq!(tree["a"], 1);
/// ```
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entries in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Inserts an entry, replacing any previous value for the key.
    ///
    /// Returns the offending key or value if it has the wrong type.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>>;

    fn clear(&mut self);
}
