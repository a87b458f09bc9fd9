use alloc::boxed::Box;

use crate::Reflect;

/// Access to a set, e.g. `HashSet<T>` or `BTreeSet<T>`.
pub trait Set: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the values in the set's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Inserts a value, returning it back if it is not of the value type.
    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn clear(&mut self);
}
