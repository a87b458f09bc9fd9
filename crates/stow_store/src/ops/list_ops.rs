use alloc::boxed::Box;
use core::iter::FusedIterator;

use crate::Reflect;

// -----------------------------------------------------------------------------
// List

/// Access to an ordered sequence, e.g. `Vec<T>` or `VecDeque<T>`.
///
/// Elements are kept front to back, index 0 being the front.
///
/// # Examples
///
/// ```
/// use stow_store::ops::List;
///
/// let mut vec = vec![1_u16, 2];
/// let list: &mut dyn List = &mut vec;
///
/// list.push(Box::new(3_u16)).unwrap();
/// assert!(list.push(Box::new("no")).is_err());
/// assert_eq!(list.len(), 3);
/// assert_eq!(vec, [1, 2, 3]);
/// ```
pub trait List: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an element at the back.
    ///
    /// Returns the value back if it is not of the element type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn clear(&mut self);

    fn iter(&self) -> ListItemIter<'_>;
}

// -----------------------------------------------------------------------------
// ListItemIter

/// An iterator over the elements of a [`List`].
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    #[inline(always)]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len() - self.index;
        (len, Some(len))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}

impl FusedIterator for ListItemIter<'_> {}
