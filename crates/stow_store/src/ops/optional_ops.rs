use alloc::boxed::Box;

use crate::Reflect;

/// Access to an `Option<T>`.
///
/// # Examples
///
/// ```
/// use stow_store::{Reflect, ops::ReflectMut};
///
/// let mut value: Option<i32> = None;
/// let ReflectMut::Optional(opt) = value.reflect_mut() else { unreachable!() };
///
/// opt.replace(Some(Box::new(5_i32))).unwrap();
/// assert_eq!(value, Some(5));
/// ```
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Sets the option to `Some(value)` or `None`.
    ///
    /// Returns the value back if it is not of the inner type.
    fn replace(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>>;

    #[inline]
    fn is_none(&self) -> bool {
        self.value().is_none()
    }
}
