use core::any::Any;

use crate::info::Type;
use crate::lifecycle::FactoryFn;

/// Static information about a leaf type, such as a number or a string.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
    default: Option<FactoryFn>,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: Any + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: None,
        }
    }

    /// Sets the constructor of the type's default value.
    #[inline]
    pub fn with_default(mut self, default: FactoryFn) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the constructor of the default value, if the type has one.
    #[inline]
    pub fn default_fn(&self) -> Option<FactoryFn> {
        self.default
    }
}
