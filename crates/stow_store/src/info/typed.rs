use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to type information.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) and for the
/// std types in [`impls`](crate::impls). Manual implementations should cache
/// the info in a [`NonGenericTypeInfoCell`] or [`GenericTypeInfoCell`].
///
/// ```
/// use stow_store::impls::NonGenericTypeInfoCell;
/// use stow_store::info::{OpaqueInfo, TypeInfo, Typed};
///
/// struct Handle(u32);
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Handle::type_info().type_is::<Handle>());
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
pub trait DynamicTyped {
    /// Returns the type information of the concrete value behind a `dyn Reflect`.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
