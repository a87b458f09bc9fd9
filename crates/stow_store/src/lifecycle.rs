//! Object lifecycle hooks: creating instances during decode and running
//! post-decode callbacks.
//!
//! Both are declared on the type with the derive macro:
//!
//! - `#[reflect(default)]` uses `Default::default` as the factory.
//! - `#[reflect(factory = path)]` names a `fn() -> Self`.
//! - `#[reflect(after_decode = path)]`, repeatable, names a `fn(&mut Self)`
//!   called once all fields and the base have been decoded.
//!
//! Declaring two factories is a compile error. A struct without a factory
//! can still be decoded in place; it only fails when a new instance is
//! needed, e.g. to fill a `None` field.

use alloc::boxed::Box;

use crate::info::TypeInfo;
use crate::{Reflect, StoreError};

/// Creates a new instance of the declaring type.
pub type FactoryFn = fn() -> Box<dyn Reflect>;

/// Called on an object after it has been decoded.
pub type AfterDecodeFn = fn(&mut dyn Reflect);

/// Creates a fresh value of type `ty`.
///
/// Structs use their declared factory, enums their first variant,
/// containers an empty instance, options `None` and leaves their default.
///
/// # Examples
///
/// ```
/// use stow_store::{derive::Reflect, info::Typed, lifecycle};
///
/// #[derive(Reflect)]
/// #[storable]
/// #[reflect(factory = Self::charged)]
/// struct Battery {
///     #[store]
///     charge: u32,
/// }
///
/// impl Battery {
///     fn charged() -> Self {
///         Self { charge: 100 }
///     }
/// }
///
/// let battery = lifecycle::instantiate(Battery::type_info()).unwrap();
/// assert_eq!(battery.downcast_ref::<Battery>().unwrap().charge, 100);
///
/// let zero = lifecycle::instantiate(u32::type_info()).unwrap();
/// assert_eq!(zero.downcast_ref::<u32>(), Some(&0));
/// ```
pub fn instantiate(ty: &'static TypeInfo) -> Result<Box<dyn Reflect>, StoreError> {
    let failure = |reason| StoreError::InstantiationFailure {
        type_path: ty.type_path(),
        reason,
    };

    match ty {
        TypeInfo::Struct(info) => info
            .factory()
            .map(|factory| factory())
            .ok_or_else(|| failure("no factory declared")),
        TypeInfo::Enum(info) => info.from_index(0).ok_or_else(|| failure("enum has no variants")),
        TypeInfo::List(info) => Ok(info.new_empty()),
        TypeInfo::Set(info) => Ok(info.new_empty()),
        TypeInfo::Map(info) => Ok(info.new_empty()),
        TypeInfo::Optional(info) => info.wrap(None).map_err(|_| failure("cannot build `None`")),
        TypeInfo::Opaque(info) => info
            .default_fn()
            .map(|default| default())
            .ok_or_else(|| failure("no default value")),
    }
}

/// Runs the after-decode callbacks declared by `ty` itself on `object`.
///
/// Callbacks of an embedded base are not included, the engine runs those
/// on the base sub-object first.
pub fn after_decode(ty: &'static TypeInfo, object: &mut dyn Reflect) {
    if let Some(info) = ty.as_struct() {
        for hook in info.after_decode() {
            hook(object);
        }
    }
}
