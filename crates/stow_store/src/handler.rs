//! The handler contract.
//!
//! A [`Handler`] encodes and decodes values of the types it matches. The
//! [`Registry`] collects the matching handlers of a type into a *chain*,
//! which is tried in order until one handler takes the value.
//!
//! [`Registry`]: crate::Registry

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use stow_doc::Compound;

use crate::info::{ReflectKind, TypeInfo};
use crate::{Context, Reflect, Registry, StoreError};

// -----------------------------------------------------------------------------
// RootType

/// The broadest type a handler claims, used by the default [`Handler::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootType {
    /// Exactly this type.
    Type(TypeId),
    /// Every type of this kind, e.g. all lists.
    Kind(ReflectKind),
}

impl RootType {
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self::Type(TypeId::of::<T>())
    }

    /// Returns `true` if `ty` falls under this root.
    pub fn accepts(&self, ty: &TypeInfo) -> bool {
        match *self {
            Self::Type(id) => ty.type_id() == id,
            Self::Kind(kind) => ty.kind() == kind,
        }
    }
}

// -----------------------------------------------------------------------------
// Matched

/// A successful [`Handler::matches`].
pub enum Matched {
    /// The registered instance handles the type as is.
    Itself,
    /// A new instance prepared for the type, e.g. a container handler with
    /// resolved element chains.
    Specialized(Arc<dyn Handler>),
}

// -----------------------------------------------------------------------------
// Decoded

/// The outcome of [`Handler::decode`].
#[derive(Debug)]
pub enum Decoded {
    /// Nothing to read here: try the next handler or keep the existing value.
    Absent,
    /// The existing value was updated in place.
    Updated,
    /// A new value to assign.
    Replaced(Box<dyn Reflect>),
}

impl Decoded {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

// -----------------------------------------------------------------------------
// Handler

/// Encodes and decodes values of the types it matches.
///
/// Handlers are shared through `Arc` and may be called concurrently, so
/// they hold no mutable state. A handler must not keep the node or values
/// it is given beyond the call.
///
/// # Examples
///
/// A handler that stores a newtype as a plain string:
///
/// ```
/// use stow_doc::Compound;
/// use stow_store::handler::{Decoded, Handler, RootType};
/// use stow_store::info::TypeInfo;
/// use stow_store::{Context, Reflect, StoreError, derive::Reflect};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// #[storable(handler = NameHandler)]
/// struct Name {
///     #[store]
///     value: String,
/// }
///
/// #[derive(Default)]
/// struct NameHandler;
///
/// impl Handler for NameHandler {
///     fn root_type(&self) -> Option<RootType> {
///         Some(RootType::of::<Name>())
///     }
///
///     fn encode(
///         &self,
///         _cx: &mut Context<'_>,
///         node: &mut Compound,
///         _ty: &'static TypeInfo,
///         name: &str,
///         value: &dyn Reflect,
///     ) -> Result<bool, StoreError> {
///         let Some(value) = value.downcast_ref::<Name>() else {
///             return Ok(false);
///         };
///         node.put_string(name, value.value.as_str());
///         Ok(true)
///     }
///
///     fn decode(
///         &self,
///         _cx: &mut Context<'_>,
///         node: &Compound,
///         _ty: &'static TypeInfo,
///         name: &str,
///         _existing: Option<&mut dyn Reflect>,
///     ) -> Result<Decoded, StoreError> {
///         Ok(match node.get_string(name)? {
///             Some(value) => Decoded::Replaced(Box::new(Name { value: value.into() })),
///             None => Decoded::Absent,
///         })
///     }
/// }
/// ```
pub trait Handler: Any + Send + Sync {
    /// A name for logs and diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// The broadest type this handler claims, if matching by root is enough.
    fn root_type(&self) -> Option<RootType> {
        None
    }

    /// Returns the handler to use for `ty`, or `None` if it does not apply.
    ///
    /// `registry` is the registry the lookup started from; handlers that
    /// need chains for type parameters resolve them against it. A required
    /// parameter without any handler is a [`StoreError::NoHandlerFound`].
    fn matches(
        &self,
        registry: &Registry,
        ty: &'static TypeInfo,
    ) -> Result<Option<Matched>, StoreError> {
        let _ = registry;
        Ok(self
            .root_type()
            .filter(|root| root.accepts(ty))
            .map(|_| Matched::Itself))
    }

    /// Writes `value` under `name`.
    ///
    /// Returns `false` to let the next handler of the chain try.
    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError>;

    /// Reads the value stored under `name`.
    ///
    /// `existing` is the current value when there is one, so containers and
    /// objects can be updated in place.
    fn decode(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError>;
}

impl dyn Handler {
    #[inline]
    pub fn is<H: Handler>(&self) -> bool {
        (self as &dyn Any).is::<H>()
    }

    #[inline]
    pub fn downcast_ref<H: Handler>(&self) -> Option<&H> {
        (self as &dyn Any).downcast_ref::<H>()
    }
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reborrows an optional mutable value for one more call.
#[inline]
pub fn reborrow<'a>(value: &'a mut Option<&mut dyn Reflect>) -> Option<&'a mut dyn Reflect> {
    match value {
        Some(value) => Some(&mut **value),
        None => None,
    }
}

// -----------------------------------------------------------------------------
// HandlerFactory

/// Creates instances of a handler named in an attribute, such as
/// `#[store(handler = H)]` or `#[storable(handler = H)]`.
#[derive(Clone, Copy)]
pub struct HandlerFactory {
    name: &'static str,
    build: fn() -> Arc<dyn Handler>,
}

fn build_handler<H: Handler + Default>() -> Arc<dyn Handler> {
    Arc::new(H::default())
}

impl HandlerFactory {
    #[inline]
    pub fn of<H: Handler + Default>() -> Self {
        Self {
            name: core::any::type_name::<H>(),
            build: build_handler::<H>,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Creates a fresh instance.
    #[inline]
    pub fn build(&self) -> Arc<dyn Handler> {
        (self.build)()
    }
}

impl fmt::Debug for HandlerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerFactory").field(&self.name).finish()
    }
}
