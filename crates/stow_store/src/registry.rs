use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use log::trace;
use stow_doc::Compound;

use crate::handler::{Decoded, Handler, Matched};
use crate::info::TypeInfo;
use crate::ops::{field_path, field_path_mut};
use crate::{Context, Reflect, StoreError};

// -----------------------------------------------------------------------------
// Registry

/// An ordered collection of handlers with an optional parent.
///
/// Registration order is resolution order: the first handler of a chain
/// that takes a value wins. A child registry's handlers come before its
/// parent's, so consumers can override built-ins for their own types
/// without touching the root.
///
/// A registry is mutable while it is being set up and shared through an
/// `Arc` once lookups begin.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stow_store::Registry;
/// use stow_store::info::Typed;
///
/// let root = Arc::new(Registry::with_builtins());
/// let child = Registry::with_parent(root.clone());
///
/// let chain = child.find_handlers(<Vec<String>>::type_info()).unwrap();
/// assert!(!chain.is_empty());
/// assert!(child.handlers().is_empty());
/// ```
#[derive(Default)]
pub struct Registry {
    handlers: Vec<Arc<dyn Handler>>,
    parent: Option<Arc<Registry>>,
}

impl Registry {
    /// Creates an empty registry without a parent.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            handlers: Vec::new(),
            parent: None,
        }
    }

    /// Creates an empty registry whose lookups fall back to `parent`.
    #[inline]
    pub fn with_parent(parent: Arc<Registry>) -> Self {
        Self {
            handlers: Vec::new(),
            parent: Some(parent),
        }
    }

    /// Creates a root registry holding the built-in handlers.
    ///
    /// See [`handlers`](crate::handlers) for the order.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        crate::handlers::register_builtins(&mut registry);
        registry
    }

    /// Appends a handler, after every handler registered so far.
    #[inline]
    pub fn register<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Inserts a handler in front of every handler registered so far.
    #[inline]
    pub fn register_priority<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.handlers.insert(0, Arc::new(handler));
        self
    }

    /// Returns this registry's own handlers, in resolution order.
    #[inline]
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<Registry>> {
        self.parent.as_ref()
    }

    /// Resolves the ordered handler chain for `ty`.
    ///
    /// 1. Custom whole-object handlers named by `#[storable(handler = ..)]`
    ///    on the type, then on each base reached through storable types.
    /// 2. This registry's matching handlers, in registration order.
    /// 3. The parent's chain, resolved with `self` as the calling registry.
    ///
    /// An empty chain is not an error here.
    pub fn find_handlers(&self, ty: &'static TypeInfo) -> Result<Vec<Arc<dyn Handler>>, StoreError> {
        let mut chain = Vec::new();

        let mut current = ty;
        let mut path = Vec::new();
        while let Some(info) = current.as_struct() {
            let Some(storable) = info.storable() else {
                break;
            };
            if let Some(factory) = storable.handler() {
                let handler = factory.build();
                if path.is_empty() {
                    chain.push(handler);
                } else {
                    chain.push(Arc::new(AncestorHandler {
                        path: path.clone(),
                        base: current,
                        inner: handler,
                    }) as Arc<dyn Handler>);
                }
            }
            let Some((index, base)) = info.base_field() else {
                break;
            };
            path.push(index);
            current = base;
        }

        self.collect(self, ty, &mut chain)?;

        trace!("resolved {} handler(s) for `{}`", chain.len(), ty.type_path());
        Ok(chain)
    }

    fn collect(
        &self,
        caller: &Registry,
        ty: &'static TypeInfo,
        chain: &mut Vec<Arc<dyn Handler>>,
    ) -> Result<(), StoreError> {
        for handler in &self.handlers {
            match handler.matches(caller, ty)? {
                Some(Matched::Itself) => chain.push(handler.clone()),
                Some(Matched::Specialized(specialized)) => chain.push(specialized),
                None => {}
            }
        }
        match &self.parent {
            Some(parent) => parent.collect(caller, ty, chain),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("handlers", &self.handlers)
            .field("parent", &self.parent)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// AncestorHandler

/// Runs a base type's custom handler on the base sub-object of a derived value.
struct AncestorHandler {
    path: Vec<usize>,
    base: &'static TypeInfo,
    inner: Arc<dyn Handler>,
}

impl AncestorHandler {
    fn missing_base(&self) -> StoreError {
        StoreError::NotAStruct {
            type_path: self.base.type_path(),
        }
    }
}

impl Handler for AncestorHandler {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn encode(
        &self,
        cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let base = field_path(value, &self.path).ok_or_else(|| self.missing_base())?;
        self.inner.encode(cx, node, self.base, name, base)
    }

    fn decode(
        &self,
        cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        // A derived value cannot be built from its base alone.
        let Some(existing) = existing else {
            return Ok(Decoded::Absent);
        };
        let base = field_path_mut(existing, &self.path).ok_or_else(|| self.missing_base())?;

        match self.inner.decode(cx, node, self.base, name, Some(&mut *base))? {
            Decoded::Replaced(value) => {
                set_value(base, value)?;
                Ok(Decoded::Updated)
            }
            decoded => Ok(decoded),
        }
    }
}

/// Assigns a decoded value, reporting a [`StoreError::TypeMismatch`] on failure.
pub(crate) fn set_value(target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), StoreError> {
    let expected = target.reflect_type_info().type_path();
    target.set(value).map_err(|value| StoreError::TypeMismatch {
        expected,
        found: value.reflect_type_info().type_path(),
    })
}
