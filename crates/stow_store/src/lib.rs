#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::stow_store::...` paths, which must also resolve
// for types derived inside this crate and its doc tests.
extern crate self as stow_store;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod engine;
mod error;
mod phase;
mod reflection;
mod registry;

pub mod handler;
pub mod handlers;
pub mod impls;
pub mod info;
pub mod lifecycle;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use engine::{Context, EMPTY_SUFFIX, NULL_SUFFIX, SUPERCLASS_KEY, Slot, StorageEngine};
pub use engine::{read, write};
pub use error::StoreError;
pub use phase::Phases;
pub use reflection::Reflect;
pub use registry::Registry;
pub use stow_store_derive as derive;
