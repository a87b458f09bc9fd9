#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod compound;
mod error;
mod list;
mod tag;

// -----------------------------------------------------------------------------
// Exports

pub use compound::Compound;
pub use error::DocError;
pub use list::List;
pub use tag::{Tag, TagId};
