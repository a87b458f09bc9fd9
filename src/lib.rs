#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use stow_doc as doc;
pub use stow_store as store;
pub use stow_utils as utils;
