// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod struct_kind;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;

use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;
