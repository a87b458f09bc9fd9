// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod reflect_derive;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use reflect_derive::{ReflectDerive, ReflectEnum, ReflectStruct, StructField};
pub(crate) use type_attributes::{Factory, StorableAttribute, TypeAttributes};
