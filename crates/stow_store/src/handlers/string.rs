use alloc::boxed::Box;
use alloc::string::String;

use stow_doc::Compound;

use crate::handler::{Decoded, Handler, RootType};
use crate::info::TypeInfo;
use crate::{Context, Reflect, StoreError};

/// Stores a `String` as a string tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringHandler;

impl Handler for StringHandler {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::of::<String>())
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(value) = value.downcast_ref::<String>() else {
            return Ok(false);
        };
        node.put_string(name, value.as_str());
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        _existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        Ok(match node.get_string(name)? {
            Some(value) => Decoded::Replaced(Box::new(String::from(value))),
            None => Decoded::Absent,
        })
    }
}
