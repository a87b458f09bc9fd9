use alloc::boxed::Box;
use core::any::TypeId;
use core::marker::PhantomData;

use stow_doc::Compound;

use crate::handler::{Decoded, Handler, RootType};
use crate::info::{TypeInfo, Typed};
use crate::{Context, Reflect, StoreError};

// -----------------------------------------------------------------------------
// Primitive

/// A leaf value stored as a single document tag.
///
/// Unsigned integers are stored bit for bit in the signed tag of the same
/// width, `char` as an int and `bool` as a byte.
pub trait Primitive: Reflect + Typed + Default + Copy {
    fn put(node: &mut Compound, name: &str, value: Self);

    fn get(node: &Compound, name: &str) -> Result<Option<Self>, StoreError>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $put:ident, $get:ident as $tag:ty;)*) => {$(
        impl Primitive for $ty {
            #[inline]
            fn put(node: &mut Compound, name: &str, value: Self) {
                node.$put(name, value as $tag);
            }

            #[inline]
            fn get(node: &Compound, name: &str) -> Result<Option<Self>, StoreError> {
                Ok(node.$get(name)?.map(|value| value as $ty))
            }
        }
    )*};
}

impl_primitive! {
    i8 => put_byte, get_byte as i8;
    u8 => put_byte, get_byte as i8;
    i16 => put_short, get_short as i16;
    u16 => put_short, get_short as i16;
    i32 => put_int, get_int as i32;
    u32 => put_int, get_int as i32;
    i64 => put_long, get_long as i64;
    u64 => put_long, get_long as i64;
    f32 => put_float, get_float as f32;
    f64 => put_double, get_double as f64;
}

impl Primitive for bool {
    #[inline]
    fn put(node: &mut Compound, name: &str, value: Self) {
        node.put_bool(name, value);
    }

    #[inline]
    fn get(node: &Compound, name: &str) -> Result<Option<Self>, StoreError> {
        Ok(node.get_bool(name)?)
    }
}

impl Primitive for char {
    #[inline]
    fn put(node: &mut Compound, name: &str, value: Self) {
        node.put_int(name, value as u32 as i32);
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Self>, StoreError> {
        match node.get_int(name)? {
            Some(code) => char::from_u32(code as u32)
                .map(Some)
                .ok_or_else(|| StoreError::malformed(name, alloc::format!("{code:#x} is not a char"))),
            None => Ok(None),
        }
    }
}

// -----------------------------------------------------------------------------
// PrimitiveHandler

/// Stores a [`Primitive`] under the field name.
///
/// When the document has no entry, an existing value is kept and a missing
/// one becomes `T::default()`.
pub struct PrimitiveHandler<T>(PhantomData<fn() -> T>);

impl<T> Default for PrimitiveHandler<T> {
    #[inline]
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Primitive> Handler for PrimitiveHandler<T> {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::Type(TypeId::of::<T>()))
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(value) = value.downcast_ref::<T>() else {
            return Ok(false);
        };
        T::put(node, name, *value);
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        Ok(match T::get(node, name)? {
            Some(value) => Decoded::Replaced(Box::new(value)),
            None if existing.is_some() => Decoded::Updated,
            None => Decoded::Replaced(Box::new(T::default())),
        })
    }
}

#[cfg(test)]
mod tests {
    use stow_doc::Compound;

    use super::Primitive;

    #[test]
    fn unsigned_bits_survive() {
        let mut node = Compound::new();
        u64::put(&mut node, "big", u64::MAX);
        u8::put(&mut node, "byte", 200);

        assert_eq!(node.get_long("big"), Ok(Some(-1)));
        assert_eq!(u64::get(&node, "big"), Ok(Some(u64::MAX)));
        assert_eq!(u8::get(&node, "byte"), Ok(Some(200)));
    }

    #[test]
    fn char_as_int() {
        let mut node = Compound::new();
        char::put(&mut node, "c", 'é');
        assert_eq!(node.get_int("c"), Ok(Some('é' as i32)));
        assert_eq!(char::get(&node, "c"), Ok(Some('é')));

        node.put_int("bad", 0xD800);
        assert!(char::get(&node, "bad").is_err());
    }
}
