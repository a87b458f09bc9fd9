use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::marker::PhantomData;

use stow_doc::Compound;

use crate::handler::{Decoded, Handler, RootType};
use crate::info::{TypeInfo, Typed};
use crate::{Context, Reflect, StoreError};

// -----------------------------------------------------------------------------
// Packed

/// An element type whose `Vec` is stored as a single array tag.
///
/// The document only has byte and int arrays: narrower ints, `char` and
/// `f32` are widened into an int array, and `i64` is split into an int
/// array of (high, low) word pairs.
pub trait Packed: Reflect + Typed + Sized {
    fn put(node: &mut Compound, name: &str, values: &[Self]);

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError>;
}

impl Packed for i8 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_byte_array(name, values.to_vec());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        Ok(node.get_byte_array(name)?.map(<[i8]>::to_vec))
    }
}

impl Packed for u8 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_byte_array(name, values.iter().map(|&v| v as i8).collect::<Vec<_>>());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        Ok(node
            .get_byte_array(name)?
            .map(|bytes| bytes.iter().map(|&v| v as u8).collect()))
    }
}

impl Packed for i32 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_int_array(name, values.to_vec());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        Ok(node.get_int_array(name)?.map(<[i32]>::to_vec))
    }
}

impl Packed for i16 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_int_array(name, values.iter().map(|&v| i32::from(v)).collect::<Vec<_>>());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        Ok(node
            .get_int_array(name)?
            .map(|ints| ints.iter().map(|&v| v as i16).collect()))
    }
}

impl Packed for f32 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_int_array(name, values.iter().map(|v| v.to_bits() as i32).collect::<Vec<_>>());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        Ok(node
            .get_int_array(name)?
            .map(|ints| ints.iter().map(|&v| f32::from_bits(v as u32)).collect()))
    }
}

impl Packed for char {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        node.put_int_array(name, values.iter().map(|&c| c as u32 as i32).collect::<Vec<_>>());
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        let Some(ints) = node.get_int_array(name)? else {
            return Ok(None);
        };
        ints.iter()
            .map(|&code| {
                char::from_u32(code as u32).ok_or_else(|| {
                    StoreError::malformed(name, alloc::format!("{code:#x} is not a char"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl Packed for i64 {
    fn put(node: &mut Compound, name: &str, values: &[Self]) {
        let mut words = Vec::with_capacity(values.len() * 2);
        for &v in values {
            words.push((v >> 32) as i32);
            words.push(v as i32);
        }
        node.put_int_array(name, words);
    }

    fn get(node: &Compound, name: &str) -> Result<Option<Vec<Self>>, StoreError> {
        let Some(words) = node.get_int_array(name)? else {
            return Ok(None);
        };
        if words.len() % 2 != 0 {
            return Err(StoreError::malformed(name, "packed long array has an odd length"));
        }
        Ok(Some(
            words
                .chunks_exact(2)
                .map(|pair| (i64::from(pair[0]) << 32) | i64::from(pair[1] as u32))
                .collect(),
        ))
    }
}

// -----------------------------------------------------------------------------
// ArrayHandler

/// Stores a `Vec<T>` of a [`Packed`] element as one array tag.
///
/// Registered ahead of the generic collection handler, so these vectors
/// never take the per-element path.
pub struct ArrayHandler<T>(PhantomData<fn() -> T>);

impl<T> Default for ArrayHandler<T> {
    #[inline]
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Packed> Handler for ArrayHandler<T> {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::Type(TypeId::of::<Vec<T>>()))
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(values) = value.downcast_ref::<Vec<T>>() else {
            return Ok(false);
        };
        T::put(node, name, values);
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
        Ok(match T::get(node, name)? {
            Some(values) => Decoded::Replaced(Box::new(values)),
            None => Decoded::Absent,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use stow_doc::Compound;

    use super::Packed;

    #[test]
    fn longs_as_word_pairs() {
        let values = [1_i64, -1, i64::MIN, 0x1234_5678_9ABC_DEF0];
        let mut node = Compound::new();
        i64::put(&mut node, "l", &values);

        let words = node.get_int_array("l").unwrap().unwrap();
        assert_eq!(words.len(), 8);
        assert_eq!(&words[..2], &[0, 1]);
        assert_eq!(&words[2..4], &[-1, -1]);

        assert_eq!(i64::get(&node, "l"), Ok(Some(values.to_vec())));
    }

    #[test]
    fn odd_word_count_is_malformed() {
        let mut node = Compound::new();
        node.put_int_array("l", vec![1, 2, 3]);
        assert!(i64::get(&node, "l").is_err());
    }

    #[test]
    fn floats_keep_bits() {
        let values = [0.1_f32, -0.0, f32::INFINITY];
        let mut node = Compound::new();
        f32::put(&mut node, "f", &values);

        let decoded = f32::get(&node, "f").unwrap().unwrap();
        assert_eq!(decoded.len(), 3);
        for (a, b) in values.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
