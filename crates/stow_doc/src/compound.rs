use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;

use stow_utils::hash::HashMap;

use crate::{DocError, List, Tag, TagId};

// -----------------------------------------------------------------------------
// Compound

/// A mutable map from string keys to [`Tag`]s.
///
/// Setters overwrite any existing value. Getters return `Ok(None)` for a
/// missing key and [`DocError::TagMismatch`] when the key holds another type.
///
/// # Examples
///
/// ```
/// use stow_doc::{Compound, DocError};
///
/// let mut node = Compound::new();
/// node.put_int("level", 3);
///
/// assert_eq!(node.get_int("level"), Ok(Some(3)));
/// assert_eq!(node.get_int("missing"), Ok(None));
/// assert!(matches!(node.get_string("level"), Err(DocError::TagMismatch { .. })));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Compound {
    tags: HashMap<String, Tag>,
}

macro_rules! impl_scalar_access {
    ($($put:ident, $get:ident: $ty:ty => $variant:ident;)*) => {
        $(
            #[doc = concat!("Stores a `", stringify!($ty), "` under `key`.")]
            #[inline]
            pub fn $put(&mut self, key: impl Into<String>, value: $ty) {
                self.tags.insert(key.into(), Tag::$variant(value));
            }

            #[doc = concat!("Reads a `", stringify!($ty), "` stored under `key`.")]
            pub fn $get(&self, key: &str) -> Result<Option<$ty>, DocError> {
                match self.tags.get(key) {
                    None => Ok(None),
                    Some(Tag::$variant(value)) => Ok(Some(*value)),
                    Some(other) => Err(mismatch(key, TagId::$variant, other)),
                }
            }
        )*
    };
}

macro_rules! impl_borrowed_access {
    ($($put:ident, $get:ident: $owned:ty, $borrowed:ty => $variant:ident;)*) => {
        $(
            #[doc = concat!("Stores a `", stringify!($owned), "` under `key`.")]
            #[inline]
            pub fn $put(&mut self, key: impl Into<String>, value: impl Into<$owned>) {
                self.tags.insert(key.into(), Tag::$variant(value.into()));
            }

            #[doc = concat!("Borrows the `", stringify!($owned), "` stored under `key`.")]
            pub fn $get(&self, key: &str) -> Result<Option<&$borrowed>, DocError> {
                match self.tags.get(key) {
                    None => Ok(None),
                    Some(Tag::$variant(value)) => Ok(Some(<$owned as Borrow<$borrowed>>::borrow(value))),
                    Some(other) => Err(mismatch(key, TagId::$variant, other)),
                }
            }
        )*
    };
}

#[cold]
fn mismatch(key: &str, expected: TagId, found: &Tag) -> DocError {
    DocError::TagMismatch {
        key: key.into(),
        expected,
        found: found.id(),
    }
}

impl Compound {
    /// Creates an empty compound.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns `true` if a tag of any type is stored under `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Removes and returns the tag stored under `key`.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.tags.remove(key)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.get(key)
    }

    /// Stores any tag under `key`, returning the replaced one.
    #[inline]
    pub fn put(&mut self, key: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        self.tags.insert(key.into(), tag.into())
    }

    /// Iterates the entries in hash order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    impl_scalar_access! {
        put_byte, get_byte: i8 => Byte;
        put_short, get_short: i16 => Short;
        put_int, get_int: i32 => Int;
        put_long, get_long: i64 => Long;
        put_float, get_float: f32 => Float;
        put_double, get_double: f64 => Double;
    }

    impl_borrowed_access! {
        put_string, get_string: String, str => String;
        put_byte_array, get_byte_array: Vec<i8>, [i8] => ByteArray;
        put_int_array, get_int_array: Vec<i32>, [i32] => IntArray;
        put_compound, get_compound: Compound, Compound => Compound;
        put_list, get_list: List, List => List;
    }

    /// Stores a boolean as a byte.
    #[inline]
    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put_byte(key, value as i8);
    }

    /// Reads a boolean stored as a byte, any non-zero byte is `true`.
    #[inline]
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, DocError> {
        Ok(self.get_byte(key)?.map(|b| b != 0))
    }
}

impl<K: Into<String>, V: Into<Tag>> FromIterator<(K, V)> for Compound {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut compound = Self::new();
        for (key, tag) in iter {
            compound.put(key, tag);
        }
        compound
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{Compound, DocError, List, Tag, TagId};

    #[test]
    fn typed_access() {
        let mut node = Compound::new();
        node.put_bool("flag", true);
        node.put_string("name", "stow");
        node.put_int_array("ints", vec![1, 2, 3]);

        assert_eq!(node.get_bool("flag"), Ok(Some(true)));
        assert_eq!(node.get_byte("flag"), Ok(Some(1)));
        assert_eq!(node.get_string("name"), Ok(Some("stow")));
        assert_eq!(node.get_int_array("ints"), Ok(Some(&[1, 2, 3][..])));
        assert_eq!(node.get_long("ints"), Err(DocError::TagMismatch {
            key: "ints".into(),
            expected: TagId::Long,
            found: TagId::IntArray,
        }));
    }

    #[test]
    fn overwrite_and_remove() {
        let mut node = Compound::new();
        node.put_int("a", 1);
        node.put_string("a", "one");
        assert_eq!(node.len(), 1);
        assert_eq!(node.get("a").map(Tag::id), Some(TagId::String));

        assert!(node.remove("a").is_some());
        assert!(!node.contains_key("a"));
        assert!(node.is_empty());
    }

    #[test]
    fn nesting() {
        let mut inner = Compound::new();
        inner.put_double("x", 0.5);

        let mut list = List::new();
        list.push(inner.clone()).unwrap();

        let mut outer = Compound::new();
        outer.put_compound("inner", inner);
        outer.put_list("list", list);

        let inner = outer.get_compound("inner").unwrap().unwrap();
        assert_eq!(inner.get_double("x"), Ok(Some(0.5)));
        assert_eq!(outer.get_list("list").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn from_pairs() {
        let node: Compound = [("a", 1_i32), ("b", 2_i32)].into_iter().collect();
        assert_eq!(node.get_int("b"), Ok(Some(2)));
    }
}
