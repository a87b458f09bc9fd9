use alloc::vec::Vec;

use crate::{Compound, DocError, Tag, TagId};

// -----------------------------------------------------------------------------
// List

/// An ordered sequence of tags that all share one [`TagId`].
///
/// The element type is fixed by the first pushed tag.
///
/// # Examples
///
/// ```
/// use stow_doc::{DocError, List, Tag};
///
/// let mut list = List::new();
/// list.push(1_i32).unwrap();
/// list.push(2_i32).unwrap();
///
/// assert!(matches!(list.push("three"), Err(DocError::ListTypeMismatch { .. })));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    id: Option<TagId>,
    tags: Vec<Tag>,
}

impl List {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            id: None,
            tags: Vec::new(),
        }
    }

    /// Returns the element type, `None` while the list is empty.
    #[inline]
    pub const fn element_id(&self) -> Option<TagId> {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Appends a tag, failing if its type differs from the list's element type.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<(), DocError> {
        let tag = tag.into();
        match self.id {
            Some(expected) if expected != tag.id() => Err(DocError::ListTypeMismatch {
                expected,
                found: tag.id(),
            }),
            _ => {
                self.id = Some(tag.id());
                self.tags.push(tag);
                Ok(())
            }
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Iterates the list as compounds.
    ///
    /// Yields an error for every element that is not a compound.
    pub fn compounds(&self) -> impl Iterator<Item = Result<&Compound, DocError>> {
        self.tags.iter().map(|tag| match tag {
            Tag::Compound(compound) => Ok(compound),
            other => Err(DocError::ListTypeMismatch {
                expected: TagId::Compound,
                found: other.id(),
            }),
        })
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = core::slice::Iter<'a, Tag>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Compound, DocError, List, TagId};

    #[test]
    fn element_type_is_fixed() {
        let mut list = List::new();
        assert_eq!(list.element_id(), None);

        list.push(Compound::new()).unwrap();
        assert_eq!(list.element_id(), Some(TagId::Compound));

        let err = list.push(5_i64).unwrap_err();
        assert_eq!(
            err,
            DocError::ListTypeMismatch {
                expected: TagId::Compound,
                found: TagId::Long,
            }
        );
    }

    #[test]
    fn compounds_view() {
        let mut list = List::new();
        list.push(Compound::new()).unwrap();
        list.push(Compound::new()).unwrap();
        assert_eq!(list.compounds().filter(Result::is_ok).count(), 2);

        let mut ints = List::new();
        ints.push(1_i32).unwrap();
        assert!(ints.compounds().all(|c| c.is_err()));
    }
}
