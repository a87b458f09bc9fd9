use crate::Reflect;

/// Access to the current variant of a unit-only enum.
pub trait Enum: Reflect {
    /// The ordinal of the current variant.
    fn variant_index(&self) -> usize;

    fn variant_name(&self) -> &'static str;
}
