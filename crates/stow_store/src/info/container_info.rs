use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};

/// Constructor for an empty container, boxed.
pub type NewEmptyFn = fn() -> Box<dyn Reflect>;

/// Wraps an optional inner value into an `Option<T>`, failing on a type mismatch.
pub type WrapFn = fn(Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// ListInfo

/// Static information about an ordered sequence, e.g. `Vec<T>`.
///
/// # Examples
///
/// ```
/// use stow_store::info::Typed;
///
/// let info = <Vec<i32>>::type_info().as_list().unwrap();
/// assert!(info.item_is::<i32>());
/// assert!(info.item_info().type_is::<i32>());
/// ```
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_id: TypeId,
    // Element infos are created on first visit.
    item_info: fn() -> &'static TypeInfo,
    new_empty: NewEmptyFn,
}

impl ListInfo {
    pub fn new<TList: Any, TItem: Typed>(new_empty: NewEmptyFn) -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            new_empty,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Creates an empty list of this type.
    #[inline]
    pub fn new_empty(&self) -> Box<dyn Reflect> {
        (self.new_empty)()
    }
}

// -----------------------------------------------------------------------------
// SetInfo

/// Static information about a set, e.g. `HashSet<T>`.
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    value_id: TypeId,
    value_info: fn() -> &'static TypeInfo,
    new_empty: NewEmptyFn,
}

impl SetInfo {
    pub fn new<TSet: Any, TValue: Typed>(new_empty: NewEmptyFn) -> Self {
        Self {
            ty: Type::of::<TSet>(),
            value_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
            new_empty,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn new_empty(&self) -> Box<dyn Reflect> {
        (self.new_empty)()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Static information about a map, e.g. `BTreeMap<K, V>`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use stow_store::info::Typed;
///
/// let info = <BTreeMap<String, Option<i64>>>::type_info().as_map().unwrap();
/// assert!(info.key_is::<String>());
/// assert!(info.value_info().is_nullable());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_id: TypeId,
    value_id: TypeId,
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
    new_empty: NewEmptyFn,
}

impl MapInfo {
    pub fn new<TMap: Any, TKey: Typed, TValue: Typed>(new_empty: NewEmptyFn) -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_id: TypeId::of::<TKey>(),
            value_id: TypeId::of::<TValue>(),
            key_info: TKey::type_info,
            value_info: TValue::type_info,
            new_empty,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn key_id(&self) -> TypeId {
        self.key_id
    }

    #[inline]
    pub fn key_is<T: Any>(&self) -> bool {
        self.key_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn new_empty(&self) -> Box<dyn Reflect> {
        (self.new_empty)()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Static information about `Option<T>`.
#[derive(Clone, Debug)]
pub struct OptionalInfo {
    ty: Type,
    inner_id: TypeId,
    inner_info: fn() -> &'static TypeInfo,
    wrap: WrapFn,
}

impl OptionalInfo {
    pub fn new<TOption: Any, TInner: Typed>(wrap: WrapFn) -> Self {
        Self {
            ty: Type::of::<TOption>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
            wrap,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Builds `Some(value)` or `None` of this option type.
    ///
    /// Returns the value back if it is not of the inner type.
    #[inline]
    pub fn wrap(&self, value: Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}
