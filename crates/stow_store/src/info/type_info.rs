use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{EnumInfo, ListInfo, MapInfo, OpaqueInfo, OptionalInfo, SetInfo, StructInfo};

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] paired with the type's name.
///
/// Equality and hashing only consider the `TypeId`.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Returns the `Type` of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stow_store::info::Type;
    ///
    /// let ty = Type::of::<Vec<i32>>();
    /// assert!(ty.is::<Vec<i32>>());
    /// assert!(ty.path().ends_with("Vec<i32>"));
    /// ```
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The type's path as reported by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected type.
///
/// Handlers that accept a whole family of types, such as every list,
/// match on the kind instead of a concrete [`TypeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    Enum,
    List,
    Set,
    Map,
    Optional,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Enum => f.pad("Enum"),
            Self::List => f.pad("List"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
            Self::Optional => f.pad("Optional"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about a reflected type.
///
/// Obtained through [`Typed::type_info`] when the type is known, or
/// [`DynamicTyped::reflect_type_info`] on a `dyn Reflect`.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    Enum(EnumInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Returns the specific information if this is the matching kind.
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_is<T: Any + ?Sized>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns the [`ReflectKind`] of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use stow_store::info::{ReflectKind, Typed};
    ///
    /// assert_eq!(i32::type_info().kind(), ReflectKind::Opaque);
    /// assert_eq!(<Vec<i32>>::type_info().kind(), ReflectKind::List);
    /// ```
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Enum(_) => ReflectKind::Enum,
            Self::List(_) => ReflectKind::List,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns `true` for `Option<T>`, whose values may be null.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strips one `Option` layer: the type handlers actually see.
    ///
    /// # Examples
    ///
    /// ```
    /// use stow_store::info::Typed;
    ///
    /// let info = <Option<String>>::type_info();
    /// assert!(info.value_info().type_is::<String>());
    /// assert!(String::type_info().value_info().type_is::<String>());
    /// ```
    pub fn value_info(&'static self) -> &'static TypeInfo {
        match self {
            Self::Optional(info) => info.inner_info(),
            _ => self,
        }
    }
}
