use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Enum, List, Map, Optional, Set, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Enum(&'a dyn Enum),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Enum(&'a mut dyn Enum),
    List(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

// -----------------------------------------------------------------------------
// Cast methods

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $($ref:tt)+) => {
        /// Returns the specific view if this is the matching kind.
        #[inline]
        pub fn $name(self) -> Option<$($ref)+> {
            match self {
                Self::$kind(value) => Some(value),
                _ => None,
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_enum: Enum => &'a dyn Enum);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_set: Set => &'a dyn Set);
    impl_cast_method!(as_map: Map => &'a dyn Map);
    impl_cast_method!(as_optional: Optional => &'a dyn Optional);

    pub fn kind(&self) -> ReflectKind {
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
}

impl<'a> ReflectMut<'a> {
    impl_cast_method!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_method!(as_enum: Enum => &'a mut dyn Enum);
    impl_cast_method!(as_list: List => &'a mut dyn List);
    impl_cast_method!(as_set: Set => &'a mut dyn Set);
    impl_cast_method!(as_map: Map => &'a mut dyn Map);
    impl_cast_method!(as_optional: Optional => &'a mut dyn Optional);

    pub fn kind(&self) -> ReflectKind {
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
}
