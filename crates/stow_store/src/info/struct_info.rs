use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Phases;
use crate::handler::HandlerFactory;
use crate::info::{Type, TypeInfo, Typed};
use crate::lifecycle::{AfterDecodeFn, FactoryFn};

// -----------------------------------------------------------------------------
// StoreAttr

/// Storage options of a field marked with `#[store]`.
#[derive(Clone, Debug)]
pub struct StoreAttr {
    phases: Phases,
    handler: Option<HandlerFactory>,
}

impl StoreAttr {
    /// Creates the attribute, an empty phase set means every phase.
    #[inline]
    pub fn new(phases: Phases) -> Self {
        Self {
            phases: phases.or_all(),
            handler: None,
        }
    }

    /// Names a handler that is tried before any registry handler.
    #[inline]
    pub fn with_handler(mut self, handler: HandlerFactory) -> Self {
        self.handler = Some(handler);
        self
    }

    #[inline]
    pub fn phases(&self) -> Phases {
        self.phases
    }

    #[inline]
    pub fn handler(&self) -> Option<&HandlerFactory> {
        self.handler.as_ref()
    }
}

// -----------------------------------------------------------------------------
// Storable

/// The `#[storable]` opt-in of a struct.
///
/// Without a handler the struct is stored field by field. With one, that
/// handler stores the whole object and preempts field reflection.
#[derive(Clone, Debug, Default)]
pub struct Storable {
    handler: Option<HandlerFactory>,
}

impl Storable {
    /// Field-by-field storage.
    #[inline]
    pub const fn reflective() -> Self {
        Self { handler: None }
    }

    /// Whole-object storage through `handler`.
    #[inline]
    pub const fn with_handler(handler: HandlerFactory) -> Self {
        Self {
            handler: Some(handler),
        }
    }

    #[inline]
    pub fn handler(&self) -> Option<&HandlerFactory> {
        self.handler.as_ref()
    }

    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.handler.is_none()
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// A reflected struct field.
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    type_id: TypeId,
    // Field types may be recursive, resolve lazily.
    type_info: fn() -> &'static TypeInfo,
    store: Option<StoreAttr>,
}

impl NamedField {
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            type_info: T::type_info,
            store: None,
        }
    }

    #[inline]
    pub fn with_store(mut self, store: StoreAttr) -> Self {
        self.store = Some(store);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the storage options, `None` for fields that are reflected but not stored.
    #[inline]
    pub fn store(&self) -> Option<&StoreAttr> {
        self.store.as_ref()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Static information about a struct with named fields.
///
/// Only fields carrying `#[store]` or `#[reflect(base)]` are reflected, in
/// declaration order; indices used by [`Struct::field_at`] refer to this list.
///
/// # Examples
///
/// ```
/// use stow_store::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[storable]
/// #[reflect(default)]
/// struct Tank {
///     #[store]
///     amount: i32,
///     scratch: u64,
///     #[store(phase(save))]
///     locked: bool,
/// }
///
/// let info = Tank::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("locked"), Some(1));
/// assert!(info.storable().unwrap().is_reflective());
/// assert!(info.factory().is_some());
/// ```
///
/// [`Struct::field_at`]: crate::ops::Struct::field_at
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    base: Option<usize>,
    storable: Option<Storable>,
    factory: Option<FactoryFn>,
    after_decode: Box<[AfterDecodeFn]>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`], fields keep the given order.
    pub fn new<T: Any>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            base: None,
            storable: None,
            factory: None,
            after_decode: Box::new([]),
        }
    }

    /// Marks the field at `index` as the embedded base of this type.
    #[inline]
    pub fn with_base(mut self, index: usize) -> Self {
        debug_assert!(index < self.fields.len(), "base index out of range");
        self.base = Some(index);
        self
    }

    #[inline]
    pub fn with_storable(mut self, storable: Storable) -> Self {
        self.storable = Some(storable);
        self
    }

    #[inline]
    pub fn with_factory(mut self, factory: FactoryFn) -> Self {
        self.factory = Some(factory);
        self
    }

    #[inline]
    pub fn with_after_decode(mut self, hooks: &[AfterDecodeFn]) -> Self {
        self.after_decode = hooks.into();
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the index for the given field `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the index of the base field, if this type embeds one.
    #[inline]
    pub const fn base(&self) -> Option<usize> {
        self.base
    }

    /// Returns the base field's index and type.
    pub fn base_field(&self) -> Option<(usize, &'static TypeInfo)> {
        let index = self.base?;
        Some((index, self.fields.get(index)?.type_info()))
    }

    #[inline]
    pub fn storable(&self) -> Option<&Storable> {
        self.storable.as_ref()
    }

    #[inline]
    pub fn factory(&self) -> Option<FactoryFn> {
        self.factory
    }

    #[inline]
    pub fn after_decode(&self) -> &[AfterDecodeFn] {
        &self.after_decode
    }
}
