//! The storage engine: per-type field tables and the encode/decode walk.

use alloc::string::String;
use alloc::sync::Arc;

use log::debug;
use stow_doc::Compound;
use stow_utils::TypeIdMap;

use crate::info::TypeInfo;
use crate::{Phases, Reflect, Registry, StoreError};

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod context;
mod local;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use context::Context;
pub use local::{read, write};
pub use slot::Slot;

use cache::ClassEntry;

/// Field tables by type.
type ClassCache = TypeIdMap<Arc<ClassEntry>>;

// -----------------------------------------------------------------------------
// Reserved keys

/// Suffix of the marker key written for a `None` value, in place of the value key.
pub const NULL_SUFFIX: &str = "-";

/// Suffix reserved to tell an empty container apart from a null one.
pub const EMPTY_SUFFIX: &str = "+";

/// Key under which a delegated base is stored.
pub const SUPERCLASS_KEY: &str = "__superclass";

/// Returns the null marker key for `name`.
#[inline]
pub(crate) fn null_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + NULL_SUFFIX.len());
    key.push_str(name);
    key.push_str(NULL_SUFFIX);
    key
}

// -----------------------------------------------------------------------------
// StorageEngine

/// Encodes and decodes storable objects against one [`Registry`].
///
/// The engine caches a field table per type on first encounter; entries are
/// never invalidated. An engine is owned by one worker. Independent workers
/// each create their own, or use the thread-local [`write`] and [`read`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stow_doc::Compound;
/// use stow_store::{Phases, Registry, StorageEngine, derive::Reflect};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[storable]
/// struct Counter {
///     #[store]
///     ticks: u32,
///     #[store(phase(save))]
///     label: Option<String>,
/// }
///
/// let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
/// let counter = Counter { ticks: 12, label: None };
///
/// let mut node = Compound::new();
/// engine.store(Phases::SAVE, &mut node, &counter).unwrap();
/// assert_eq!(node.get_int("ticks"), Ok(Some(12)));
/// assert_eq!(node.get_bool("label-"), Ok(Some(true)));
///
/// let mut decoded = Counter { ticks: 0, label: Some("stale".into()) };
/// engine.read(Phases::SAVE, &node, &mut decoded).unwrap();
/// assert_eq!(decoded, counter);
/// ```
pub struct StorageEngine {
    registry: Arc<Registry>,
    classes: ClassCache,
}

impl StorageEngine {
    #[inline]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            classes: TypeIdMap::new(),
        }
    }

    #[inline]
    pub(crate) fn with_cache(registry: Arc<Registry>, classes: ClassCache) -> Self {
        Self { registry, classes }
    }

    #[inline]
    pub(crate) fn into_cache(self) -> ClassCache {
        self.classes
    }

    #[inline]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns the number of types with a cached field table.
    #[inline]
    pub fn cached_types(&self) -> usize {
        self.classes.len()
    }

    /// Starts a walk restricted to `phases`.
    #[inline]
    pub fn context(&mut self, phases: Phases) -> Context<'_> {
        Context::new(self, phases)
    }

    /// Writes the fields of `object` in `phases` into `node`.
    #[inline]
    pub fn store(
        &mut self,
        phases: Phases,
        node: &mut Compound,
        object: &dyn Reflect,
    ) -> Result<(), StoreError> {
        self.context(phases).store_object(node, object)
    }

    /// Reads the fields of `object` in `phases` from `node`, in place.
    #[inline]
    pub fn read(
        &mut self,
        phases: Phases,
        node: &Compound,
        object: &mut dyn Reflect,
    ) -> Result<(), StoreError> {
        self.context(phases).read_object(node, object)
    }

    /// Returns the cached field table of `ty`, building it on first use.
    pub(crate) fn entry(&mut self, ty: &'static TypeInfo) -> Result<Arc<ClassEntry>, StoreError> {
        if let Some(entry) = self.classes.get(&ty.type_id()) {
            return Ok(entry.clone());
        }

        // Building may recurse into a base type, so the map is not borrowed here.
        let entry = Arc::new(ClassEntry::build(self, ty)?);
        debug!(
            "cached {} field(s) for `{}`",
            entry.fields.len(),
            ty.type_path()
        );
        self.classes.insert(ty.type_id(), entry.clone());
        Ok(entry)
    }
}
