use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use stow_doc::Compound;

use crate::engine::{ClassCache, StorageEngine};
use crate::{Phases, Reflect, Registry, StoreError};

/// The cache of one registry's engine, kept between calls on this thread.
///
/// Only a weak reference to the registry is kept, so dropping the last
/// `Arc` frees it and the entry is pruned on a later call.
struct LocalCache {
    registry: Weak<Registry>,
    classes: ClassCache,
}

impl LocalCache {
    #[inline]
    fn belongs_to(&self, registry: &Arc<Registry>) -> bool {
        core::ptr::eq(self.registry.as_ptr(), Arc::as_ptr(registry))
    }
}

std::thread_local! {
    static CACHES: RefCell<Vec<LocalCache>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with this thread's engine for `registry`.
///
/// The cache is taken out of the thread-local list for the duration of
/// the call. A nested call for the same registry starts from an empty cache.
fn with_engine<R>(registry: &Arc<Registry>, f: impl FnOnce(&mut StorageEngine) -> R) -> R {
    let classes = CACHES.with_borrow_mut(|caches| {
        let index = caches.iter().position(|cache| cache.belongs_to(registry))?;
        Some(caches.swap_remove(index).classes)
    });

    let mut engine = StorageEngine::with_cache(registry.clone(), classes.unwrap_or_default());
    let result = f(&mut engine);
    let classes = engine.into_cache();

    CACHES.with_borrow_mut(|caches| {
        caches.retain(|cache| cache.registry.strong_count() > 0);
        if !caches.iter().any(|cache| cache.belongs_to(registry)) {
            caches.push(LocalCache {
                registry: Arc::downgrade(registry),
                classes,
            });
        }
    });
    result
}

/// Writes `object` into `node` with this thread's engine for `registry`.
///
/// See [`StorageEngine::store`].
pub fn write(
    registry: &Arc<Registry>,
    phases: Phases,
    node: &mut Compound,
    object: &dyn Reflect,
) -> Result<(), StoreError> {
    with_engine(registry, |engine| engine.store(phases, node, object))
}

/// Reads `object` from `node` in place with this thread's engine for `registry`.
///
/// See [`StorageEngine::read`].
pub fn read(
    registry: &Arc<Registry>,
    phases: Phases,
    node: &Compound,
    object: &mut dyn Reflect,
) -> Result<(), StoreError> {
    with_engine(registry, |engine| engine.read(phases, node, object))
}
