//! Mutex-guarded registry for multi-threaded callers.

use parking_lot::Mutex;
use typereg_core::{Item, ItemMap, Result};

use crate::names::GeneratedNames;
use crate::Registry;

/// A [`Registry`] behind a single mutex.
///
/// Exposes the same operations with `&self` receivers; every call holds the
/// lock for its whole duration. There is no reader/writer split, lookups
/// are short map accesses.
#[derive(Debug, Default)]
pub struct SyncRegistry {
    inner: Mutex<Registry>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(&self, alias: &str, example: &dyn Item) -> Result<()> {
        self.inner.lock().alias(alias, example)
    }

    pub fn register(&self, example: &dyn Item) -> Result<()> {
        self.inner.lock().register(example)
    }

    pub fn register_type<T: Item + Default>(&self) -> Result<()> {
        self.inner.lock().register_type::<T>()
    }

    pub fn names_for(&self, example: &dyn Item) -> Result<GeneratedNames> {
        self.inner.lock().names_for(example)
    }

    pub fn make(&self, name: &str) -> Result<Box<dyn Item>> {
        self.inner.lock().make(name)
    }

    pub fn make_as<T: Item>(&self, name: &str) -> Result<Box<T>> {
        self.inner.lock().make_as::<T>(name)
    }

    /// Default name for the concrete type of `item` (owned, since the lock
    /// is released on return).
    pub fn name_for(&self, item: &dyn Item) -> Result<String> {
        self.inner.lock().name_for(item).map(str::to_string)
    }

    pub fn convert_item_to_map(&self, item: &dyn Item) -> Result<ItemMap> {
        self.inner.lock().convert_item_to_map(item)
    }

    pub fn create_item_from_map(&self, map: &ItemMap) -> Result<Box<dyn Item>> {
        self.inner.lock().create_item_from_map(map)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.inner.lock().contains_name(name)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with the lock held, for several operations in one critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> Registry {
        self.inner.into_inner()
    }
}

impl From<Registry> for SyncRegistry {
    fn from(registry: Registry) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }
}
