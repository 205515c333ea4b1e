//! Registry - name-based lookup and construction of registered types.
//!
//! This module provides [`Registry`], which maps concrete Rust types to the
//! names written into type tags and back again. Given a tag read from a
//! document it produces a blank instance of the right type; given a live
//! value behind a trait object it produces the tag.
//!
//! # Storage Model
//!
//! - **Registrations**: stored by [`TypeId`] (primary)
//! - **Names**: every canonical and aliased name maps to the owning `TypeId`
//! - **Aliases**: an [`AliasTable`] consulted at registration time only
//!
//! # Aliases
//!
//! Aliases must be bound before the types they should shorten are
//! registered. Registration takes the names it generates from the alias table
//! as it is at that moment; later aliases do not rename existing entries.
//!
//! # Thread Safety
//!
//! `Registry` has no internal synchronization. Mutation needs `&mut self`;
//! callers that register or look up from several threads use
//! [`SyncRegistry`](crate::SyncRegistry) or their own lock.
//!
//! # Example
//!
//! ```ignore
//! use typereg::{Item, FieldTransfer, Registry};
//!
//! #[derive(Default, Item, FieldTransfer)]
//! #[typereg(transfer)]
//! struct Alpha {
//!     name: String,
//! }
//!
//! let mut registry = Registry::new();
//! registry.alias("t", &Alpha::default())?;
//! registry.register(&Alpha::default())?;
//!
//! assert_eq!(registry.name_for(&Alpha::default())?, "[t]Alpha");
//! let blank = registry.make("[t]Alpha")?;
//! assert!(blank.is::<Alpha>());
//! ```

use std::any::TypeId;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, trace};
use typereg_core::{
    Item, ItemKind, ItemMap, RegistryError, Result, ResultExt, TYPE_FIELD, transfer,
};

use crate::names::{self, GeneratedNames};
use crate::{AliasTable, Registration};

/// Type registry mapping names to concrete types and back.
#[derive(Debug, Default)]
pub struct Registry {
    /// Registrations stored by concrete type (PRIMARY storage).
    by_type: FxHashMap<TypeId, Registration>,

    /// Reverse index: every canonical and aliased name -> concrete type.
    by_name: FxHashMap<String, TypeId>,

    /// Alias tokens used to shorten generated names.
    aliases: AliasTable,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with room for `types` registrations.
    pub fn with_capacity(types: usize) -> Self {
        Self {
            by_type: FxHashMap::with_capacity_and_hasher(types, Default::default()),
            by_name: FxHashMap::with_capacity_and_hasher(types, Default::default()),
            aliases: AliasTable::new(),
        }
    }

    // ==========================================================================
    // Aliases
    // ==========================================================================

    /// Bind `alias` to the namespace of the example's concrete type.
    ///
    /// Fails with `AliasRedefined` if the alias is already bound, with
    /// `NoConcreteType` for an empty reference, and with `NoNamespacePath`
    /// for types that have no namespace.
    pub fn alias(&mut self, alias: &str, example: &dyn Item) -> Result<()> {
        if let Some(prefix) = self.aliases.prefix_of(alias) {
            return Err(RegistryError::AliasRedefined {
                alias: alias.to_string(),
                prefix: prefix.to_string(),
            });
        }

        let path = names::type_path_of(example)?;
        debug!(alias, prefix = %path.namespace, "binding alias");
        self.aliases.bind(alias, path.namespace)
    }

    /// Get the alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Canonical and aliased names the example's type would be registered under.
    pub fn names_for(&self, example: &dyn Item) -> Result<GeneratedNames> {
        let path = names::type_path_of(example)?;
        Ok(GeneratedNames::generate(&path, &self.aliases))
    }

    /// Register the concrete type of `example`.
    ///
    /// The example is resolved through one level of indirection, so a
    /// `Box<dyn Item>` registers the boxed type. Nothing is modified unless
    /// registration succeeds.
    pub fn register(&mut self, example: &dyn Item) -> Result<()> {
        let concrete = names::resolve(example)?;
        let type_id = concrete.item_type_id();

        if let Some(previous) = self.by_type.get(&type_id) {
            return Err(RegistryError::AlreadyRegistered {
                name: previous.default_name().to_string(),
            });
        }

        let path = names::concrete_path(concrete)?;
        let generated = GeneratedNames::generate(&path, &self.aliases);
        if let Some(taken) = generated.all_names().find(|name| self.by_name.contains_key(*name)) {
            return Err(RegistryError::AlreadyRegistered {
                name: taken.to_string(),
            });
        }

        let factory = concrete.factory().ok_or(RegistryError::NoConcreteType)?;

        let (default_name, all_names) = generated.into_parts();
        debug!(
            name = %default_name,
            aliases = all_names.len() - 1,
            type_name = concrete.type_name(),
            "registering type"
        );

        for name in &all_names {
            self.by_name.insert(name.clone(), type_id);
        }
        self.by_type.insert(
            type_id,
            Registration::new(default_name, all_names, type_id, concrete.type_name(), factory),
        );
        Ok(())
    }

    /// Register `T` using its zero value as the example.
    pub fn register_type<T: Item + Default>(&mut self) -> Result<()> {
        self.register(&T::default())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get the registration for a name (canonical or aliased).
    pub fn registration(&self, name: &str) -> Option<&Registration> {
        self.by_name
            .get(name)
            .and_then(|type_id| self.by_type.get(type_id))
    }

    /// Get the registration for the concrete type of `item`.
    pub fn registration_for(&self, item: &dyn Item) -> Result<&Registration> {
        self.registration_of_concrete(names::resolve(item)?)
    }

    fn registration_of_concrete(&self, concrete: &dyn Item) -> Result<&Registration> {
        self.by_type
            .get(&concrete.item_type_id())
            .ok_or_else(|| RegistryError::NotRegistered {
                type_name: concrete.type_name().to_string(),
            })
    }

    /// Check if a name is registered.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Check if `T` is registered.
    pub fn contains_type<T: Item>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Iterate over all registrations (in no particular order).
    pub fn registrations(&self) -> impl Iterator<Item = &Registration> {
        self.by_type.values()
    }

    /// Create a fresh zero value of the type registered under `name`.
    pub fn make(&self, name: &str) -> Result<Box<dyn Item>> {
        let registration = self
            .registration(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        trace!(name, type_name = registration.type_name(), "making item");
        Ok(registration.instantiate())
    }

    /// Create a fresh zero value of `T` by name.
    ///
    /// Fails with `NotRegistered` if `name` belongs to a different type.
    pub fn make_as<T: Item>(&self, name: &str) -> Result<Box<T>> {
        let item = self.make(name)?;
        let type_name = (*item).type_name();
        item.downcast::<T>()
            .ok_or_else(|| RegistryError::NotRegistered {
                type_name: std::any::type_name::<T>().to_string(),
            })
            .with_context(|| format!("name '{name}' belongs to {type_name}"))
    }

    /// Default name for the concrete type of `item`.
    pub fn name_for(&self, item: &dyn Item) -> Result<&str> {
        self.registration_for(item).map(Registration::default_name)
    }

    // ==========================================================================
    // Map Conversion
    // ==========================================================================

    /// Convert a live item into its tagged generic map.
    ///
    /// The map holds [`TYPE_FIELD`] set to the default name, followed by
    /// whatever the item's [`FieldTransfer`](typereg_core::FieldTransfer)
    /// implementation pushes. Items without one yield a tag-only map.
    pub fn convert_item_to_map(&self, item: &dyn Item) -> Result<ItemMap> {
        let concrete = names::resolve(item)?;
        if concrete.kind() != ItemKind::Record {
            return Err(RegistryError::NotAStructuredValue {
                type_name: concrete.type_name().to_string(),
            });
        }

        let name = self.registration_of_concrete(concrete)?.default_name();
        let mut map = ItemMap::new();
        map.insert(TYPE_FIELD.to_string(), Value::String(name.to_string()));

        if let Some(fields) = concrete.transfer() {
            fields
                .push_to_map(&mut map)
                .with_context(|| format!("push fields of {name}"))?;
        }
        Ok(map)
    }

    /// Create an item of the type named by the map's type tag and pull its
    /// fields from the map.
    ///
    /// Types without a [`FieldTransfer`](typereg_core::FieldTransfer)
    /// implementation come back as zero values.
    pub fn create_item_from_map(&self, map: &ItemMap) -> Result<Box<dyn Item>> {
        let name = transfer::type_tag(map).ok_or_else(|| RegistryError::MissingTypeTag {
            field: TYPE_FIELD.to_string(),
        })?;

        let mut item = self.make(name)?;
        let target: &mut dyn Item = &mut *item;
        if let Some(fields) = target.transfer_mut() {
            fields
                .pull_from_map(map)
                .with_context(|| format!("pull fields of {name}"))?;
        }
        Ok(item)
    }
}
