//! Alias table - short tokens standing in for namespace prefixes.
//!
//! Aliases are bound once and never rebound. Binding order is preserved so
//! that aliased names come out in a stable order.

use indexmap::IndexMap;
use typereg_core::{RegistryError, Result, TypePath};

/// Maps alias tokens to the namespace prefixes they abbreviate.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: IndexMap<String, String>,
}

impl AliasTable {
    /// Create an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `alias` to the namespace `prefix`.
    ///
    /// Fails with `AliasRedefined` if the alias is already bound, leaving
    /// the existing binding in place.
    pub fn bind(&mut self, alias: impl Into<String>, prefix: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        if let Some(existing) = self.aliases.get(&alias) {
            return Err(RegistryError::AliasRedefined {
                alias,
                prefix: existing.clone(),
            });
        }
        self.aliases.insert(alias, prefix.into());
        Ok(())
    }

    /// Get the prefix an alias is bound to.
    pub fn prefix_of(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Check if an alias is bound.
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Iterate `(alias, prefix)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, p)| (a.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Every `[alias]<suffix>` name that applies to `path`, in binding order.
    pub fn aliased_names(&self, path: &TypePath) -> Vec<String> {
        self.aliases
            .iter()
            .filter_map(|(alias, prefix)| {
                path.strip_namespace_prefix(prefix)
                    .map(|suffix| format!("[{alias}]{suffix}"))
            })
            .collect()
    }
}
