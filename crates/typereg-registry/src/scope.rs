//! Alias scope - registration helper for a group of types sharing one alias.

use typereg_core::{Item, Result, ResultExt};

use crate::Registry;

/// Registers types under a single alias, binding the alias on first use.
///
/// Intended for a module that registers all of its types with a common short
/// prefix: the first [`register`](AliasScope::register) binds the alias to the
/// namespace of that first example, and every call registers its example.
///
/// ```ignore
/// let mut registry = Registry::new();
/// let mut cast = AliasScope::new(&mut registry, "cast");
/// cast.register(&Alpha::default())?;
/// cast.register(&Bravo::default())?;
/// assert_eq!(registry.name_for(&Bravo::default())?, "[cast]Bravo");
/// ```
#[derive(Debug)]
pub struct AliasScope<'r> {
    registry: &'r mut Registry,
    alias: String,
    aliased: bool,
}

impl<'r> AliasScope<'r> {
    pub fn new(registry: &'r mut Registry, alias: impl Into<String>) -> Self {
        Self {
            registry,
            alias: alias.into(),
            aliased: false,
        }
    }

    /// The alias token this scope binds.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Whether the alias has been bound yet.
    pub fn is_aliased(&self) -> bool {
        self.aliased
    }

    /// Register `example`, binding the scope's alias first if needed.
    pub fn register(&mut self, example: &dyn Item) -> Result<()> {
        if !self.aliased {
            self.registry
                .alias(&self.alias, example)
                .with_context(|| format!("register alias {}", self.alias))?;
            self.aliased = true;
        }

        self.registry
            .register(example)
            .context("register example")
    }

    /// Access the underlying registry.
    pub fn registry(&self) -> &Registry {
        &*self.registry
    }
}
