//! Name generation - canonical and aliased names for concrete types.
//!
//! A canonical name is `<namespace>/<name>`, taken from the [`TypePath`] of
//! the example's concrete type. Every alias whose prefix covers the namespace
//! adds an aliased name `[alias]<suffix>`. The default name is the shortest
//! candidate, with later candidates winning ties.

use typereg_core::{Item, RegistryError, Result, TypePath};

use crate::AliasTable;

/// Resolve `example` to its concrete value (one level of indirection).
pub(crate) fn resolve(example: &dyn Item) -> Result<&dyn Item> {
    example.resolve().ok_or(RegistryError::NoConcreteType)
}

/// Namespace path of an already resolved value.
pub(crate) fn concrete_path(concrete: &dyn Item) -> Result<TypePath> {
    concrete
        .type_path()
        .ok_or_else(|| RegistryError::NoNamespacePath {
            type_name: concrete.type_name().to_string(),
        })
}

/// Namespace path and local name of the example's concrete type.
pub fn type_path_of(example: &dyn Item) -> Result<TypePath> {
    concrete_path(resolve(example)?)
}

/// Canonical `<namespace>/<name>` string for the example's concrete type.
///
/// # Examples
///
/// ```
/// use typereg_registry::canonical_name_of;
///
/// // Scalars have no namespace path.
/// assert!(canonical_name_of(&17i32).is_err());
/// ```
pub fn canonical_name_of(example: &dyn Item) -> Result<String> {
    type_path_of(example).map(|path| path.canonical_name())
}

/// Canonical plus aliased names generated for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedNames {
    /// The `<namespace>/<name>` form.
    pub canonical: String,
    /// `[alias]<suffix>` forms, in alias binding order.
    pub aliased: Vec<String>,
}

impl GeneratedNames {
    /// Generate names for `path` against the current alias table.
    pub fn generate(path: &TypePath, aliases: &AliasTable) -> Self {
        Self {
            canonical: path.canonical_name(),
            aliased: aliases.aliased_names(path),
        }
    }

    /// The shortest candidate; on equal length the later candidate wins.
    pub fn default_name(&self) -> &str {
        let mut best = self.canonical.as_str();
        for name in &self.aliased {
            if name.len() <= best.len() {
                best = name.as_str();
            }
        }
        best
    }

    /// Canonical name first, then the aliased names.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.aliased.iter().map(String::as_str))
    }

    /// Consume into the `(default, all)` pair stored by a registration.
    pub fn into_parts(self) -> (String, Vec<String>) {
        let default = self.default_name().to_string();
        let mut all = Vec::with_capacity(self.aliased.len() + 1);
        all.push(self.canonical);
        all.extend(self.aliased);
        (default, all)
    }
}
