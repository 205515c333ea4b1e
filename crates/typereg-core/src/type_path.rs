use std::fmt;

/// Separator between the namespace path and the local type name in a
/// canonical name.
pub const NAME_SEPARATOR: char = '/';

/// Separator between namespace segments (Rust module path syntax).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Namespace path plus local name identifying one concrete type.
///
/// The canonical name is `<namespace>/<name>`. Namespaces use module path
/// syntax so the value produced by `module_path!()` can be used directly.
///
/// # Examples
///
/// ```
/// use typereg_core::TypePath;
///
/// let alpha = TypePath::new("films::cast", "Alpha");
/// assert_eq!(alpha.to_string(), "films::cast/Alpha");
///
/// let parsed = TypePath::from_canonical("films::cast/Alpha").unwrap();
/// assert_eq!(parsed, alpha);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePath {
    /// Namespace path (e.g., "films::cast"). Never empty.
    pub namespace: String,
    /// Local type name (e.g., "Alpha")
    pub name: String,
}

impl TypePath {
    /// Create a type path from a namespace and a local name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a canonical name (e.g., "films::cast/Alpha").
    ///
    /// Splits on the last `/`. Returns `None` when there is no separator or
    /// either side is empty, since such a name has no namespace path.
    pub fn from_canonical(s: &str) -> Option<Self> {
        let (namespace, name) = s.rsplit_once(NAME_SEPARATOR)?;
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(namespace, name))
    }

    /// Get the local (unqualified) type name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The `<namespace>/<name>` string identifying this type.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }

    /// Strip a namespace `prefix` from the canonical name.
    ///
    /// The prefix must end on a segment boundary: `films` matches
    /// `films::cast/Alpha` (suffix `cast/Alpha`) and `films::cast` matches it
    /// with suffix `Alpha`, but `film` does not match at all.
    pub fn strip_namespace_prefix(&self, prefix: &str) -> Option<String> {
        if prefix.is_empty() {
            return None;
        }
        let rest = self.namespace.strip_prefix(prefix)?;
        if rest.is_empty() {
            return Some(self.name.clone());
        }
        let nested = rest.strip_prefix(NAMESPACE_SEPARATOR)?;
        Some(format!("{nested}{NAME_SEPARATOR}{}", self.name))
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAME_SEPARATOR, self.name)
    }
}
