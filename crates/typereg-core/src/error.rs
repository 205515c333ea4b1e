//! Error types for the type registry.
//!
//! Every failure is a [`RegistryError`]. Layers that call into lower layers
//! wrap errors with [`ResultExt::context`], which keeps the underlying
//! [`ErrorKind`] reachable through any number of wrapping layers:
//!
//! ```
//! use typereg_core::{ErrorKind, RegistryError, ResultExt};
//!
//! let inner: Result<(), RegistryError> = Err(RegistryError::UnknownName("x/Y".into()));
//! let wrapped = inner.context("decoding lead").context("decoding film");
//!
//! let err = wrapped.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownName);
//! assert_eq!(err.to_string(), "decoding film: decoding lead: no registration for name 'x/Y'");
//! ```

use thiserror::Error;

/// Result alias used throughout the registry crates.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Category of a [`RegistryError`], stable across context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoNamespacePath,
    AliasRedefined,
    NoConcreteType,
    AlreadyRegistered,
    UnknownName,
    NotRegistered,
    NotAStructuredValue,
    MissingTypeTag,
    Transfer,
    Document,
}

/// Errors raised by alias binding, registration, lookup and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The resolved type has no derivable namespace path.
    #[error("no namespace path for type {type_name}")]
    NoNamespacePath {
        /// Rust name of the offending type.
        type_name: String,
    },

    /// The alias token is already bound.
    #[error("can't redefine alias '{alias}' (bound to '{prefix}')")]
    AliasRedefined {
        /// The alias token.
        alias: String,
        /// Prefix the alias is already bound to.
        prefix: String,
    },

    /// An empty nullable reference was supplied where a concrete value was needed.
    #[error("no concrete type behind empty reference")]
    NoConcreteType,

    /// The type, or one of its names, is already registered.
    #[error("previous registration for '{name}'")]
    AlreadyRegistered {
        /// The conflicting name.
        name: String,
    },

    /// No registration exists under this name.
    #[error("no registration for name '{0}'")]
    UnknownName(String),

    /// The concrete type of an item was never registered.
    #[error("no registration for type {type_name}")]
    NotRegistered {
        /// Rust name of the unregistered type.
        type_name: String,
    },

    /// The item is not a structured record (e.g. a scalar).
    #[error("item of type {type_name} is not a structured value")]
    NotAStructuredValue {
        /// Rust name of the item type.
        type_name: String,
    },

    /// The generic map carries no string type tag.
    #[error("missing or non-string type tag '{field}'")]
    MissingTypeTag {
        /// The reserved key that was looked up.
        field: String,
    },

    /// A field could not be moved between an item and a generic map.
    #[error("transfer of field '{field}' failed: {message}")]
    Transfer {
        /// Key of the field in the generic map.
        field: String,
        /// Underlying conversion failure.
        message: String,
    },

    /// Serialized input could not be read or parsed.
    #[error("malformed document: {0}")]
    Document(String),

    /// Another error with added context.
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted.
        context: String,
        /// The wrapped error.
        source: Box<RegistryError>,
    },
}

impl RegistryError {
    /// Get the kind of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NoNamespacePath { .. } => ErrorKind::NoNamespacePath,
            RegistryError::AliasRedefined { .. } => ErrorKind::AliasRedefined,
            RegistryError::NoConcreteType => ErrorKind::NoConcreteType,
            RegistryError::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            RegistryError::UnknownName(_) => ErrorKind::UnknownName,
            RegistryError::NotRegistered { .. } => ErrorKind::NotRegistered,
            RegistryError::NotAStructuredValue { .. } => ErrorKind::NotAStructuredValue,
            RegistryError::MissingTypeTag { .. } => ErrorKind::MissingTypeTag,
            RegistryError::Transfer { .. } => ErrorKind::Transfer,
            RegistryError::Document(_) => ErrorKind::Document,
            RegistryError::Context { source, .. } => source.kind(),
        }
    }

    /// Check whether the innermost error is of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Get the innermost error, skipping all context layers.
    pub fn root(&self) -> &RegistryError {
        match self {
            RegistryError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wrap this error with a description of what was being attempted.
    pub fn context(self, context: impl Into<String>) -> Self {
        RegistryError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a transfer error from any displayable cause.
    pub fn transfer(field: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        RegistryError::Transfer {
            field: field.into(),
            message: cause.to_string(),
        }
    }
}

/// Adds context wrapping to registry results.
pub trait ResultExt<T> {
    /// Wrap the error (if any) with a fixed context string.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Wrap the error (if any) with a lazily built context string.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| err.context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.context(f()))
    }
}
