//! Name registry for concrete types.
//!
//! Maps concrete Rust types to stable textual names (canonical
//! `<namespace>/<name>` and short `[alias]<suffix>` forms), produces blank
//! instances from those names, and converts registered values to and from
//! type-tagged maps.
//!
//! - [`Registry`] - the single-threaded registry
//! - [`AliasTable`] - alias token to namespace prefix bindings
//! - [`AliasScope`] - registers a group of types under one lazily bound alias
//! - [`SyncRegistry`] - mutex-guarded wrapper (feature `sync`)
//! - [`document`] - JSON and YAML type-tag helpers (YAML behind feature `yaml`)

mod alias;
pub mod document;
mod names;
mod registration;
mod registry;
mod scope;
#[cfg(feature = "sync")]
mod sync;

pub use alias::AliasTable;
pub use names::{GeneratedNames, canonical_name_of, type_path_of};
pub use registration::Registration;
pub use registry::Registry;
pub use scope::AliasScope;
#[cfg(feature = "sync")]
pub use sync::SyncRegistry;

pub use typereg_core::{
    ErrorKind, Factory, FieldTransfer, Item, ItemKind, ItemMap, RegistryError, Result, ResultExt,
    TYPE_FIELD, TypePath,
};
