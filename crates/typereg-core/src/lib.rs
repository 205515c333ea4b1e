//! Core types for the typereg type registry.
//!
//! - [`TypePath`] - namespace path plus local name, the source of canonical names
//! - [`Item`] - object-safe identity, resolution and factory trait
//! - [`FieldTransfer`] / [`ItemMap`] - the optional push/pull contract and its map
//! - [`RegistryError`] / [`ErrorKind`] - the shared error type

pub mod error;
pub mod item;
pub mod transfer;
pub mod type_path;

pub use error::{ErrorKind, RegistryError, Result, ResultExt};
pub use item::{Factory, Item, ItemKind};
pub use transfer::{FieldTransfer, ItemMap, TYPE_FIELD};
pub use type_path::TypePath;

