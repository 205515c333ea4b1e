//! Name-based type registry.
//!
//! Values stored behind trait objects lose their concrete type on the way
//! into a generic map or document. This crate gives every registered concrete
//! type stable textual names, writes the shortest one into a `$type$` field
//! on the way out, and uses it on the way back in to allocate a blank value
//! of the right type before its fields are filled.
//!
//! # Example
//!
//! ```
//! use typereg::{FieldTransfer, Item, Registry};
//!
//! #[derive(Debug, Default, PartialEq, Item, FieldTransfer)]
//! #[typereg(namespace = "films::cast", transfer)]
//! struct Alpha {
//!     #[typereg(rename = "Name")]
//!     name: String,
//! }
//!
//! # fn main() -> typereg::Result<()> {
//! let mut registry = Registry::new();
//! registry.alias("t", &Alpha::default())?;
//! registry.register(&Alpha::default())?;
//!
//! let map = registry.convert_item_to_map(&Alpha { name: "Goober".into() })?;
//! assert_eq!(map["$type$"], "[t]Alpha");
//!
//! let back = registry.create_item_from_map(&map)?;
//! assert_eq!(back.downcast_ref::<Alpha>().map(|a| a.name.as_str()), Some("Goober"));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "derive")]
pub mod macros {
    pub use typereg_macros::*;
}

pub use typereg_core::{
    ErrorKind, Factory, FieldTransfer, Item, ItemKind, ItemMap, RegistryError, Result, ResultExt,
    TYPE_FIELD, TypePath, transfer,
};
pub use typereg_registry::{
    AliasScope, AliasTable, GeneratedNames, Registration, Registry, canonical_name_of, document,
    type_path_of,
};

#[cfg(feature = "sync")]
pub use typereg_registry::SyncRegistry;

// Derives share their names with the traits they implement
#[cfg(feature = "derive")]
pub use typereg_macros::{FieldTransfer, Item};

pub use serde_json;

pub mod prelude {
    pub use crate::{FieldTransfer, Item, ItemMap, Registry, ResultExt, TYPE_FIELD};
    #[cfg(feature = "sync")]
    pub use crate::SyncRegistry;
}
