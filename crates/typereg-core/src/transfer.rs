//! Field-Transfer Capability and the generic map it fills.
//!
//! A registered type that implements [`FieldTransfer`] decides for itself
//! which fields appear in its generic form and under which keys. The registry
//! only writes the reserved [`TYPE_FIELD`] key and then hands the map over.
//!
//! Composition replaces embedding: a type that wants to expose the fields of
//! a component forwards to the component's own implementation.
//!
//! ```
//! use typereg_core::{FieldTransfer, ItemMap, Result, transfer};
//!
//! #[derive(Default, PartialEq, Debug)]
//! struct Position {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl FieldTransfer for Position {
//!     fn push_to_map(&self, map: &mut ItemMap) -> Result<()> {
//!         transfer::push_field(map, "x", &self.x)?;
//!         transfer::push_field(map, "y", &self.y)
//!     }
//!
//!     fn pull_from_map(&mut self, map: &ItemMap) -> Result<()> {
//!         transfer::pull_field(map, "x", &mut self.x)?;
//!         transfer::pull_field(map, "y", &mut self.y)
//!     }
//! }
//!
//! let mut map = ItemMap::new();
//! Position { x: 1.5, y: -2.0 }.push_to_map(&mut map).unwrap();
//!
//! let mut copy = Position::default();
//! copy.pull_from_map(&map).unwrap();
//! assert_eq!(copy, Position { x: 1.5, y: -2.0 });
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{RegistryError, Result};

/// Reserved key carrying the type tag in a generic map.
///
/// Registered types must not use this key for their own fields.
pub const TYPE_FIELD: &str = "$type$";

/// Insertion-ordered, string-keyed generic representation of an item.
pub type ItemMap = serde_json::Map<String, Value>;

/// Optional per-type contract for moving exported state into and out of an
/// [`ItemMap`].
pub trait FieldTransfer {
    /// Copy this value's exported state into `map`.
    fn push_to_map(&self, map: &mut ItemMap) -> Result<()>;

    /// Read this value's exported state back out of `map`.
    ///
    /// Keys missing from `map` leave the corresponding fields untouched.
    fn pull_from_map(&mut self, map: &ItemMap) -> Result<()>;
}

/// Serialize `value` into `map` under `key`.
pub fn push_field<T: Serialize + ?Sized>(map: &mut ItemMap, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value).map_err(|err| RegistryError::transfer(key, err))?;
    map.insert(key.to_string(), value);
    Ok(())
}

/// Deserialize `map[key]` into `slot`. Absent keys leave `slot` unchanged.
pub fn pull_field<T: DeserializeOwned>(map: &ItemMap, key: &str, slot: &mut T) -> Result<()> {
    if let Some(value) = map.get(key) {
        *slot = T::deserialize(value).map_err(|err| RegistryError::transfer(key, err))?;
    }
    Ok(())
}

/// Read the type tag from a generic map, if present and a string.
pub fn type_tag(map: &ItemMap) -> Option<&str> {
    map.get(TYPE_FIELD).and_then(Value::as_str)
}

/// Lets `#[derive(Item)]` find a type's `FieldTransfer` impl on its own.
///
/// Method lookup on `&Detect(value)` picks [`Implemented`](detect::Implemented)
/// when the value implements `FieldTransfer`. Otherwise it falls back to
/// [`Missing`](detect::Missing), which sits one autoref further away and
/// yields `None`. Only meaningful for concrete (non-generic) types.
#[doc(hidden)]
pub mod detect {
    use super::FieldTransfer;

    pub struct Detect<'a, T>(pub &'a T);

    pub struct DetectMut<'a, T>(pub Option<&'a mut T>);

    pub trait Implemented<'a> {
        fn detect_transfer(&self) -> Option<&'a dyn FieldTransfer>;
    }

    impl<'a, T: FieldTransfer> Implemented<'a> for Detect<'a, T> {
        fn detect_transfer(&self) -> Option<&'a dyn FieldTransfer> {
            Some(self.0)
        }
    }

    pub trait Missing<'a> {
        fn detect_transfer(&self) -> Option<&'a dyn FieldTransfer>;
    }

    impl<'a, T> Missing<'a> for &Detect<'a, T> {
        fn detect_transfer(&self) -> Option<&'a dyn FieldTransfer> {
            None
        }
    }

    pub trait ImplementedMut<'a> {
        fn detect_transfer_mut(&mut self) -> Option<&'a mut dyn FieldTransfer>;
    }

    impl<'a, T: FieldTransfer> ImplementedMut<'a> for DetectMut<'a, T> {
        fn detect_transfer_mut(&mut self) -> Option<&'a mut dyn FieldTransfer> {
            self.0.take().map(|target| target as &'a mut dyn FieldTransfer)
        }
    }

    pub trait MissingMut<'a> {
        fn detect_transfer_mut(&mut self) -> Option<&'a mut dyn FieldTransfer>;
    }

    impl<'a, T> MissingMut<'a> for &mut DetectMut<'a, T> {
        fn detect_transfer_mut(&mut self) -> Option<&'a mut dyn FieldTransfer> {
            None
        }
    }
}
