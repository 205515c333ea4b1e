//! Item trait for registrable values.
//!
//! This module provides the [`Item`] trait which every value that can sit
//! behind an abstract field must implement. It supplies the type identity the
//! registry indexes on, the namespace path names are generated from, the
//! factory used to allocate zero values, and optional access to the value's
//! [`FieldTransfer`] implementation.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use typereg_core::{Factory, Item, ItemKind, TypePath};
//!
//! #[derive(Default)]
//! struct Probe {
//!     depth: u32,
//! }
//!
//! impl Item for Probe {
//!     fn type_path(&self) -> Option<TypePath> {
//!         Some(TypePath::new(module_path!(), "Probe"))
//!     }
//!     fn type_name(&self) -> &'static str {
//!         std::any::type_name::<Self>()
//!     }
//!     fn kind(&self) -> ItemKind {
//!         ItemKind::Record
//!     }
//!     fn resolve(&self) -> Option<&dyn Item> {
//!         Some(self)
//!     }
//!     fn factory(&self) -> Option<Factory> {
//!         Some(|| -> Box<dyn Item> { Box::new(Probe::default()) })
//!     }
//!     fn as_item(&self) -> &dyn Item {
//!         self
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//!     fn into_any(self: Box<Self>) -> Box<dyn Any> {
//!         self
//!     }
//! }
//!
//! let probe: Box<dyn Item> = Box::new(Probe { depth: 3 });
//! assert!(probe.is::<Probe>());
//! assert_eq!(probe.downcast_ref::<Probe>().map(|p| p.depth), Some(3));
//! ```
//!
//! With the `#[derive(Item)]` macro (from `typereg-macros`):
//!
//! ```ignore
//! #[derive(Default, Item)]
//! pub struct Probe {
//!     pub depth: u32,
//! }
//! ```

use std::any::{Any, TypeId};

use crate::{FieldTransfer, TypePath};

/// Allocates a fresh zero-valued instance of one concrete type.
pub type Factory = fn() -> Box<dyn Item>;

/// Structural category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A structured record with fields (the only kind convertible to a map).
    Record,
    /// A built-in scalar (`bool`, numbers, `char`, `String`).
    Scalar,
    /// A pointer-like wrapper around another item.
    Indirect,
}

/// Trait for values that can be registered with and produced by a registry.
///
/// The trait is object safe; registries only ever see `&dyn Item`. The
/// recommended way to implement it is `#[derive(Item)]`, which fills in every
/// method from the type's module path, identifier and `Default` impl.
pub trait Item: Any + Send + Sync {
    /// Namespace path and local name, or `None` for types without a namespace
    /// (built-in scalars, indirections).
    fn type_path(&self) -> Option<TypePath>;

    /// Rust type name, for diagnostics only.
    fn type_name(&self) -> &'static str;

    /// Structural category of this value.
    fn kind(&self) -> ItemKind;

    /// Resolve to the concrete value, dereferencing at most one level of
    /// indirection. `None` means an empty reference with no concrete type.
    fn resolve(&self) -> Option<&dyn Item>;

    /// Constructor for a zero value of this exact type.
    fn factory(&self) -> Option<Factory>;

    fn as_item(&self) -> &dyn Item;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Field-Transfer Capability, if this type implements it.
    fn transfer(&self) -> Option<&dyn FieldTransfer> {
        None
    }

    /// Mutable Field-Transfer Capability, if this type implements it.
    fn transfer_mut(&mut self) -> Option<&mut dyn FieldTransfer> {
        None
    }
}

impl dyn Item {
    /// Identity of the concrete type behind this trait object.
    pub fn item_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Check if the concrete type is `T`.
    pub fn is<T: Item>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Item>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Item>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Take ownership of the concrete value. Returns `None` (dropping the
    /// item) when the concrete type is not `T`.
    pub fn downcast<T: Item>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl std::fmt::Debug for dyn Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("type_name", &self.type_name())
            .field("kind", &self.kind())
            .finish()
    }
}

// === Built-in Scalars ===

macro_rules! scalar_item {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Item for $ty {
                fn type_path(&self) -> Option<TypePath> {
                    None
                }

                fn type_name(&self) -> &'static str {
                    std::any::type_name::<$ty>()
                }

                fn kind(&self) -> ItemKind {
                    ItemKind::Scalar
                }

                fn resolve(&self) -> Option<&dyn Item> {
                    Some(self)
                }

                fn factory(&self) -> Option<Factory> {
                    Some(|| -> Box<dyn Item> { Box::new(<$ty>::default()) })
                }

                fn as_item(&self) -> &dyn Item {
                    self
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }

                fn into_any(self: Box<Self>) -> Box<dyn Any> {
                    self
                }
            }
        )*
    };
}

scalar_item!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

// === Indirections ===

/// A box is one level of indirection: it resolves to its pointee.
///
/// `Box<Box<T>>` therefore resolves to `Box<T>`, which has no namespace path.
impl<T: Item + ?Sized> Item for Box<T> {
    fn type_path(&self) -> Option<TypePath> {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Indirect
    }

    fn resolve(&self) -> Option<&dyn Item> {
        Some((**self).as_item())
    }

    fn factory(&self) -> Option<Factory> {
        None
    }

    fn as_item(&self) -> &dyn Item {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn transfer(&self) -> Option<&dyn FieldTransfer> {
        (**self).transfer()
    }

    fn transfer_mut(&mut self) -> Option<&mut dyn FieldTransfer> {
        (**self).transfer_mut()
    }
}

/// An option is a nullable reference: `None` has no concrete type and `Some`
/// resolves exactly as its content does.
impl<T: Item> Item for Option<T> {
    fn type_path(&self) -> Option<TypePath> {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Indirect
    }

    fn resolve(&self) -> Option<&dyn Item> {
        self.as_ref().and_then(|inner| inner.resolve())
    }

    fn factory(&self) -> Option<Factory> {
        None
    }

    fn as_item(&self) -> &dyn Item {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn transfer(&self) -> Option<&dyn FieldTransfer> {
        self.as_ref().and_then(|inner| inner.transfer())
    }

    fn transfer_mut(&mut self) -> Option<&mut dyn FieldTransfer> {
        self.as_mut().and_then(|inner| inner.transfer_mut())
    }
}
