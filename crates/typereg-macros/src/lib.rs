//! typereg Proc Macros
//!
//! This crate provides derives for making types registrable with a typereg
//! `Registry`.
//!
//! # Macros
//!
//! - `#[derive(Item)]` - Implement the `Item` trait (identity, path, factory)
//! - `#[derive(FieldTransfer)]` - Implement push/pull of named fields
//!
//! Generated code refers to `::typereg_core`, so the deriving crate needs
//! `typereg-core` as a direct dependency.
//!
//! # Example
//!
//! ```ignore
//! use typereg_macros::{FieldTransfer, Item};
//!
//! #[derive(Default, Item, FieldTransfer)]
//! #[typereg(namespace = "films::cast", transfer)]
//! pub struct Alpha {
//!     #[typereg(rename = "Name")]
//!     pub name: String,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_item;
mod derive_transfer;

/// Derive the `Item` trait for a type.
///
/// The type must implement `Default`; its default value is what the registry
/// hands out from `make`. Generic types and unions are rejected.
///
/// # Attributes
///
/// - `#[typereg(namespace = "...")]` - Namespace path (default: the module path)
/// - `#[typereg(name = "...")]` - Local type name (default: Rust type name)
/// - `#[typereg(transfer)]` - Require a `FieldTransfer` impl (compile error
///   without one). Without the flag an impl is still found and used if present
/// - `#[typereg(scalar)]` - Report the type as a scalar, not a record
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Item)]
/// #[typereg(namespace = "music", name = "Track")]
/// pub struct Song;
/// ```
#[proc_macro_derive(Item, attributes(typereg))]
pub fn derive_item(input: TokenStream) -> TokenStream {
    derive_item::derive_item_impl(input)
}

/// Derive `FieldTransfer` for a struct with named fields.
///
/// # Attributes
///
/// - `#[typereg(rename_all = "...")]` - Key casing: `lowercase`, `UPPERCASE`,
///   `PascalCase`, `camelCase`, `snake_case`, `SCREAMING_SNAKE_CASE` or
///   `kebab-case`
///
/// # Field Attributes
///
/// - `#[typereg(rename = "...")]` - Map key for this field
/// - `#[typereg(skip)]` - Neither push nor pull this field
#[proc_macro_derive(FieldTransfer, attributes(typereg))]
pub fn derive_field_transfer(input: TokenStream) -> TokenStream {
    derive_transfer::derive_transfer_impl(input)
}
