//! Implementation of the `#[derive(Item)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, parse_macro_input};

use crate::attrs::TypeAttrs;

pub fn derive_item_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_item_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_item_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if let Data::Union(data) = &input.data {
        return Err(syn::Error::new(
            data.union_token.span,
            "#[derive(Item)] is not supported on unions",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Item)] does not support generic types",
        ));
    }

    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let local_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let namespace = match &attrs.namespace {
        Some(namespace) => quote! { #namespace },
        None => quote! { ::core::module_path!() },
    };

    let kind = if attrs.scalar {
        quote! { ::typereg_core::ItemKind::Scalar }
    } else {
        quote! { ::typereg_core::ItemKind::Record }
    };

    let transfer = if attrs.transfer {
        quote! {
            fn transfer(&self) -> ::core::option::Option<&dyn ::typereg_core::FieldTransfer> {
                ::core::option::Option::Some(self)
            }

            fn transfer_mut(&mut self) -> ::core::option::Option<&mut dyn ::typereg_core::FieldTransfer> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {
            fn transfer(&self) -> ::core::option::Option<&dyn ::typereg_core::FieldTransfer> {
                use ::typereg_core::transfer::detect::{Implemented as _, Missing as _};
                (&::typereg_core::transfer::detect::Detect(self)).detect_transfer()
            }

            fn transfer_mut(&mut self) -> ::core::option::Option<&mut dyn ::typereg_core::FieldTransfer> {
                use ::typereg_core::transfer::detect::{ImplementedMut as _, MissingMut as _};
                (&mut ::typereg_core::transfer::detect::DetectMut(::core::option::Option::Some(self)))
                    .detect_transfer_mut()
            }
        }
    };

    Ok(quote! {
        impl ::typereg_core::Item for #name {
            fn type_path(&self) -> ::core::option::Option<::typereg_core::TypePath> {
                ::core::option::Option::Some(::typereg_core::TypePath::new(#namespace, #local_name))
            }

            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn kind(&self) -> ::typereg_core::ItemKind {
                #kind
            }

            fn resolve(&self) -> ::core::option::Option<&dyn ::typereg_core::Item> {
                ::core::option::Option::Some(self)
            }

            fn factory(&self) -> ::core::option::Option<::typereg_core::Factory> {
                ::core::option::Option::Some(|| -> ::std::boxed::Box<dyn ::typereg_core::Item> {
                    ::std::boxed::Box::new(<#name as ::core::default::Default>::default())
                })
            }

            fn as_item(&self) -> &dyn ::typereg_core::Item {
                self
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }

            #transfer
        }
    })
}
