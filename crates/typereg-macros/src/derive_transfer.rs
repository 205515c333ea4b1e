//! Implementation of the `#[derive(FieldTransfer)]` macro.
//!
//! Each named, non-skipped field is pushed with `transfer::push_field` and
//! pulled with `transfer::pull_field`, so field types need `Serialize` and
//! `DeserializeOwned`. Fields that hold other registered items (boxed trait
//! objects) need a hand-written impl that goes through the registry.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, ext::IdentExt, parse_macro_input};

use crate::attrs::{FieldAttrs, TypeAttrs};

pub fn derive_transfer_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_transfer_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_transfer_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = TypeAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "#[derive(FieldTransfer)] needs named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(FieldTransfer)] is only supported on structs",
            ));
        }
    };

    let mut pushes = Vec::new();
    let mut pulls = Vec::new();

    for field in fields {
        let field_attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let raw = ident.unraw().to_string();
        let key = match (field_attrs.rename, attrs.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&raw),
            (None, None) => raw,
        };

        pushes.push(quote! {
            ::typereg_core::transfer::push_field(map, #key, &self.#ident)?;
        });
        pulls.push(quote! {
            ::typereg_core::transfer::pull_field(map, #key, &mut self.#ident)?;
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typereg_core::FieldTransfer for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn push_to_map(&self, map: &mut ::typereg_core::ItemMap) -> ::typereg_core::Result<()> {
                #(#pushes)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn pull_from_map(&mut self, map: &::typereg_core::ItemMap) -> ::typereg_core::Result<()> {
                #(#pulls)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn keys_follow_rename_rules() {
        let input: DeriveInput = parse_quote! {
            #[typereg(rename_all = "camelCase")]
            struct Film {
                lead_actor: String,
                #[typereg(rename = "Title")]
                title: String,
                #[typereg(skip)]
                cache: Vec<u8>,
                r#type: u8,
            }
        };

        let tokens = derive_transfer_inner(&input).unwrap().to_string();
        assert!(tokens.contains("\"leadActor\""));
        assert!(tokens.contains("\"Title\""));
        assert!(tokens.contains("\"type\""));
        assert!(!tokens.contains("cache"));
    }

    #[test]
    fn rejects_tuple_structs_and_enums() {
        let input: DeriveInput = parse_quote! {
            struct Pair(u8, u8);
        };
        assert!(derive_transfer_inner(&input).is_err());

        let input: DeriveInput = parse_quote! {
            enum Mode { On, Off }
        };
        assert!(derive_transfer_inner(&input).is_err());
    }
}
