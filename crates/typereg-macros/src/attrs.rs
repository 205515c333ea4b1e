//! Attribute parsing shared by the typereg derives.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{Attribute, LitStr, meta::ParseNestedMeta};

/// Parsed `#[typereg(...)]` attributes on a type.
///
/// Both derives read the same attribute, so every container key is accepted
/// by each of them even when only one acts on it.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Namespace path override (default: `module_path!()` at the derive site)
    pub namespace: Option<String>,
    /// Local name override (default: Rust type name)
    pub name: Option<String>,
    /// Require a `FieldTransfer` impl instead of detecting one
    pub transfer: bool,
    /// Report the type as a scalar rather than a record
    pub scalar: bool,
    /// Key casing for fields without an explicit rename
    pub rename_all: Option<RenameRule>,
}

/// Parsed `#[typereg(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Map key override
    pub rename: Option<String>,
    /// Leave the field out of transfer entirely
    pub skip: bool,
}

/// Casing rules accepted by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            other => Err(syn::Error::new(
                value.span(),
                format!("unknown rename_all rule: {other}"),
            )),
        }
    }

    /// Apply the rule to a snake_case field name.
    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Lower => field.to_lowercase(),
            Self::Upper => field.to_uppercase(),
            Self::Pascal => field.to_upper_camel_case(),
            Self::Camel => field.to_lower_camel_case(),
            Self::Snake => field.to_snake_case(),
            Self::ScreamingSnake => field.to_shouty_snake_case(),
            Self::Kebab => field.to_kebab_case(),
        }
    }
}

fn unknown(meta: &ParseNestedMeta, what: &str) -> syn::Error {
    meta.error(format!(
        "unknown typereg {what} attribute: {}",
        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
    ))
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[typereg(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("typereg") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("namespace") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new(value.span(), "namespace must not be empty"));
                    }
                    result.namespace = Some(value.value());
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() || value.value().contains('/') {
                        return Err(syn::Error::new(
                            value.span(),
                            "name must be non-empty and must not contain '/'",
                        ));
                    }
                    result.name = Some(value.value());
                } else if meta.path.is_ident("transfer") {
                    result.transfer = true;
                } else if meta.path.is_ident("scalar") {
                    result.scalar = true;
                } else if meta.path.is_ident("rename_all") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.rename_all = Some(RenameRule::parse(&value)?);
                } else {
                    return Err(unknown(&meta, "type"));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[typereg(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("typereg") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.rename = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    return Err(unknown(&meta, "field"));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn type_attrs_merge_across_attributes() {
        let input: syn::DeriveInput = parse_quote! {
            #[derive(Item)]
            #[typereg(namespace = "films::cast", transfer)]
            #[typereg(rename_all = "PascalCase")]
            struct Alpha;
        };

        let attrs = TypeAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.namespace.as_deref(), Some("films::cast"));
        assert!(attrs.transfer);
        assert!(!attrs.scalar);
        assert_eq!(attrs.rename_all, Some(RenameRule::Pascal));
    }

    #[test]
    fn unknown_keys_are_errors() {
        let input: syn::DeriveInput = parse_quote! {
            #[typereg(nonsense)]
            struct Alpha;
        };
        assert!(TypeAttrs::from_attrs(&input.attrs).is_err());

        let input: syn::DeriveInput = parse_quote! {
            #[typereg(rename_all = "Title Case")]
            struct Alpha;
        };
        assert!(TypeAttrs::from_attrs(&input.attrs).is_err());
    }

    #[test]
    fn field_attrs() {
        let input: syn::DeriveInput = parse_quote! {
            struct Alpha {
                #[typereg(rename = "Percent")]
                percent: f64,
            }
        };
        let syn::Data::Struct(data) = &input.data else {
            panic!("expected a struct");
        };
        let field = data.fields.iter().next().unwrap();
        let attrs = FieldAttrs::from_attrs(&field.attrs).unwrap();
        assert_eq!(attrs.rename.as_deref(), Some("Percent"));
        assert!(!attrs.skip);
    }

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::Pascal.apply("lead_actor"), "LeadActor");
        assert_eq!(RenameRule::Camel.apply("lead_actor"), "leadActor");
        assert_eq!(RenameRule::Kebab.apply("lead_actor"), "lead-actor");
        assert_eq!(RenameRule::ScreamingSnake.apply("lead_actor"), "LEAD_ACTOR");
        assert_eq!(RenameRule::Upper.apply("lead_actor"), "LEAD_ACTOR");
        assert_eq!(RenameRule::Lower.apply("lead_actor"), "lead_actor");
    }
}
