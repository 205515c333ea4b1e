//! Type-tag protocol helpers for JSON and YAML documents.
//!
//! Encoding goes through [`Registry::convert_item_to_map`]; the resulting map
//! carries the type tag under [`TYPE_FIELD`] and is written in the target
//! format as-is.
//!
//! Decoding is two-phase: find the top-level type tag,
//! [`make`](Registry::make) a blank instance of that type, then pull the
//! document's fields into the instance. YAML streams are peeked line by line
//! and rewound before the full parse. JSON input is already in memory, so it
//! is parsed once and the tag is read from the parsed map.
//! These helpers cover a single top-level item. Nested abstract fields are
//! handled by the owning type calling back into the registry.

use serde::Deserialize;
use serde_json::Value;
use typereg_core::{Item, ItemMap, RegistryError, Result, ResultExt, TYPE_FIELD, transfer};

use crate::Registry;

fn document_error(err: impl std::fmt::Display) -> RegistryError {
    RegistryError::Document(err.to_string())
}

fn missing_tag() -> RegistryError {
    RegistryError::MissingTypeTag {
        field: TYPE_FIELD.to_string(),
    }
}

/// Pull `map` into a freshly made `item` through its transfer capability.
fn pull_into(item: &mut dyn Item, map: &ItemMap, name: &str) -> Result<()> {
    if let Some(fields) = item.transfer_mut() {
        fields
            .pull_from_map(map)
            .with_context(|| format!("pull fields of {name}"))?;
    }
    Ok(())
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Deserialize)]
struct TagPeek {
    #[serde(rename = "$type$")]
    tag: Option<Value>,
}

/// Read the top-level type tag from a JSON object.
///
/// Values other than the tag are skipped without being built, but the whole
/// input is still scanned: the JSON deserializer only accepts an object once
/// it has reached the closing brace, so malformed input after the tag is a
/// `Document` error rather than being silently ignored.
pub fn peek_json_type_tag(input: &str) -> Result<String> {
    let peek: TagPeek = serde_json::from_str(input).map_err(document_error)?;
    match peek.tag {
        Some(Value::String(tag)) => Ok(tag),
        _ => Err(missing_tag()),
    }
}

/// Encode a registered item as a tagged JSON object.
pub fn encode_json(registry: &Registry, item: &dyn Item) -> Result<String> {
    let map = registry.convert_item_to_map(item)?;
    serde_json::to_string(&map).map_err(document_error)
}

/// Decode a tagged JSON object into a new instance of the tagged type.
pub fn decode_json(registry: &Registry, input: &str) -> Result<Box<dyn Item>> {
    let map: ItemMap = serde_json::from_str(input).map_err(document_error)?;
    let name = transfer::type_tag(&map).ok_or_else(missing_tag)?;
    let mut item = registry
        .make(name)
        .with_context(|| format!("make item of type {name}"))?;

    pull_into(&mut *item, &map, name)?;
    Ok(item)
}

// =============================================================================
// YAML
// =============================================================================

#[cfg(feature = "yaml")]
mod yaml {
    use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
    use std::sync::LazyLock;

    use regex::Regex;

    use super::*;

    static TYPE_LINE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"^['"]?\$type\$['"]?:\s+(.+)$"#).expect("type tag pattern is valid")
    });

    /// Scan a YAML stream line by line for the top-level type tag, then rewind
    /// the reader to its start.
    ///
    /// Only unindented `$type$: value` lines count; surrounding quotes and
    /// whitespace are trimmed from the value.
    pub fn peek_yaml_type_tag<R: BufRead + Seek>(reader: &mut R) -> Result<String> {
        let mut found = None;
        for line in reader.by_ref().lines() {
            let line = line.map_err(document_error)?;
            if let Some(captures) = TYPE_LINE.captures(&line) {
                found = Some(captures[1].trim_matches(|c| matches!(c, '\'' | '"' | ' ')).to_string());
                break;
            }
        }

        reader.seek(SeekFrom::Start(0)).map_err(document_error)?;
        found.ok_or_else(missing_tag)
    }

    /// Encode a registered item as a tagged YAML mapping.
    pub fn encode_yaml(registry: &Registry, item: &dyn Item) -> Result<String> {
        let map = registry.convert_item_to_map(item)?;
        serde_yaml::to_string(&map).map_err(document_error)
    }

    /// Decode a tagged YAML document read from a seekable stream.
    pub fn decode_yaml_reader<R: Read + Seek>(registry: &Registry, reader: R) -> Result<Box<dyn Item>> {
        let mut reader = BufReader::new(reader);
        let name = peek_yaml_type_tag(&mut reader).context("get YAML type name")?;
        let mut item = registry
            .make(&name)
            .with_context(|| format!("make item of type {name}"))?;

        let map: ItemMap = serde_yaml::from_reader(reader).map_err(document_error)?;
        pull_into(&mut *item, &map, &name)?;
        Ok(item)
    }

    /// Decode a tagged YAML document held in a string.
    pub fn decode_yaml(registry: &Registry, source: &str) -> Result<Box<dyn Item>> {
        decode_yaml_reader(registry, std::io::Cursor::new(source.as_bytes()))
    }
}

#[cfg(feature = "yaml")]
pub use yaml::{decode_yaml, decode_yaml_reader, encode_yaml, peek_yaml_type_tag};
