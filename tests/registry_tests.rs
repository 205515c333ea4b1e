//! Integration tests for the registry through the `typereg` facade.
//!
//! These cover naming, aliasing, construction by name, and map conversion of
//! values held behind trait objects inside an owning container.

use serde_json::{Value, json};
use typereg::{ErrorKind, FieldTransfer, Item, ItemMap, Registry, ResultExt};

// =============================================================================
// Fixtures
// =============================================================================

/// Something that can appear in a film's cast.
trait Actor: Item {
    fn billing(&self) -> String;
}

#[derive(Debug, Default, PartialEq, Item, FieldTransfer)]
#[typereg(namespace = "films::cast", transfer)]
struct Alpha {
    #[typereg(rename = "Name")]
    name: String,
    #[typereg(rename = "Percent")]
    percent: f64,
}

impl Actor for Alpha {
    fn billing(&self) -> String {
        format!("{} ({}%)", self.name, self.percent)
    }
}

#[derive(Debug, Default, PartialEq, Item, FieldTransfer)]
#[typereg(namespace = "films::cast", transfer, rename_all = "PascalCase")]
struct Bravo {
    finished: bool,
    iterations: i32,
    #[typereg(skip)]
    scratch: Vec<u8>,
}

impl Actor for Bravo {
    fn billing(&self) -> String {
        format!("bravo x{}", self.iterations)
    }
}

/// Derives both traits without the `transfer` flag.
#[derive(Debug, Default, PartialEq, Item, FieldTransfer)]
#[typereg(namespace = "films::cast")]
struct Delta {
    name: String,
    takes: u8,
}

/// Registered but carries no transferable state.
#[derive(Debug, Default, Item)]
#[typereg(namespace = "films::crew::sound")]
struct Boom;

#[derive(Debug, Default, PartialEq, FieldTransfer)]
#[typereg(rename_all = "camelCase")]
struct Credits {
    director: String,
    release_year: u16,
}

/// Exposes its embedded credits by forwarding to them.
#[derive(Debug, Default, PartialEq, Item)]
#[typereg(namespace = "films", transfer)]
struct Documentary {
    credits: Credits,
    runtime: u32,
}

impl FieldTransfer for Documentary {
    fn push_to_map(&self, map: &mut ItemMap) -> typereg::Result<()> {
        self.credits.push_to_map(map)?;
        typereg::transfer::push_field(map, "runtime", &self.runtime)
    }

    fn pull_from_map(&mut self, map: &ItemMap) -> typereg::Result<()> {
        self.credits.pull_from_map(map)?;
        typereg::transfer::pull_field(map, "runtime", &mut self.runtime)
    }
}

/// Owning container with abstract fields. Not itself registered.
#[derive(Default)]
struct Film {
    title: String,
    lead: Option<Box<dyn Actor>>,
    cast: Vec<Box<dyn Actor>>,
}

fn film_to_value(registry: &Registry, film: &Film) -> typereg::Result<Value> {
    let lead = match &film.lead {
        Some(lead) => Value::Object(registry.convert_item_to_map(lead).context("lead")?),
        None => Value::Null,
    };
    let cast = film
        .cast
        .iter()
        .map(|actor| registry.convert_item_to_map(actor).map(Value::Object))
        .collect::<typereg::Result<Vec<_>>>()
        .context("cast")?;

    Ok(json!({ "title": film.title, "lead": lead, "cast": cast }))
}

fn actor_from_value(registry: &Registry, value: &Value) -> typereg::Result<Box<dyn Actor>> {
    let Value::Object(map) = value else {
        return Err(typereg::RegistryError::Document(format!("expected object, got {value}")));
    };

    let item = registry.create_item_from_map(map)?;
    if let Some(alpha) = item.downcast_ref::<Alpha>() {
        return Ok(Box::new(Alpha {
            name: alpha.name.clone(),
            percent: alpha.percent,
        }));
    }
    item.downcast::<Bravo>()
        .map(|bravo| bravo as Box<dyn Actor>)
        .ok_or_else(|| typereg::RegistryError::Document("not an actor".into()))
}

fn film_from_value(registry: &Registry, value: &Value) -> typereg::Result<Film> {
    let lead = match &value["lead"] {
        Value::Null => None,
        lead => Some(actor_from_value(registry, lead).context("lead")?),
    };
    let cast = value["cast"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|actor| actor_from_value(registry, actor))
        .collect::<typereg::Result<Vec<_>>>()
        .context("cast")?;

    Ok(Film {
        title: value["title"].as_str().unwrap_or_default().to_string(),
        lead,
        cast,
    })
}

/// Registry with `t` bound to the cast namespace before registration.
fn film_registry() -> Registry {
    let mut registry = Registry::new();
    registry.alias("t", &Alpha::default()).unwrap();
    registry.register_type::<Alpha>().unwrap();
    registry.register_type::<Bravo>().unwrap();
    registry.register_type::<Boom>().unwrap();
    registry.register_type::<Documentary>().unwrap();
    registry
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn test_canonical_name_without_aliases() {
    let mut registry = Registry::new();
    registry.register(&Boom).unwrap();

    assert_eq!(registry.name_for(&Boom).unwrap(), "films::crew::sound/Boom");
    let made = registry.make("films::crew::sound/Boom").unwrap();
    assert!(made.is::<Boom>());
}

#[test]
fn test_alias_shortens_default_name() {
    let registry = film_registry();

    assert_eq!(registry.name_for(&Alpha::default()).unwrap(), "[t]Alpha");
    assert_eq!(registry.name_for(&Bravo::default()).unwrap(), "[t]Bravo");

    let by_alias = registry.make("[t]Alpha").unwrap();
    let by_canonical = registry.make("films::cast/Alpha").unwrap();
    assert_eq!(by_alias.item_type_id(), by_canonical.item_type_id());
    assert!(by_alias.is::<Alpha>());
}

#[test]
fn test_alias_only_covers_its_namespace() {
    let registry = film_registry();

    // films::cast does not cover films or films::crew::sound
    assert_eq!(registry.name_for(&Boom).unwrap(), "films::crew::sound/Boom");
    assert_eq!(registry.name_for(&Documentary::default()).unwrap(), "films/Documentary");
}

#[test]
fn test_parent_alias_covers_nested_namespaces() {
    let mut registry = Registry::new();
    registry.alias("f", &Documentary::default()).unwrap();
    registry.register(&Boom).unwrap();
    registry.register(&Documentary::default()).unwrap();

    assert_eq!(registry.name_for(&Boom).unwrap(), "[f]crew::sound/Boom");
    assert_eq!(registry.name_for(&Documentary::default()).unwrap(), "[f]Documentary");
    assert!(registry.make("films::crew::sound/Boom").unwrap().is::<Boom>());
}

#[test]
fn test_indirection_is_resolved() {
    let registry = film_registry();
    let boxed: Box<dyn Actor> = Box::new(Alpha::default());

    assert_eq!(registry.name_for(&boxed).unwrap(), "[t]Alpha");
    assert_eq!(registry.name_for(&Some(Bravo::default())).unwrap(), "[t]Bravo");

    let err = registry.name_for(&None::<Alpha>).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoConcreteType);
}

// =============================================================================
// Registration Errors
// =============================================================================

#[test]
fn test_duplicate_registration_keeps_first() {
    let mut registry = film_registry();

    let err = registry.register(&Alpha::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);

    assert_eq!(registry.name_for(&Alpha::default()).unwrap(), "[t]Alpha");
    assert!(registry.make("[t]Alpha").unwrap().is::<Alpha>());
}

#[test]
fn test_alias_redefinition_is_rejected() {
    let mut registry = film_registry();

    let err = registry.alias("t", &Boom).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AliasRedefined);
    assert_eq!(registry.aliases().prefix_of("t"), Some("films::cast"));
}

#[test]
fn test_unknown_name() {
    let registry = film_registry();

    let err = registry.make("[t]Charlie").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownName);
    assert_eq!(err.to_string(), "no registration for name '[t]Charlie'");
}

#[test]
fn test_scalars_have_no_namespace() {
    let mut registry = Registry::new();

    let err = registry.register(&17_i64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoNamespacePath);
    assert!(registry.is_empty());

    let err = registry.convert_item_to_map(&String::from("loose")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAStructuredValue);
}

#[test]
fn test_unregistered_item_cannot_be_named() {
    let registry = Registry::new();

    let err = registry.name_for(&Alpha::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotRegistered);
    let err = registry.convert_item_to_map(&Alpha::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotRegistered);
}

// =============================================================================
// Map Conversion
// =============================================================================

#[test]
fn test_alpha_scenario() {
    let registry = film_registry();
    let alpha = Alpha {
        name: "Goober Snoofus".into(),
        percent: 17.23,
    };

    let map = registry.convert_item_to_map(&alpha).unwrap();
    assert_eq!(
        Value::Object(map.clone()),
        json!({ "$type$": "[t]Alpha", "Name": "Goober Snoofus", "Percent": 17.23 })
    );

    let back = registry.create_item_from_map(&map).unwrap();
    assert_eq!(back.downcast_ref::<Alpha>(), Some(&alpha));
}

#[test]
fn test_round_trip_omits_skipped_fields() {
    let registry = film_registry();
    let bravo = Bravo {
        finished: true,
        iterations: 79,
        scratch: vec![1, 2, 3],
    };

    let map = registry.convert_item_to_map(&bravo).unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), ["$type$", "Finished", "Iterations"]);

    let back = registry.create_item_from_map(&map).unwrap().downcast::<Bravo>().unwrap();
    assert!(back.finished);
    assert_eq!(back.iterations, 79);
    assert!(back.scratch.is_empty());
}

#[test]
fn test_tag_only_map_for_types_without_transfer() {
    let registry = film_registry();

    let map = registry.convert_item_to_map(&Boom).unwrap();
    assert_eq!(Value::Object(map.clone()), json!({ "$type$": "films::crew::sound/Boom" }));
    assert!(registry.create_item_from_map(&map).unwrap().is::<Boom>());
}

#[test]
fn test_transfer_is_found_without_flag() {
    let mut registry = Registry::new();
    registry.register_type::<Delta>().unwrap();
    let delta = Delta {
        name: "x".into(),
        takes: 4,
    };

    let map = registry.convert_item_to_map(&delta).unwrap();
    assert_eq!(
        Value::Object(map.clone()),
        json!({ "$type$": "films::cast/Delta", "name": "x", "takes": 4 })
    );

    let back = registry.create_item_from_map(&map).unwrap();
    assert_eq!(back.downcast_ref::<Delta>(), Some(&delta));

    let boxed: Box<dyn Item> = Box::new(Delta::default());
    assert!(boxed.transfer().is_some());
    assert!(Boom.transfer().is_none());
}

#[test]
fn test_embedded_fields_are_forwarded() {
    let registry = film_registry();
    let doc = Documentary {
        credits: Credits {
            director: "Werner".into(),
            release_year: 2005,
        },
        runtime: 104,
    };

    let map = registry.convert_item_to_map(&doc).unwrap();
    assert_eq!(
        Value::Object(map.clone()),
        json!({
            "$type$": "films/Documentary",
            "director": "Werner",
            "releaseYear": 2005,
            "runtime": 104,
        })
    );

    let back = registry.create_item_from_map(&map).unwrap();
    assert_eq!(back.downcast_ref::<Documentary>(), Some(&doc));
}

#[test]
fn test_missing_and_malformed_fields() {
    let registry = film_registry();

    let mut map = ItemMap::new();
    map.insert("Name".into(), json!("nobody"));
    let err = registry.create_item_from_map(&map).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTypeTag);

    map.insert("$type$".into(), json!("[t]Alpha"));
    map.insert("Percent".into(), json!("lots"));
    let err = registry.create_item_from_map(&map).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transfer);
    assert!(err.to_string().starts_with("pull fields of [t]Alpha: "));
}

#[test]
fn test_absent_fields_keep_zero_values() {
    let registry = film_registry();
    let map = json!({ "$type$": "films::cast/Alpha", "Name": "Partial" });
    let Value::Object(map) = map else { unreachable!() };

    let back = registry.create_item_from_map(&map).unwrap();
    let alpha = back.downcast_ref::<Alpha>().unwrap();
    assert_eq!(alpha.name, "Partial");
    assert_eq!(alpha.percent, 0.0);
}

// =============================================================================
// Polymorphic Containers
// =============================================================================

#[test]
fn test_film_round_trip() {
    let registry = film_registry();
    let film = Film {
        title: "Snoofus Returns".into(),
        lead: Some(Box::new(Alpha {
            name: "Goober Snoofus".into(),
            percent: 17.23,
        })),
        cast: vec![
            Box::new(Bravo {
                finished: false,
                iterations: 3,
                scratch: Vec::new(),
            }),
            Box::new(Alpha {
                name: "Extra".into(),
                percent: 0.5,
            }),
        ],
    };

    let value = film_to_value(&registry, &film).unwrap();
    assert_eq!(value["lead"]["$type$"], "[t]Alpha");
    assert_eq!(value["cast"][0]["$type$"], "[t]Bravo");
    assert_eq!(value["cast"][1]["$type$"], "[t]Alpha");

    let text = serde_json::to_string(&value).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    let back = film_from_value(&registry, &parsed).unwrap();

    assert_eq!(back.title, "Snoofus Returns");
    let lead = back.lead.as_ref().unwrap();
    assert_eq!(lead.billing(), "Goober Snoofus (17.23%)");
    let billings: Vec<_> = back.cast.iter().map(|actor| actor.billing()).collect();
    assert_eq!(billings, ["bravo x3", "Extra (0.5%)"]);
}

#[test]
fn test_film_without_lead() {
    let registry = film_registry();
    let film = Film {
        title: "Empty Stage".into(),
        ..Film::default()
    };

    let value = film_to_value(&registry, &film).unwrap();
    assert_eq!(value["lead"], Value::Null);

    let back = film_from_value(&registry, &value).unwrap();
    assert!(back.lead.is_none());
    assert!(back.cast.is_empty());
}

#[test]
fn test_film_with_unregistered_actor() {
    let mut registry = Registry::new();
    registry.register_type::<Alpha>().unwrap();

    let film = Film {
        title: "Uncredited".into(),
        lead: None,
        cast: vec![Box::new(Bravo::default())],
    };

    let err = film_to_value(&registry, &film).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotRegistered);
    assert!(err.to_string().starts_with("cast: "));
}
