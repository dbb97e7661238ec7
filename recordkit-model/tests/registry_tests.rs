use recordkit_model::{FieldDef, FieldRegistry, Record};
use serde_json::{Value, json};

// A hand-written registry, accessor pair by accessor pair. The `record!`
// macro generates exactly this shape; the trait only asks for the registry.
#[derive(Debug, Clone, Default, PartialEq)]
struct Bookmark {
    url: Option<String>,
    visits: Option<i64>,
}

static BOOKMARK_REGISTRY: FieldRegistry<Bookmark> = FieldRegistry {
    record_type: "bookmark",
    fields: &[
        FieldDef {
            name: "url",
            get: |r| r.url.clone().map(Value::String),
            set: |r, v| r.url = v.as_str().map(str::to_string),
        },
        FieldDef {
            name: "visits",
            get: |r| r.visits.map(Value::from),
            set: |r, v| r.visits = v.as_i64(),
        },
    ],
};

impl Record for Bookmark {
    fn registry() -> &'static FieldRegistry<Self> {
        &BOOKMARK_REGISTRY
    }
}

// ── Registry introspection ───────────────────────────────────────

#[test]
fn registry_names_in_declaration_order() {
    let names: Vec<&str> = Bookmark::registry().names().collect();
    assert_eq!(names, vec!["url", "visits"]);
}

#[test]
fn registry_record_type() {
    assert_eq!(Bookmark::registry().record_type, "bookmark");
}

#[test]
fn registry_contains_registered_fields_only() {
    let reg = Bookmark::registry();
    assert!(reg.contains("url"));
    assert!(reg.contains("visits"));
    assert!(!reg.contains("title"));
}

#[test]
fn registry_field_lookup() {
    let reg = Bookmark::registry();
    assert_eq!(reg.field("url").map(|f| f.name), Some("url"));
    assert!(reg.field("nope").is_none());
}

#[test]
fn registry_len() {
    assert_eq!(Bookmark::registry().len(), 2);
    assert!(!Bookmark::registry().is_empty());
}

// ── Name-dispatched access ───────────────────────────────────────

#[test]
fn get_reads_through_registered_accessor() {
    let mut b = Bookmark::default();
    b.url = Some("https://example.com".into());
    assert_eq!(b.get("url"), Some(json!("https://example.com")));
}

#[test]
fn get_absent_field_is_none() {
    let b = Bookmark::default();
    assert_eq!(b.get("url"), None);
}

#[test]
fn get_unregistered_name_is_none() {
    let mut b = Bookmark::default();
    b.url = Some("x".into());
    assert_eq!(b.get("title"), None);
}

#[test]
fn set_writes_through_registered_accessor() {
    let mut b = Bookmark::default();
    assert!(b.set("visits", json!(7)));
    assert_eq!(b.visits, Some(7));
}

#[test]
fn set_unregistered_name_is_rejected() {
    let mut b = Bookmark::default();
    assert!(!b.set("title", json!("x")));
    assert_eq!(b, Bookmark::default());
}

#[test]
fn accessor_decides_type_handling() {
    // The registry does no type checking; this setter parses an i64 and
    // leaves the field absent for anything else.
    let mut b = Bookmark::default();
    b.set("visits", json!("not a number"));
    assert_eq!(b.visits, None);
}

#[test]
fn set_null_clears_field() {
    let mut b = Bookmark::default();
    b.visits = Some(3);
    b.set("visits", Value::Null);
    assert_eq!(b.visits, None);
}
