//! Schema resolution and payload inclusion properties.
//!
//! Each `#[case]` is isolated; no shared state.

use flyer_core::{
    payload, FieldState, FieldStore, ResolvedSchema, SchemaError, SchemaResolver, SchemaSource,
    Template, DEFAULT_FIELD_SCHEMA, IMAGE_PREFIX,
};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolver() -> SchemaResolver {
    SchemaResolver::default()
}

fn default_names() -> Vec<&'static str> {
    DEFAULT_FIELD_SCHEMA.to_vec()
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[rstest]
#[case::single(vec!["CTA"])]
#[case::mixed(vec!["Property_Description", "Image_1"])]
#[case::unsorted(vec!["b", "a", "Image_2", "Image_1"])]
#[case::unicode(vec!["Beschreibung", "説明", "Image_ヒーロー"])]
fn declared_list_resolves_verbatim(#[case] names: Vec<&str>) {
    let tpl = Template::new("t", "T").with_placeholders(names.clone());
    let schema = resolver().resolve(&tpl);
    assert_eq!(schema.names().collect::<Vec<_>>(), names);
}

#[rstest]
#[case::absent(None)]
#[case::empty(Some(vec![]))]
#[case::duplicate(Some(vec!["CTA", "CTA"]))]
fn silent_or_malformed_lists_resolve_to_default(#[case] names: Option<Vec<&str>>) {
    let mut tpl = Template::new("t", "T");
    if let Some(names) = names {
        tpl = tpl.with_placeholders(names);
    }
    let schema = resolver().resolve(&tpl);
    assert_eq!(schema.names().collect::<Vec<_>>(), default_names());
}

#[rstest]
#[case::string(r#""CTA""#)]
#[case::object(r#"{"CTA": true}"#)]
#[case::number("7")]
fn non_list_placeholders_fall_back_without_losing_neighbours(#[case] raw: &str) {
    let json = format!(
        r#"[{{"id":"a","name":"A","placeholders":{raw}}},{{"id":"b","name":"B","placeholders":["CTA"]}}]"#
    );
    let templates: Vec<Template> = serde_json::from_str(&json).expect("catalog parses");
    assert_eq!(templates.len(), 2);

    let (schema, source) = resolver().resolve_with_source(&templates[0]);
    assert_eq!(source, SchemaSource::Rejected(SchemaError::NotAList));
    assert_eq!(schema.names().collect::<Vec<_>>(), default_names());
    assert_eq!(resolver().resolve(&templates[1]).names().collect::<Vec<_>>(), ["CTA"]);
}

// ---------------------------------------------------------------------------
// Payload inclusion
// ---------------------------------------------------------------------------

#[rstest]
#[case::nothing_set(vec![])]
#[case::some_text(vec![("CTA", "Call"), ("Property_Location", "Oslo")])]
#[case::image_set(vec![("Image_2", "https://img/2.png")])]
#[case::cleared(vec![("CTA", "")])]
#[case::stray(vec![("Unknown", "x")])]
fn inclusion_rule_holds(#[case] entries: Vec<(&str, &str)>) {
    let schema = resolver().resolve(&Template::new("t", "T"));
    let state: FieldState = entries.iter().copied().collect();
    let built = payload::build(&schema, &state);

    for name in schema.names() {
        let expected = name.starts_with(IMAGE_PREFIX) || state.is_touched(name);
        assert_eq!(built.contains(name), expected, "field {name}");
        if expected {
            assert_eq!(built.get(name), Some(state.get(name)));
        }
    }
    assert!(built.keys().all(|k| schema.contains(k)));
}

#[test]
fn build_is_idempotent() {
    let schema = ResolvedSchema::from_names(["CTA", "Image_1", "Property_Location"]);
    let state: FieldState = [("CTA", "Call")].into_iter().collect();
    assert_eq!(payload::build(&schema, &state), payload::build(&schema, &state));
}

#[test]
fn default_schema_payload_is_only_image_slots() {
    let schema = resolver().resolve(&Template::new("T2", "T2"));
    assert_eq!(schema.len(), 13);
    let built = payload::build(&schema, &FieldState::new());
    assert_eq!(
        built.iter().collect::<Vec<_>>(),
        [("Image_1", ""), ("Image_2", ""), ("Image_3", "")]
    );
}

#[test]
fn switching_templates_does_not_leak_shared_fields() {
    let t1 = Template::new("T1", "T1").with_placeholders(["Property_Description", "Image_1"]);
    let t2 = Template::new("T2", "T2");
    let mut store = FieldStore::new();

    store.on_select(t1);
    store.set_field("Property_Description", "Lake house");
    store.on_select(t2.clone());

    assert_eq!(store.get_field("Property_Description"), "");
    let built = payload::build(&resolver().resolve(&t2), store.state());
    assert!(!built.contains("Property_Description"));
}
