//! Domain types for flyer templates and their placeholder fields.
//!
//! Templates are read-only input owned by whichever catalog produced them.
//! All types are serializable/deserializable via serde (JSON on the wire,
//! YAML for local catalog files).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved prefix marking a placeholder as an image slot.
///
/// This prefix is the only naming contract imposed on template schemas.
pub const IMAGE_PREFIX: &str = "Image_";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque identifier of a template within a catalog snapshot.
///
/// Catalogs may use string or integer ids; the wire type is kept so the id
/// goes back to the renderer exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    Number(i64),
    Text(String),
}

impl TemplateId {
    /// The id as text, for string ids only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TemplateId::Text(s) => Some(s),
            TemplateId::Number(_) => None,
        }
    }

    /// Whether `raw` (e.g. typed on a command line) names this id.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            TemplateId::Text(s) => s == raw,
            TemplateId::Number(n) => raw.trim().parse::<i64>().is_ok_and(|r| r == *n),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateId::Number(n) => n.fmt(f),
            TemplateId::Text(s) => s.fmt(f),
        }
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for TemplateId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// One entry of a template's declared placeholder list.
///
/// Catalogs are not trusted to send well-formed schemas, so anything that is
/// not a string is kept as [`Placeholder::Invalid`] instead of failing the
/// whole catalog parse. A `placeholders` value that is not a list at all
/// becomes a lone [`Placeholder::NotAList`]. The schema resolver rejects
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placeholder {
    Name(String),
    Invalid(serde_json::Value),
    #[serde(skip_deserializing)]
    NotAList(serde_json::Value),
}

impl Placeholder {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Placeholder::Name(name) => Some(name),
            Placeholder::Invalid(_) | Placeholder::NotAList(_) => None,
        }
    }

    fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(name) => Placeholder::Name(name),
            other => Placeholder::Invalid(other),
        }
    }
}

impl From<&str> for Placeholder {
    fn from(s: &str) -> Self {
        Placeholder::Name(s.to_owned())
    }
}

impl From<String> for Placeholder {
    fn from(s: String) -> Self {
        Placeholder::Name(s)
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A named document blueprint with an optional declared placeholder list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        rename = "preview",
        alias = "previewUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "placeholders_serde::deserialize",
        serialize_with = "placeholders_serde::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholders: Option<Vec<Placeholder>>,
}

/// Lenient `placeholders` codec: a malformed value never fails the template.
mod placeholders_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::Placeholder;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Placeholder>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                Some(items.into_iter().map(Placeholder::from_value).collect())
            }
            Some(other) => Some(vec![Placeholder::NotAList(other)]),
        })
    }

    pub fn serialize<S>(value: &Option<Vec<Placeholder>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.as_deref() {
            Some([Placeholder::NotAList(raw)]) => raw.serialize(serializer),
            _ => value.serialize(serializer),
        }
    }
}

impl Template {
    /// A template with no description, preview, or declared placeholders.
    pub fn new(id: impl Into<TemplateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            preview_url: None,
            placeholders: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_placeholders<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Placeholder>,
    {
        self.placeholders = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// Input kind of a placeholder field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-text content, forwarded only once the user has touched it.
    Text,
    /// Image URL slot, always forwarded (empty when unset).
    ImageUrl,
}

impl FieldKind {
    /// Classify a placeholder name by the reserved [`IMAGE_PREFIX`].
    pub fn classify(name: &str) -> Self {
        if name.starts_with(IMAGE_PREFIX) {
            FieldKind::ImageUrl
        } else {
            FieldKind::Text
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::ImageUrl => write!(f, "image"),
        }
    }
}

/// A placeholder field in display/input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FieldKind::classify(&name);
        Self { name, kind }
    }

    /// Human label: image slots swap only the first `_` for a space, text
    /// fields swap every `_`.
    pub fn label(&self) -> String {
        match self.kind {
            FieldKind::ImageUrl => self.name.replacen('_', " ", 1),
            FieldKind::Text => self.name.replace('_', " "),
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == FieldKind::ImageUrl
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_display() {
        assert_eq!(TemplateId::from("t-01").to_string(), "t-01");
    }

    #[test]
    fn classify_by_prefix() {
        assert_eq!(FieldKind::classify("Image_1"), FieldKind::ImageUrl);
        assert_eq!(FieldKind::classify("Image_hero"), FieldKind::ImageUrl);
        assert_eq!(FieldKind::classify("image_1"), FieldKind::Text);
        assert_eq!(FieldKind::classify("Imagery"), FieldKind::Text);
        assert_eq!(FieldKind::classify("CTA"), FieldKind::Text);
    }

    #[test]
    fn labels() {
        assert_eq!(FieldDescriptor::new("Image_1").label(), "Image 1");
        assert_eq!(FieldDescriptor::new("Image_hero_shot").label(), "Image hero_shot");
        assert_eq!(
            FieldDescriptor::new("Property_Highlights_line-1").label(),
            "Property Highlights line-1"
        );
    }

    #[test]
    fn template_deserializes_preview_and_placeholders() {
        let json = r#"{
            "id": "t1",
            "name": "Lakeside",
            "description": "Two column",
            "preview": "https://cdn.example/t1.png",
            "placeholders": ["Property_Description", "Image_1"]
        }"#;
        let tpl: Template = serde_json::from_str(json).expect("parse");
        assert_eq!(tpl.id, TemplateId::from("t1"));
        assert_eq!(tpl.preview_url.as_deref(), Some("https://cdn.example/t1.png"));
        assert_eq!(
            tpl.placeholders,
            Some(vec![Placeholder::from("Property_Description"), Placeholder::from("Image_1")])
        );
    }

    #[test]
    fn template_without_schema_or_description() {
        let tpl: Template = serde_json::from_str(r#"{"id":"t2","name":"Plain"}"#).expect("parse");
        assert!(tpl.placeholders.is_none());
        assert!(tpl.description.is_empty());
        assert!(tpl.preview_url.is_none());
    }

    #[test]
    fn numeric_ids_keep_their_wire_type() {
        let tpl: Template = serde_json::from_str(r#"{"id":1,"name":"One"}"#).expect("parse");
        assert_eq!(tpl.id, TemplateId::Number(1));
        assert_eq!(tpl.id.to_string(), "1");
        assert!(tpl.id.matches("1"));
        assert!(!tpl.id.matches("01x"));
        assert_eq!(serde_json::to_value(&tpl.id).expect("serialize"), serde_json::json!(1));

        let text: Template = serde_json::from_str(r#"{"id":"1","name":"One"}"#).expect("parse");
        assert_eq!(text.id, TemplateId::from("1"));
        assert_ne!(text.id, tpl.id);
    }

    #[test]
    fn non_list_placeholders_survive_parsing() {
        let tpls: Vec<Template> = serde_json::from_str(
            r#"[{"id":"a","name":"A","placeholders":"CTA"},{"id":"b","name":"B"}]"#,
        )
        .expect("parse");
        assert_eq!(tpls.len(), 2);
        assert_eq!(
            tpls[0].placeholders,
            Some(vec![Placeholder::NotAList(serde_json::json!("CTA"))])
        );
        assert!(tpls[1].placeholders.is_none());

        let back = serde_json::to_value(&tpls[0]).expect("serialize");
        assert_eq!(back["placeholders"], serde_json::json!("CTA"));
    }

    #[test]
    fn non_string_placeholders_survive_parsing() {
        let tpl: Template =
            serde_json::from_str(r#"{"id":"t3","name":"Odd","placeholders":["CTA", 7, null]}"#)
                .expect("parse");
        let entries = tpl.placeholders.expect("placeholders");
        assert_eq!(entries[0].as_name(), Some("CTA"));
        assert!(entries[1].as_name().is_none());
        assert!(entries[2].as_name().is_none());
    }
}
