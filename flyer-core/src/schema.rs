//! Schema resolution: which placeholder fields a template collects.
//!
//! A template either declares its own ordered placeholder list or stays
//! silent, in which case the resolver's default field schema applies. The
//! default is injected into [`SchemaResolver`] rather than read from global
//! state so tests can substitute their own.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::SchemaError;
use crate::types::{FieldDescriptor, Placeholder, Template};

/// Fallback field list for templates that do not declare placeholders.
pub const DEFAULT_FIELD_SCHEMA: &[&str] = &[
    "Property_Description",
    "Property_Highlights_line-1",
    "Property_Highlights_line-2",
    "Property_Highlights_line-3",
    "Property_Highlights_line-4",
    "Property_Highlights_line-5",
    "Property_Highlights_line-6",
    "Property_Location",
    "Take_away_Text",
    "CTA",
    "Image_1",
    "Image_2",
    "Image_3",
];

// ---------------------------------------------------------------------------
// ResolvedSchema
// ---------------------------------------------------------------------------

/// The ordered field list in effect for the current selection.
///
/// Order is user-facing (display and input order) and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedSchema {
    fields: Vec<FieldDescriptor>,
}

impl ResolvedSchema {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(FieldDescriptor::new).collect(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Where a resolved schema came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// The template's own placeholder list.
    Declared,
    /// The template declared nothing (absent or empty list).
    Default,
    /// The declared list was malformed and the default was used instead.
    Rejected(SchemaError),
}

// ---------------------------------------------------------------------------
// SchemaResolver
// ---------------------------------------------------------------------------

/// Derives the effective field list for a template.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    default_schema: ResolvedSchema,
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self::with_default(ResolvedSchema::from_names(DEFAULT_FIELD_SCHEMA.iter().copied()))
    }
}

impl SchemaResolver {
    /// A resolver that falls back to `default_schema` for silent templates.
    pub fn with_default(default_schema: ResolvedSchema) -> Self {
        Self { default_schema }
    }

    pub fn default_schema(&self) -> &ResolvedSchema {
        &self.default_schema
    }

    /// The resolved schema for `template`.
    pub fn resolve(&self, template: &Template) -> ResolvedSchema {
        self.resolve_with_source(template).0
    }

    /// Like [`resolve`](Self::resolve), also reporting which branch applied.
    pub fn resolve_with_source(&self, template: &Template) -> (ResolvedSchema, SchemaSource) {
        match template.placeholders.as_deref() {
            None | Some([]) => (self.default_schema.clone(), SchemaSource::Default),
            Some(declared) => match validate_placeholders(declared) {
                Ok(names) => (ResolvedSchema::from_names(names), SchemaSource::Declared),
                Err(err) => (self.default_schema.clone(), SchemaSource::Rejected(err)),
            },
        }
    }
}

/// Check a declared list and return its names in order.
///
/// Rejects a value that is not a list, and non-string, empty, or duplicate
/// entries: any of them would make field state lookups ambiguous.
pub fn validate_placeholders(declared: &[Placeholder]) -> Result<Vec<&str>, SchemaError> {
    let mut seen = HashSet::with_capacity(declared.len());
    let mut names = Vec::with_capacity(declared.len());
    for (index, entry) in declared.iter().enumerate() {
        let name = match entry {
            Placeholder::Name(name) => name.as_str(),
            Placeholder::Invalid(_) => return Err(SchemaError::NonStringPlaceholder { index }),
            Placeholder::NotAList(_) => return Err(SchemaError::NotAList),
        };
        if name.is_empty() {
            return Err(SchemaError::EmptyPlaceholder { index });
        }
        if !seen.insert(name) {
            return Err(SchemaError::DuplicatePlaceholder(name.to_owned()));
        }
        names.push(name);
    }
    Ok(names)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
