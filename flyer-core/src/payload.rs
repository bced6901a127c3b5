//! Parameter payload assembly.
//!
//! # Inclusion rule
//!
//! A schema field is forwarded to the renderer when either
//!
//! - the user touched it (it has an entry in [`FieldState`], even if empty), or
//! - it is an image slot ([`FieldKind::ImageUrl`]).
//!
//! Image slots are always forwarded, as `""` when unset, so the renderer can
//! substitute a default asset or drop the slot. Text fields are gated on
//! interaction. The asymmetry is a business rule carried as-is.
//!
//! Values are forwarded verbatim: no trimming, case folding or escaping.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::schema::ResolvedSchema;
use crate::state::FieldState;
use crate::types::{FieldDescriptor, FieldKind, TemplateId};

/// Normalized field → value mapping, in schema order.
///
/// A one-shot snapshot: it owns its data, so later edits to the field state
/// never reach a payload that was already built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterPayload {
    entries: Vec<(String, String)>,
}

impl ParameterPayload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParameterPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Whether `field` belongs in the payload given the current `state`.
pub fn is_used(field: &FieldDescriptor, state: &FieldState) -> bool {
    field.kind == FieldKind::ImageUrl || state.is_touched(&field.name)
}

/// Build the payload for one generation attempt.
pub fn build(schema: &ResolvedSchema, state: &FieldState) -> ParameterPayload {
    let entries = schema
        .fields()
        .iter()
        .filter(|f| is_used(f, state))
        .map(|f| (f.name.clone(), state.get(&f.name).to_owned()))
        .collect();
    ParameterPayload { entries }
}

/// Request body sent to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub template_id: TemplateId,
    pub params: ParameterPayload,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
