//! Per-selection field input state.
//!
//! [`FieldState`] only holds entries for fields the user has touched; a
//! missing key reads as the empty string. [`FieldStore`] ties that state to
//! the current template selection and throws it away wholesale whenever the
//! selection changes. Nothing carries forward, even when two templates share
//! a field name.

use std::collections::HashMap;

use crate::types::Template;

/// Current value per touched field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    values: HashMap<String, String>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`. Any name is accepted; filtering against the
    /// schema happens when the payload is built.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Stored value, or `""` when the field was never touched.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Whether the user has interacted with `name`, even to clear it.
    pub fn is_touched(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldState
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FieldState::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}

/// Field state scoped to a single template selection.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    selection: Option<Template>,
    state: FieldState,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection and start from an empty state. This is the only
    /// way state is cleared.
    pub fn on_select(&mut self, template: Template) {
        self.selection = Some(template);
        self.state = FieldState::new();
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.state.set(name, value);
    }

    pub fn get_field(&self, name: &str) -> &str {
        self.state.get(name)
    }

    pub fn selection(&self) -> Option<&Template> {
        self.selection.as_ref()
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_field_reads_empty() {
        let state = FieldState::new();
        assert_eq!(state.get("CTA"), "");
        assert!(!state.is_touched("CTA"));
    }

    #[test]
    fn clearing_a_field_still_counts_as_touched() {
        let mut state = FieldState::new();
        state.set("CTA", "Call now");
        state.set("CTA", "");
        assert!(state.is_touched("CTA"));
        assert_eq!(state.get("CTA"), "");
    }

    #[test]
    fn accepts_names_outside_any_schema() {
        let mut store = FieldStore::new();
        store.on_select(Template::new("t1", "T1").with_placeholders(["CTA"]));
        store.set_field("Not_In_Schema", "x");
        assert_eq!(store.get_field("Not_In_Schema"), "x");
    }

    #[test]
    fn selecting_resets_everything() {
        let mut store = FieldStore::new();
        store.on_select(Template::new("t1", "T1"));
        store.set_field("Property_Description", "Lake house");
        store.set_field("Image_1", "https://img/1.png");

        store.on_select(Template::new("t2", "T2"));
        assert_eq!(store.get_field("Property_Description"), "");
        assert_eq!(store.get_field("Image_1"), "");
        assert!(store.state().is_empty());
        assert_eq!(store.selection().and_then(|t| t.id.as_str()), Some("t2"));
    }

    #[test]
    fn reselecting_same_template_also_resets() {
        let tpl = Template::new("t1", "T1");
        let mut store = FieldStore::new();
        store.on_select(tpl.clone());
        store.set_field("CTA", "Go");
        store.on_select(tpl);
        assert_eq!(store.get_field("CTA"), "");
    }
}
