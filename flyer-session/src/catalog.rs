//! Catalog reader: one fetch, one snapshot.
//!
//! A failed fetch is not an error for the caller; it yields an empty,
//! unavailable snapshot so the template list can show as unavailable. No
//! retries.

use std::collections::HashSet;

use flyer_core::{Template, TemplateId};

use crate::backend::CatalogSource;

/// Templates available for selection, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub templates: Vec<Template>,
    /// Why the catalog could not be read, if it could not.
    pub unavailable: Option<String>,
}

impl CatalogSnapshot {
    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn find(&self, id: &TemplateId) -> Option<&Template> {
        flyer_core::catalog::find(&self.templates, id)
    }
}

pub struct CatalogReader<S> {
    source: S,
}

impl<S: CatalogSource> CatalogReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the catalog. Ids must be unique within a snapshot: later
    /// duplicates are dropped.
    pub async fn read(&self) -> CatalogSnapshot {
        match self.source.list_templates().await {
            Ok(templates) => {
                let templates = dedup_by_id(templates);
                tracing::debug!(count = templates.len(), "template catalog loaded");
                CatalogSnapshot { templates, unavailable: None }
            }
            Err(err) => {
                tracing::warn!(error = %err, "template catalog unavailable");
                CatalogSnapshot { templates: Vec::new(), unavailable: Some(err.to_string()) }
            }
        }
    }
}

fn dedup_by_id(templates: Vec<Template>) -> Vec<Template> {
    let mut seen = HashSet::with_capacity(templates.len());
    templates
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                tracing::warn!(id = %t.id, "dropping template with duplicate id");
            }
            fresh
        })
        .collect()
}
