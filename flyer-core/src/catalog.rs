//! Local template catalog files.
//!
//! A catalog file is a YAML (or JSON, which YAML accepts) sequence of
//! [`Template`] entries in display order:
//!
//! ```yaml
//! - id: lakeside
//!   name: Lakeside
//!   description: Two column listing
//!   preview: https://cdn.example/lakeside.png
//!   placeholders: [Property_Description, Image_1]
//! ```
//!
//! Ids must be unique within a file. The file is chosen by the
//! `catalog_file` config key or the CLI's `--catalog` flag.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::types::{Template, TemplateId};

/// Load and check a catalog file.
///
/// Returns `CatalogError::NotFound` if absent, `CatalogError::Parse` (with
/// path) if malformed, `CatalogError::DuplicateId` if two entries share an id.
pub fn load_file(path: &Path) -> Result<Vec<Template>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let templates: Vec<Template> = serde_yaml::from_str(&contents).map_err(|e| {
        CatalogError::Parse { path: path.to_path_buf(), source: e }
    })?;

    if let Some(id) = first_duplicate_id(&templates) {
        return Err(CatalogError::DuplicateId { id: id.clone(), path: path.to_path_buf() });
    }
    Ok(templates)
}

/// Find a template by id.
pub fn find<'a>(templates: &'a [Template], id: &TemplateId) -> Option<&'a Template> {
    templates.iter().find(|t| &t.id == id)
}

/// First id that occurs more than once, if any.
pub fn first_duplicate_id(templates: &[Template]) -> Option<&TemplateId> {
    let mut seen = HashSet::with_capacity(templates.len());
    templates.iter().map(|t| &t.id).find(|id| !seen.insert(*id))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
