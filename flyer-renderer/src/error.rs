//! Error types for flyer-renderer.

use std::path::PathBuf;

use thiserror::Error;

use flyer_core::TemplateId;

/// All errors that can arise from flyer rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// No `<id>/flyer.html.tera` is loaded for the requested template.
    #[error("no flyer template for '{0}'")]
    UnknownTemplate(TemplateId),
}
