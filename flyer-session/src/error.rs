use thiserror::Error;

use flyer_core::{CatalogError, TemplateId};
use flyer_renderer::RenderError;

/// Error surface for the session, its collaborators, and their adapters.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Generate was attempted with no template selected. The caller should
    /// have disabled the action; this is a programming error.
    #[error("no template selected")]
    NoSelection,

    /// A generation is already outstanding for this session.
    #[error("a flyer generation is already in progress")]
    GenerationInFlight,

    /// The completion belongs to an attempt that was superseded by a new
    /// selection; the session ignored it.
    #[error("generation result discarded: the template selection changed")]
    Superseded,

    #[error("unknown template '{0}'")]
    UnknownTemplate(TemplateId),

    /// The remote service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// Connection, DNS, TLS or timeout failure.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read or decoded.
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Join(String),
}

pub(crate) fn join_err(err: tokio::task::JoinError) -> SessionError {
    SessionError::Join(err.to_string())
}
