//! Collaborator seams: where templates come from and who renders them.

use std::future::Future;
use std::path::PathBuf;

use flyer_core::{catalog, GenerationRequest, Template, UntrustedMarkup};

use crate::error::{join_err, SessionError};

/// Lists the available templates, in display order.
pub trait CatalogSource {
    fn list_templates(&self) -> impl Future<Output = Result<Vec<Template>, SessionError>> + Send;
}

/// Turns a generation request into markup. Fire-and-wait: one request, one
/// complete response or an error.
pub trait RenderBackend {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<UntrustedMarkup, SessionError>> + Send;
}

/// Catalog read from a local YAML/JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn list_templates(&self) -> impl Future<Output = Result<Vec<Template>, SessionError>> + Send {
        let path = self.path.clone();
        async move {
            tokio::task::spawn_blocking(move || catalog::load_file(&path))
                .await
                .map_err(join_err)?
                .map_err(SessionError::from)
        }
    }
}
