//! In-process backend over [`flyer_renderer::Renderer`].

use std::future::Future;
use std::sync::Arc;

use flyer_core::{GenerationRequest, Template, UntrustedMarkup};
use flyer_renderer::Renderer;

use crate::backend::{CatalogSource, RenderBackend};
use crate::error::SessionError;

/// Catalog + rendering without a network round trip.
///
/// The catalog is the renderer's own templates followed by any extra entries
/// (typically from a local catalog file).
#[derive(Clone)]
pub struct LocalBackend {
    renderer: Arc<Renderer>,
    extra: Vec<Template>,
}

impl LocalBackend {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer: Arc::new(renderer), extra: Vec::new() }
    }

    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.extra = templates;
        self
    }
}

impl CatalogSource for LocalBackend {
    fn list_templates(&self) -> impl Future<Output = Result<Vec<Template>, SessionError>> + Send {
        let mut templates = self.renderer.catalog();
        templates.extend(self.extra.iter().cloned());
        async move { Ok(templates) }
    }
}

impl RenderBackend for LocalBackend {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<UntrustedMarkup, SessionError>> + Send {
        let renderer = Arc::clone(&self.renderer);
        async move {
            let markup = renderer.render(&request)?;
            Ok(UntrustedMarkup::from(markup))
        }
    }
}
