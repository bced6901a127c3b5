//! HTTP adapters for the remote flyer service.
//!
//! | Operation | Request                                              | Response          |
//! |-----------|------------------------------------------------------|-------------------|
//! | catalog   | `GET {api_base}/flyer-templates`                     | JSON `[Template]` |
//! | generate  | `POST {api_base}/generate-flyer` `{templateId, params}` | markup body    |
//!
//! ureq is blocking, so every call runs on the tokio blocking pool.

use std::future::Future;
use std::time::Duration;

use flyer_core::{FlyerConfig, GenerationRequest, Template, UntrustedMarkup};

use crate::backend::{CatalogSource, RenderBackend};
use crate::error::{join_err, SessionError};

pub const CATALOG_PATH: &str = "flyer-templates";
pub const GENERATE_PATH: &str = "generate-flyer";

/// Catalog + rendering over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    agent: ureq::Agent,
    catalog_url: String,
    generate_url: String,
}

impl HttpBackend {
    pub fn new(config: &FlyerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            catalog_url: config.endpoint(CATALOG_PATH),
            generate_url: config.endpoint(GENERATE_PATH),
        }
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }
}

fn map_ureq(url: &str, err: ureq::Error) -> SessionError {
    match err {
        ureq::Error::Status(status, response) => SessionError::Status {
            url: url.to_string(),
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => SessionError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

fn fetch_templates(agent: &ureq::Agent, url: &str) -> Result<Vec<Template>, SessionError> {
    let response = agent.get(url).call().map_err(|e| map_ureq(url, e))?;
    response
        .into_json::<Vec<Template>>()
        .map_err(|source| SessionError::Decode { url: url.to_string(), source })
}

fn post_generate(
    agent: &ureq::Agent,
    url: &str,
    request: &GenerationRequest,
) -> Result<UntrustedMarkup, SessionError> {
    let response = agent
        .post(url)
        .send_json(request)
        .map_err(|e| map_ureq(url, e))?;
    let body = response
        .into_string()
        .map_err(|source| SessionError::Decode { url: url.to_string(), source })?;
    Ok(UntrustedMarkup::new(body))
}

impl CatalogSource for HttpBackend {
    fn list_templates(&self) -> impl Future<Output = Result<Vec<Template>, SessionError>> + Send {
        let agent = self.agent.clone();
        let url = self.catalog_url.clone();
        async move {
            tracing::debug!(%url, "fetching template catalog");
            tokio::task::spawn_blocking(move || fetch_templates(&agent, &url))
                .await
                .map_err(join_err)?
        }
    }
}

impl RenderBackend for HttpBackend {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<UntrustedMarkup, SessionError>> + Send {
        let agent = self.agent.clone();
        let url = self.generate_url.clone();
        async move {
            tracing::debug!(%url, template = %request.template_id, "posting generation request");
            tokio::task::spawn_blocking(move || post_generate(&agent, &url, &request))
                .await
                .map_err(join_err)?
        }
    }
}
