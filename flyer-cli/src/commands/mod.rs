//! Subcommands and the backend plumbing they share.

pub mod fields;
pub mod generate;
pub mod init;
pub mod templates;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use flyer_core::{catalog, config, FlyerConfig, Template};
use flyer_renderer::Renderer;
use flyer_session::{
    CatalogReader, CatalogSnapshot, FileCatalog, HttpBackend, LocalBackend, Preview, Session,
    SessionError,
};

/// Flags selecting where templates come from and where they render.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Use the builtin renderer instead of the remote service.
    #[arg(long)]
    pub local: bool,

    /// Read templates from this YAML/JSON catalog file (overrides config).
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

/// Config file plus environment overrides.
pub fn load_config() -> Result<FlyerConfig> {
    config::load().context("failed to load ~/.flyer/config.yaml")
}

/// Current-thread runtime for one command; ureq calls go to the blocking pool.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Catalog and rendering collaborators picked from config and flags.
pub enum Backend {
    Local(LocalBackend),
    Http {
        backend: HttpBackend,
        catalog_file: Option<PathBuf>,
    },
}

impl Backend {
    pub fn from_config(config: &FlyerConfig, args: &BackendArgs) -> Result<Self> {
        let catalog_file = args.catalog.clone().or_else(|| config.catalog_file.clone());
        if args.local {
            let renderer = Renderer::with_template_dir(config.template_dir.as_deref())
                .context("failed to load flyer templates")?;
            let extra = match &catalog_file {
                Some(path) => catalog::load_file(path)
                    .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
                None => Vec::new(),
            };
            return Ok(Self::Local(LocalBackend::new(renderer).with_templates(extra)));
        }
        Ok(Self::Http {
            backend: HttpBackend::new(config),
            catalog_file,
        })
    }

    pub async fn catalog(&self) -> CatalogSnapshot {
        match self {
            Self::Local(backend) => CatalogReader::new(backend.clone()).read().await,
            Self::Http { catalog_file: Some(path), .. } => {
                CatalogReader::new(FileCatalog::new(path)).read().await
            }
            Self::Http { backend, catalog_file: None } => {
                CatalogReader::new(backend.clone()).read().await
            }
        }
    }

    pub async fn generate<'s>(&self, session: &'s mut Session) -> Result<&'s Preview, SessionError> {
        match self {
            Self::Local(backend) => session.generate(backend).await,
            Self::Http { backend, .. } => session.generate(backend).await,
        }
    }
}

/// Look `id` up in `snapshot`, explaining an unavailable catalog.
pub fn find_template(snapshot: &CatalogSnapshot, id: &str) -> Result<Template> {
    if let Some(reason) = &snapshot.unavailable {
        anyhow::bail!("template catalog unavailable: {reason}");
    }
    snapshot
        .templates
        .iter()
        .find(|t| t.id.matches(id))
        .cloned()
        .with_context(|| format!("unknown template '{id}'; run `flyer templates` to list them"))
}
