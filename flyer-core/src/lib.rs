//! Flyer core library: template types, schema resolution, field state,
//! payload assembly, markup trust types, catalog files, configuration.
//!
//! - [`types`]: templates, placeholders, field descriptors
//! - [`schema`]: [`SchemaResolver`] and the default field schema
//! - [`state`]: [`FieldStore`] / [`FieldState`]
//! - [`payload`]: [`build`](payload::build) and [`GenerationRequest`]
//! - [`markup`]: [`UntrustedMarkup`] / [`TrustedMarkup`]
//! - [`catalog`]: local catalog files
//! - [`config`]: `~/.flyer/config.yaml`
//! - [`error`]: error enums

pub mod catalog;
pub mod config;
pub mod error;
pub mod markup;
pub mod payload;
pub mod schema;
pub mod state;
pub mod types;

pub use config::FlyerConfig;
pub use error::{CatalogError, ConfigError, SchemaError};
pub use markup::{TrustedMarkup, UntrustedMarkup};
pub use payload::{GenerationRequest, ParameterPayload};
pub use schema::{ResolvedSchema, SchemaResolver, SchemaSource, DEFAULT_FIELD_SCHEMA};
pub use state::{FieldState, FieldStore};
pub use types::{FieldDescriptor, FieldKind, Placeholder, Template, TemplateId, IMAGE_PREFIX};
