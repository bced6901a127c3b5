//! # flyer-renderer
//!
//! Tera-based local rendering backend: turns a [`GenerationRequest`] into
//! flyer HTML using embedded templates plus optional user overrides.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use flyer_core::{payload, FieldStore, SchemaResolver};
//! use flyer_renderer::{FlyerStyle, Renderer};
//!
//! fn render_classic() {
//!     let template = FlyerStyle::Classic.template();
//!     let schema = SchemaResolver::default().resolve(&template);
//!     let mut store = FieldStore::new();
//!     store.on_select(template.clone());
//!     store.set_field("Property_Description", "Lake house");
//!     let request = flyer_core::GenerationRequest {
//!         template_id: template.id,
//!         params: payload::build(&schema, store.state()),
//!     };
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(markup) = renderer.render(&request) {
//!             println!("{} bytes", markup.as_str().len());
//!         }
//!     }
//! }
//! ```
//!
//! [`GenerationRequest`]: flyer_core::GenerationRequest

pub mod context;
pub mod engine;
pub mod error;

pub use context::FlyerContext;
pub use engine::{FlyerStyle, Renderer, TemplateEngine};
pub use error::RenderError;
