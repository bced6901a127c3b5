//! # flyer-session
//!
//! Generation session state machine and its collaborators.
//!
//! - [`Session`]: selection, field editing, one generation at a time
//! - [`CatalogReader`]: catalog fetch into a [`CatalogSnapshot`]
//! - [`CatalogSource`] / [`RenderBackend`]: collaborator seams
//! - [`HttpBackend`]: remote service over HTTP (ureq)
//! - [`LocalBackend`]: in-process tera renderer
//! - [`FileCatalog`]: catalog from a local file

pub mod backend;
pub mod catalog;
mod error;
pub mod http;
pub mod local;
pub mod session;

pub use backend::{CatalogSource, FileCatalog, RenderBackend};
pub use catalog::{CatalogReader, CatalogSnapshot};
pub use error::SessionError;
pub use http::HttpBackend;
pub use local::LocalBackend;
pub use session::{GenerationTicket, Preview, Session, SessionState};
