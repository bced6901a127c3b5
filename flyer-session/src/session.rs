//! Single-user generation session.
//!
//! # States
//!
//! ```text
//! NoSelection ──select──▶ TemplateSelected ──begin──▶ Generating ──ok──▶ Previewing
//!                               ▲                         │                  │
//!                               └──────────err────────────┘                  │
//!                               ▲                                            │
//!                               └──────────────select (any state)────────────┘
//! ```
//!
//! Selecting a template, from any state, discards field values and preview.
//! At most one generation is outstanding; a second `begin` is rejected.
//! Generation is split into [`Session::begin_generation`] and
//! [`Session::complete_generation`] so fields stay editable while the request
//! is in flight: the ticket carries a payload snapshot, later edits do not
//! reach it. A completion for a superseded selection is discarded.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flyer_core::{
    payload, FieldStore, GenerationRequest, ResolvedSchema, SchemaResolver, SchemaSource,
    Template, TemplateId, UntrustedMarkup,
};

use crate::backend::RenderBackend;
use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoSelection,
    TemplateSelected,
    Generating,
    Previewing,
}

/// Markup returned by the last successful generation.
#[derive(Debug, Clone)]
pub struct Preview {
    pub template_id: TemplateId,
    pub markup: UntrustedMarkup,
    pub generated_at: DateTime<Utc>,
}

/// An outstanding generation attempt. Not `Clone`: it completes once.
#[derive(Debug)]
pub struct GenerationTicket {
    epoch: u64,
    request: GenerationRequest,
}

impl GenerationTicket {
    /// The payload snapshot taken when the attempt started.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

pub struct Session {
    resolver: SchemaResolver,
    store: FieldStore,
    schema: ResolvedSchema,
    // Bumped on every selection; tickets from older epochs are stale.
    epoch: u64,
    in_flight: Option<u64>,
    preview: Option<Preview>,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SchemaResolver::default())
    }
}

impl Session {
    pub fn new(resolver: SchemaResolver) -> Self {
        Self {
            resolver,
            store: FieldStore::new(),
            schema: ResolvedSchema::default(),
            epoch: 0,
            in_flight: None,
            preview: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.store.selection().is_none() {
            SessionState::NoSelection
        } else if self.in_flight.is_some() {
            SessionState::Generating
        } else if self.preview.is_some() {
            SessionState::Previewing
        } else {
            SessionState::TemplateSelected
        }
    }

    /// Select `template`, discarding all field values, any preview, and any
    /// outstanding attempt.
    pub fn select(&mut self, template: Template) {
        let (schema, source) = self.resolver.resolve_with_source(&template);
        match &source {
            SchemaSource::Declared => {}
            SchemaSource::Default => {
                tracing::debug!(template = %template.id, "no placeholders declared, using default schema");
            }
            SchemaSource::Rejected(reason) => {
                tracing::warn!(
                    template = %template.id,
                    error = %reason,
                    "rejected placeholder schema, using default schema",
                );
            }
        }
        if let Some(epoch) = self.in_flight.take() {
            tracing::debug!(epoch, "selection changed during generation; result will be discarded");
        }

        self.epoch += 1;
        self.schema = schema;
        self.store.on_select(template);
        self.preview = None;
        self.last_error = None;
    }

    pub fn selection(&self) -> Option<&Template> {
        self.store.selection()
    }

    /// Fields to collect for the current selection, in input order. Empty
    /// with no selection.
    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.store.set_field(name, value);
    }

    pub fn field(&self, name: &str) -> &str {
        self.store.get_field(name)
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// User-facing message from the last failed generation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshot the payload and move to `Generating`.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, SessionError> {
        let template_id = match self.store.selection() {
            Some(template) => template.id.clone(),
            None => return Err(SessionError::NoSelection),
        };
        if self.in_flight.is_some() {
            return Err(SessionError::GenerationInFlight);
        }

        let params = payload::build(&self.schema, self.store.state());
        tracing::info!(template = %template_id, fields = params.len(), "generating flyer");

        self.in_flight = Some(self.epoch);
        self.preview = None;
        self.last_error = None;
        Ok(GenerationTicket {
            epoch: self.epoch,
            request: GenerationRequest { template_id, params },
        })
    }

    /// Settle `ticket` with the collaborator's `result`.
    ///
    /// Success stores the preview. Failure returns to `TemplateSelected`
    /// with field values intact and the message kept in
    /// [`last_error`](Self::last_error). A stale ticket changes nothing and
    /// yields [`SessionError::Superseded`].
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<UntrustedMarkup, SessionError>,
    ) -> Result<&Preview, SessionError> {
        if self.in_flight != Some(ticket.epoch) {
            tracing::debug!(epoch = ticket.epoch, "discarding superseded generation result");
            return Err(SessionError::Superseded);
        }
        self.in_flight = None;

        match result {
            Ok(markup) => {
                tracing::info!(
                    template = %ticket.request.template_id,
                    bytes = markup.len(),
                    "flyer generated",
                );
                let preview = Preview {
                    template_id: ticket.request.template_id,
                    markup,
                    generated_at: Utc::now(),
                };
                let preview: &Preview = self.preview.insert(preview);
                Ok(preview)
            }
            Err(err) => {
                tracing::error!(template = %ticket.request.template_id, error = %err, "flyer generation failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Give up on `ticket` without a result; the session returns to
    /// `TemplateSelected` (or stays where a newer selection put it).
    pub fn abandon(&mut self, ticket: GenerationTicket) {
        if self.in_flight == Some(ticket.epoch) {
            tracing::debug!(epoch = ticket.epoch, "generation abandoned");
            self.in_flight = None;
        }
    }

    /// Begin, await `backend`, complete.
    ///
    /// Dropping the returned future before it resolves abandons the attempt.
    pub async fn generate<B: RenderBackend>(&mut self, backend: &B) -> Result<&Preview, SessionError> {
        let ticket = self.begin_generation()?;
        let result = {
            let guard = InFlightGuard {
                in_flight: &mut self.in_flight,
                epoch: ticket.epoch,
                armed: true,
            };
            let result = backend.generate(ticket.request().clone()).await;
            guard.disarm();
            result
        };
        self.complete_generation(ticket, result)
    }
}

/// Clears the in-flight marker if a pending `generate` is dropped.
struct InFlightGuard<'a> {
    in_flight: &'a mut Option<u64>,
    epoch: u64,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.in_flight == Some(self.epoch) {
            tracing::debug!(epoch = self.epoch, "generation cancelled");
            *self.in_flight = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn t1() -> Template {
        Template::new("T1", "T1").with_placeholders(["Property_Description", "Image_1"])
    }

    #[test]
    fn starts_without_selection() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::NoSelection);
        assert!(session.schema().is_empty());
    }

    #[test]
    fn generate_without_selection_fails_fast() {
        let mut session = Session::default();
        let err = session.begin_generation().unwrap_err();
        assert!(matches!(err, SessionError::NoSelection));
        assert_eq!(session.state(), SessionState::NoSelection);
    }

    #[test]
    fn second_begin_is_rejected() {
        let mut session = Session::default();
        session.select(t1());
        let _ticket = session.begin_generation().expect("first begin");
        assert_eq!(session.state(), SessionState::Generating);
        assert!(matches!(
            session.begin_generation().unwrap_err(),
            SessionError::GenerationInFlight
        ));
    }

    #[test]
    fn ticket_is_a_snapshot() {
        let mut session = Session::default();
        session.select(t1());
        session.set_field("Property_Description", "Lake house");
        let ticket = session.begin_generation().expect("begin");

        session.set_field("Property_Description", "Changed while waiting");
        assert_eq!(ticket.request().params.get("Property_Description"), Some("Lake house"));
        assert_eq!(session.field("Property_Description"), "Changed while waiting");
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = Session::default();
        session.select(t1());
        let ticket = session.begin_generation().expect("begin");

        session.select(Template::new("T2", "T2"));
        let err = session
            .complete_generation(ticket, Ok(UntrustedMarkup::new("<p>old</p>")))
            .unwrap_err();
        assert!(matches!(err, SessionError::Superseded));
        assert_eq!(session.state(), SessionState::TemplateSelected);
        assert!(session.preview().is_none());
    }

    #[test]
    fn abandoned_ticket_frees_the_session() {
        let mut session = Session::default();
        session.select(t1());
        let ticket = session.begin_generation().expect("begin");
        session.abandon(ticket);
        assert_eq!(session.state(), SessionState::TemplateSelected);
        assert!(session.begin_generation().is_ok());
    }

    #[test]
    fn abandoning_a_stale_ticket_keeps_the_newer_attempt() {
        let mut session = Session::default();
        session.select(t1());
        let stale = session.begin_generation().expect("begin");
        session.select(Template::new("T2", "T2"));
        let _current = session.begin_generation().expect("begin again");
        session.abandon(stale);
        assert_eq!(session.state(), SessionState::Generating);
    }

    #[test]
    fn rejected_schema_uses_default() {
        let mut session = Session::default();
        session.select(Template::new("bad", "Bad").with_placeholders(["CTA", "CTA"]));
        assert_eq!(session.schema().len(), 13);
    }
}
