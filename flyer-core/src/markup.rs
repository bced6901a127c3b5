//! Rendered markup and the trust boundary around it.
//!
//! Whatever a remote rendering service returns is [`UntrustedMarkup`]. The
//! preview surface inserts markup verbatim, so a compromised renderer is a
//! direct injection into the display. Turning untrusted markup into
//! [`TrustedMarkup`] takes an explicit [`UntrustedMarkup::trust`] call at the
//! display boundary; no sanitization happens here.
//!
//! The local renderer escapes every substituted value itself and may mint
//! [`TrustedMarkup`] directly via [`TrustedMarkup::from_escaped`].

use std::fmt;

/// Markup as received from a rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrustedMarkup(String);

impl UntrustedMarkup {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text, for inspection or logging. Not for display.
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Accept the collaborator's output as display-ready.
    pub fn trust(self) -> TrustedMarkup {
        TrustedMarkup(self.0)
    }
}

/// Markup cleared for the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Wrap markup whose substituted values were escaped by the producer.
    pub fn from_escaped(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrustedMarkup> for UntrustedMarkup {
    fn from(markup: TrustedMarkup) -> Self {
        UntrustedMarkup(markup.0)
    }
}
