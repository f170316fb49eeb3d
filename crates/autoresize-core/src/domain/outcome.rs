//! Result of a single resize attempt.
//!
//! A [`ResizeOutcome`] is produced once per request, consumed to drive the
//! status text, and then dropped.  It is never retained.

use thiserror::Error;

use super::size::Size;

/// Why a resize attempt did not succeed.
///
/// The user sees the same text for every variant (see
/// [`crate::StatusMessage::ResizeFailed`]), but the variants stay distinct so
/// logs and tests can tell a dead endpoint from one that answered "no".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeFailure {
    /// The request never produced a response (connection refused, timeout,
    /// DNS failure, ...).
    #[error("network or parse error: {0}")]
    Transport(String),

    /// A response arrived but its body was not valid JSON.
    #[error("network or parse error: {0}")]
    Decode(String),

    /// The body parsed as JSON but did not report `success: true`.
    ///
    /// `error` carries the server's own explanation when it sent one.
    #[error("not successful")]
    NotSuccessful { error: Option<String> },
}

impl ResizeFailure {
    /// Short, stable reason string for diagnostics.
    pub fn reason(&self) -> &'static str {
        match self {
            ResizeFailure::Transport(_) | ResizeFailure::Decode(_) => "network or parse error",
            ResizeFailure::NotSuccessful { .. } => "not successful",
        }
    }
}

/// Tagged result of one resize attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The endpoint accepted the requested size.
    Success(Size),
    /// The attempt failed; see [`ResizeFailure`] for the kind.
    Failure(ResizeFailure),
}

impl ResizeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResizeOutcome::Success(_))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
