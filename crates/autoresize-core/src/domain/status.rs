//! Catalogue of transient status texts.
//!
//! The status indicator next to the toggle shows one of these messages for a
//! couple of seconds after each user-visible event.

use std::fmt;

use super::outcome::ResizeOutcome;
use super::size::Size;

/// A message for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// A resize request is in flight.
    Resizing(Size),
    /// The endpoint accepted the size.
    Resized(Size),
    /// Any kind of failure.  Transport, decode and not-successful failures
    /// all collapse onto this one text.
    ResizeFailed,
    /// The user switched auto-resize off.
    Off,
}

impl StatusMessage {
    /// Maps a finished attempt onto the text the user should see.
    pub fn for_outcome(outcome: &ResizeOutcome) -> Self {
        match outcome {
            ResizeOutcome::Success(size) => StatusMessage::Resized(*size),
            ResizeOutcome::Failure(_) => StatusMessage::ResizeFailed,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Resizing(size) => write!(f, "Resizing to {size}..."),
            StatusMessage::Resized(size) => write!(f, "{size}"),
            StatusMessage::ResizeFailed => f.write_str("Resize failed"),
            StatusMessage::Off => f.write_str("Auto-resize OFF"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::ResizeFailure;

    #[test]
    fn test_resizing_text_names_target_size() {
        let msg = StatusMessage::Resizing(Size::new(1360, 760));
        assert_eq!(msg.to_string(), "Resizing to 1360x760...");
    }

    #[test]
    fn test_success_and_failure_texts_differ() {
        let ok = StatusMessage::for_outcome(&ResizeOutcome::Success(Size::new(800, 600)));
        let failed = StatusMessage::for_outcome(&ResizeOutcome::Failure(
            ResizeFailure::Transport("refused".into()),
        ));

        assert_eq!(ok.to_string(), "800x600");
        assert_eq!(failed.to_string(), "Resize failed");
        assert_ne!(ok.to_string(), failed.to_string());
    }

    #[test]
    fn test_every_failure_kind_shows_the_same_text() {
        let kinds = [
            ResizeFailure::Transport("refused".into()),
            ResizeFailure::Decode("not json".into()),
            ResizeFailure::NotSuccessful { error: Some("xrandr failed".into()) },
        ];
        for kind in kinds {
            let msg = StatusMessage::for_outcome(&ResizeOutcome::Failure(kind));
            assert_eq!(msg, StatusMessage::ResizeFailed);
        }
    }

    #[test]
    fn test_off_text() {
        assert_eq!(StatusMessage::Off.to_string(), "Auto-resize OFF");
    }
}
