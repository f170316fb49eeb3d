//! The seam between the widget and the resize endpoint.

use async_trait::async_trait;
use autoresize_core::{ResizeOutcome, Size};

/// Issues resize requests and health probes.
///
/// Implementations never return errors: every failure is folded into a
/// [`ResizeOutcome::Failure`] or a `false` health result, so nothing ever
/// propagates past this boundary.
///
/// The infrastructure implementation is `HttpResizeClient`; tests use
/// `RecordingResizeApi`.
#[async_trait]
pub trait ResizeApi: Send + Sync {
    /// Asks the endpoint to resize the remote session to `size`.
    ///
    /// One call is one request; the implementation neither queues nor
    /// cancels.  Callers decide whether calls may overlap.
    async fn request_resize(&self, size: Size) -> ResizeOutcome;

    /// `true` when the endpoint answered the health probe with any JSON body.
    async fn check_health(&self) -> bool;
}
