//! Recording resize API for unit and integration tests.
//!
//! # Why a recording fake?
//!
//! The real `HttpResizeClient` needs a live resize service.  Most widget
//! behaviour (debouncing, restore, toggle round trips) is about *which*
//! requests are issued and *when*, not about HTTP.  `RecordingResizeApi`
//! answers instantly and keeps an ordered log of every requested size so
//! tests can assert on exactly what the widget asked for.
//!
//! # Usage in tests
//!
//! ```ignore
//! let api = Arc::new(RecordingResizeApi::healthy());
//! // ... drive the widget ...
//! assert_eq!(api.requests(), vec![Size::new(1360, 760)]);
//!
//! api.fail_with(ResizeFailure::Transport("refused".into()));
//! // every following request now fails
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use autoresize_core::{ResizeFailure, ResizeOutcome, Size};

use crate::application::resize_api::ResizeApi;

/// A [`ResizeApi`] that records requests instead of sending them.
pub struct RecordingResizeApi {
    healthy: bool,
    requests: Mutex<Vec<Size>>,
    failure: Mutex<Option<ResizeFailure>>,
    health_checks: AtomicUsize,
}

impl RecordingResizeApi {
    /// Health checks pass; every resize succeeds.
    pub fn healthy() -> Self {
        Self::with_health(true)
    }

    /// Health checks fail.
    pub fn unavailable() -> Self {
        Self::with_health(false)
    }

    fn with_health(healthy: bool) -> Self {
        Self {
            healthy,
            requests: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            health_checks: AtomicUsize::new(0),
        }
    }

    /// Makes every following resize fail with `failure`.
    pub fn fail_with(&self, failure: ResizeFailure) {
        *lock(&self.failure) = Some(failure);
    }

    /// Makes every following resize succeed again.
    pub fn succeed(&self) {
        *lock(&self.failure) = None;
    }

    /// Every requested size, oldest first.
    pub fn requests(&self) -> Vec<Size> {
        lock(&self.requests).clone()
    }

    /// How many times `check_health` was called.
    pub fn health_checks(&self) -> usize {
        self.health_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResizeApi for RecordingResizeApi {
    async fn request_resize(&self, size: Size) -> ResizeOutcome {
        lock(&self.requests).push(size);
        match lock(&self.failure).clone() {
            Some(failure) => ResizeOutcome::Failure(failure),
            None => ResizeOutcome::Success(size),
        }
    }

    async fn check_health(&self) -> bool {
        self.health_checks.fetch_add(1, Ordering::SeqCst);
        self.healthy
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
