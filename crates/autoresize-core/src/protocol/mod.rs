//! Wire contract with the resize endpoint.
//!
//! The endpoint is a tiny HTTP service listening on a fixed port on the same
//! host as the viewer page.  Every call is a plain `GET` that answers with a
//! JSON body:
//!
//! ```text
//! GET /health                          -> {"status": "ok"}        (any JSON)
//! GET /resize?width=1360&height=760    -> {"success": true, "width": 1360, "height": 760}
//! GET /resolution                      -> {"width": 1920, "height": 1080}
//! ```

pub mod messages;

use crate::config::ApiEndpoint;
use crate::domain::size::Size;

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";
/// Path of the resize call.
pub const RESIZE_PATH: &str = "/resize";
/// Path of the current-resolution query.
pub const RESOLUTION_PATH: &str = "/resolution";

/// `{base}/health`
pub fn health_url(endpoint: &ApiEndpoint) -> String {
    format!("{}{HEALTH_PATH}", endpoint.base_url())
}

/// `{base}/resize?width={w}&height={h}`
pub fn resize_url(endpoint: &ApiEndpoint, size: Size) -> String {
    format!(
        "{}{RESIZE_PATH}?width={}&height={}",
        endpoint.base_url(),
        size.width,
        size.height
    )
}

/// `{base}/resolution`
pub fn resolution_url(endpoint: &ApiEndpoint) -> String {
    format!("{}{RESOLUTION_PATH}", endpoint.base_url())
}
