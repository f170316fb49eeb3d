//! JSON response bodies of the resize endpoint.
//!
//! # Lenient interpretation
//!
//! Only two questions matter to the widget: did the body parse as JSON at
//! all, and did it say `"success": true`?  Anything else the server adds is
//! optional.  [`ResizeResponse::from_json`] therefore never fails: a body
//! that is valid JSON but has the wrong shape (an array, a string, a
//! `"success"` that is not `true`) simply reads as "not successful".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::outcome::{ResizeFailure, ResizeOutcome};
use crate::domain::size::Size;

/// Body returned by `GET /resize`.
///
/// ```json
/// {"success": true, "width": 1360, "height": 760}
/// {"error": "Missing width or height"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResizeResponse {
    /// `true` only when the server explicitly reported success.
    #[serde(default)]
    pub success: bool,

    /// The width the server actually applied.  The server clamps requests to
    /// its supported range, so this may differ from the requested width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// The height the server actually applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Server-side explanation on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResizeResponse {
    /// Reads a response out of any JSON value without failing.
    pub fn from_json(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            width: json_u32(value, "width"),
            height: json_u32(value, "height"),
            error: value.get("error").and_then(Value::as_str).map(str::to_owned),
        }
    }

    /// The size the server reports having applied, when it echoed one.
    pub fn applied_size(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }

    /// Converts the response into the outcome of a request for `requested`.
    ///
    /// A successful outcome always carries the requested size; the server's
    /// echo is only informational.
    pub fn into_outcome(self, requested: Size) -> ResizeOutcome {
        if self.success {
            ResizeOutcome::Success(requested)
        } else {
            ResizeOutcome::Failure(ResizeFailure::NotSuccessful { error: self.error })
        }
    }
}

/// Body returned by `GET /resolution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResponse {
    pub width: u32,
    pub height: u32,
}

impl From<ResolutionResponse> for Size {
    fn from(r: ResolutionResponse) -> Self {
        Size::new(r.width, r.height)
    }
}

fn json_u32(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
