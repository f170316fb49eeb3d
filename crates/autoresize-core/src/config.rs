//! Widget configuration: named constants plus a TOML-loadable bundle.
//!
//! The widget works out of the box with no configuration at all: every
//! field of [`WidgetConfig`] defaults to one of the named constants below.
//! A host that needs a different port or timing can override individual
//! fields from TOML; absent fields keep their defaults.
//!
//! ```toml
//! debounce_ms = 250
//! pending_policy = "cancel_on_disable"
//!
//! [endpoint]
//! host = "10.0.0.5"
//! port = 6081
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Named constants ───────────────────────────────────────────────────────────

/// TCP port of the resize endpoint on the viewer's host.
pub const API_PORT: u16 = 6081;

/// Quiet period after the last viewport change before a resize fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// How long a status message stays visible before fading out.
pub const STATUS_FADE: Duration = Duration::from_millis(2000);

/// Interval of the self-healing presence check.
pub const PRESENCE_CHECK_INTERVAL: Duration = Duration::from_millis(2000);

/// Delay before building the UI when the document has already loaded.
pub const READY_DELAY: Duration = Duration::from_millis(500);

/// Delay before re-activating a persisted "on" state, giving the remote
/// session time to finish connecting.
pub const RESTORE_DELAY: Duration = Duration::from_millis(1500);

/// Upper bound on any single HTTP call to the endpoint.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Storage key of the persisted enabled flag.
pub const STORAGE_KEY: &str = "vnc_autoresize";

/// Reserved element id of the toggle control.
pub const TOGGLE_ELEMENT_ID: &str = "autoresize-btn";

/// Reserved element id of the status indicator.
pub const STATUS_ELEMENT_ID: &str = "autoresize-status";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// What happens to a pending debounced resize when the user switches
/// auto-resize off before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingPolicy {
    /// The pending resize still fires.
    #[default]
    KeepPending,
    /// Switching off cancels the pending resize.
    CancelOnDisable,
}

/// Where the resize endpoint lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoint {
    /// `http` or `https`.
    pub scheme: String,
    /// Hostname of the viewer page (the endpoint runs on the same host).
    pub host: String,
    pub port: u16,
}

impl ApiEndpoint {
    /// Endpoint on `host` using the default scheme and port.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// `{scheme}://{host}:{port}` with no trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: API_PORT,
        }
    }
}

/// All tunables of the widget.
///
/// Timings are stored as milliseconds so they read naturally in TOML; use
/// the `Duration` accessors in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub endpoint: ApiEndpoint,
    pub debounce_ms: u64,
    pub status_fade_ms: u64,
    pub presence_interval_ms: u64,
    pub ready_delay_ms: u64,
    pub restore_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub storage_key: String,
    pub toggle_element_id: String,
    pub status_element_id: String,
    pub pending_policy: PendingPolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: ApiEndpoint::default(),
            debounce_ms: millis(DEBOUNCE_DELAY),
            status_fade_ms: millis(STATUS_FADE),
            presence_interval_ms: millis(PRESENCE_CHECK_INTERVAL),
            ready_delay_ms: millis(READY_DELAY),
            restore_delay_ms: millis(RESTORE_DELAY),
            request_timeout_ms: millis(REQUEST_TIMEOUT),
            storage_key: STORAGE_KEY.to_string(),
            toggle_element_id: TOGGLE_ELEMENT_ID.to_string(),
            status_element_id: STATUS_ELEMENT_ID.to_string(),
            pending_policy: PendingPolicy::default(),
        }
    }
}

impl WidgetConfig {
    /// Parses a config from TOML text; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn status_fade(&self) -> Duration {
        Duration::from_millis(self.status_fade_ms)
    }

    pub fn presence_interval(&self) -> Duration {
        Duration::from_millis(self.presence_interval_ms)
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }

    pub fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.restore_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
