//! Client configuration with TOML file support.

use crate::error::ConsoleError;
use scrutin_ledger::BulkPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for the scrutin client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). CLI flags and env vars override
/// file values in the daemon.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the identity verification service.
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Per-request timeout for identity calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Minimum voting age enforced by the dev ledger.
    #[serde(default = "default_min_voting_age")]
    pub min_voting_age: u8,

    /// Bulk registration policy for the dev ledger.
    #[serde(default)]
    pub bulk_policy: BulkPolicy,

    /// Admin wallet address for the dev ledger.
    #[serde(default = "default_admin_address")]
    pub admin_address: String,

    /// Delay between face-authentication attempts, in seconds.
    #[serde(default = "default_face_auth_interval_secs")]
    pub face_auth_interval_secs: u64,

    /// Consecutive face-authentication failures before giving up.
    #[serde(default = "default_face_auth_max_failures")]
    pub face_auth_max_failures: u32,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_identity_url() -> String {
    "https://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_min_voting_age() -> u8 {
    18
}

fn default_admin_address() -> String {
    "0x0000000000000000000000000000000000000001".to_string()
}

fn default_face_auth_interval_secs() -> u64 {
    3
}

fn default_face_auth_max_failures() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConsoleError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConsoleError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConsoleError> {
        toml::from_str(s).map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity_url: default_identity_url(),
            request_timeout_secs: default_request_timeout_secs(),
            min_voting_age: default_min_voting_age(),
            bulk_policy: BulkPolicy::default(),
            admin_address: default_admin_address(),
            face_auth_interval_secs: default_face_auth_interval_secs(),
            face_auth_max_failures: default_face_auth_max_failures(),
            log_level: default_log_level(),
        }
    }
}
