//! Identity gateway errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Unreachable(String),

    #[error("identity request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from identity service: {0}")]
    InvalidResponse(String),

    /// The service answered but declined the credential (`success: false`).
    #[error("{0}")]
    Rejected(String),

    #[error("identity service returned unknown role: {0}")]
    UnknownRole(String),

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("face authentication stopped after {attempts} failed attempts")]
    RetriesExhausted { attempts: u32 },
}
