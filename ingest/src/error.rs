//! Ingestion errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read CSV file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parallel field lists are misaligned: {0}")]
    Misaligned(String),
}
