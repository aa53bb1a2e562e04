//! Console errors.

use scrutin_controller::ControllerError;
use scrutin_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("configuration error: {0}")]
    Config(String),
}
