//! Controller errors.

use scrutin_ingest::IngestError;
use scrutin_types::ElectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    /// A rejection or failure from the authoritative ledger.
    #[error(transparent)]
    Ledger(#[from] ElectionError),

    /// A malformed batch that never reached the ledger.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}
