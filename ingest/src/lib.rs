//! Bulk CSV ingestion for registration batches.
//!
//! Parses row-oriented CSV text into the parallel field lists the ledger's
//! bulk calls take. Malformed rows are dropped, but never silently at the
//! API level: every parse returns the accepted batch together with the
//! skipped rows and the reason each one was dropped. Callers decide whether
//! to surface the skips; this crate only logs them at `warn`.

pub mod candidates;
pub mod error;
pub mod voters;

pub use candidates::{parse_candidates, read_candidates_file, CandidateBatch};
pub use error::IngestError;
pub use voters::{parse_voters, read_voters_file, VoterBatch};

use std::fmt;

/// Why a CSV row was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer fields than the format requires.
    TooFewFields { found: usize, required: usize },
    /// The age column did not parse as an integer.
    BadAge(String),
    /// The address column is not a well-formed wallet address.
    BadAddress(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields { found, required } => {
                write!(f, "{found} fields, {required} required")
            }
            SkipReason::BadAge(raw) => write!(f, "unparseable age {raw:?}"),
            SkipReason::BadAddress(raw) => write!(f, "invalid address {raw:?}"),
        }
    }
}

/// A dropped CSV row: 1-based line number plus the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// The result of parsing one CSV document: the accepted batch and every
/// dropped row.
#[derive(Clone, Debug)]
pub struct Ingested<B> {
    pub batch: B,
    pub skipped: Vec<SkippedRow>,
}
