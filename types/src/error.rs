//! Shared error taxonomy for election operations.

use crate::candidate::CandidateId;
use crate::phase::ElectionPhase;
use thiserror::Error;

/// Errors surfaced by the ledger and the phase controller.
///
/// Every rejection an authoritative ledger can issue (wrong role, wrong
/// phase, double registration, double vote) maps to exactly one variant
/// here. Rejections are the normal failure path, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("operation not allowed in phase {phase}")]
    InvalidTransition { phase: ElectionPhase },

    #[error("election is in its terminal phase; only a reset is allowed")]
    TerminalPhase,

    #[error("voter {0} is already registered")]
    DuplicateVoter(String),

    #[error("candidate {0} is already registered")]
    DuplicateCandidate(String),

    #[error("voter {0} has already voted")]
    AlreadyVoted(String),

    #[error("no candidate with id {0}")]
    UnknownCandidate(CandidateId),

    #[error("{0} is not a registered voter")]
    NotRegistered(String),

    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("remote call failed: {0}")]
    RemoteFailure(String),
}
