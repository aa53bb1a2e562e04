//! The election lifecycle phase enum.

use crate::error::ElectionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The current stage of the election lifecycle.
///
/// Strictly ordered; the ledger advances one step at a time via an explicit
/// admin action and never skips or regresses, except for a full reset from
/// [`ElectionPhase::Results`] back to [`ElectionPhase::NotStarted`].
///
/// Serializes as the phase index (`u8`), matching the contract ABI's
/// numeric phase value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ElectionPhase {
    /// No election is running; the only valid transition is `startElection`.
    NotStarted,
    /// Admin may register voters.
    VoterRegistration,
    /// Admin may register candidates.
    CandidateRegistration,
    /// Registered voters may cast their single vote.
    Voting,
    /// Terminal phase: tallies are public and the winner is derivable.
    Results,
}

impl ElectionPhase {
    /// All phases in lifecycle order.
    pub const ALL: [ElectionPhase; 5] = [
        ElectionPhase::NotStarted,
        ElectionPhase::VoterRegistration,
        ElectionPhase::CandidateRegistration,
        ElectionPhase::Voting,
        ElectionPhase::Results,
    ];

    /// The next phase in the fixed ordering, or `None` from the terminal phase.
    pub fn next(&self) -> Option<ElectionPhase> {
        match self {
            ElectionPhase::NotStarted => Some(ElectionPhase::VoterRegistration),
            ElectionPhase::VoterRegistration => Some(ElectionPhase::CandidateRegistration),
            ElectionPhase::CandidateRegistration => Some(ElectionPhase::Voting),
            ElectionPhase::Voting => Some(ElectionPhase::Results),
            ElectionPhase::Results => None,
        }
    }

    /// Whether voter registration is open.
    pub fn can_register_voters(&self) -> bool {
        matches!(self, Self::VoterRegistration)
    }

    /// Whether candidate registration is open.
    pub fn can_register_candidates(&self) -> bool {
        matches!(self, Self::CandidateRegistration)
    }

    /// Whether votes are being accepted.
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Voting)
    }

    /// Whether tallies and the winner are public.
    pub fn results_available(&self) -> bool {
        matches!(self, Self::Results)
    }

    /// Whether this is the terminal phase (only exit is a full reset).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Results)
    }
}

impl fmt::Display for ElectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ElectionPhase::NotStarted => "NotStarted",
            ElectionPhase::VoterRegistration => "VoterRegistration",
            ElectionPhase::CandidateRegistration => "CandidateRegistration",
            ElectionPhase::Voting => "Voting",
            ElectionPhase::Results => "Results",
        };
        write!(f, "{label}")
    }
}

impl From<ElectionPhase> for u8 {
    fn from(phase: ElectionPhase) -> Self {
        match phase {
            ElectionPhase::NotStarted => 0,
            ElectionPhase::VoterRegistration => 1,
            ElectionPhase::CandidateRegistration => 2,
            ElectionPhase::Voting => 3,
            ElectionPhase::Results => 4,
        }
    }
}

impl TryFrom<u8> for ElectionPhase {
    type Error = ElectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ElectionPhase::NotStarted),
            1 => Ok(ElectionPhase::VoterRegistration),
            2 => Ok(ElectionPhase::CandidateRegistration),
            3 => Ok(ElectionPhase::Voting),
            4 => Ok(ElectionPhase::Results),
            other => Err(ElectionError::Validation(format!(
                "unknown phase index {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_the_fixed_order() {
        let mut phase = ElectionPhase::NotStarted;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            phase = next;
            seen.push(phase);
        }
        assert_eq!(seen, ElectionPhase::ALL);
    }

    #[test]
    fn results_is_terminal() {
        assert!(ElectionPhase::Results.is_terminal());
        assert_eq!(ElectionPhase::Results.next(), None);
    }

    #[test]
    fn gating_predicates_match_their_phase() {
        assert!(ElectionPhase::VoterRegistration.can_register_voters());
        assert!(!ElectionPhase::CandidateRegistration.can_register_voters());
        assert!(ElectionPhase::CandidateRegistration.can_register_candidates());
        assert!(ElectionPhase::Voting.can_vote());
        assert!(!ElectionPhase::Results.can_vote());
        assert!(ElectionPhase::Results.results_available());
    }

    #[test]
    fn index_round_trip() {
        for phase in ElectionPhase::ALL {
            let idx = u8::from(phase);
            assert_eq!(ElectionPhase::try_from(idx).unwrap(), phase);
        }
        assert!(ElectionPhase::try_from(5).is_err());
    }
}
