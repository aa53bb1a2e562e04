//! Voter console.

use crate::error::ConsoleError;
use scrutin_controller::VoterSession;
use scrutin_ledger::ElectionLedger;
use scrutin_types::CandidateId;
use std::fmt::Write as _;

/// The voter-facing surface: the candidate board and the single vote.
///
/// Tallies are hidden until the election reaches `Results`; the board
/// shows `?` in place of the count during earlier phases.
pub struct VoterConsole<L: ElectionLedger> {
    session: VoterSession<L>,
}

impl<L: ElectionLedger> VoterConsole<L> {
    pub fn new(session: VoterSession<L>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &VoterSession<L> {
        &self.session
    }

    /// Cast this voter's single vote.
    pub fn vote(&self, candidate: CandidateId) -> Result<(), ConsoleError> {
        Ok(self.session.cast_vote(candidate)?)
    }

    /// Whether this voter has already voted, per the ledger.
    pub fn has_voted(&self) -> Result<bool, ConsoleError> {
        Ok(self.session.my_record()?.has_voted)
    }

    /// The candidate board as a text table.
    pub fn render_board(&self) -> Result<String, ConsoleError> {
        let snapshot = self.session.refresh_snapshot()?;
        let show_tallies = snapshot.phase.results_available();

        let mut out = String::new();
        writeln!(out, "Phase: {}", snapshot.phase).ok();
        if let Ok(record) = self.session.my_record() {
            if record.has_voted {
                writeln!(out, "You have already voted.").ok();
            }
        }
        writeln!(out, "id | first | last | party | age | votes").ok();
        for candidate in &snapshot.candidates {
            let votes = if show_tallies {
                candidate.vote_count.to_string()
            } else {
                "?".to_string()
            };
            writeln!(
                out,
                "{} | {} | {} | {} | {} | {}",
                candidate.id,
                candidate.first_name,
                candidate.last_name,
                candidate.political_party,
                candidate.age,
                votes
            )
            .ok();
        }
        Ok(out)
    }
}
