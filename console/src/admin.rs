//! Administrator console.

use crate::error::ConsoleError;
use scrutin_controller::{AdminSession, WinnerRecord};
use scrutin_ingest::{read_candidates_file, read_voters_file, SkippedRow};
use scrutin_ledger::ElectionLedger;
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{ElectionError, ElectionPhase, Timestamp};
use std::fmt::Write as _;
use std::path::Path;

/// What happened to one CSV bulk registration, end to end: rows dropped at
/// parse time, rows rejected by the ledger, and rows applied.
#[derive(Debug)]
pub struct CsvRegistrationSummary {
    pub accepted: usize,
    pub parse_skipped: Vec<SkippedRow>,
    pub ledger_rejected: Vec<(usize, ElectionError)>,
}

/// The admin-facing surface: phase controls, registration (single and CSV
/// bulk), and text views of the election state.
pub struct AdminConsole<L: ElectionLedger> {
    session: AdminSession<L>,
}

impl<L: ElectionLedger> AdminConsole<L> {
    pub fn new(session: AdminSession<L>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &AdminSession<L> {
        &self.session
    }

    // ── Phase controls ─────────────────────────────────────────────────

    pub fn start_election(&self) -> Result<(), ConsoleError> {
        Ok(self.session.start_election()?)
    }

    pub fn advance_phase(&self) -> Result<ElectionPhase, ConsoleError> {
        Ok(self.session.advance_phase()?)
    }

    pub fn reset_election(&self) -> Result<(), ConsoleError> {
        Ok(self.session.reset_election()?)
    }

    // ── Registration ───────────────────────────────────────────────────

    pub fn register_voter(&self, registration: VoterRegistration) -> Result<(), ConsoleError> {
        Ok(self.session.register_voter(registration)?)
    }

    pub fn register_candidate(
        &self,
        registration: CandidateRegistration,
    ) -> Result<u64, ConsoleError> {
        Ok(self.session.register_candidate(registration)?)
    }

    /// Bulk-register voters from a CSV file.
    pub fn register_voters_from_csv(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<CsvRegistrationSummary, ConsoleError> {
        let ingested = read_voters_file(path)?;
        let parse_skipped = ingested.skipped;
        let outcome = self.session.register_voters_bulk(ingested.batch)?;
        Ok(CsvRegistrationSummary {
            accepted: outcome.accepted,
            parse_skipped,
            ledger_rejected: outcome.rejected,
        })
    }

    /// Bulk-register candidates from a CSV file.
    pub fn register_candidates_from_csv(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<CsvRegistrationSummary, ConsoleError> {
        let ingested = read_candidates_file(path)?;
        let parse_skipped = ingested.skipped;
        let outcome = self.session.register_candidates_bulk(ingested.batch)?;
        Ok(CsvRegistrationSummary {
            accepted: outcome.accepted,
            parse_skipped,
            ledger_rejected: outcome.rejected,
        })
    }

    pub fn results(&self) -> Result<WinnerRecord, ConsoleError> {
        Ok(self.session.results()?)
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// One-screen overview: phase, total votes, winner banner in Results.
    pub fn render_overview(&self) -> Result<String, ConsoleError> {
        let snapshot = self.session.refresh_snapshot()?;
        let mut out = String::new();
        writeln!(out, "Phase: {}", snapshot.phase).ok();
        writeln!(
            out,
            "Snapshot age: {}s",
            snapshot.fetched_at.elapsed_since(Timestamp::now())
        )
        .ok();
        writeln!(out, "Total votes: {}", snapshot.total_votes).ok();
        writeln!(
            out,
            "Registered: {} voters, {} candidates",
            snapshot.voters.len(),
            snapshot.candidates.len()
        )
        .ok();
        if let Some(winner) = snapshot.winner_candidate() {
            writeln!(
                out,
                "Winner: #{} {} {} ({} votes)",
                winner.id, winner.first_name, winner.last_name, winner.vote_count
            )
            .ok();
        }
        Ok(out)
    }

    /// Voter roll as a text table.
    pub fn render_voter_table(&self) -> Result<String, ConsoleError> {
        let snapshot = self.session.refresh_snapshot()?;
        let mut out = String::from("address | first | last | id card | age | voted\n");
        for voter in &snapshot.voters {
            writeln!(
                out,
                "{} | {} | {} | {} | {} | {}",
                voter.address,
                voter.first_name,
                voter.last_name,
                voter.id_card_number,
                voter.age,
                voter.has_voted
            )
            .ok();
        }
        Ok(out)
    }

    /// Candidate list as a text table; tallies always visible to the admin.
    pub fn render_candidate_table(&self) -> Result<String, ConsoleError> {
        let snapshot = self.session.refresh_snapshot()?;
        let mut out = String::from("id | first | last | party | age | votes\n");
        for candidate in &snapshot.candidates {
            writeln!(
                out,
                "{} | {} | {} | {} | {} | {}",
                candidate.id,
                candidate.first_name,
                candidate.last_name,
                candidate.political_party,
                candidate.age,
                candidate.vote_count
            )
            .ok();
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutin_controller::{PhaseController, Session};
    use scrutin_ledger::MemoryLedger;
    use scrutin_types::{Role, WalletAddress};
    use std::io::Write;
    use std::sync::Arc;

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::parse(format!("0x{:040x}", n)).unwrap()
    }

    fn console() -> AdminConsole<MemoryLedger> {
        let ctrl = Arc::new(PhaseController::new(Arc::new(MemoryLedger::new(addr(0)))));
        match Session::from_role(Role::Admin, addr(0), ctrl) {
            Session::Admin(s) => AdminConsole::new(s),
            Session::Voter(_) => unreachable!(),
        }
    }

    #[test]
    fn overview_reflects_phase_and_counts() {
        let console = console();
        console.start_election().unwrap();
        console
            .register_voter(VoterRegistration {
                address: addr(1),
                first_name: "Alice".into(),
                last_name: "Martin".into(),
                id_card_number: "ID001".into(),
                age: 34,
            })
            .unwrap();

        let overview = console.render_overview().unwrap();
        assert!(overview.contains("Phase: VoterRegistration"));
        assert!(overview.contains("Snapshot age:"));
        assert!(overview.contains("1 voters"));
        assert!(!overview.contains("Winner:"));
    }

    #[test]
    fn csv_registration_reports_all_three_buckets() {
        let console = console();
        console.start_election().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "address,firstName,lastName,idCardNumber,age\n\
             0x0000000000000000000000000000000000000001,Alice,Martin,ID001,34\n\
             0x0000000000000000000000000000000000000002,Bruno,Duval\n"
        )
        .unwrap();

        let summary = console.register_voters_from_csv(file.path()).unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.parse_skipped.len(), 1);
        assert!(summary.ledger_rejected.is_empty());

        let table = console.render_voter_table().unwrap();
        assert!(table.contains("Alice"));
        assert!(!table.contains("Bruno"));
    }
}
