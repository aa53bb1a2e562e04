//! The phase controller proper.

use crate::error::ControllerError;
use crate::snapshot::{ElectionSnapshot, SnapshotStore};

use scrutin_ingest::{CandidateBatch, VoterBatch};
use scrutin_ledger::{BulkOutcome, ElectionLedger};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{Candidate, CandidateId, ElectionPhase, Timestamp, WalletAddress};
use std::sync::Arc;
use tokio::sync::watch;

/// The derived election outcome, available once the phase is `Results`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinnerRecord {
    pub candidate: Candidate,
}

/// Client-side driver of the election state machine.
///
/// Every mutating operation carries the caller's address and goes straight
/// to the ledger, which is the authority of record; the controller's own
/// checks only catch what never needs a ledger round-trip (misaligned
/// batches). After each successful mutation the snapshot is refreshed so
/// observers converge on the post-mutation state.
pub struct PhaseController<L: ElectionLedger> {
    ledger: Arc<L>,
    snapshots: SnapshotStore,
}

impl<L: ElectionLedger> PhaseController<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            ledger,
            snapshots: SnapshotStore::new(),
        }
    }

    /// The ledger this controller drives.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The most recently published snapshot.
    pub fn latest_snapshot(&self) -> Arc<ElectionSnapshot> {
        self.snapshots.latest()
    }

    /// Subscribe to snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ElectionSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Re-fetch phase, voters, candidates, and tallies from the ledger and
    /// publish them as one immutable snapshot.
    ///
    /// Read-only and safe to call repeatedly. The phase is re-read after
    /// the list fetches; if it moved mid-fetch the round is retried so a
    /// snapshot never mixes state from two phases.
    pub fn refresh_snapshot(&self) -> Result<Arc<ElectionSnapshot>, ControllerError> {
        loop {
            let phase = self.ledger.current_phase()?;

            let mut voters = Vec::new();
            for address in self.ledger.voter_addresses()? {
                voters.push(self.ledger.get_voter(&address)?);
            }

            let mut candidates = Vec::new();
            for id in 1..=self.ledger.candidate_count()? {
                candidates.push(self.ledger.get_candidate(id)?);
            }

            let total_votes = self.ledger.total_votes()?;
            // An election can reach Results with nobody registered; that is
            // a valid state with no winner, not a refresh failure.
            let winner = if phase.results_available() && !candidates.is_empty() {
                Some(self.ledger.winner_candidate_id()?)
            } else {
                None
            };

            if self.ledger.current_phase()? != phase {
                tracing::debug!("phase moved during snapshot fetch, retrying");
                continue;
            }

            let snapshot = ElectionSnapshot {
                phase,
                voters,
                candidates,
                total_votes,
                winner,
                fetched_at: Timestamp::now(),
            };
            return Ok(self.snapshots.publish(snapshot));
        }
    }

    fn refresh_after_mutation(&self) {
        // A stale snapshot is tolerable; the mutation itself succeeded.
        if let Err(err) = self.refresh_snapshot() {
            tracing::warn!(%err, "snapshot refresh after mutation failed");
        }
    }

    /// `NotStarted` → `VoterRegistration`. Admin only.
    pub fn start_election(&self, caller: &WalletAddress) -> Result<(), ControllerError> {
        self.ledger.start_election(caller)?;
        self.refresh_after_mutation();
        Ok(())
    }

    /// Advance one step through the fixed phase order. Admin only.
    pub fn advance_phase(&self, caller: &WalletAddress) -> Result<ElectionPhase, ControllerError> {
        let phase = self.ledger.next_phase(caller)?;
        self.refresh_after_mutation();
        Ok(phase)
    }

    /// Full reset from `Results` back to `NotStarted`. Admin only.
    pub fn reset_election(&self, caller: &WalletAddress) -> Result<(), ControllerError> {
        self.ledger.reset_election(caller)?;
        self.refresh_after_mutation();
        Ok(())
    }

    /// Register a single voter. Admin only, `VoterRegistration` only.
    pub fn register_voter(
        &self,
        caller: &WalletAddress,
        registration: VoterRegistration,
    ) -> Result<(), ControllerError> {
        self.ledger.add_voter(caller, registration)?;
        self.refresh_after_mutation();
        Ok(())
    }

    /// Submit a parsed voter batch as one bulk call.
    ///
    /// The controller validates batch shape (aligned parallel lists)
    /// before submission; per-row enforcement is the ledger's.
    pub fn register_voters_bulk(
        &self,
        caller: &WalletAddress,
        batch: VoterBatch,
    ) -> Result<BulkOutcome, ControllerError> {
        let registrations = batch.into_registrations()?;
        let outcome = self.ledger.add_voters_bulk(caller, registrations)?;
        self.refresh_after_mutation();
        Ok(outcome)
    }

    /// Register a single candidate. Admin only, `CandidateRegistration` only.
    pub fn register_candidate(
        &self,
        caller: &WalletAddress,
        registration: CandidateRegistration,
    ) -> Result<CandidateId, ControllerError> {
        let id = self.ledger.add_candidate(caller, registration)?;
        self.refresh_after_mutation();
        Ok(id)
    }

    /// Submit a parsed candidate batch as one bulk call.
    pub fn register_candidates_bulk(
        &self,
        caller: &WalletAddress,
        batch: CandidateBatch,
    ) -> Result<BulkOutcome, ControllerError> {
        let registrations = batch.into_registrations()?;
        let outcome = self.ledger.add_candidates_bulk(caller, registrations)?;
        self.refresh_after_mutation();
        Ok(outcome)
    }

    /// Cast the caller's single vote. Registered voters only, `Voting` only.
    pub fn cast_vote(
        &self,
        caller: &WalletAddress,
        candidate: CandidateId,
    ) -> Result<(), ControllerError> {
        self.ledger.vote(caller, candidate)?;
        self.refresh_after_mutation();
        Ok(())
    }

    /// The election outcome. Meaningful only once the phase is `Results`;
    /// earlier calls surface the ledger's phase rejection.
    pub fn results(&self) -> Result<WinnerRecord, ControllerError> {
        let id = self.ledger.winner_candidate_id()?;
        let candidate = self.ledger.get_candidate(id)?;
        Ok(WinnerRecord { candidate })
    }
}
