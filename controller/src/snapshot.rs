//! Immutable election snapshots and their replacement channel.

use scrutin_types::{Candidate, CandidateId, ElectionPhase, Timestamp, Voter};
use std::sync::Arc;
use tokio::sync::watch;

/// A complete, immutable view of the election at one point in time.
///
/// Snapshots are always built whole from a round of ledger reads and then
/// published by replacement; consumers never observe a half-updated view.
#[derive(Clone, Debug)]
pub struct ElectionSnapshot {
    pub phase: ElectionPhase,
    /// Voters in registration order.
    pub voters: Vec<Voter>,
    /// Candidates in id (registration) order.
    pub candidates: Vec<Candidate>,
    pub total_votes: u64,
    /// Winner id, present only once the phase is `Results`.
    pub winner: Option<CandidateId>,
    pub fetched_at: Timestamp,
}

impl ElectionSnapshot {
    /// The pre-first-refresh snapshot: an election that has not started.
    pub fn empty() -> Self {
        Self {
            phase: ElectionPhase::NotStarted,
            voters: Vec::new(),
            candidates: Vec::new(),
            total_votes: 0,
            winner: None,
            fetched_at: Timestamp::EPOCH,
        }
    }

    /// The winning candidate's record, when the winner is known and listed.
    pub fn winner_candidate(&self) -> Option<&Candidate> {
        let id = self.winner?;
        self.candidates.iter().find(|c| c.id == id)
    }
}

/// Holds the latest snapshot and notifies subscribers on replacement.
///
/// Backed by a `tokio::sync::watch` channel: publishing is last-writer-wins
/// and subscribers only ever see whole snapshots.
pub struct SnapshotStore {
    tx: watch::Sender<Arc<ElectionSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(ElectionSnapshot::empty()));
        Self { tx }
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<ElectionSnapshot> {
        self.tx.borrow().clone()
    }

    /// Replace the current snapshot and wake subscribers.
    pub fn publish(&self, snapshot: ElectionSnapshot) -> Arc<ElectionSnapshot> {
        let snapshot = Arc::new(snapshot);
        // send only fails with no receivers; the store itself keeps the
        // value readable via `latest`, so that is not an error here.
        let _ = self.tx.send(snapshot.clone());
        snapshot
    }

    /// Subscribe to snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ElectionSnapshot>> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
