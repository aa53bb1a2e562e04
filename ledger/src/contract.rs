//! The `ElectionLedger` trait, mirroring the contract ABI surface.

use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{Candidate, CandidateId, ElectionError, ElectionPhase, Voter, WalletAddress};
use serde::{Deserialize, Serialize};

/// How a bulk registration call treats per-row failures.
///
/// Structural problems (empty required field) always reject the whole batch
/// before any row is applied; this policy only governs rows that fail the
/// ledger's own checks (duplicate address, underage voter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkPolicy {
    /// All-or-nothing: any failing row rolls back the entire batch.
    #[default]
    Atomic,
    /// Failing rows are skipped; the rest are applied.
    BestEffort,
}

/// The result of a bulk registration call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Number of rows applied.
    pub accepted: usize,
    /// Rows that were rejected, with the row index and the ledger's reason.
    /// Always empty under [`BulkPolicy::Atomic`] (the whole call fails instead).
    pub rejected: Vec<(usize, ElectionError)>,
}

/// Authoritative store of election phase, voters, candidates, and tallies.
///
/// Mirrors the deployed contract's ABI. Mutating calls carry the caller's
/// wallet address, the sender of the signed transaction; reads are free
/// calls. Rejections (`Unauthorized`, wrong phase, double vote) are the
/// normal failure path and leave state untouched.
pub trait ElectionLedger: Send + Sync {
    /// The admin address fixed at deployment.
    fn admin(&self) -> Result<WalletAddress, ElectionError>;

    /// The current lifecycle phase.
    fn current_phase(&self) -> Result<ElectionPhase, ElectionError>;

    /// Total votes recorded so far; equals the sum of all candidate tallies.
    fn total_votes(&self) -> Result<u64, ElectionError>;

    /// Number of registered candidates.
    fn candidate_count(&self) -> Result<u64, ElectionError>;

    /// Addresses of all registered voters, in registration order.
    fn voter_addresses(&self) -> Result<Vec<WalletAddress>, ElectionError>;

    /// Look up one voter; `NotRegistered` if unknown.
    fn get_voter(&self, address: &WalletAddress) -> Result<Voter, ElectionError>;

    /// Look up one candidate; `UnknownCandidate` if the id is unassigned.
    fn get_candidate(&self, id: CandidateId) -> Result<Candidate, ElectionError>;

    /// Begin the election: `NotStarted` → `VoterRegistration`. Admin only.
    fn start_election(&self, caller: &WalletAddress) -> Result<(), ElectionError>;

    /// Advance one step through the fixed phase order. Admin only; fails
    /// with `TerminalPhase` once the election has reached `Results`.
    fn next_phase(&self, caller: &WalletAddress) -> Result<ElectionPhase, ElectionError>;

    /// Full reset: allowed only from `Results`. Clears voters, candidates,
    /// and tallies, and returns the phase to `NotStarted`. Admin only.
    fn reset_election(&self, caller: &WalletAddress) -> Result<(), ElectionError>;

    /// Register a single voter. Admin only, `VoterRegistration` phase only.
    fn add_voter(
        &self,
        caller: &WalletAddress,
        registration: VoterRegistration,
    ) -> Result<(), ElectionError>;

    /// Register a batch of voters under the configured [`BulkPolicy`].
    fn add_voters_bulk(
        &self,
        caller: &WalletAddress,
        batch: Vec<VoterRegistration>,
    ) -> Result<BulkOutcome, ElectionError>;

    /// Register a single candidate, assigning the next sequential id.
    /// Admin only, `CandidateRegistration` phase only.
    fn add_candidate(
        &self,
        caller: &WalletAddress,
        registration: CandidateRegistration,
    ) -> Result<CandidateId, ElectionError>;

    /// Register a batch of candidates under the configured [`BulkPolicy`].
    fn add_candidates_bulk(
        &self,
        caller: &WalletAddress,
        batch: Vec<CandidateRegistration>,
    ) -> Result<BulkOutcome, ElectionError>;

    /// Cast the caller's single vote for a candidate. Registered voters
    /// only, `Voting` phase only; `AlreadyVoted` on a second attempt.
    fn vote(&self, caller: &WalletAddress, id: CandidateId) -> Result<(), ElectionError>;

    /// The winning candidate id. Meaningful only once the phase is
    /// `Results`; ties break toward the lowest id (first registered).
    fn winner_candidate_id(&self) -> Result<CandidateId, ElectionError>;
}
