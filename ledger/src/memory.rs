//! In-memory reference ledger.
//!
//! Enforces every election invariant under a single `RwLock`: phase gating,
//! admin-only transitions, duplicate detection, minimum voting age, and the
//! one-vote-per-voter rule. Used as the dev-mode ledger and as the
//! authoritative collaborator in tests.

use crate::contract::{BulkOutcome, BulkPolicy, ElectionLedger};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{Candidate, CandidateId, ElectionError, ElectionPhase, Voter, WalletAddress};
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default minimum voting age.
pub const DEFAULT_MIN_AGE: u8 = 18;

/// Mutable election state, guarded by the ledger's lock.
#[derive(Debug)]
struct ElectionState {
    phase: ElectionPhase,
    voters: HashMap<WalletAddress, Voter>,
    /// Registration order, for stable voter listings.
    voter_order: Vec<WalletAddress>,
    /// Keyed by id; BTreeMap keeps candidates in id (registration) order.
    candidates: BTreeMap<CandidateId, Candidate>,
    next_candidate_id: CandidateId,
    total_votes: u64,
}

impl ElectionState {
    fn new() -> Self {
        Self {
            phase: ElectionPhase::NotStarted,
            voters: HashMap::new(),
            voter_order: Vec::new(),
            candidates: BTreeMap::new(),
            next_candidate_id: 1,
            total_votes: 0,
        }
    }
}

/// In-memory implementation of [`ElectionLedger`].
pub struct MemoryLedger {
    admin: WalletAddress,
    min_age: u8,
    bulk_policy: BulkPolicy,
    state: RwLock<ElectionState>,
}

impl MemoryLedger {
    /// Create a ledger with the given admin, the default minimum age, and
    /// atomic bulk registration.
    pub fn new(admin: WalletAddress) -> Self {
        Self::with_options(admin, DEFAULT_MIN_AGE, BulkPolicy::default())
    }

    /// Create a ledger with explicit minimum age and bulk policy.
    pub fn with_options(admin: WalletAddress, min_age: u8, bulk_policy: BulkPolicy) -> Self {
        Self {
            admin,
            min_age,
            bulk_policy,
            state: RwLock::new(ElectionState::new()),
        }
    }

    /// The configured minimum voting age.
    pub fn min_age(&self) -> u8 {
        self.min_age
    }

    /// The configured bulk registration policy.
    pub fn bulk_policy(&self) -> BulkPolicy {
        self.bulk_policy
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ElectionState>, ElectionError> {
        self.state
            .read()
            .map_err(|_| ElectionError::RemoteFailure("ledger state lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ElectionState>, ElectionError> {
        self.state
            .write()
            .map_err(|_| ElectionError::RemoteFailure("ledger state lock poisoned".into()))
    }

    fn require_admin(&self, caller: &WalletAddress) -> Result<(), ElectionError> {
        if caller != &self.admin {
            return Err(ElectionError::Unauthorized);
        }
        Ok(())
    }

    /// Validate one voter registration against the current state plus the
    /// addresses already accepted earlier in the same batch.
    fn check_voter(
        &self,
        state: &ElectionState,
        seen_in_batch: &[WalletAddress],
        reg: &VoterRegistration,
    ) -> Result<(), ElectionError> {
        if !reg.is_complete() {
            return Err(ElectionError::Validation(
                "voter registration has an empty required field".into(),
            ));
        }
        if reg.age < self.min_age {
            return Err(ElectionError::Validation(format!(
                "age {} below minimum {}",
                reg.age, self.min_age
            )));
        }
        if state.voters.contains_key(&reg.address) || seen_in_batch.contains(&reg.address) {
            return Err(ElectionError::DuplicateVoter(reg.address.to_string()));
        }
        Ok(())
    }

    /// Validate one candidate registration, same shape as [`check_voter`].
    fn check_candidate(
        &self,
        state: &ElectionState,
        seen_in_batch: &[WalletAddress],
        reg: &CandidateRegistration,
    ) -> Result<(), ElectionError> {
        if !reg.is_complete() {
            return Err(ElectionError::Validation(
                "candidate registration has an empty required field".into(),
            ));
        }
        let already = state
            .candidates
            .values()
            .any(|c| c.address == reg.address)
            || seen_in_batch.contains(&reg.address);
        if already {
            return Err(ElectionError::DuplicateCandidate(reg.address.to_string()));
        }
        Ok(())
    }
}

impl ElectionLedger for MemoryLedger {
    fn admin(&self) -> Result<WalletAddress, ElectionError> {
        Ok(self.admin.clone())
    }

    fn current_phase(&self) -> Result<ElectionPhase, ElectionError> {
        Ok(self.read()?.phase)
    }

    fn total_votes(&self) -> Result<u64, ElectionError> {
        Ok(self.read()?.total_votes)
    }

    fn candidate_count(&self) -> Result<u64, ElectionError> {
        Ok(self.read()?.candidates.len() as u64)
    }

    fn voter_addresses(&self) -> Result<Vec<WalletAddress>, ElectionError> {
        Ok(self.read()?.voter_order.clone())
    }

    fn get_voter(&self, address: &WalletAddress) -> Result<Voter, ElectionError> {
        self.read()?
            .voters
            .get(address)
            .cloned()
            .ok_or_else(|| ElectionError::NotRegistered(address.to_string()))
    }

    fn get_candidate(&self, id: CandidateId) -> Result<Candidate, ElectionError> {
        self.read()?
            .candidates
            .get(&id)
            .cloned()
            .ok_or(ElectionError::UnknownCandidate(id))
    }

    fn start_election(&self, caller: &WalletAddress) -> Result<(), ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if state.phase != ElectionPhase::NotStarted {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        state.phase = ElectionPhase::VoterRegistration;
        tracing::info!(phase = %state.phase, "election started");
        Ok(())
    }

    fn next_phase(&self, caller: &WalletAddress) -> Result<ElectionPhase, ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        let next = state.phase.next().ok_or(ElectionError::TerminalPhase)?;
        let previous = state.phase;
        state.phase = next;
        tracing::info!(from = %previous, to = %next, "phase advanced");
        Ok(next)
    }

    fn reset_election(&self, caller: &WalletAddress) -> Result<(), ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if state.phase != ElectionPhase::Results {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        *state = ElectionState::new();
        tracing::info!("election reset to NotStarted");
        Ok(())
    }

    fn add_voter(
        &self,
        caller: &WalletAddress,
        registration: VoterRegistration,
    ) -> Result<(), ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if !state.phase.can_register_voters() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        self.check_voter(&state, &[], &registration)?;
        let address = registration.address.clone();
        state.voters.insert(address.clone(), registration.into());
        state.voter_order.push(address);
        Ok(())
    }

    fn add_voters_bulk(
        &self,
        caller: &WalletAddress,
        batch: Vec<VoterRegistration>,
    ) -> Result<BulkOutcome, ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if !state.phase.can_register_voters() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        // Structural problems reject the whole batch regardless of policy.
        if let Some(reg) = batch.iter().find(|r| !r.is_complete()) {
            return Err(ElectionError::Validation(format!(
                "incomplete registration for {}",
                reg.address
            )));
        }

        let mut accepted: Vec<VoterRegistration> = Vec::with_capacity(batch.len());
        let mut accepted_addrs: Vec<WalletAddress> = Vec::with_capacity(batch.len());
        let mut rejected = Vec::new();
        for (idx, reg) in batch.into_iter().enumerate() {
            match self.check_voter(&state, &accepted_addrs, &reg) {
                Ok(()) => {
                    accepted_addrs.push(reg.address.clone());
                    accepted.push(reg);
                }
                Err(err) => match self.bulk_policy {
                    BulkPolicy::Atomic => return Err(err),
                    BulkPolicy::BestEffort => {
                        tracing::warn!(row = idx, %err, "bulk voter row rejected");
                        rejected.push((idx, err));
                    }
                },
            }
        }

        let count = accepted.len();
        for reg in accepted {
            let address = reg.address.clone();
            state.voters.insert(address.clone(), reg.into());
            state.voter_order.push(address);
        }
        Ok(BulkOutcome {
            accepted: count,
            rejected,
        })
    }

    fn add_candidate(
        &self,
        caller: &WalletAddress,
        registration: CandidateRegistration,
    ) -> Result<CandidateId, ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if !state.phase.can_register_candidates() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        self.check_candidate(&state, &[], &registration)?;
        let id = state.next_candidate_id;
        state.next_candidate_id += 1;
        state.candidates.insert(id, registration.into_candidate(id));
        Ok(id)
    }

    fn add_candidates_bulk(
        &self,
        caller: &WalletAddress,
        batch: Vec<CandidateRegistration>,
    ) -> Result<BulkOutcome, ElectionError> {
        self.require_admin(caller)?;
        let mut state = self.write()?;
        if !state.phase.can_register_candidates() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        if let Some(reg) = batch.iter().find(|r| !r.is_complete()) {
            return Err(ElectionError::Validation(format!(
                "incomplete registration for {}",
                reg.address
            )));
        }

        let mut accepted: Vec<CandidateRegistration> = Vec::with_capacity(batch.len());
        let mut accepted_addrs: Vec<WalletAddress> = Vec::with_capacity(batch.len());
        let mut rejected = Vec::new();
        for (idx, reg) in batch.into_iter().enumerate() {
            match self.check_candidate(&state, &accepted_addrs, &reg) {
                Ok(()) => {
                    accepted_addrs.push(reg.address.clone());
                    accepted.push(reg);
                }
                Err(err) => match self.bulk_policy {
                    BulkPolicy::Atomic => return Err(err),
                    BulkPolicy::BestEffort => {
                        tracing::warn!(row = idx, %err, "bulk candidate row rejected");
                        rejected.push((idx, err));
                    }
                },
            }
        }

        let count = accepted.len();
        for reg in accepted {
            let id = state.next_candidate_id;
            state.next_candidate_id += 1;
            state.candidates.insert(id, reg.into_candidate(id));
        }
        Ok(BulkOutcome {
            accepted: count,
            rejected,
        })
    }

    fn vote(&self, caller: &WalletAddress, id: CandidateId) -> Result<(), ElectionError> {
        let mut state = self.write()?;
        if !state.phase.can_vote() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        {
            let voter = state
                .voters
                .get(caller)
                .ok_or_else(|| ElectionError::NotRegistered(caller.to_string()))?;
            if voter.has_voted {
                return Err(ElectionError::AlreadyVoted(caller.to_string()));
            }
        }
        if !state.candidates.contains_key(&id) {
            return Err(ElectionError::UnknownCandidate(id));
        }

        // All checks passed; apply both sides of the vote under the same
        // write guard so tallies and has_voted flags never diverge.
        if let Some(candidate) = state.candidates.get_mut(&id) {
            candidate.vote_count += 1;
        }
        if let Some(voter) = state.voters.get_mut(caller) {
            voter.has_voted = true;
        }
        state.total_votes += 1;
        tracing::debug!(voter = %caller, candidate = id, "vote recorded");
        Ok(())
    }

    fn winner_candidate_id(&self) -> Result<CandidateId, ElectionError> {
        let state = self.read()?;
        if !state.phase.results_available() {
            return Err(ElectionError::InvalidTransition { phase: state.phase });
        }
        // Max tally; ties break toward the lowest (first registered) id,
        // so for equal tallies the lower id compares as greater.
        state
            .candidates
            .values()
            .max_by(|a, b| a.vote_count.cmp(&b.vote_count).then(b.id.cmp(&a.id)))
            .map(|c| c.id)
            .ok_or_else(|| ElectionError::Validation("no candidates registered".into()))
    }
}
