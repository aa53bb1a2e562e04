use proptest::prelude::*;

use scrutin_ledger::{BulkPolicy, ElectionLedger, MemoryLedger};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{ElectionPhase, WalletAddress};

fn addr(n: u64) -> WalletAddress {
    WalletAddress::parse(format!("0x{:040x}", n + 1)).unwrap()
}

fn voter_reg(n: u64) -> VoterRegistration {
    VoterRegistration {
        address: addr(n),
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        id_card_number: format!("ID{n}"),
        age: 30,
    }
}

fn candidate_reg(n: u64) -> CandidateRegistration {
    CandidateRegistration {
        first_name: format!("Cand{n}"),
        last_name: format!("Idate{n}"),
        address: addr(1000 + n),
        certification_code: format!("CERT{n}"),
        political_party: format!("Party{}", n % 3),
        age: 45,
    }
}

/// Set up an election in the Voting phase with `voters` voters and
/// `candidates` candidates. Admin is addr(0); voters are addr(1..=voters).
fn voting_ledger(voters: u64, candidates: u64, policy: BulkPolicy) -> MemoryLedger {
    let ledger = MemoryLedger::with_options(addr(0), 18, policy);
    let admin = addr(0);
    ledger.start_election(&admin).unwrap();
    let batch: Vec<_> = (1..=voters).map(voter_reg).collect();
    ledger.add_voters_bulk(&admin, batch).unwrap();
    ledger.next_phase(&admin).unwrap();
    let batch: Vec<_> = (0..candidates).map(candidate_reg).collect();
    ledger.add_candidates_bulk(&admin, batch).unwrap();
    ledger.next_phase(&admin).unwrap();
    ledger
}

/// Σ candidate tallies == voters with has_voted == total_votes.
fn assert_tally_invariant(ledger: &MemoryLedger) {
    let tally_sum: u64 = (1..=ledger.candidate_count().unwrap())
        .map(|id| ledger.get_candidate(id).unwrap().vote_count)
        .sum();
    let voted = ledger
        .voter_addresses()
        .unwrap()
        .iter()
        .filter(|a| ledger.get_voter(a).unwrap().has_voted)
        .count() as u64;
    assert_eq!(tally_sum, voted);
    assert_eq!(tally_sum, ledger.total_votes().unwrap());
}

proptest! {
    /// Any interleaving of votes (valid and invalid) preserves the
    /// tally-sum invariant, and each voter's vote lands at most once.
    #[test]
    fn tally_sum_invariant_under_arbitrary_votes(
        voters in 1u64..20,
        candidates in 1u64..8,
        attempts in proptest::collection::vec((0u64..25, 0u64..10), 0..60),
    ) {
        let ledger = voting_ledger(voters, candidates, BulkPolicy::Atomic);
        for (voter_n, candidate_n) in attempts {
            // Some of these are unregistered voters or unknown candidate
            // ids; rejections must leave state consistent.
            let _ = ledger.vote(&addr(voter_n), candidate_n);
            assert_tally_invariant(&ledger);
        }
    }

    /// A voter's second vote always fails and changes nothing.
    #[test]
    fn second_vote_is_rejected(
        voters in 1u64..10,
        candidates in 1u64..5,
        first in 1u64..5,
        second in 1u64..5,
    ) {
        let ledger = voting_ledger(voters, candidates, BulkPolicy::Atomic);
        let first = (first % candidates) + 1;
        let second = (second % candidates) + 1;
        ledger.vote(&addr(1), first).unwrap();
        let before = ledger.total_votes().unwrap();
        prop_assert!(ledger.vote(&addr(1), second).is_err());
        prop_assert_eq!(ledger.total_votes().unwrap(), before);
    }

    /// Bulk registration: under BestEffort the accepted count plus the
    /// rejected count always equals the batch size, and only accepted rows
    /// appear in the voter list.
    #[test]
    fn best_effort_accounts_for_every_row(
        unique in 1u64..15,
        dupes in 0usize..10,
    ) {
        let ledger = MemoryLedger::with_options(addr(0), 18, BulkPolicy::BestEffort);
        let admin = addr(0);
        ledger.start_election(&admin).unwrap();
        let mut batch: Vec<_> = (1..=unique).map(voter_reg).collect();
        for _ in 0..dupes {
            batch.push(voter_reg(1));
        }
        let total = batch.len();
        let outcome = ledger.add_voters_bulk(&admin, batch).unwrap();
        prop_assert_eq!(outcome.accepted + outcome.rejected.len(), total);
        prop_assert_eq!(outcome.accepted as u64, unique);
        prop_assert_eq!(ledger.voter_addresses().unwrap().len() as u64, unique);
    }

    /// Reset from Results always restores the pristine state.
    #[test]
    fn reset_restores_pristine_state(
        voters in 1u64..10,
        candidates in 1u64..5,
        votes in 0u64..10,
    ) {
        let ledger = voting_ledger(voters, candidates, BulkPolicy::Atomic);
        let admin = addr(0);
        for v in 1..=votes.min(voters) {
            ledger.vote(&addr(v), 1).unwrap();
        }
        ledger.next_phase(&admin).unwrap();
        ledger.reset_election(&admin).unwrap();
        prop_assert_eq!(ledger.current_phase().unwrap(), ElectionPhase::NotStarted);
        prop_assert!(ledger.voter_addresses().unwrap().is_empty());
        prop_assert_eq!(ledger.candidate_count().unwrap(), 0);
        prop_assert_eq!(ledger.total_votes().unwrap(), 0);
    }
}
