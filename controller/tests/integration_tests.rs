//! End-to-end election lifecycle tests: controller → ledger → snapshot,
//! wiring the pieces the way the consoles do.

use scrutin_controller::{PhaseController, Session};
use scrutin_ingest::{parse_candidates, parse_voters};
use scrutin_ledger::{BulkPolicy, ElectionLedger, MemoryLedger};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{ElectionError, ElectionPhase, Role, WalletAddress};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn addr(n: u8) -> WalletAddress {
    WalletAddress::parse(format!("0x{:040x}", n)).unwrap()
}

fn voter_reg(n: u8, age: u8) -> VoterRegistration {
    VoterRegistration {
        address: addr(n),
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        id_card_number: format!("ID{n:04}"),
        age,
    }
}

fn candidate_reg(n: u8) -> CandidateRegistration {
    CandidateRegistration {
        first_name: format!("Cand{n}"),
        last_name: format!("Idate{n}"),
        address: addr(100 + n),
        certification_code: format!("CERT{n:03}"),
        political_party: "Unity".into(),
        age: 50,
    }
}

fn setup() -> Arc<PhaseController<MemoryLedger>> {
    Arc::new(PhaseController::new(Arc::new(MemoryLedger::new(addr(0)))))
}

// ---------------------------------------------------------------------------
// The full lifecycle scenario
// ---------------------------------------------------------------------------

#[test]
fn full_election_lifecycle() {
    let ctrl = setup();
    let admin = addr(0);
    let v1 = addr(1);

    // NotStarted → VoterRegistration.
    ctrl.start_election(&admin).unwrap();
    assert_eq!(
        ctrl.latest_snapshot().phase,
        ElectionPhase::VoterRegistration
    );

    // V1 (age 30) registers; V2 (age 15, minimum 18) is rejected.
    ctrl.register_voter(&admin, voter_reg(1, 30)).unwrap();
    let err = ctrl.register_voter(&admin, voter_reg(2, 15)).unwrap_err();
    assert!(matches!(
        err,
        scrutin_controller::ControllerError::Ledger(ElectionError::Validation(_))
    ));
    assert_eq!(ctrl.latest_snapshot().voters.len(), 1);

    // Advance and register candidate C1.
    ctrl.advance_phase(&admin).unwrap();
    let c1 = ctrl.register_candidate(&admin, candidate_reg(1)).unwrap();
    assert_eq!(c1, 1);

    // Advance to Voting; V1 votes for C1.
    ctrl.advance_phase(&admin).unwrap();
    ctrl.cast_vote(&v1, c1).unwrap();
    let snap = ctrl.latest_snapshot();
    assert_eq!(snap.candidates[0].vote_count, 1);
    assert!(snap.voters[0].has_voted);
    assert_eq!(snap.total_votes, 1);

    // Second vote fails, tally unchanged.
    let err = ctrl.cast_vote(&v1, c1).unwrap_err();
    assert!(matches!(
        err,
        scrutin_controller::ControllerError::Ledger(ElectionError::AlreadyVoted(_))
    ));
    assert_eq!(ctrl.latest_snapshot().candidates[0].vote_count, 1);

    // Advance to Results; winner is C1, snapshot carries it.
    ctrl.advance_phase(&admin).unwrap();
    let winner = ctrl.results().unwrap();
    assert_eq!(winner.candidate.id, c1);
    assert_eq!(ctrl.latest_snapshot().winner, Some(c1));

    // Results is terminal; only reset leaves it.
    assert!(matches!(
        ctrl.advance_phase(&admin),
        Err(scrutin_controller::ControllerError::Ledger(
            ElectionError::TerminalPhase
        ))
    ));
    ctrl.reset_election(&admin).unwrap();
    let snap = ctrl.latest_snapshot();
    assert_eq!(snap.phase, ElectionPhase::NotStarted);
    assert!(snap.voters.is_empty());
    assert!(snap.candidates.is_empty());
    assert_eq!(snap.total_votes, 0);
}

#[test]
fn csv_to_ledger_bulk_path() {
    let ctrl = setup();
    let admin = addr(0);
    ctrl.start_election(&admin).unwrap();

    // One malformed row (short) is dropped at ingestion, the rest flow
    // through the bulk call.
    let voters_csv = "\
address,firstName,lastName,idCardNumber,age
0x0000000000000000000000000000000000000001,Alice,Martin,ID001,34
0x0000000000000000000000000000000000000002,Bruno,Duval
0x0000000000000000000000000000000000000003,Chloe,Petit,ID003,29
";
    let ingested = parse_voters(voters_csv);
    assert_eq!(ingested.skipped.len(), 1);
    let outcome = ctrl.register_voters_bulk(&admin, ingested.batch).unwrap();
    assert_eq!(outcome.accepted, 2);
    assert_eq!(ctrl.latest_snapshot().voters.len(), 2);

    ctrl.advance_phase(&admin).unwrap();
    let candidates_csv = "\
firstName,lastName,address,certificationCode,politicalParty,age
Denis,Roche,0x00000000000000000000000000000000000000aa,CERT01,Unity,51
Emma,Blanc,0x00000000000000000000000000000000000000bb,CERT02,Forward,44
";
    let ingested = parse_candidates(candidates_csv);
    assert!(ingested.skipped.is_empty());
    let outcome = ctrl
        .register_candidates_bulk(&admin, ingested.batch)
        .unwrap();
    assert_eq!(outcome.accepted, 2);
    assert_eq!(ctrl.latest_snapshot().candidates.len(), 2);
}

#[test]
fn snapshot_subscription_sees_replacements_only() {
    let ctrl = setup();
    let admin = addr(0);
    let mut rx = ctrl.subscribe();

    assert_eq!(rx.borrow().phase, ElectionPhase::NotStarted);
    ctrl.start_election(&admin).unwrap();

    assert!(rx.has_changed().unwrap());
    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.phase, ElectionPhase::VoterRegistration);
}

#[test]
fn refresh_snapshot_is_idempotent_and_read_only() {
    let ctrl = setup();
    let admin = addr(0);
    ctrl.start_election(&admin).unwrap();
    ctrl.register_voter(&admin, voter_reg(1, 30)).unwrap();

    let first = ctrl.refresh_snapshot().unwrap();
    let second = ctrl.refresh_snapshot().unwrap();
    assert_eq!(first.phase, second.phase);
    assert_eq!(first.voters.len(), second.voters.len());
    assert_eq!(ctrl.ledger().voter_addresses().unwrap().len(), 1);
}

#[test]
fn results_with_no_candidates_still_snapshots() {
    let ctrl = setup();
    let admin = addr(0);

    // Walk the whole lifecycle without registering anyone.
    ctrl.start_election(&admin).unwrap();
    ctrl.advance_phase(&admin).unwrap();
    ctrl.advance_phase(&admin).unwrap();
    ctrl.advance_phase(&admin).unwrap();

    let snap = ctrl.refresh_snapshot().unwrap();
    assert_eq!(snap.phase, ElectionPhase::Results);
    assert!(snap.candidates.is_empty());
    assert_eq!(snap.winner, None);
    assert_eq!(ctrl.latest_snapshot().phase, ElectionPhase::Results);

    // An explicit winner query still surfaces the ledger's rejection.
    assert!(matches!(
        ctrl.results(),
        Err(scrutin_controller::ControllerError::Ledger(
            ElectionError::Validation(_)
        ))
    ));
}

#[test]
fn sessions_split_the_surface_by_role() {
    let ctrl = setup();

    let admin = match Session::from_role(Role::Admin, addr(0), ctrl.clone()) {
        Session::Admin(s) => s,
        Session::Voter(_) => unreachable!(),
    };
    let voter = match Session::from_role(Role::Voter, addr(1), ctrl) {
        Session::Voter(s) => s,
        Session::Admin(_) => unreachable!(),
    };

    admin.start_election().unwrap();
    admin.register_voter(voter_reg(1, 30)).unwrap();
    admin.advance_phase().unwrap();
    let c1 = admin.register_candidate(candidate_reg(1)).unwrap();
    admin.advance_phase().unwrap();

    voter.cast_vote(c1).unwrap();
    assert!(voter.my_record().unwrap().has_voted);

    admin.advance_phase().unwrap();
    assert_eq!(admin.results().unwrap().candidate.id, c1);
}

#[test]
fn best_effort_bulk_policy_flows_through_the_controller() {
    let ledger = MemoryLedger::with_options(addr(0), 18, BulkPolicy::BestEffort);
    let ctrl = PhaseController::new(Arc::new(ledger));
    let admin = addr(0);
    ctrl.start_election(&admin).unwrap();

    // Age 15 fails the ledger check but the valid rows still land.
    let csv = "\
address,firstName,lastName,idCardNumber,age
0x0000000000000000000000000000000000000001,Alice,Martin,ID001,34
0x0000000000000000000000000000000000000002,Bruno,Duval,ID002,15
0x0000000000000000000000000000000000000003,Chloe,Petit,ID003,29
";
    let outcome = ctrl
        .register_voters_bulk(&admin, parse_voters(csv).batch)
        .unwrap();
    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(ctrl.latest_snapshot().voters.len(), 2);
}
