//! Role-bound sessions.
//!
//! The identity service binds a wallet address to a role; that binding is
//! represented here as a closed variant. An [`AdminSession`] exposes only
//! administrative operations and a [`VoterSession`] only voting ones, so a
//! voter calling `advance_phase` is a type error, not a runtime check.

use crate::controller::{PhaseController, WinnerRecord};
use crate::error::ControllerError;
use crate::snapshot::ElectionSnapshot;

use scrutin_ingest::{CandidateBatch, VoterBatch};
use scrutin_ledger::{BulkOutcome, ElectionLedger};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{CandidateId, ElectionPhase, Role, Voter, WalletAddress};
use std::sync::Arc;

/// An authenticated session, one variant per role.
pub enum Session<L: ElectionLedger> {
    Admin(AdminSession<L>),
    Voter(VoterSession<L>),
}

impl<L: ElectionLedger> Session<L> {
    /// Build the session matching the role the identity service returned.
    pub fn from_role(
        role: Role,
        address: WalletAddress,
        controller: Arc<PhaseController<L>>,
    ) -> Self {
        match role {
            Role::Admin => Session::Admin(AdminSession {
                address,
                controller,
            }),
            Role::Voter => Session::Voter(VoterSession {
                address,
                controller,
            }),
        }
    }

    /// The wallet address this session is bound to.
    pub fn address(&self) -> &WalletAddress {
        match self {
            Session::Admin(s) => &s.address,
            Session::Voter(s) => &s.address,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Admin(_) => Role::Admin,
            Session::Voter(_) => Role::Voter,
        }
    }
}

/// Administrative operations: phase control and registration.
pub struct AdminSession<L: ElectionLedger> {
    address: WalletAddress,
    controller: Arc<PhaseController<L>>,
}

impl<L: ElectionLedger> AdminSession<L> {
    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    pub fn controller(&self) -> &PhaseController<L> {
        &self.controller
    }

    pub fn start_election(&self) -> Result<(), ControllerError> {
        self.controller.start_election(&self.address)
    }

    pub fn advance_phase(&self) -> Result<ElectionPhase, ControllerError> {
        self.controller.advance_phase(&self.address)
    }

    pub fn reset_election(&self) -> Result<(), ControllerError> {
        self.controller.reset_election(&self.address)
    }

    pub fn register_voter(&self, registration: VoterRegistration) -> Result<(), ControllerError> {
        self.controller.register_voter(&self.address, registration)
    }

    pub fn register_voters_bulk(&self, batch: VoterBatch) -> Result<BulkOutcome, ControllerError> {
        self.controller.register_voters_bulk(&self.address, batch)
    }

    pub fn register_candidate(
        &self,
        registration: CandidateRegistration,
    ) -> Result<CandidateId, ControllerError> {
        self.controller
            .register_candidate(&self.address, registration)
    }

    pub fn register_candidates_bulk(
        &self,
        batch: CandidateBatch,
    ) -> Result<BulkOutcome, ControllerError> {
        self.controller
            .register_candidates_bulk(&self.address, batch)
    }

    pub fn results(&self) -> Result<WinnerRecord, ControllerError> {
        self.controller.results()
    }

    pub fn refresh_snapshot(&self) -> Result<Arc<ElectionSnapshot>, ControllerError> {
        self.controller.refresh_snapshot()
    }
}

/// Voter operations: observe the board and cast one vote.
pub struct VoterSession<L: ElectionLedger> {
    address: WalletAddress,
    controller: Arc<PhaseController<L>>,
}

impl<L: ElectionLedger> VoterSession<L> {
    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    pub fn controller(&self) -> &PhaseController<L> {
        &self.controller
    }

    pub fn cast_vote(&self, candidate: CandidateId) -> Result<(), ControllerError> {
        self.controller.cast_vote(&self.address, candidate)
    }

    /// This voter's own ledger record (notably `has_voted`).
    pub fn my_record(&self) -> Result<Voter, ControllerError> {
        Ok(self.controller.ledger().get_voter(&self.address)?)
    }

    pub fn refresh_snapshot(&self) -> Result<Arc<ElectionSnapshot>, ControllerError> {
        self.controller.refresh_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutin_ledger::MemoryLedger;

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::parse(format!("0x{:040x}", n)).unwrap()
    }

    fn controller() -> Arc<PhaseController<MemoryLedger>> {
        Arc::new(PhaseController::new(Arc::new(MemoryLedger::new(addr(0)))))
    }

    #[test]
    fn session_variant_follows_role() {
        let ctrl = controller();
        let admin = Session::from_role(Role::Admin, addr(0), ctrl.clone());
        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(admin.address(), &addr(0));

        let voter = Session::from_role(Role::Voter, addr(1), ctrl);
        assert_eq!(voter.role(), Role::Voter);
    }

    #[test]
    fn admin_session_drives_phases() {
        let ctrl = controller();
        let session = match Session::from_role(Role::Admin, addr(0), ctrl) {
            Session::Admin(s) => s,
            Session::Voter(_) => unreachable!(),
        };
        session.start_election().unwrap();
        assert_eq!(
            session.advance_phase().unwrap(),
            ElectionPhase::CandidateRegistration
        );
    }

    #[test]
    fn voter_session_rejections_come_from_the_ledger() {
        let ctrl = controller();
        let session = match Session::from_role(Role::Voter, addr(5), ctrl) {
            Session::Voter(s) => s,
            Session::Admin(_) => unreachable!(),
        };
        // Election not in Voting phase: the ledger rejects the vote.
        assert!(session.cast_vote(1).is_err());
        assert!(session.my_record().is_err());
    }
}
