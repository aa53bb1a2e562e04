//! Candidate record and registration input.

use crate::address::WalletAddress;
use serde::{Deserialize, Serialize};

/// Sequential positive candidate id, assigned by the ledger starting at 1.
pub type CandidateId = u64;

/// A registered candidate as stored by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub address: WalletAddress,
    pub certification_code: String,
    pub political_party: String,
    pub age: u8,
    /// Monotonically increasing tally, starts at 0.
    pub vote_count: u64,
}

/// The fields an admin submits to register one candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegistration {
    pub first_name: String,
    pub last_name: String,
    pub address: WalletAddress,
    pub certification_code: String,
    pub political_party: String,
    pub age: u8,
}

impl CandidateRegistration {
    /// Whether every required field is present.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.certification_code.trim().is_empty()
            && !self.political_party.trim().is_empty()
    }

    /// Materialize a candidate with a ledger-assigned id and a zero tally.
    pub fn into_candidate(self, id: CandidateId) -> Candidate {
        Candidate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            certification_code: self.certification_code,
            political_party: self.political_party,
            age: self.age,
            vote_count: 0,
        }
    }
}
