//! Voter record and registration input.

use crate::address::WalletAddress;
use serde::{Deserialize, Serialize};

/// A registered voter as stored by the ledger.
///
/// Created only during the `VoterRegistration` phase; immutable thereafter
/// except for `has_voted`, which flips to `true` exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub address: WalletAddress,
    pub first_name: String,
    pub last_name: String,
    pub id_card_number: String,
    pub age: u8,
    pub has_voted: bool,
}

/// The fields an admin submits to register one voter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub address: WalletAddress,
    pub first_name: String,
    pub last_name: String,
    pub id_card_number: String,
    pub age: u8,
}

impl VoterRegistration {
    /// Whether every required field is present.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.id_card_number.trim().is_empty()
    }
}

impl From<VoterRegistration> for Voter {
    fn from(reg: VoterRegistration) -> Self {
        Voter {
            address: reg.address,
            first_name: reg.first_name,
            last_name: reg.last_name,
            id_card_number: reg.id_card_number,
            age: reg.age,
            has_voted: false,
        }
    }
}
