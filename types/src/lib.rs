//! Fundamental types for the scrutin election client.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, the election phase enum, voter and candidate
//! records, roles, timestamps, and the shared error taxonomy.

pub mod address;
pub mod candidate;
pub mod error;
pub mod phase;
pub mod role;
pub mod time;
pub mod voter;

pub use address::WalletAddress;
pub use candidate::{Candidate, CandidateId};
pub use error::ElectionError;
pub use phase::ElectionPhase;
pub use role::Role;
pub use time::Timestamp;
pub use voter::Voter;
