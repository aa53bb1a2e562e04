//! The authoritative election ledger.
//!
//! [`ElectionLedger`] mirrors the deployed contract ABI: phase transitions,
//! voter/candidate registration (single and bulk), voting, and free reads.
//! Every invariant (phase gating, one vote per voter, admin-only
//! transitions) is enforced here, at the authority of record, not in the
//! clients that call it.
//!
//! [`MemoryLedger`] is the reference implementation used for dev mode and
//! tests.

pub mod contract;
pub mod memory;

pub use contract::{BulkOutcome, BulkPolicy, ElectionLedger};
pub use memory::MemoryLedger;
