//! The election phase controller.
//!
//! Gates every mutating operation by current phase and caller role, submits
//! the corresponding ledger call, and reflects authoritative state back to
//! consumers as immutable snapshots. The ledger remains the single source
//! of truth; its rejections are surfaced, never second-guessed.

pub mod controller;
pub mod error;
pub mod session;
pub mod snapshot;

pub use controller::{PhaseController, WinnerRecord};
pub use error::ControllerError;
pub use session::{AdminSession, Session, VoterSession};
pub use snapshot::{ElectionSnapshot, SnapshotStore};
