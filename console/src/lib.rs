//! Role-specific console views.
//!
//! Each console wraps a role session, wires CSV ingestion into the bulk
//! calls, and renders the current snapshot as text.

pub mod admin;
pub mod config;
pub mod error;
pub mod voter;

pub use admin::{AdminConsole, CsvRegistrationSummary};
pub use config::ClientConfig;
pub use error::ConsoleError;
pub use voter::VoterConsole;
