//! Shared utilities for the scrutin workspace.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_level};
