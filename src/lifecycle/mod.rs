//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Metrics → Identity → Channel
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → stop waiting and exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order, never concurrently

pub mod signals;
pub mod startup;
