//! Simulation Driver
//!
//! The round loop that feeds requests from a source into the engine,
//! the end-of-run reports, and the error-to-exit-code mapping for the
//! outer CLI.

pub mod error;
pub mod report;
pub mod runner;

pub use error::SimError;
pub use report::{print_report, write_report};
pub use runner::run;
