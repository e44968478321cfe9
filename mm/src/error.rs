//! Engine Errors
//!
//! Fatal conditions surfaced by the simulation core. None of these are
//! recoverable; the driver maps each onto its reserved exit code.

use thiserror::Error;

/// Errors produced by the simulation engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Process ID outside 1..=4
    #[error("Invalid process ID: {0}")]
    InvalidProcId(u8),

    /// Page ID outside 0..=31
    #[error("Invalid page ID: {0}")]
    InvalidPageId(u8),

    /// The working set window cannot leave any page eligible for eviction
    #[error(
        "WS({k}) cannot guarantee a page outside the working set: \
         minimum resident count is {min_resident}"
    )]
    WsInfeasible { k: u8, min_resident: usize },
}
