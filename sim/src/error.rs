//! Simulation Errors
//!
//! Aggregates engine and workload failures and maps each onto the
//! reserved exit-code table kept compatible across releases:
//!
//! 0 ok, 3 bad arg count, 4 bad algorithm, 5 child error, 6 file
//! error, 7 parse error, 8 write error, 9 read error, 10 invalid
//! process ID, 11 k too large for the workload.

use thiserror::Error;
use vmsim_mm::EngineError;
use vmsim_workload::WorkloadError;

/// Fatal simulation failure
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Workload(#[from] WorkloadError),
}

impl SimError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SimError::Engine(EngineError::InvalidProcId(_)) => 10,
            SimError::Engine(EngineError::InvalidPageId(_)) => 7,
            SimError::Engine(EngineError::WsInfeasible { .. }) => 11,
            SimError::Workload(WorkloadError::File(_)) => 6,
            SimError::Workload(WorkloadError::Parse { .. }) => 7,
            SimError::Workload(WorkloadError::Exhausted { .. }) => 9,
        }
    }
}
