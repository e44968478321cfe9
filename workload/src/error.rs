//! Workload Errors
//!
//! Failures while producing the request stream: trace files that
//! cannot be opened, malformed lines, and traces that run dry before
//! the simulation ends.

use thiserror::Error;

/// Errors from trace files and request sources
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Trace file could not be opened or read
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Malformed trace line
    #[error("Parse error at {file}:{line}: {text:?}")]
    Parse {
        file: String,
        line: usize,
        text: String,
    },

    /// The source ran out of requests for a process
    #[error("Request stream for P{proc_id} is exhausted")]
    Exhausted { proc_id: u8 },
}
