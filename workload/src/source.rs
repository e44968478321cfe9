//! Request Sources
//!
//! Ordered, exactly-once delivery of memory IO requests. The engine
//! asks for one request per process per round; any implementation with
//! lossless in-order delivery satisfies the contract, so tests and
//! library users can substitute an in-memory stream for the trace
//! files.

use crate::error::WorkloadError;
use std::collections::VecDeque;
use vmsim_mm::{IoRequest, Operation, ProcId, PROC_COUNT};

/// Produces the next request for a given process
pub trait RequestSource {
    /// Next request for `proc_id`; called exactly once per process per
    /// round, in P1..P4 order
    fn next_request(&mut self, proc_id: ProcId) -> Result<IoRequest, WorkloadError>;
}

/// In-memory source fed from per-process scripted request lists
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queues: [VecDeque<(u8, Operation)>; PROC_COUNT],
}

impl ScriptedSource {
    /// Create a source with empty scripts
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one request to a process' script
    pub fn push(&mut self, proc_id: ProcId, page_id: u8, op: Operation) {
        self.queues[proc_id.index()].push_back((page_id, op));
    }

    /// Build a source from whole rounds, one `(page, op)` per process
    pub fn from_rounds(rounds: &[[(u8, Operation); PROC_COUNT]]) -> Self {
        let mut source = Self::new();
        for round in rounds {
            for (proc_id, &(page_id, op)) in ProcId::all().zip(round.iter()) {
                source.push(proc_id, page_id, op);
            }
        }
        source
    }

    /// Requests still queued for a process
    pub fn remaining(&self, proc_id: ProcId) -> usize {
        self.queues[proc_id.index()].len()
    }
}

impl RequestSource for ScriptedSource {
    fn next_request(&mut self, proc_id: ProcId) -> Result<IoRequest, WorkloadError> {
        let (page_id, op) = self.queues[proc_id.index()]
            .pop_front()
            .ok_or(WorkloadError::Exhausted {
                proc_id: proc_id.get(),
            })?;

        IoRequest::new(proc_id, page_id, op).map_err(|_| WorkloadError::Parse {
            file: String::from("<scripted>"),
            line: 0,
            text: format!("{:02} {}", page_id, op.as_char()),
        })
    }
}
