//! Memory IO Requests
//!
//! The request tuple consumed by the engine, one per process per round.

use crate::error::EngineError;
use crate::{PROC_COUNT, PROC_MAX_PAGES};
use std::fmt;

/// 1-4 process ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcId(u8);

impl ProcId {
    /// Validate a raw process ID
    pub fn new(id: u8) -> Result<Self, EngineError> {
        if (1..=PROC_COUNT as u8).contains(&id) {
            Ok(ProcId(id))
        } else {
            Err(EngineError::InvalidProcId(id))
        }
    }

    /// All process IDs in fixed round order P1..P4
    pub fn all() -> impl Iterator<Item = ProcId> {
        (1..=PROC_COUNT as u8).map(ProcId)
    }

    /// Raw 1-based ID
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based index into per-process arrays
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Memory operation, read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    /// The single-character trace encoding, 'R' or 'W'
    pub fn as_char(&self) -> char {
        match self {
            Operation::Read => 'R',
            Operation::Write => 'W',
        }
    }

    /// Decode the trace encoding
    pub fn from_char(c: char) -> Option<Operation> {
        match c {
            'R' => Some(Operation::Read),
            'W' => Some(Operation::Write),
            _ => None,
        }
    }
}

/// One memory IO request issued by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoRequest {
    /// Requesting process
    pub proc_id: ProcId,
    /// 0-31 page ID within the process' memory
    pub page_id: u8,
    /// Read or write
    pub op: Operation,
}

impl IoRequest {
    /// Build a request, validating the page ID
    pub fn new(proc_id: ProcId, page_id: u8, op: Operation) -> Result<Self, EngineError> {
        if page_id as usize >= PROC_MAX_PAGES {
            return Err(EngineError::InvalidPageId(page_id));
        }

        Ok(IoRequest {
            proc_id,
            page_id,
            op,
        })
    }
}
