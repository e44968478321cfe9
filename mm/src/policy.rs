//! Page Replacement Policies
//!
//! Victim selection for the four replacement disciplines. Every policy
//! picks its victim from the faulting process' own pages; processes
//! never evict each other.

mod lru;
mod nru;
mod second_chance;
mod working_set;

use crate::engine::ProcessState;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Page replacement algorithm selected for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAlgo {
    /// Not Recently Used
    Nru,
    /// Second Chance (FIFO with reference bit)
    SecondChance,
    /// Least Recently Used, approximated with 8-bit aging
    Lru,
    /// Working Set with window k
    Ws { k: u8 },
}

impl PageAlgo {
    /// Select the page to evict from the faulting process.
    ///
    /// Second Chance rotates the process' FIFO queue and clears
    /// reference bits as a side effect; the other policies only read
    /// the table state.
    pub(crate) fn select_victim(&self, proc: &mut ProcessState) -> u8 {
        match self {
            PageAlgo::Nru => nru::select_victim(&proc.table),
            PageAlgo::SecondChance => second_chance::select_victim(proc),
            PageAlgo::Lru => lru::select_victim(&proc.table),
            PageAlgo::Ws { .. } => working_set::select_victim(proc),
        }
    }
}

impl fmt::Display for PageAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageAlgo::Nru => write!(f, "NRU"),
            PageAlgo::SecondChance => write!(f, "2ndC"),
            PageAlgo::Lru => write!(f, "LRU"),
            PageAlgo::Ws { k } => write!(f, "WS({})", k),
        }
    }
}

/// Error from an unrecognized algorithm name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown page replacement algorithm: {0}")]
pub struct ParseAlgoError(String);

impl FromStr for PageAlgo {
    type Err = ParseAlgoError;

    /// Parse the CLI spelling of an algorithm. `WS` carries no window
    /// in its name; it parses with `k = 0` and the caller supplies the
    /// window before use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NRU" => Ok(PageAlgo::Nru),
            "2ndC" => Ok(PageAlgo::SecondChance),
            "LRU" => Ok(PageAlgo::Lru),
            "WS" => Ok(PageAlgo::Ws { k: 0 }),
            other => Err(ParseAlgoError(other.to_string())),
        }
    }
}
