//! Simulation Engine
//!
//! Owns the page tables, the frame map, and all policy state, and
//! applies memory IO requests one at a time. The engine is strictly
//! sequential: every effect of a request is visible before the next
//! request is handled, and end-of-round bookkeeping runs between
//! rounds.

use crate::error::EngineError;
use crate::frame::FrameMap;
use crate::page_table::PageTable;
use crate::policy::PageAlgo;
use crate::request::{IoRequest, Operation, ProcId};
use crate::set::PageSet;
use crate::{PROC_COUNT, REF_CLEAR_INTERVAL};
use std::collections::VecDeque;

/// Per-process simulation state
pub struct ProcessState {
    pub(crate) table: PageTable,
    /// Resident pages in load order, used by Second Chance
    pub(crate) fifo: VecDeque<u8>,
    /// Working set bitmask, rebuilt each round under WS
    pub(crate) working_set: PageSet,
}

impl ProcessState {
    pub(crate) fn new() -> Self {
        ProcessState {
            table: PageTable::new(),
            fifo: VecDeque::new(),
            working_set: PageSet::new(),
        }
    }

    /// The process' page table
    pub fn table(&self) -> &PageTable {
        &self.table
    }

    /// Resident pages in FIFO load order (Second Chance)
    pub fn fifo(&self) -> &VecDeque<u8> {
        &self.fifo
    }

    /// Current working set (WS)
    pub fn working_set(&self) -> &PageSet {
        &self.working_set
    }

    /// Number of resident pages
    pub fn resident_count(&self) -> usize {
        self.table.resident_count()
    }
}

/// Outcome of one handled request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The page was already resident
    Hit,
    /// Page fault served from a free frame
    ColdFault { frame: u8 },
    /// Page fault served by evicting a page of the same process
    Replaced { frame: u8, victim: u8, dirty: bool },
}

/// The owning simulation aggregate
pub struct Engine {
    algorithm: PageAlgo,
    frames: FrameMap,
    procs: [ProcessState; PROC_COUNT],
    /// Rounds completed so far
    round: u64,
    /// WS reference clock, incremented after each round's recompute
    clock_counter: u64,
    /// One-shot latch for the WS feasibility check
    wset_check_performed: bool,
    requests_handled: u64,
}

impl Engine {
    /// Create an engine with empty page tables and all frames free
    pub fn new(algorithm: PageAlgo) -> Self {
        Engine {
            algorithm,
            frames: FrameMap::new(),
            procs: std::array::from_fn(|_| ProcessState::new()),
            round: 0,
            clock_counter: 0,
            wset_check_performed: false,
            requests_handled: 0,
        }
    }

    /// Apply one memory IO request.
    ///
    /// Statistics and the reference/modified bits are updated first,
    /// then residency is resolved: hit, cold fault from a free frame,
    /// or eviction within the requesting process.
    pub fn handle_request(&mut self, req: IoRequest) -> Result<Access, EngineError> {
        self.requests_handled += 1;

        let entry = self.procs[req.proc_id.index()].table.entry_mut(req.page_id);
        match req.op {
            Operation::Read => entry.read_count += 1,
            Operation::Write => entry.write_count += 1,
        }
        entry.set_referenced(true);
        if req.op == Operation::Write {
            entry.set_modified(true);
        }

        if let PageAlgo::Ws { k } = self.algorithm {
            // the window must leave at least one resident page outside
            // the working set once memory fills; tested exactly once
            if !self.wset_check_performed && !self.frames.any_free() {
                let min_resident = self
                    .procs
                    .iter()
                    .map(|proc| proc.resident_count())
                    .min()
                    .unwrap_or(0);
                if k as usize >= min_resident {
                    return Err(EngineError::WsInfeasible { k, min_resident });
                }
                self.wset_check_performed = true;
            }

            let clock = self.clock_counter;
            self.procs[req.proc_id.index()]
                .table
                .entry_mut(req.page_id)
                .age_clock = clock;
        }

        let outcome = if self.procs[req.proc_id.index()].table.entry(req.page_id).is_valid() {
            Access::Hit
        } else if let Some(frame) = self.frames.first_free() {
            self.load_page(req, frame);
            Access::ColdFault { frame }
        } else {
            self.replace_page(req)
        };

        match outcome {
            Access::Hit => {
                log::debug!("{}: {:02} {} hit", req.proc_id, req.page_id, req.op.as_char());
            }
            Access::ColdFault { frame } => {
                log::info!(
                    "Page fault {}: {:02} -> frame {:02}",
                    req.proc_id,
                    req.page_id,
                    frame
                );
            }
            Access::Replaced { frame, victim, dirty } => {
                log::info!(
                    "Page fault {}: {:02} -> frame {:02} (replaced {:02}) ({})",
                    req.proc_id,
                    req.page_id,
                    frame,
                    victim,
                    if dirty { "dirty" } else { "clean" }
                );
            }
        }

        Ok(outcome)
    }

    /// Resolve a cold fault from a free frame
    fn load_page(&mut self, req: IoRequest, frame: u8) {
        self.frames.occupy(frame);

        let algorithm = self.algorithm;
        let proc = &mut self.procs[req.proc_id.index()];
        let entry = proc.table.entry_mut(req.page_id);
        entry.set_valid(true);
        entry.page_frame = Some(frame);
        entry.page_fault_count += 1;

        if algorithm == PageAlgo::SecondChance {
            proc.fifo.push_back(req.page_id);
        }
    }

    /// Resolve a fault by evicting a page of the requesting process
    fn replace_page(&mut self, req: IoRequest) -> Access {
        let algorithm = self.algorithm;
        let proc = &mut self.procs[req.proc_id.index()];

        let victim_id = algorithm.select_victim(proc);
        let victim = proc.table.entry_mut(victim_id);
        let frame = victim.page_frame.expect("eviction victim is not resident");
        let dirty = victim.is_modified();

        victim.set_valid(false);
        victim.set_referenced(false);
        victim.set_modified(false);
        victim.page_frame = None;
        victim.age_bits = 0;
        victim.age_clock = 0;

        // the frame stays occupied; it is handed straight to the new page
        let entry = proc.table.entry_mut(req.page_id);
        entry.set_valid(true);
        entry.page_frame = Some(frame);
        entry.page_fault_count += 1;
        if dirty {
            entry.modified_fault_count += 1;
        }

        if algorithm == PageAlgo::SecondChance {
            proc.fifo.push_back(req.page_id);
        }

        Access::Replaced {
            frame,
            victim: victim_id,
            dirty,
        }
    }

    /// Run the end-of-round bookkeeping for the selected policy.
    ///
    /// Must be called after all four requests of a round have been
    /// handled and before the first request of the next round.
    pub fn end_of_round(&mut self) {
        self.round += 1;
        let clear_refs = self.round % REF_CLEAR_INTERVAL == 0;

        match self.algorithm {
            PageAlgo::Nru => {
                if clear_refs {
                    self.clear_all_referenced();
                }
            }
            // Second Chance clears reference bits lazily during the
            // victim search, never globally
            PageAlgo::SecondChance => {}
            PageAlgo::Lru => {
                // absorb the reference bit into the age register and
                // clear it, in the same pass, every round
                for proc in &mut self.procs {
                    for entry in proc.table.iter_mut() {
                        entry.age_bits >>= 1;
                        if entry.is_referenced() {
                            entry.age_bits |= 0b1000_0000;
                        }
                        entry.set_referenced(false);
                    }
                }
            }
            PageAlgo::Ws { k } => {
                // rebuild every working set with the pre-increment clock
                let clock = self.clock_counter;
                for proc in &mut self.procs {
                    let mut working_set = PageSet::new();
                    for entry in proc.table.iter() {
                        if entry.is_valid() && clock - entry.age_clock < k as u64 {
                            working_set.insert(entry.page_id);
                        }
                    }
                    proc.working_set = working_set;
                }
                self.clock_counter += 1;

                if clear_refs {
                    self.clear_all_referenced();
                }
            }
        }

        log::debug!(
            "round {} done: {} frames in use",
            self.round,
            self.frames.used_frames()
        );
    }

    fn clear_all_referenced(&mut self) {
        for proc in &mut self.procs {
            for entry in proc.table.iter_mut() {
                entry.set_referenced(false);
            }
        }
    }

    /// The algorithm this engine runs
    pub fn algorithm(&self) -> PageAlgo {
        self.algorithm
    }

    /// State of one process
    pub fn process(&self, proc_id: ProcId) -> &ProcessState {
        &self.procs[proc_id.index()]
    }

    /// All processes in P1..P4 order
    pub fn processes(&self) -> impl Iterator<Item = (ProcId, &ProcessState)> + '_ {
        ProcId::all().map(move |proc_id| (proc_id, &self.procs[proc_id.index()]))
    }

    /// The physical frame occupancy map
    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    /// Rounds completed so far
    pub fn rounds_completed(&self) -> u64 {
        self.round
    }

    /// Current WS reference clock
    pub fn clock_counter(&self) -> u64 {
        self.clock_counter
    }

    /// Total requests handled
    pub fn requests_handled(&self) -> u64 {
        self.requests_handled
    }
}
