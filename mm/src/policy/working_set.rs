//! Working Set
//!
//! Evicts the lowest-numbered resident page outside the process'
//! working set. The startup feasibility check guarantees such a page
//! exists whenever an eviction is needed.

use crate::engine::ProcessState;

pub(super) fn select_victim(proc: &mut ProcessState) -> u8 {
    for entry in proc.table.iter() {
        if entry.is_valid() && !proc.working_set.contains(entry.page_id) {
            return entry.page_id;
        }
    }

    unreachable!("working set eviction with every resident page in the set");
}
