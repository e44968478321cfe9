//! Second Chance
//!
//! FIFO over the process' resident pages. A set reference bit buys the
//! head one more pass: the bit is cleared and the page moves to the
//! tail. The first head found with the bit clear is evicted.

use crate::engine::ProcessState;

pub(super) fn select_victim(proc: &mut ProcessState) -> u8 {
    loop {
        let page_id = proc
            .fifo
            .pop_front()
            .expect("second chance eviction with an empty queue");

        if proc.table.entry(page_id).is_referenced() {
            proc.table.entry_mut(page_id).set_referenced(false);
            proc.fifo.push_back(page_id);
        } else {
            return page_id;
        }
    }
}
