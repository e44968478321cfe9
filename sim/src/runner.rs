//! Simulation Runner
//!
//! Drives the fixed round loop: every round, each process issues one
//! request in P1..P4 order, then the engine runs its end-of-round
//! bookkeeping. Round i+1 starts only after round i has fully settled.

use crate::error::SimError;
use vmsim_mm::{Engine, ProcId};
use vmsim_workload::RequestSource;

/// Run `num_rounds` rounds of the simulation
pub fn run<S: RequestSource>(
    engine: &mut Engine,
    source: &mut S,
    num_rounds: u64,
) -> Result<(), SimError> {
    for round in 0..num_rounds {
        log::debug!("round {} of {}", round + 1, num_rounds);

        for proc_id in ProcId::all() {
            let req = source.next_request(proc_id)?;
            engine.handle_request(req)?;
        }

        engine.end_of_round();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmsim_mm::{Operation, PageAlgo, PROC_COUNT};
    use vmsim_workload::ScriptedSource;

    fn p(proc: u8) -> ProcId {
        ProcId::new(proc).unwrap()
    }

    #[test]
    fn test_cold_start_rounds() {
        // every process loads four distinct pages over four rounds
        let mut source = ScriptedSource::from_rounds(&[
            [(0, Operation::Read); PROC_COUNT],
            [(1, Operation::Read); PROC_COUNT],
            [(2, Operation::Read); PROC_COUNT],
            [(3, Operation::Read); PROC_COUNT],
        ]);
        let mut engine = Engine::new(PageAlgo::Nru);

        run(&mut engine, &mut source, 4).unwrap();

        assert_eq!(engine.rounds_completed(), 4);
        assert_eq!(engine.requests_handled(), 16);
        assert!(!engine.frames().any_free());

        let faults: u64 = engine
            .processes()
            .flat_map(|(_, proc)| proc.table().iter())
            .map(|entry| entry.page_fault_count)
            .sum();
        assert_eq!(faults, 16);

        // all reads: nothing is dirty
        let dirty: u64 = engine
            .processes()
            .flat_map(|(_, proc)| proc.table().iter())
            .map(|entry| entry.modified_fault_count)
            .sum();
        assert_eq!(dirty, 0);
    }

    #[test]
    fn test_exhausted_source_maps_to_read_error() {
        let mut source = ScriptedSource::from_rounds(&[[(0, Operation::Read); PROC_COUNT]]);
        let mut engine = Engine::new(PageAlgo::Lru);

        let err = run(&mut engine, &mut source, 2).unwrap_err();
        assert_eq!(err.exit_code(), 9);
    }

    #[test]
    fn test_ws_infeasibility_surfaces_with_exit_code() {
        // fill all sixteen frames, then one more round trips the check
        let mut source = ScriptedSource::from_rounds(&[
            [(0, Operation::Read); PROC_COUNT],
            [(1, Operation::Read); PROC_COUNT],
            [(2, Operation::Read); PROC_COUNT],
            [(3, Operation::Read); PROC_COUNT],
            [(0, Operation::Read); PROC_COUNT],
        ]);
        let mut engine = Engine::new(PageAlgo::Ws { k: 16 });

        let err = run(&mut engine, &mut source, 5).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn test_second_chance_end_to_end() {
        // P1 cycles through five pages while holding only four frames'
        // worth of slots alongside the other processes
        let mut rounds = Vec::new();
        for page in 0..4u8 {
            rounds.push([(page, Operation::Read); PROC_COUNT]);
        }
        // all frames are now full; P1 faults on page 4
        rounds.push([
            (4, Operation::Read),
            (0, Operation::Read),
            (1, Operation::Read),
            (2, Operation::Read),
        ]);
        let mut source = ScriptedSource::from_rounds(&rounds);
        let mut engine = Engine::new(PageAlgo::SecondChance);

        run(&mut engine, &mut source, 5).unwrap();

        // every page had its reference bit set, so FIFO order decided:
        // page 0 was evicted after one full rotation
        let table = engine.process(p(1)).table();
        assert!(!table.entry(0).is_valid());
        assert!(table.entry(4).is_valid());
        assert_eq!(table.entry(4).page_fault_count, 1);
    }
}
