//! Simulation Reports
//!
//! Human-readable page-table dumps and access statistics, printed
//! after the final round. Formats are stable; tests and downstream
//! tooling rely on them.

use std::io::{self, Write};
use vmsim_mm::{Engine, PageAlgo, ProcessState};

/// Aggregated counters for one process or the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub reads: u64,
    pub writes: u64,
    pub page_faults: u64,
    pub modified_faults: u64,
}

impl Totals {
    /// Sum the counters of one process' pages
    pub fn of_process(proc: &ProcessState) -> Totals {
        let mut totals = Totals::default();
        for entry in proc.table().iter() {
            totals.reads += entry.read_count;
            totals.writes += entry.write_count;
            totals.page_faults += entry.page_fault_count;
            totals.modified_faults += entry.modified_fault_count;
        }
        totals
    }

    /// Total accesses
    pub fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// Page faults per access, as a percentage
    pub fn fault_rate(&self) -> f64 {
        if self.accesses() == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.accesses() as f64 * 100.0
        }
    }

    /// Dirty faults per page fault, as a percentage
    pub fn dirty_fault_rate(&self) -> f64 {
        if self.page_faults == 0 {
            0.0
        } else {
            self.modified_faults as f64 / self.page_faults as f64 * 100.0
        }
    }

    fn add(&mut self, other: &Totals) {
        self.reads += other.reads;
        self.writes += other.writes;
        self.page_faults += other.page_faults;
        self.modified_faults += other.modified_faults;
    }
}

fn write_totals<W: Write>(w: &mut W, label: &str, totals: &Totals) -> io::Result<()> {
    writeln!(
        w,
        "{}: Reads {} | Writes {} | Page Faults {} | Modified Faults {} | \
         Page Fault Rate {:.2}% | Dirty Fault Rate {:.2}%",
        label,
        totals.reads,
        totals.writes,
        totals.page_faults,
        totals.modified_faults,
        totals.fault_rate(),
        totals.dirty_fault_rate(),
    )
}

/// Write the full end-of-run report
pub fn write_report<W: Write>(w: &mut W, engine: &Engine) -> io::Result<()> {
    writeln!(w, "Page replacement algorithm: {}", engine.algorithm())?;
    writeln!(w, "Rounds completed: {}", engine.rounds_completed())?;

    let mut combined = Totals::default();

    for (proc_id, proc) in engine.processes() {
        writeln!(w)?;
        writeln!(w, "Process {}", proc_id)?;

        for entry in proc.table().iter() {
            if !entry.touched() {
                continue;
            }

            let frame = match entry.page_frame {
                Some(frame) => format!("{:2}", frame),
                None => String::from("-1"),
            };
            write!(
                w,
                "  Page {:02}: Frame {} | Flags {:08b} ({})",
                entry.page_id,
                frame,
                entry.flags.bits(),
                entry.flag_letters(),
            )?;
            match engine.algorithm() {
                PageAlgo::Lru => write!(w, " | Age bits {:08b}", entry.age_bits)?,
                PageAlgo::Ws { .. } => write!(w, " | Age clock {}", entry.age_clock)?,
                _ => {}
            }
            writeln!(w)?;
        }

        match engine.algorithm() {
            PageAlgo::SecondChance => {
                let queue: Vec<String> =
                    proc.fifo().iter().map(|page| page.to_string()).collect();
                writeln!(w, "  FIFO queue: {}", queue.join(", "))?;
            }
            PageAlgo::Ws { .. } => {
                writeln!(w, "  Working set: {}", proc.working_set())?;
            }
            _ => {}
        }

        let totals = Totals::of_process(proc);
        write_totals(w, &format!("  {}", proc_id), &totals)?;
        combined.add(&totals);
    }

    writeln!(w)?;
    write_totals(w, "Combined", &combined)?;
    if let PageAlgo::Ws { .. } = engine.algorithm() {
        writeln!(w, "Clock counter: {}", engine.clock_counter())?;
    }

    Ok(())
}

/// Print the report to stdout
pub fn print_report(engine: &Engine) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmsim_mm::{IoRequest, Operation, ProcId, PROC_COUNT};

    fn req(proc: u8, page: u8, op: Operation) -> IoRequest {
        IoRequest::new(ProcId::new(proc).unwrap(), page, op).unwrap()
    }

    fn rendered(engine: &Engine) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, engine).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn fill_round(engine: &mut Engine, page: u8, op: Operation) {
        for proc in 1..=PROC_COUNT as u8 {
            engine.handle_request(req(proc, page, op)).unwrap();
        }
        engine.end_of_round();
    }

    #[test]
    fn test_totals_and_rates() {
        let mut engine = Engine::new(PageAlgo::Nru);
        fill_round(&mut engine, 0, Operation::Read);
        fill_round(&mut engine, 0, Operation::Write);

        let totals = Totals::of_process(engine.process(ProcId::new(1).unwrap()));
        assert_eq!(
            totals,
            Totals {
                reads: 1,
                writes: 1,
                page_faults: 1,
                modified_faults: 0,
            }
        );
        assert_eq!(totals.accesses(), 2);
        assert!((totals.fault_rate() - 50.0).abs() < 1e-9);
        assert_eq!(totals.dirty_fault_rate(), 0.0);
    }

    #[test]
    fn test_empty_totals_have_zero_rates() {
        let totals = Totals::default();
        assert_eq!(totals.fault_rate(), 0.0);
        assert_eq!(totals.dirty_fault_rate(), 0.0);
    }

    #[test]
    fn test_report_page_lines() {
        let mut engine = Engine::new(PageAlgo::Nru);
        fill_round(&mut engine, 0, Operation::Read);

        let report = rendered(&engine);
        assert!(report.contains("Page replacement algorithm: NRU"));
        assert!(report.contains("Rounds completed: 1"));
        assert!(report.contains("Process P1"));
        assert!(report.contains("  Page 00: Frame  0 | Flags 00000011 (-RV)"));
        assert!(report.contains(
            "  P1: Reads 1 | Writes 0 | Page Faults 1 | Modified Faults 0 | \
             Page Fault Rate 100.00% | Dirty Fault Rate 0.00%"
        ));
        assert!(report.contains("Combined: Reads 4 | Writes 0 | Page Faults 4"));
    }

    #[test]
    fn test_report_untouched_pages_are_omitted() {
        let mut engine = Engine::new(PageAlgo::Nru);
        fill_round(&mut engine, 5, Operation::Read);

        let report = rendered(&engine);
        assert!(report.contains("  Page 05:"));
        assert!(!report.contains("  Page 06:"));
    }

    #[test]
    fn test_report_lru_age_bits() {
        let mut engine = Engine::new(PageAlgo::Lru);
        fill_round(&mut engine, 0, Operation::Read);

        let report = rendered(&engine);
        assert!(report.contains("| Age bits 10000000"));
    }

    #[test]
    fn test_report_ws_sections() {
        let mut engine = Engine::new(PageAlgo::Ws { k: 2 });
        fill_round(&mut engine, 3, Operation::Read);

        let report = rendered(&engine);
        assert!(report.contains("| Age clock 0"));
        assert!(report.contains("  Working set: 3"));
        assert!(report.contains("Clock counter: 1"));
    }

    #[test]
    fn test_report_second_chance_queue() {
        let mut engine = Engine::new(PageAlgo::SecondChance);
        fill_round(&mut engine, 1, Operation::Read);
        fill_round(&mut engine, 2, Operation::Read);

        let report = rendered(&engine);
        assert!(report.contains("  FIFO queue: 1, 2"));
    }

    #[test]
    fn test_report_evicted_page_shows_no_frame() {
        let mut engine = Engine::new(PageAlgo::Nru);
        for page in 0..4u8 {
            fill_round(&mut engine, page, Operation::Read);
        }
        engine.handle_request(req(1, 4, Operation::Read)).unwrap();

        let report = rendered(&engine);
        // page 0 of P1 was evicted for page 4
        assert!(report.contains("  Page 00: Frame -1"));
        assert!(report.contains("  Page 04: Frame  0"));
    }
}
