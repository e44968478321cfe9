//! Pagelist Generation
//!
//! Synthesizes the four per-process trace files. Pages are uniform by
//! default; a locality bias keeps references near the previous page,
//! and sequential mode walks the address space in order.

use crate::error::WorkloadError;
use crate::trace::pagelist_file;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use vmsim_mm::{Operation, ProcId, PROC_MAX_PAGES};

/// Trace generation parameters
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Requests per process
    pub num_requests: usize,
    /// Probability of a local (same/next/previous page) reference
    pub locality: Option<f64>,
    /// Walk pages in order instead of sampling them
    pub sequential: bool,
    /// Fixed RNG seed for reproducible traces
    pub seed: Option<u64>,
}

/// Generate one process' trace
pub fn generate_trace(rng: &mut StdRng, config: &GenConfig) -> Vec<(u8, Operation)> {
    let max_page = PROC_MAX_PAGES as u8;
    let mut trace = Vec::with_capacity(config.num_requests);
    let mut last: u8 = rng.gen_range(0..max_page);

    for i in 0..config.num_requests {
        let page = if config.sequential {
            (i % PROC_MAX_PAGES) as u8
        } else if let Some(locality) = config.locality {
            if rng.gen_bool(locality) {
                // same, next, or previous page, clamped to the range
                match rng.gen_range(0..3u8) {
                    0 => last,
                    1 => (last + 1).min(max_page - 1),
                    _ => last.saturating_sub(1),
                }
            } else {
                rng.gen_range(0..max_page)
            }
        } else {
            rng.gen_range(0..max_page)
        };

        let op = if rng.gen_bool(0.5) {
            Operation::Read
        } else {
            Operation::Write
        };

        last = page;
        trace.push((page, op));
    }

    trace
}

fn write_pagelist(path: &Path, trace: &[(u8, Operation)]) -> Result<(), WorkloadError> {
    let mut file = BufWriter::new(File::create(path)?);
    for &(page, op) in trace {
        writeln!(file, "{:02} {}", page, op.as_char())?;
    }
    file.flush()?;
    Ok(())
}

/// Generate all four pagelist files in `dir`
pub fn generate_all(dir: &Path, config: &GenConfig) -> Result<(), WorkloadError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for proc_id in ProcId::all() {
        let trace = generate_trace(&mut rng, config);
        let path = dir.join(pagelist_file(proc_id));
        write_pagelist(&path, &trace)?;
        log::info!(
            "Generated {} with {} IO operations",
            path.display(),
            trace.len()
        );
    }

    Ok(())
}
