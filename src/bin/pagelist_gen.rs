//! Pagelist Gen Entry Point
//!
//! Writes the four per-process pagelist trace files consumed by
//! vmem_sim.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use vmsim_sim::SimError;
use vmsim_workload::{gen, GenConfig};

const EXIT_BAD_ARGS: i32 = 3;

#[derive(Parser)]
#[command(name = "pagelist_gen", about = "Generate per-process pagelist trace files")]
struct Cli {
    /// Number of IO requests per process
    num_requests: usize,

    /// Probability (0.0-1.0) of referencing the same, next, or previous page
    #[arg(long)]
    locality: Option<f64>,

    /// Walk pages sequentially instead of sampling at random
    #[arg(long)]
    sequential: bool,

    /// RNG seed for reproducible traces
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_BAD_ARGS),
            }
        }
    };

    if let Some(locality) = cli.locality {
        if !(0.0..=1.0).contains(&locality) {
            eprintln!("locality must be within 0.0..=1.0");
            process::exit(EXIT_BAD_ARGS);
        }
    }

    let config = GenConfig {
        num_requests: cli.num_requests,
        locality: cli.locality,
        sequential: cli.sequential,
        seed: cli.seed,
    };

    if let Err(err) = gen::generate_all(&cli.out_dir, &config) {
        eprintln!("{}", err);
        process::exit(SimError::from(err).exit_code());
    }

    println!("Finished");
}
