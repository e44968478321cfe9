//! Vmem Sim Main Entry Point
//!
//! Outer driver: parses arguments, wires the pagelist trace source to
//! the engine, runs the rounds, and prints the final report.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use vmsim_mm::{Engine, PageAlgo, RAM_MAX_FRAMES};
use vmsim_sim::SimError;
use vmsim_workload::TraceSource;

// Exit codes, kept stable: 0 ok, 3 bad arg count, 4 bad algorithm,
// 5 child error, 6 file error, 7 parse error, 8 write error,
// 9 read error, 10 invalid process id, 11 k too large for the
// workload.
const EXIT_BAD_ARGS: i32 = 3;
const EXIT_BAD_ALGO: i32 = 4;
const EXIT_WRITE_ERROR: i32 = 8;
const EXIT_K_TOO_LARGE: i32 = 11;

#[derive(Parser)]
#[command(name = "vmem_sim", about = "Virtual memory page replacement simulator")]
struct Cli {
    /// Number of simulation rounds
    num_rounds: u64,

    /// Page replacement algorithm: NRU, 2ndC, LRU or WS
    page_algo: String,

    /// Working set window, required for WS
    k_param: Option<u8>,

    /// Directory containing the pagelist trace files
    #[arg(long, default_value = ".")]
    trace_dir: PathBuf,
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_BAD_ARGS),
            }
        }
    }
}

fn parse_algorithm(cli: &Cli) -> PageAlgo {
    let algorithm = match cli.page_algo.parse::<PageAlgo>() {
        Ok(algorithm) => algorithm,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_BAD_ALGO);
        }
    };

    match algorithm {
        PageAlgo::Ws { .. } => {
            let k = cli.k_param.unwrap_or_else(|| {
                eprintln!("WS requires a k parameter");
                process::exit(EXIT_BAD_ARGS);
            });
            if k == 0 {
                eprintln!("k must be greater than zero");
                process::exit(EXIT_BAD_ARGS);
            }
            if k as usize > RAM_MAX_FRAMES {
                eprintln!("k must not exceed the {} page frames", RAM_MAX_FRAMES);
                process::exit(EXIT_K_TOO_LARGE);
            }
            PageAlgo::Ws { k }
        }
        other => other,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = parse_cli();
    if cli.num_rounds == 0 {
        eprintln!("num_rounds must be greater than zero");
        process::exit(EXIT_BAD_ARGS);
    }

    let algorithm = parse_algorithm(&cli);

    let mut source = match TraceSource::open(&cli.trace_dir) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(SimError::from(err).exit_code());
        }
    };

    let mut engine = Engine::new(algorithm);
    log::info!("Simulating {} rounds with {}", cli.num_rounds, algorithm);

    if let Err(err) = vmsim_sim::run(&mut engine, &mut source, cli.num_rounds) {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }

    if let Err(err) = vmsim_sim::print_report(&engine) {
        eprintln!("Report write error: {}", err);
        process::exit(EXIT_WRITE_ERROR);
    }
}
