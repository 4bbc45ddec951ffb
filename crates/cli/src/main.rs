//! Out-of-order pipeline simulator CLI.
//!
//! This binary replays an instruction trace through the pipeline model. It performs:
//! 1. **Configuration:** Structure sizes from the command line, optionally layered over a JSON file.
//! 2. **Simulation:** Runs the trace to completion, optionally bounded by a cycle limit.
//! 3. **Reporting:** Prints the summary block, per-instruction timing lines, or JSON statistics.

mod report;

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use oosim_core::Simulator;
use oosim_core::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "oosim",
    author,
    version,
    about = "Trace-driven out-of-order superscalar pipeline simulator",
    long_about = "Replay an instruction trace through a ROB/IQ/width-parameterized out-of-order pipeline.\n\nTrace lines are `<pc-hex> <opcode> <dst> <src1> <src2>`; register -1 means no operand.\nSet RUST_LOG=oosim_core=trace for a per-stage event log on stderr.\n\nExamples:\n  oosim 16 8 1 traces/val_trace_gcc1\n  oosim 60 15 3 traces/val_trace_perl1 --timing\n  oosim 32 16 2 trace.txt --config latency.json --json"
)]
struct Cli {
    /// Reorder buffer entries.
    rob_size: usize,

    /// Issue queue entries.
    iq_size: usize,

    /// Pipeline width (instructions per stage per cycle).
    width: usize,

    /// Trace file.
    trace: PathBuf,

    /// JSON configuration supplying the latency table and register count.
    /// The positional sizes always override its pipeline section.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort if the pipeline has not drained after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Print one timing line per instruction before the summary.
    #[arg(long)]
    timing: bool,

    /// Print statistics as JSON instead of the summary block.
    #[arg(long)]
    json: bool,
}

fn main() {
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(msg) = run(&cli) {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

/// Builds the configuration, runs the simulation, and prints the requested report.
fn run(cli: &Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
            Config::from_json(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => Config::default(),
    };
    config.pipeline.rob_size = cli.rob_size;
    config.pipeline.iq_size = cli.iq_size;
    config.pipeline.width = cli.width;
    debug!(?config, "configuration resolved");

    let mut sim = Simulator::from_trace_file(&config, &cli.trace).map_err(|e| e.to_string())?;
    let stats = match cli.max_cycles {
        Some(limit) => sim.run_for(limit).map_err(|e| e.to_string())?,
        None => sim.run(),
    }
    .clone();

    if cli.json {
        let body = report::JsonReport::new(&config.pipeline, &stats);
        let text = serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if cli.timing {
        for inst in sim.pipeline().instructions() {
            println!("{}", report::timing_line(inst));
        }
    }
    print!("{}", report::summary(&config.pipeline, &cli.trace, &stats));
    Ok(())
}
