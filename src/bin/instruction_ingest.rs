use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use instruction_queue::ingest::run;
use instruction_queue::{IngestOptions, QuantaClock, Receiver, ReceiverConfig};

#[derive(Parser, Debug)]
#[command(name = "instruction-ingest", version)]
#[command(about = "Receive instruction messages and drain them in priority order")]
struct Args {
    /// File with one message per line (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON receiver config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum queued instructions, overrides the config file
    #[arg(long)]
    max_pending: Option<usize>,

    /// Stop at the first rejected line
    #[arg(long)]
    strict: bool,

    /// Print drained instructions as JSON lines
    #[arg(long)]
    json: bool,

    /// Take "now" from the TSC instead of the system clock
    #[arg(long)]
    tsc_clock: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReceiverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReceiverConfig::default(),
    };
    if let Some(max_pending) = args.max_pending {
        config.max_pending = Some(max_pending);
        config.validate()?;
    }

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Reading instructions from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let out = BufWriter::new(io::stdout().lock());
    let options = IngestOptions {
        strict: args.strict,
        json: args.json,
    };

    let stats = if args.tsc_clock {
        info!("Validating timestamps against the TSC clock");
        run(Receiver::with_clock(config, QuantaClock::new()), input, out, options)?
    } else {
        run(Receiver::with_config(config), input, out, options)?
    };

    eprintln!(
        "received={} accepted={} parse_failures={} validation_failures={} rejected_full={}",
        stats.received,
        stats.accepted,
        stats.parse_failures,
        stats.validation_failures,
        stats.rejected_full
    );
    Ok(())
}
