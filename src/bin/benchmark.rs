use clap::Parser;
use mathkit::functions;
use mathkit::harness::{BenchmarkConfig, Harness, CLK_FREQ_HZ, REPEAT_BENCH};
use mathkit::logging;
use std::io::{self, Write};
use std::process;
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Benchmark the math project's main functions", long_about = None)]
struct Args {
    /// Number of calls inside the timed region
    #[arg(short, long, default_value_t = REPEAT_BENCH)]
    repeat: u64,

    /// Assumed processor frequency in Hz, used to estimate clock counts
    #[arg(short, long, default_value_t = CLK_FREQ_HZ)]
    clock_hz: f64,

    /// Pin the benchmark thread to this CPU core before timing
    #[arg(short, long)]
    pin_core: Option<usize>,

    /// Also print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose));

    let config = BenchmarkConfig::default()
        .with_repeat_count(args.repeat)
        .with_clock_hz(args.clock_hz)
        .with_pin_to_core(args.pin_core);

    let harness = match Harness::new(config) {
        Ok(h) => h,
        Err(e) => {
            error!("{}", e);
            println!("{}", e.diagnostic());
            process::exit(e.exit_code());
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut target = functions::main_functions;

    let outcome = harness.run(&mut target, &mut out).and_then(|result| {
        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        Ok(())
    });

    if let Err(e) = outcome {
        error!("benchmark failed: {}", e);
        process::exit(e.exit_code());
    }
}
