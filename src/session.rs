//! Start-up and wrap-up of the `mathkit` command line.
//!
//! `initialize` prints the start banner, echoes the command line, parses it
//! and seeds the generator. `finalize` prints two values drawn from that
//! generator (so a seeded run can be checked for reproducibility) and the end
//! banner.

use std::io::Write;

use chrono::{DateTime, Local};
use tracing::info;

use crate::cli::{self, Token};
use crate::error::Result;
use crate::seed::{self, SeededRng};

pub const BANNER: &str =
    "===========================================================================";
pub const RULE: &str =
    "---------------------------------------------------------------------------";

/// `ctime(3)` layout, without the trailing newline
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Outcome of the start-up phase
#[derive(Debug)]
pub enum Startup {
    /// Arguments were valid; carry on with this generator
    Ready(SeededRng),
    /// Usage was printed; exit successfully
    Help,
}

/// Print the start banner, parse `argv` (program name first) and seed.
pub fn initialize<W: Write>(
    argv: &[String],
    start: DateTime<Local>,
    out: &mut W,
) -> Result<Startup> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "Start time: {}", start.format(CTIME_FORMAT))?;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "Detected the following input command:")?;
    write!(out, "  ")?;
    for arg in argv {
        write!(out, " {}", arg)?;
    }
    writeln!(out)?;
    writeln!(out, "Number of arguments detected argc = {}", argv.len())?;

    let program = argv.first().map(String::as_str).unwrap_or("mathkit");
    let mut seeds = Vec::new();
    for (i, arg) in argv.iter().enumerate() {
        writeln!(out, "argv[{}] = {}", i, arg)?;
        if i == 0 {
            continue;
        }

        match cli::classify(arg)? {
            Token::Seed(seed) => {
                let digits = arg.strip_prefix(cli::SEED_OPTION).unwrap_or(arg);
                writeln!(out, "   detected -s option in argv[{}] = {}", i, digits)?;
                seeds.push(seed);
            }
            Token::Help => {
                writeln!(out, "{}", RULE)?;
                write!(out, "{}", cli::usage(program))?;
                writeln!(out, "{}", RULE)?;
                return Ok(Startup::Help);
            }
        }
    }
    let manual = cli::select_seed(&seeds)?;
    writeln!(out, "{}", RULE)?;

    let resolved = seed::resolve(manual, &start);
    writeln!(out, "{}", resolved.source.describe())?;
    writeln!(out, "Seed = {}", resolved.seed)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    info!(seed = resolved.seed.value(), "generator seeded");
    Ok(Startup::Ready(SeededRng::new(resolved.seed)))
}

/// Print two debug draws from `rng` and the end banner.
pub fn finalize<W: Write>(rng: &mut SeededRng, end: DateTime<Local>, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    for n in 1..=2 {
        let value = rng.next().unwrap_or_default();
        writeln!(out, "Debug rand value {} = {}", n, value)?;
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out, "End time: {}", end.format(CTIME_FORMAT))?;
    writeln!(out, "{}", BANNER)?;
    out.flush()?;
    Ok(())
}
