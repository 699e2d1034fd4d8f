use crate::error::{MathError, Result};
use crate::seed::Seed;
use tracing::debug;

/// Prefix of the explicit seed option
pub const SEED_OPTION: &str = "-s=";
/// Every spelling of the help flag
pub const HELP_FLAGS: [&str; 4] = ["-h", "-help", "--h", "--help"];

#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// Run the project, with a manual seed if one was given
    Run { seed: Option<Seed> },
    /// Print usage and exit successfully
    Help,
}

/// A single accepted command-line token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// `-s=<digits>` with a valid seed
    Seed(Seed),
    /// One of [`HELP_FLAGS`]
    Help,
}

/// Classify one argument, failing on a malformed seed or an unknown token.
pub fn classify(arg: &str) -> Result<Token> {
    if let Some(value) = arg.strip_prefix(SEED_OPTION).filter(|v| !v.is_empty()) {
        let seed = Seed::parse(value)?;
        debug!("detected -s option = {}", value);
        return Ok(Token::Seed(seed));
    }

    if HELP_FLAGS.contains(&arg) {
        return Ok(Token::Help);
    }

    Err(MathError::UnrecognizedArgument(arg.to_string()))
}

/// Pick the manual seed once every token has been read; more than one is an error.
pub fn select_seed(seeds: &[Seed]) -> Result<Option<Seed>> {
    match seeds {
        [] => Ok(None),
        [seed] => Ok(Some(*seed)),
        _ => Err(MathError::DuplicateSeedOption),
    }
}

/// Parse the arguments that follow the program name.
///
/// Tokens are handled left to right and the first decisive one wins: a help
/// flag returns immediately, as does a malformed seed or an unknown token.
/// Duplicate seed options are only reported once every token has been seen.
pub fn parse_args<I, S>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seeds = Vec::new();

    for arg in args {
        match classify(arg.as_ref())? {
            Token::Seed(seed) => seeds.push(seed),
            Token::Help => return Ok(Invocation::Help),
        }
    }

    Ok(Invocation::Run {
        seed: select_seed(&seeds)?,
    })
}

/// Help text for the `mathkit` binary
pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n\
         \x20  To build: cargo build --release\n\
         \x20  To run: {program} [options]\n\
         \n\
         Options:\n\
         \x20  -s=   Set the randomization seed manually, otherwise randomization is based on start time.\n\
         \x20  -h    Prints the help message. -help, --h, and --help also work.\n\
         \n\
         Examples:\n\
         \x20  {program}\n\
         \x20  {program} -s=123456789\n\
         \x20  {program} -s=$RANDOM\n\
         \x20  {program} -s=$RANDOM$RANDOM\n"
    )
}
