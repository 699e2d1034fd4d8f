use tracing::Level;

/// Install the `fmt` subscriber on stderr, leaving stdout to the console report.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Map a `-v` count to a log level: none is WARN, one INFO, more DEBUG.
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}
