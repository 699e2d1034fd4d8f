use std::io;
use std::process;

use chrono::Local;
use mathkit::error::Result;
use mathkit::functions;
use mathkit::logging;
use mathkit::session::{self, Startup};
use tracing::Level;

fn main() {
    logging::init(Level::WARN);

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    if let Err(e) = run(&argv) {
        println!("{}", e.diagnostic());
        process::exit(e.exit_code());
    }
}

fn run(argv: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut rng = match session::initialize(argv, Local::now(), &mut out)? {
        Startup::Ready(rng) => rng,
        Startup::Help => return Ok(()),
    };

    functions::main_functions();

    session::finalize(&mut rng, Local::now(), &mut out)
}
