pub mod cli;
pub mod clock;
pub mod error;
pub mod functions;
pub mod harness;
pub mod logging;
pub mod seed;
pub mod session;
