#![no_main]

use libfuzzer_sys::fuzz_target;
use mathkit::cli::{parse_args, Invocation};
use mathkit::error::MathError;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let args: Vec<&str> = text.split('\0').collect();

    match parse_args(&args) {
        Ok(Invocation::Run { seed: Some(seed) }) => {
            // Whatever was accepted must print back to a numeral the parser accepts.
            let echoed = format!("-s={}", seed);
            assert_eq!(
                parse_args([echoed.as_str()]),
                Ok(Invocation::Run { seed: Some(seed) })
            );
        }
        Ok(_) => {}
        Err(MathError::InvalidSeedFormat(v)) | Err(MathError::SeedOverflow(v)) => {
            assert!(args.iter().any(|a| a.strip_prefix("-s=") == Some(v.as_str())));
        }
        Err(e) => assert_eq!(e.exit_code(), 1),
    }
});
