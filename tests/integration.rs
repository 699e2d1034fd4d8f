use mathkit::cli::{parse_args, Invocation};
use mathkit::error::MathError;
use mathkit::harness::{BenchmarkConfig, Harness};
use mathkit::seed::{Seed, SeededRng};
use std::process::{Command, Output};

fn run_mathkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mathkit"))
        .args(args)
        .output()
        .expect("failed to launch mathkit")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn debug_rand_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| l.starts_with("Debug rand value"))
        .map(String::from)
        .collect()
}

#[test]
fn explicit_seed_run_is_reproducible() {
    let first = run_mathkit(&["-s=42"]);
    assert_eq!(first.status.code(), Some(0));
    let text = stdout_of(&first);
    assert!(text.contains("Seed = 42"), "output was:\n{}", text);

    let second = run_mathkit(&["-s=42"]);
    let draws = debug_rand_lines(&text);
    assert_eq!(draws.len(), 2);
    assert_eq!(draws, debug_rand_lines(&stdout_of(&second)));

    // The binary draws from the same generator the library exposes.
    let expected: Vec<u32> = SeededRng::new(Seed::new(42)).take(2).collect();
    assert_eq!(draws[0], format!("Debug rand value 1 = {}", expected[0]));
    assert_eq!(draws[1], format!("Debug rand value 2 = {}", expected[1]));
}

#[test]
fn time_seed_run_succeeds() {
    let output = run_mathkit(&[]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout_of(&output);
    assert!(text.contains("Generating random seed based on start time"));
    assert!(text.contains("Seed = "));
    assert!(text.contains("End time: "));
}

fn printed_seed(text: &str) -> u32 {
    text.lines()
        .find_map(|l| l.strip_prefix("Seed = "))
        .and_then(|v| v.trim().parse().ok())
        .expect("no seed line in output")
}

#[test]
fn consecutive_time_seeded_runs_get_different_seeds() {
    let first = run_mathkit(&[]);
    let second = run_mathkit(&[]);
    assert_eq!(first.status.code(), Some(0));
    assert_eq!(second.status.code(), Some(0));

    let a = printed_seed(&stdout_of(&first));
    let b = printed_seed(&stdout_of(&second));
    assert!(a < 1_000_000_000 && b < 1_000_000_000);
    assert_ne!(a, b, "two time-derived seeds collided");
}

#[test]
fn explicit_seed_reference_draws() {
    let output = run_mathkit(&["-s=42"]);
    let draws = debug_rand_lines(&stdout_of(&output));
    assert_eq!(
        draws,
        vec![
            "Debug rand value 1 = 286495313".to_string(),
            "Debug rand value 2 = 1130773425".to_string(),
        ]
    );
}

#[test]
fn help_flags_exit_zero() {
    for flag in ["-h", "-help", "--h", "--help"] {
        let output = run_mathkit(&[flag]);
        assert_eq!(output.status.code(), Some(0), "flag {}", flag);
        assert!(stdout_of(&output).contains("Usage:"), "flag {}", flag);
    }
}

#[test]
fn invalid_input_exits_one() {
    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec!["-x"], "invalid argument -x detected"),
        (vec!["-s=12a"], "12a is NOT a digit"),
        (vec!["-s=4294967296"], "max seed value is 4294967295"),
        (vec!["-s=1", "-s=2"], "\nERROR: Multiple seed values inputted"),
        (vec!["-s="], "invalid argument -s= detected"),
    ];
    for (args, message) in cases {
        let output = run_mathkit(&args);
        assert_eq!(output.status.code(), Some(1), "args {:?}", args);
        let text = stdout_of(&output);
        assert!(text.contains(message), "args {:?}, output:\n{}", args, text);
        assert!(!text.contains("End time:"), "args {:?}", args);
    }
}

#[test]
fn echo_stops_at_first_fatal_token() {
    let output = run_mathkit(&["-x", "-s=5"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout_of(&output);
    assert!(text.contains("argv[1] = -x"));
    assert!(!text.contains("argv[2]"));
    assert!(!text.contains("detected -s option"));
}

#[test]
fn parser_accepts_full_seed_range() {
    assert_eq!(
        parse_args(["-s=0"]),
        Ok(Invocation::Run {
            seed: Some(Seed::new(0))
        })
    );
    assert_eq!(
        parse_args(["-s=4294967295"]),
        Ok(Invocation::Run {
            seed: Some(Seed::new(u32::MAX))
        })
    );
    assert!(matches!(
        parse_args(["-s=42949672950"]),
        Err(MathError::SeedOverflow(_))
    ));
}

#[test]
fn harness_counts_calls_through_public_api() {
    let harness = Harness::new(BenchmarkConfig::default().with_repeat_count(50_000)).unwrap();
    let mut calls = 0u64;
    let mut out = Vec::new();
    let result = harness.run(&mut || calls += 1, &mut out).unwrap();

    assert_eq!(calls, 50_000);
    assert!(result.seed.is_some());
    assert!(result.elapsed_secs >= 0.0);
    let relative = (result.elapsed_secs / 50_000.0 - result.secs_per_call).abs()
        / result.secs_per_call.max(f64::MIN_POSITIVE);
    assert!(relative <= 1e-12);

    let text = String::from_utf8(out).unwrap();
    for label in [
        "total elapsed time = ",
        "total clock count  = ",
        "time / call        = ",
        "clocks / call      = ",
    ] {
        assert!(text.contains(label), "missing {:?}", label);
    }
}
