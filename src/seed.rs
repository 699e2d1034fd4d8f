//! Random Seed Initialization
//!
//! Resolves the 32-bit seed for a run, either from an operator-supplied
//! decimal string or from the nanosecond field of the start timestamp, and
//! builds the generator the rest of the program draws from.

use chrono::{DateTime, TimeZone};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MathError, Result};

/// Largest accepted seed, written out the way operators type it
pub const MAX_SEED_VALUE_STR: &str = "4294967295";
/// Width of the seed in bits
pub const MAX_SEED_BITS: u32 = 32;
/// Upper bound (inclusive) of the values produced by [`SeededRng`]
pub const RAND_MAX: u32 = i32::MAX as u32;

/// A 32-bit generator seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Parse a decimal seed string.
    ///
    /// Only ASCII digits are accepted. A numeral longer than
    /// [`MAX_SEED_VALUE_STR`] overflows even when its extra characters are
    /// leading zeros; a numeral of the same length overflows when it sorts
    /// after it.
    pub fn parse(digits: &str) -> Result<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MathError::InvalidSeedFormat(digits.to_string()));
        }

        let too_long = digits.len() > MAX_SEED_VALUE_STR.len();
        let too_big = digits.len() == MAX_SEED_VALUE_STR.len() && digits > MAX_SEED_VALUE_STR;
        if too_long || too_big {
            return Err(MathError::SeedOverflow(digits.to_string()));
        }

        digits
            .parse::<u32>()
            .map(Seed)
            .map_err(|_| MathError::SeedOverflow(digits.to_string()))
    }

    /// Seed taken from the sub-second part of a wall-clock timestamp
    pub fn from_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self(now.timestamp_subsec_nanos())
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the seed of a run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// Nanosecond field of the start timestamp
    Time,
    /// `-s=` option on the command line
    Manual,
}

impl SeedSource {
    /// Banner line announcing the source
    pub fn describe(&self) -> &'static str {
        match self {
            SeedSource::Time => "Generating random seed based on start time",
            SeedSource::Manual => "Using manual seed from inputted arguments",
        }
    }
}

/// A seed together with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSeed {
    pub seed: Seed,
    pub source: SeedSource,
}

/// Pick the manual seed if there is one, otherwise derive it from `start`.
pub fn resolve<Tz: TimeZone>(manual: Option<Seed>, start: &DateTime<Tz>) -> ResolvedSeed {
    let resolved = match manual {
        Some(seed) => ResolvedSeed {
            seed,
            source: SeedSource::Manual,
        },
        None => ResolvedSeed {
            seed: Seed::from_timestamp(start),
            source: SeedSource::Time,
        },
    };
    debug!(seed = resolved.seed.value(), source = ?resolved.source, "resolved seed");
    resolved
}

/// Deterministic pseudo-random stream owned by its caller.
///
/// Yields values in `0..=RAND_MAX`. Two generators built from the same seed
/// produce the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: Seed,
    rng: StdRng,
}

impl SeededRng {
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(u64::from(seed.value())),
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }
}

impl Iterator for SeededRng {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.rng.next_u32() >> 1)
    }
}
