//! Seed resolution and per-pipeline random stream construction.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source threaded through every generation phase.
pub type GenRng = ChaCha8Rng;

/// Requested seed value meaning "draw a fresh seed and record it".
pub const RANDOM_SEED_SENTINEL: i64 = -1;

pub const LAYOUT_STREAM: u64 = 1;
pub const ENCOUNTER_STREAM: u64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Fixed(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Fixed(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn resolve_seed(requested: i64) -> SeedChoice {
    if requested == RANDOM_SEED_SENTINEL {
        SeedChoice::Generated(generate_runtime_seed())
    } else {
        SeedChoice::Fixed(requested as u64)
    }
}

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    // Keep generated seeds non-negative so they round-trip through the i64 seed field.
    mix_seed(entropy) & (i64::MAX as u64)
}

pub fn derive_stream_seed(seed: u64, stream: u64) -> u64 {
    mix_seed(seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D))
}

pub fn rng_for_stream(seed: u64, stream: u64) -> GenRng {
    GenRng::seed_from_u64(derive_stream_seed(seed, stream))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
