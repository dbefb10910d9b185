//! Minimal deterministic PRNG. No external `rand` crate needed.
//!
//! Random colors don't need cryptographic strength or cross-platform
//! stream stability — they need to be cheap, uniform enough for eyes,
//! and injectable so tests can pin a seed.

use std::time::{SystemTime, UNIX_EPOCH};

/// Xorshift32 — a tiny full-period PRNG over non-zero u32 state.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a seed. A zero seed is bumped to 1
    /// (xorshift has a fixed point at zero).
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Create a generator seeded from the system clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos());
        Self::new(nanos ^ 0x9e37_79b9)
    }

    /// Next raw 32-bit value.
    pub const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Plain modulo — the bias at `max` values this small (≤ 360) is
    /// far below anything a color picker could show.
    pub const fn next_below(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next_u32() % max
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
