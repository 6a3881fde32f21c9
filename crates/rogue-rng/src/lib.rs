//! Xorshift random number generator
//!
//! A 128-bit xorshift variant with four 32-bit state words. Every layout
//! decision downstream consumes this sequence, so the arithmetic is kept
//! bit-exact: all shifts and XORs wrap at 32 bits and `next` returns the
//! absolute value of the state word read as a signed integer.

use serde::{Deserialize, Serialize};

/// Initial value of the `x` word (31415926535 wrapped to 32 bits)
const SEED_X: u32 = (31_415_926_535u64 & 0xFFFF_FFFF) as u32;
/// Initial value of the `y` word (8979323846 wrapped to 32 bits)
const SEED_Y: u32 = (8_979_323_846u64 & 0xFFFF_FFFF) as u32;
/// Initial value of the `z` word
const SEED_Z: u32 = 2_643_383_279;

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name ("next" or "next_int")
    pub func: &'static str,
    /// Lower bound passed to `next_int` (0 for `next`)
    pub arg_min: i32,
    /// Upper bound passed to `next_int` (0 for `next`)
    pub arg_max: i32,
    /// Value handed back to the caller
    pub result: i64,
    /// Raw value produced by `next`
    pub raw: u32,
}

/// Xorshift generator context
#[derive(Clone, Serialize, Deserialize)]
pub struct XorShift128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
    /// Seed the generator was created with
    seed: u32,
    /// Total number of raw values produced
    call_count: u64,
    /// If true, record all calls into trace log
    #[serde(skip)]
    tracing: bool,
    /// Trace log (only populated when tracing is true)
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for XorShift128 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XorShift128")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("w", &self.w)
            .field("seed", &self.seed)
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl XorShift128 {
    /// Create a generator seeded with a 32-bit value.
    pub fn new(seed: u32) -> Self {
        Self {
            x: SEED_X,
            y: SEED_Y,
            z: SEED_Z,
            w: seed,
            seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Create a generator with a random seed.
    ///
    /// The seed stays available through [`XorShift128::seed`] so a run can
    /// be reproduced afterwards.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the state and return the next value in `0..=2^31`.
    pub fn next(&mut self) -> u32 {
        let raw = self.step();
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func: "next",
                arg_min: 0,
                arg_max: 0,
                result: i64::from(raw),
                raw,
            });
        }
        raw
    }

    /// Returns a value in `[min, max]` as `min + next() % (max + 1 - min)`.
    ///
    /// The modulo mapping is slightly biased; the bias is part of the
    /// published sequence and is kept. If `max < min` nothing is drawn and
    /// `min` is returned.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let span = i64::from(max) + 1 - i64::from(min);
        if span <= 0 {
            return min;
        }
        let raw = self.step();
        let res = i64::from(min) + i64::from(raw) % span;
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func: "next_int",
                arg_min: min,
                arg_max: max,
                result: res,
                raw,
            });
        }
        // span fits in [1, 2^32], so res lies in [min, max]
        res as i32
    }

    fn step(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.call_count += 1;
        (self.w as i32).unsigned_abs()
    }

    /// Enable RNG tracing
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Disable RNG tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Get current RNG trace
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Total number of raw values produced
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for XorShift128 {
    fn default() -> Self {
        Self::new(0)
    }
}
