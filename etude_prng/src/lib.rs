// Deterministic, portable pseudo-random number generator.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// Every randomized piece in `etude_music` draws from one `EtudeRng`, so a
// given seed always reproduces the same composition, note for note, on every
// platform.
//
// On top of the raw generator this crate provides the handful of sampling
// helpers the generators need: uniform integer ranges, weighted coin flips,
// picking from a slice, Fisher–Yates shuffling, and sampling distinct values
// from a range.
//
// **Critical constraint: determinism.** Every method on `EtudeRng` must
// produce identical output given the same prior state. The floating-point
// helpers only convert already-drawn integers; no float arithmetic feeds back
// into the generator state.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG, the sole source of randomness for note generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EtudeRng {
    s: [u64; 4],
}

impl EtudeRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two generators created with the same seed produce identical output
    /// sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Upper 32 bits of the next `u64`.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a uniform `f64` in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate a uniform `f64` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        assert!(low < high, "range_f64: low must be less than high");
        low + self.next_f64() * (high - low)
    }

    /// Generate a uniform random integer in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Generate a uniform random `usize` in `[low, high)`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Generate a uniform random `i32` in `[low, high)`. Negative bounds are
    /// fine; pitch offsets and transpositions are signed.
    ///
    /// Panics if `low >= high`.
    pub fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        assert!(low < high, "range_i32: low must be less than high");
        let span = (i64::from(high) - i64::from(low)) as u64;
        (i64::from(low) + self.range_u64(0, span) as i64) as i32
    }

    /// Return `true` with probability `p`. `p <= 0.0` never fires and
    /// `p >= 1.0` always does.
    pub fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly.
    ///
    /// Panics if `items` is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choice: cannot pick from an empty slice");
        &items[self.range_usize(0, items.len())]
    }

    /// Shuffle in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range_usize(0, i + 1);
            items.swap(i, j);
        }
    }

    /// Draw `k` distinct integers from `[low, high)`, in draw order.
    ///
    /// Panics if the range holds fewer than `k` values.
    pub fn sample_distinct(&mut self, low: i32, high: i32, k: usize) -> Vec<i32> {
        let mut pool: Vec<i32> = (low..high).collect();
        assert!(
            k <= pool.len(),
            "sample_distinct: cannot draw {k} values from a range of {}",
            pool.len()
        );
        for i in 0..k {
            let j = self.range_usize(i, pool.len());
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

/// SplitMix64, used only to expand a `u64` seed into the xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
