//! Pluggable uniform random sources.
//!
//! The generator never calls a global RNG. Anything implementing
//! [`RandomSource`] can drive it: `fastrand::Rng` for real runs, or
//! [`ReplayRandom`] to replay a fixed draw sequence in regression tests.

/// Uniform random draws used by the terrain generator.
pub trait RandomSource {
    /// Returns a uniform real in `[0, upper)`.
    fn uniform_f32(&mut self, upper: f32) -> f32;

    /// Returns a uniform integer in `[low, high]` (both inclusive).
    fn uniform_i32(&mut self, low: i32, high: i32) -> i32;
}

impl RandomSource for fastrand::Rng {
    fn uniform_f32(&mut self, upper: f32) -> f32 {
        self.f32() * upper
    }

    fn uniform_i32(&mut self, low: i32, high: i32) -> i32 {
        self.i32(low..=high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_f32(&mut self, upper: f32) -> f32 {
        (**self).uniform_f32(upper)
    }

    fn uniform_i32(&mut self, low: i32, high: i32) -> i32 {
        (**self).uniform_i32(low, high)
    }
}

/// Replays recorded draws cyclically.
///
/// Real draws are stored as fractions of the requested upper bound, so the
/// same recording works whatever the catalog's total weight is. Integer draws
/// are clamped into the requested range. An empty recording yields `0.0` and
/// `low` respectively.
#[derive(Debug, Clone, Default)]
pub struct ReplayRandom {
    fractions: Vec<f32>,
    integers: Vec<i32>,
    next_fraction: usize,
    next_integer: usize,
}

impl ReplayRandom {
    /// Creates a replay source from fractions in `[0, 1)` and raw integers.
    #[must_use]
    pub fn new(fractions: Vec<f32>, integers: Vec<i32>) -> Self {
        Self {
            fractions,
            integers,
            next_fraction: 0,
            next_integer: 0,
        }
    }

    /// Number of real draws served so far.
    #[must_use]
    pub fn real_draws(&self) -> usize {
        self.next_fraction
    }

    /// Number of integer draws served so far.
    #[must_use]
    pub fn integer_draws(&self) -> usize {
        self.next_integer
    }
}

impl RandomSource for ReplayRandom {
    fn uniform_f32(&mut self, upper: f32) -> f32 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let fraction = self.fractions[self.next_fraction % self.fractions.len()];
        self.next_fraction += 1;
        fraction.clamp(0.0, 1.0) * upper
    }

    fn uniform_i32(&mut self, low: i32, high: i32) -> i32 {
        if self.integers.is_empty() {
            return low;
        }
        let value = self.integers[self.next_integer % self.integers.len()];
        self.next_integer += 1;
        value.clamp(low, high)
    }
}
