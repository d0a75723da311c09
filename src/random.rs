//! The source of randomness consumed by `shuffle`.
use rand::Rng;

/// A `RandomSource` produces uniformly distributed values in `[0, 1)`.
///
/// Every `rand::Rng` is a `RandomSource`, so `shuffle_with` accepts a seeded
/// `StdRng` (for reproducible output) or `rand::rng()` alike.
pub trait RandomSource {
    /// Returns the next value, uniformly distributed in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Maps a value in `[0, 1)` to an index in `0..len`. Values outside the
/// contract are clamped, so the index is always in bounds for `len > 0`.
pub(crate) fn unit_to_index(unit: f64, len: usize) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let index = (unit.max(0.0) * len as f64) as usize;
    index.min(len.saturating_sub(1))
}
