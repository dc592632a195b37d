//! Randomness port: used by the simulation mode.

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Pick an index in `0..len`. Callers never pass `0`.
    fn pick(&mut self, len: usize) -> usize;
}
