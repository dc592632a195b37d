//! Default [`RandomSource`] backed by the thread-local RNG.

use rand::Rng as _;

use crate::ports::RandomSource;

/// Random source drawing from [`rand::thread_rng`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
