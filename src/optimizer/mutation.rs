use crate::cipher::{CipherKey, ALPHABET_LEN};
use fastrand::Rng;

/// Swaps the targets of two distinct random source letters. The runner
/// applies this to a fresh child with probability equal to the current
/// mutation rate.
pub fn mutate(rng: &mut Rng, key: &CipherKey) -> CipherKey {
    let a = rng.usize(0..ALPHABET_LEN);
    let mut b = rng.usize(0..ALPHABET_LEN - 1);
    if b >= a {
        b += 1;
    }
    key.swap(a, b)
}
