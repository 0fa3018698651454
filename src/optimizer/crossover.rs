use crate::cipher::{CipherKey, ALPHABET_LEN};
use fastrand::Rng;

const UNSET: u8 = u8::MAX;

/// Single split-point crossover with conflict repair.
///
/// The child takes parent A's assignments up to a random split, adopts parent
/// B's assignment for each remaining letter unless its target is already
/// taken, then pairs leftover sources with leftover targets in ascending
/// alphabet order. The repair step makes the result a complete bijection no
/// matter how many conflicts occurred.
pub fn crossover(rng: &mut Rng, a: &CipherKey, b: &CipherKey) -> CipherKey {
    let split = rng.usize(1..ALPHABET_LEN);

    let mut child = [UNSET; ALPHABET_LEN];
    let mut used = [false; ALPHABET_LEN];

    // 1. Front segment verbatim from parent A
    for i in 0..split {
        let t = a.forward()[i];
        child[i] = t;
        used[t as usize] = true;
    }

    // 2. Parent B's targets where still free
    for i in split..ALPHABET_LEN {
        let t = b.forward()[i];
        if !used[t as usize] {
            child[i] = t;
            used[t as usize] = true;
        }
    }

    // 3. Pair unassigned sources with unused targets, both in alphabet order
    let mut free = (0..ALPHABET_LEN as u8).filter(|&t| !used[t as usize]);
    for slot in child.iter_mut() {
        if *slot == UNSET {
            *slot = free.next().expect("as many free targets as empty slots");
        }
    }

    CipherKey::from_forward_unchecked(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_permutation(key: &CipherKey) -> bool {
        let mut seen = [false; ALPHABET_LEN];
        for &t in key.forward() {
            if (t as usize) >= ALPHABET_LEN || seen[t as usize] {
                return false;
            }
            seen[t as usize] = true;
        }
        true
    }

    #[test]
    fn child_is_always_a_bijection() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..100 {
            let a = CipherKey::random(&mut rng);
            let b = CipherKey::random(&mut rng);
            let child = crossover(&mut rng, &a, &b);
            assert!(is_permutation(&child));
        }
    }

    #[test]
    fn identical_parents_reproduce_themselves() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let a = CipherKey::random(&mut rng);
            assert_eq!(crossover(&mut rng, &a, &a), a);
        }
    }

    #[test]
    fn front_segment_comes_from_parent_a() {
        // With identical rng state the split index is reproducible, so the
        // copied prefix must match parent A exactly.
        let mut key_rng = fastrand::Rng::with_seed(1);
        let a = CipherKey::random(&mut key_rng);
        let b = CipherKey::random(&mut key_rng);

        let mut rng = fastrand::Rng::with_seed(9);
        let split = rng.usize(1..ALPHABET_LEN);

        let mut rng = fastrand::Rng::with_seed(9);
        let child = crossover(&mut rng, &a, &b);

        assert_eq!(child.forward()[..split], a.forward()[..split]);
    }

    proptest! {
        #[test]
        fn prop_bijection_survives_crossover(s1 in any::<u64>(), s2 in any::<u64>(), s3 in any::<u64>()) {
            let a = CipherKey::random(&mut fastrand::Rng::with_seed(s1));
            let b = CipherKey::random(&mut fastrand::Rng::with_seed(s2));
            let child = crossover(&mut fastrand::Rng::with_seed(s3), &a, &b);
            prop_assert!(is_permutation(&child));
        }
    }
}
