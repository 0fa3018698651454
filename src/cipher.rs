use crate::error::{CbResult, CipherBreakError};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const ALPHABET_LEN: usize = 26;

/// Ordinal of an uppercase letter in A-Z, or None for pass-through characters.
#[inline]
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some(c as usize - 'A' as usize)
    } else {
        None
    }
}

#[inline]
fn letter_at(ordinal: u8) -> char {
    (b'A' + ordinal) as char
}

/// A substitution key: a total bijection over the 26-letter uppercase
/// alphabet, stored as mutually consistent forward and inverse tables indexed
/// by letter ordinal.
///
/// Keys are immutable values. Every operator that derives a new key returns a
/// fresh instance, so populations can be evaluated concurrently without
/// locking. The public constructors only ever produce valid permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherKey {
    forward: [u8; ALPHABET_LEN],
    inverse: [u8; ALPHABET_LEN],
}

impl CipherKey {
    /// The key that maps every letter to itself.
    pub fn identity() -> Self {
        Self::from_forward_unchecked(std::array::from_fn(|i| i as u8))
    }

    /// Uniformly random permutation of the alphabet.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut forward: [u8; ALPHABET_LEN] = std::array::from_fn(|i| i as u8);
        rng.shuffle(&mut forward);
        Self::from_forward_unchecked(forward)
    }

    /// Builds a key from a forward table, rejecting anything that is not a
    /// permutation of 0..26.
    pub fn from_forward(forward: [u8; ALPHABET_LEN]) -> CbResult<Self> {
        let mut inverse = [u8::MAX; ALPHABET_LEN];
        for (src, &dst) in forward.iter().enumerate() {
            if dst as usize >= ALPHABET_LEN {
                return Err(CipherBreakError::Validation(format!(
                    "target ordinal {} for source '{}' is out of range",
                    dst,
                    letter_at(src as u8)
                )));
            }
            if inverse[dst as usize] != u8::MAX {
                return Err(CipherBreakError::Validation(format!(
                    "target letter '{}' is assigned more than once",
                    letter_at(dst)
                )));
            }
            inverse[dst as usize] = src as u8;
        }
        Ok(Self { forward, inverse })
    }

    /// Builds a key from (plain, cipher) letter pairs. Every letter must
    /// appear exactly once on each side.
    pub fn from_pairs<I>(pairs: I) -> CbResult<Self>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut forward = [u8::MAX; ALPHABET_LEN];
        for (plain, cipher) in pairs {
            let src = letter_index(plain.to_ascii_uppercase()).ok_or_else(|| {
                CipherBreakError::Validation(format!("invalid source letter '{}'", plain))
            })?;
            let dst = letter_index(cipher.to_ascii_uppercase()).ok_or_else(|| {
                CipherBreakError::Validation(format!("invalid target letter '{}'", cipher))
            })?;
            if forward[src] != u8::MAX {
                return Err(CipherBreakError::Validation(format!(
                    "source letter '{}' is assigned more than once",
                    letter_at(src as u8)
                )));
            }
            forward[src] = dst as u8;
        }
        if let Some(missing) = forward.iter().position(|&d| d == u8::MAX) {
            return Err(CipherBreakError::Validation(format!(
                "source letter '{}' has no assignment",
                letter_at(missing as u8)
            )));
        }
        Self::from_forward(forward)
    }

    /// Internal constructor for operators whose output is a permutation by
    /// construction. Violations are programming errors, not runtime ones.
    pub(crate) fn from_forward_unchecked(forward: [u8; ALPHABET_LEN]) -> Self {
        let mut inverse = [u8::MAX; ALPHABET_LEN];
        for (src, &dst) in forward.iter().enumerate() {
            debug_assert!((dst as usize) < ALPHABET_LEN, "target out of range");
            debug_assert!(
                inverse[dst as usize] == u8::MAX,
                "duplicate target in permutation"
            );
            inverse[dst as usize] = src as u8;
        }
        Self { forward, inverse }
    }

    /// New key with the targets of two source letters exchanged. A swap of
    /// two targets within a permutation is itself a permutation.
    pub fn swap(&self, a: usize, b: usize) -> Self {
        let mut forward = self.forward;
        forward.swap(a, b);
        Self::from_forward_unchecked(forward)
    }

    pub fn forward(&self) -> &[u8; ALPHABET_LEN] {
        &self.forward
    }

    pub fn inverse(&self) -> &[u8; ALPHABET_LEN] {
        &self.inverse
    }

    /// Uppercases the input and substitutes letters through the forward
    /// table; everything outside A-Z passes through unchanged.
    pub fn encrypt(&self, plaintext: &str) -> String {
        plaintext
            .chars()
            .map(|c| {
                let c = c.to_ascii_uppercase();
                match letter_index(c) {
                    Some(i) => letter_at(self.forward[i]),
                    None => c,
                }
            })
            .collect()
    }

    /// Substitutes uppercase letters through the inverse table; everything
    /// else passes through unchanged.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        ciphertext
            .chars()
            .map(|c| match letter_index(c) {
                Some(i) => letter_at(self.inverse[i]),
                None => c,
            })
            .collect()
    }

    /// (plain, cipher) pairs in alphabet order.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .map(|(i, &t)| (letter_at(i as u8), letter_at(t)))
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (plain, cipher)) in self.pairs().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}>{}", plain, cipher)?;
        }
        Ok(())
    }
}

// Persisted as an ordered 26-entry letter-to-letter table, the same shape the
// encryption utility writes.
impl Serialize for CipherKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ALPHABET_LEN))?;
        for (plain, cipher) in self.pairs() {
            map.serialize_entry(&plain, &cipher)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CipherKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = BTreeMap::<char, char>::deserialize(deserializer)?;
        CipherKey::from_pairs(table.into_iter()).map_err(D::Error::custom)
    }
}
