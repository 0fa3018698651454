use crate::cipher::{letter_index, ALPHABET_LEN};
use strum_macros::{Display, EnumString};

/// Expected percentage frequency of each letter in English prose, indexed by
/// ordinal (A through Z). The table sums to 100 up to rounding.
pub const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    8.12,  // A
    1.49,  // B
    2.71,  // C
    4.32,  // D
    12.02, // E
    2.30,  // F
    2.03,  // G
    5.92,  // H
    7.31,  // I
    0.10,  // J
    0.69,  // K
    3.98,  // L
    2.61,  // M
    6.95,  // N
    7.68,  // O
    1.82,  // P
    0.11,  // Q
    6.02,  // R
    6.28,  // S
    9.10,  // T
    2.88,  // U
    1.11,  // V
    2.09,  // W
    0.17,  // X
    2.11,  // Y
    0.07,  // Z
];

/// Which character count divides the per-letter tallies.
///
/// `AllChars` reproduces the reference behavior (spaces and punctuation
/// inflate the denominator); `LettersOnly` restricts it to A-Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FreqDenominator {
    #[default]
    AllChars,
    LettersOnly,
}

/// Tallies uppercase letters and the total character count of the text.
pub fn letter_counts(text: &str) -> ([u64; ALPHABET_LEN], u64) {
    let mut counts = [0u64; ALPHABET_LEN];
    let mut total = 0u64;
    for c in text.chars() {
        total += 1;
        if let Some(i) = letter_index(c) {
            counts[i] += 1;
        }
    }
    (counts, total)
}

/// Observed percentage frequency of each letter. A zero denominator (empty
/// text, or no letters under `LettersOnly`) yields all zeros rather than a
/// division by zero.
pub fn observed_frequencies(text: &str, denominator: FreqDenominator) -> [f64; ALPHABET_LEN] {
    let (counts, total_chars) = letter_counts(text);
    let denom = match denominator {
        FreqDenominator::AllChars => total_chars,
        FreqDenominator::LettersOnly => counts.iter().sum(),
    };
    if denom == 0 {
        return [0.0; ALPHABET_LEN];
    }
    std::array::from_fn(|i| (counts[i] as f64 / denom as f64) * 100.0)
}

/// Total absolute deviation of observed from expected frequencies.
pub fn deviation(observed: &[f64; ALPHABET_LEN]) -> f64 {
    ENGLISH_FREQUENCIES
        .iter()
        .zip(observed.iter())
        .map(|(expected, obs)| (expected - obs).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sums_to_one_hundred() {
        let sum: f64 = ENGLISH_FREQUENCIES.iter().sum();
        assert!((sum - 100.0).abs() < 0.05, "table sums to {}", sum);
    }

    #[test]
    fn all_letters_text_has_identical_modes() {
        let obs_all = observed_frequencies("AAAB", FreqDenominator::AllChars);
        let obs_letters = observed_frequencies("AAAB", FreqDenominator::LettersOnly);
        assert_eq!(obs_all, obs_letters);
        assert!((obs_all[0] - 75.0).abs() < 1e-9);
        assert!((obs_all[1] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn non_letters_inflate_the_reference_denominator() {
        let obs_all = observed_frequencies("AA  ", FreqDenominator::AllChars);
        let obs_letters = observed_frequencies("AA  ", FreqDenominator::LettersOnly);
        assert!((obs_all[0] - 50.0).abs() < 1e-9);
        assert!((obs_letters[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_yields_zero_frequencies() {
        let obs = observed_frequencies("", FreqDenominator::AllChars);
        assert_eq!(obs, [0.0; ALPHABET_LEN]);
        let expected_sum: f64 = ENGLISH_FREQUENCIES.iter().sum();
        assert!((deviation(&obs) - expected_sum).abs() < 1e-9);
    }
}
