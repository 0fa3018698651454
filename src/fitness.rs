use crate::cipher::CipherKey;
use crate::config::FitnessWeights;
use crate::dictionary::Dictionary;
use crate::frequency::{self, FreqDenominator};
use rayon::prelude::*;

/// Scores candidate decryptions: a bonus per dictionary word found minus the
/// total deviation from expected English letter frequencies. Higher is
/// better; scores are often negative.
///
/// Pure and deterministic for identical inputs, so a population can be
/// evaluated in parallel against shared read-only state.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    dictionary: Dictionary,
    word_weight: f64,
    denominator: FreqDenominator,
}

impl FitnessEvaluator {
    pub fn new(dictionary: Dictionary, weights: &FitnessWeights) -> Self {
        Self {
            dictionary,
            word_weight: weights.word_weight,
            denominator: weights.freq_denominator,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Fitness of an already-decrypted text.
    pub fn score_plaintext(&self, plaintext: &str) -> f64 {
        let word_score = self.word_weight * self.dictionary.match_count(plaintext) as f64;
        let observed = frequency::observed_frequencies(plaintext, self.denominator);
        word_score - frequency::deviation(&observed)
    }

    /// Fitness of a candidate key against the ciphertext.
    pub fn score(&self, ciphertext: &str, key: &CipherKey) -> f64 {
        self.score_plaintext(&key.decrypt(ciphertext))
    }

    /// Scores every individual of a generation. Each evaluation is
    /// independent, so the batch runs as a rayon parallel map.
    pub fn evaluate_population(&self, ciphertext: &str, population: &[CipherKey]) -> Vec<f64> {
        population
            .par_iter()
            .map(|key| self.score(ciphertext, key))
            .collect()
    }
}
