use crate::error::{CbResult, CipherBreakError};
use fastrand::Rng;

/// Shifts raw fitness scores into non-negative selection weights.
///
/// Scores move by `-min + 1` only when the minimum is negative; otherwise
/// they are returned unchanged. A weight vector that is still entirely zero
/// after the shift leaves roulette selection with nothing to weight by, which
/// is a configuration error rather than something to paper over with uniform
/// selection.
pub fn normalize_weights(scores: &[f64]) -> CbResult<Vec<f64>> {
    let min = scores
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    let weights: Vec<f64> = if min < 0.0 {
        scores.iter().map(|s| s - min + 1.0).collect()
    } else {
        scores.to_vec()
    };

    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(CipherBreakError::Config(
            "selection weights are all zero; no candidate can be weighted".into(),
        ));
    }
    Ok(weights)
}

/// Fitness-proportionate selection over a fixed weight vector, with
/// replacement. Built once per generation after normalization.
pub struct RouletteWheel {
    cumulative: Vec<f64>,
    total: f64,
}

impl RouletteWheel {
    pub fn new(weights: &[f64]) -> CbResult<Self> {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0;
        for &w in weights {
            total += w;
            cumulative.push(total);
        }
        if total <= 0.0 {
            return Err(CipherBreakError::Config(
                "roulette wheel requires a positive total weight".into(),
            ));
        }
        Ok(Self { cumulative, total })
    }

    /// Draws one index with probability proportional to its weight.
    pub fn pick(&self, rng: &mut Rng) -> usize {
        let target = rng.f64() * self.total;
        let idx = self.cumulative.partition_point(|&c| c <= target);
        // Guard against float rounding at the top end.
        idx.min(self.cumulative.len() - 1)
    }

    /// Draws two independent parents; the same individual may come up twice.
    pub fn pick_parents(&self, rng: &mut Rng) -> (usize, usize) {
        (self.pick(rng), self.pick(rng))
    }
}
