use crate::frequency::FreqDenominator;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub fitness: FitnessWeights,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    #[arg(long, default_value_t = 1000)]
    pub population_size: usize,

    #[arg(long, default_value_t = 10_000)]
    pub generations: usize,

    #[arg(long, default_value_t = 0.1)]
    pub initial_mutation_rate: f64,

    #[arg(long, default_value_t = 0.1)]
    pub mutation_floor: f64,

    #[arg(long, default_value_t = 0.5)]
    pub mutation_cap: f64,

    // Rate adjustments applied per generation from the stagnation signal.
    #[arg(long, default_value_t = 0.05)]
    pub mutation_step_up: f64,

    #[arg(long, default_value_t = 0.01)]
    pub mutation_step_down: f64,

    // Fraction of the population sharing the generation maximum above which
    // the generation counts as stagnant.
    #[arg(long, default_value_t = 0.5)]
    pub stagnation_threshold: f64,
}

#[derive(Args, Debug, Clone)]
pub struct FitnessWeights {
    #[arg(long, default_value_t = 10.0)]
    pub word_weight: f64,

    #[arg(long, default_value_t = FreqDenominator::AllChars)]
    pub freq_denominator: FreqDenominator,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 10_000,
            initial_mutation_rate: 0.1,
            mutation_floor: 0.1,
            mutation_cap: 0.5,
            mutation_step_up: 0.05,
            mutation_step_down: 0.01,
            stagnation_threshold: 0.5,
        }
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            word_weight: 10.0,
            freq_denominator: FreqDenominator::AllChars,
        }
    }
}
