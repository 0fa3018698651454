use super::selection::{normalize_weights, RouletteWheel};
use super::{crossover, mutation};
use crate::cipher::CipherKey;
use crate::config::Config;
use crate::error::{CbResult, CipherBreakError};
use crate::fitness::FitnessEvaluator;
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    pub population_size: usize,
    pub generations: usize,
    pub initial_mutation_rate: f64,
    pub mutation_floor: f64,
    pub mutation_cap: f64,
    pub mutation_step_up: f64,
    pub mutation_step_down: f64,
    pub stagnation_threshold: f64,
}

impl From<&Config> for EvolutionOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            population_size: cfg.search.population_size,
            generations: cfg.search.generations,
            initial_mutation_rate: cfg.search.initial_mutation_rate,
            mutation_floor: cfg.search.mutation_floor,
            mutation_cap: cfg.search.mutation_cap,
            mutation_step_up: cfg.search.mutation_step_up,
            mutation_step_down: cfg.search.mutation_step_down,
            stagnation_threshold: cfg.search.stagnation_threshold,
        }
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl EvolutionOptions {
    pub fn validate(&self) -> CbResult<()> {
        if self.population_size == 0 {
            return Err(CipherBreakError::Config(
                "population_size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(CipherBreakError::Config(
                "generations must be at least 1".into(),
            ));
        }
        if self.mutation_floor > self.mutation_cap {
            return Err(CipherBreakError::Config(format!(
                "mutation_floor {} exceeds mutation_cap {}",
                self.mutation_floor, self.mutation_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_mutation_rate) {
            return Err(CipherBreakError::Config(format!(
                "initial_mutation_rate {} is not a probability",
                self.initial_mutation_rate
            )));
        }
        if self.mutation_step_up < 0.0 || self.mutation_step_down < 0.0 {
            return Err(CipherBreakError::Config(
                "mutation rate steps must be non-negative".into(),
            ));
        }
        if !(self.stagnation_threshold > 0.0 && self.stagnation_threshold <= 1.0) {
            return Err(CipherBreakError::Config(format!(
                "stagnation_threshold {} must be in (0, 1]",
                self.stagnation_threshold
            )));
        }
        Ok(())
    }
}

/// Receives one update per generation with the running-best fitness.
/// Boolean return value indicates if the search should continue (true) or
/// abort (false); on abort the engine reports the best found so far.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, generation: usize, best_fitness: f64, mutation_rate: f64) -> bool;
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for &T {
    fn on_generation(&self, generation: usize, best_fitness: f64, mutation_rate: f64) -> bool {
        (**self).on_generation(generation, best_fitness, mutation_rate)
    }
}

/// Callback for headless runs; never aborts.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation(&self, _generation: usize, _best_fitness: f64, _mutation_rate: f64) -> bool {
        true
    }
}

/// Append-only record of the best raw fitness per generation, for diagnostics
/// and external charting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessHistory(Vec<f64>);

impl FitnessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, best_fitness: f64) {
        self.0.push(best_fitness);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes `generation,best_fitness` rows, 1-indexed like the progress log.
    pub fn write_csv<W: Write>(&self, writer: W) -> CbResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["generation", "best_fitness"])?;
        for (i, score) in self.0.iter().enumerate() {
            wtr.write_record([(i + 1).to_string(), score.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CbResult<()> {
        self.write_csv(File::create(path)?)
    }
}

#[derive(Debug, Clone)]
pub struct CrackResult {
    pub key: CipherKey,
    pub fitness: f64,
    pub plaintext: String,
    pub history: FitnessHistory,
    pub generations_run: usize,
    pub final_mutation_rate: f64,
    pub aborted: bool,
}

/// Next mutation rate from the stagnation signal: a step up (capped) when
/// more than the threshold fraction of the population shares the generation
/// maximum, a smaller step down (floored) otherwise.
pub fn next_mutation_rate(
    rate: f64,
    shared_max_count: usize,
    population_size: usize,
    opts: &EvolutionOptions,
) -> f64 {
    if shared_max_count as f64 > opts.stagnation_threshold * population_size as f64 {
        (rate + opts.mutation_step_up).min(opts.mutation_cap)
    } else {
        (rate - opts.mutation_step_down).max(opts.mutation_floor)
    }
}

/// Produces one full replacement population: for each child, draw two
/// parents from the wheel, cross them over, then mutate with probability
/// `mutation_rate`.
///
/// Children are independent once the weight vector is fixed, so production
/// fans out over rayon; each child derives its own rng from a seed drawn off
/// the master rng, keeping runs reproducible.
pub fn next_generation(
    rng: &mut fastrand::Rng,
    population: &[CipherKey],
    weights: &[f64],
    mutation_rate: f64,
) -> CbResult<Vec<CipherKey>> {
    let wheel = RouletteWheel::new(weights)?;
    let generation_seed = rng.u64(..);

    let children = (0..population.len())
        .into_par_iter()
        .map(|i| {
            let mut child_rng = fastrand::Rng::with_seed(generation_seed.wrapping_add(i as u64));
            let (p1, p2) = wheel.pick_parents(&mut child_rng);
            let child = crossover::crossover(&mut child_rng, &population[p1], &population[p2]);
            if child_rng.f64() < mutation_rate {
                mutation::mutate(&mut child_rng, &child)
            } else {
                child
            }
        })
        .collect();

    Ok(children)
}

/// Generational control loop. Owns nothing mutable between runs; population,
/// mutation rate and running best are explicit state threaded through each
/// generation step.
pub struct EvolutionEngine {
    evaluator: Arc<FitnessEvaluator>,
    options: EvolutionOptions,
}

impl EvolutionEngine {
    pub fn new(evaluator: Arc<FitnessEvaluator>, options: EvolutionOptions) -> Self {
        Self { evaluator, options }
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        ciphertext: &str,
        seed: Option<u64>,
        callback: CB,
    ) -> CbResult<CrackResult> {
        self.options.validate()?;
        let opts = &self.options;

        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let mut population: Vec<CipherKey> = (0..opts.population_size)
            .map(|_| CipherKey::random(&mut rng))
            .collect();

        let mut mutation_rate = opts.initial_mutation_rate;
        let mut best: Option<(CipherKey, f64)> = None;
        let mut history = FitnessHistory::new();
        let mut generations_run = 0;
        let mut aborted = false;

        for generation in 0..opts.generations {
            // 1. Evaluate the whole generation in parallel
            let scores = self.evaluator.evaluate_population(ciphertext, &population);

            // 2. Record the generation best; the running best only moves on
            //    strict improvement, decoupled from population replacement
            let (best_idx, gen_best) = scores
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(&b.1).expect("fitness is never NaN"))
                .expect("population is never empty");
            history.push(gen_best);

            match best {
                Some((_, fitness)) if gen_best <= fitness => {}
                _ => best = Some((population[best_idx], gen_best)),
            }
            generations_run = generation + 1;

            let running_best = best.expect("set above").1;
            if !callback.on_generation(generation, running_best, mutation_rate) {
                aborted = true;
                break;
            }

            // 3. Adapt the mutation rate from the stagnation signal
            let shared_max = scores.iter().filter(|&&s| s == gen_best).count();
            mutation_rate =
                next_mutation_rate(mutation_rate, shared_max, scores.len(), opts);

            // 4. Full generational replacement
            let weights = normalize_weights(&scores)?;
            population = next_generation(&mut rng, &population, &weights, mutation_rate)?;
        }

        let (key, fitness) = best.expect("at least one generation ran");
        Ok(CrackResult {
            key,
            fitness,
            plaintext: key.decrypt(ciphertext),
            history,
            generations_run,
            final_mutation_rate: mutation_rate,
            aborted,
        })
    }
}
