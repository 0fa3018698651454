use crate::reports;
use cipherbreak::config::Config;
use cipherbreak::dictionary::Dictionary;
use cipherbreak::error::CbResult;
use cipherbreak::fitness::FitnessEvaluator;
use cipherbreak::optimizer::{EvolutionEngine, EvolutionOptions, ProgressCallback};
use clap::Args;
use std::fs::{self, File};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, default_value = "ciphertext.txt")]
    pub input: String,

    #[arg(short, long, default_value = "data/words.txt")]
    pub words: String,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Wall-clock limit in seconds; the best key found so far is kept
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(long, default_value = "decrypted_mapping.json")]
    pub key_out: String,

    #[arg(long, default_value = "fitness_history.csv")]
    pub history_out: String,

    #[arg(long)]
    pub plaintext_out: Option<String>,
}

struct CliProgress {
    deadline: Option<Instant>,
    report_interval: usize,
}

impl ProgressCallback for CliProgress {
    fn on_generation(&self, generation: usize, best_fitness: f64, mutation_rate: f64) -> bool {
        if generation % self.report_interval == 0 {
            info!(
                "Gen {:5} | Best: {:8.2} | Mutation: {:.2}",
                generation + 1,
                best_fitness,
                mutation_rate
            );
        }
        match self.deadline {
            Some(deadline) => Instant::now() < deadline,
            None => true,
        }
    }
}

pub fn run(args: CrackArgs, debug: bool) -> CbResult<()> {
    let ciphertext = fs::read_to_string(&args.input)?;
    info!(
        "Loaded ciphertext ({} chars) from {}",
        ciphertext.chars().count(),
        args.input
    );

    // A missing or empty word list degrades to frequency-only scoring; it is
    // not fatal.
    let dictionary = match Dictionary::load_from_file(&args.words) {
        Ok(dict) => dict,
        Err(e) => {
            warn!(
                "Could not load word list '{}': {}. Scoring on letter frequencies only.",
                args.words, e
            );
            Dictionary::empty()
        }
    };
    if dictionary.is_empty() {
        warn!("Word list is empty; word-match bonus is disabled for this run.");
    } else {
        info!("Loaded {} dictionary words from {}", dictionary.len(), args.words);
    }

    let evaluator = Arc::new(FitnessEvaluator::new(dictionary, &args.config.fitness));
    let engine = EvolutionEngine::new(evaluator, EvolutionOptions::from(&args.config));

    let callback = CliProgress {
        deadline: args.time.map(|secs| Instant::now() + Duration::from_secs(secs)),
        report_interval: if debug { 10 } else { 100 },
    };

    let result = engine.run(&ciphertext, args.seed, callback)?;

    if result.aborted {
        warn!(
            "Search aborted after {} generations; reporting best so far.",
            result.generations_run
        );
    }
    info!(
        "Best fitness {:.2} after {} generations (final mutation rate {:.2})",
        result.fitness, result.generations_run, result.final_mutation_rate
    );

    reports::print_key_table(&result.key);
    println!("\nDecrypted text:\n{}", result.plaintext);

    serde_json::to_writer_pretty(File::create(&args.key_out)?, &result.key)?;
    info!("Recovered key saved to {}", args.key_out);

    result.history.save_to_file(&args.history_out)?;
    info!("Fitness history saved to {}", args.history_out);

    if let Some(path) = &args.plaintext_out {
        fs::write(path, &result.plaintext)?;
        info!("Decrypted text saved to {}", path);
    }

    Ok(())
}
