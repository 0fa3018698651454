use cipherbreak::cipher::CipherKey;
use cipherbreak::config::FitnessWeights;
use cipherbreak::dictionary::Dictionary;
use cipherbreak::fitness::FitnessEvaluator;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SAMPLE: &str = "IT WAS THE BEST OF TIMES IT WAS THE WORST OF TIMES IT WAS THE AGE \
    OF WISDOM IT WAS THE AGE OF FOOLISHNESS IT WAS THE EPOCH OF BELIEF IT WAS THE \
    EPOCH OF INCREDULITY IT WAS THE SEASON OF LIGHT IT WAS THE SEASON OF DARKNESS";

fn setup_evaluator() -> FitnessEvaluator {
    let words = [
        "IT", "WAS", "THE", "BEST", "OF", "TIMES", "WORST", "AGE", "WISDOM",
        "FOOLISHNESS", "EPOCH", "BELIEF", "INCREDULITY", "SEASON", "LIGHT", "DARKNESS",
    ];
    FitnessEvaluator::new(Dictionary::from_words(words), &FitnessWeights::default())
}

fn criterion_benchmark(c: &mut Criterion) {
    let evaluator = setup_evaluator();
    let mut rng = fastrand::Rng::with_seed(42);
    let secret = CipherKey::random(&mut rng);
    let ciphertext = secret.encrypt(SAMPLE);
    let population: Vec<CipherKey> = (0..256).map(|_| CipherKey::random(&mut rng)).collect();

    c.bench_function("score single key", |b| {
        b.iter(|| evaluator.score(black_box(&ciphertext), black_box(&secret)))
    });

    c.bench_function("evaluate population (256)", |b| {
        b.iter(|| evaluator.evaluate_population(black_box(&ciphertext), black_box(&population)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
