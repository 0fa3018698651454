pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod runner;

pub use self::runner::{
    CrackResult, EvolutionEngine, EvolutionOptions, FitnessHistory, ProgressCallback,
    SilentProgress,
};
