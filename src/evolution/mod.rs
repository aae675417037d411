//! Evolutionary core: genes, chromosomes and the generational step.
//!
//! # Overview
//!
//! - **Random source** (`rng`): seeded uniform, integer and normal sampling
//! - **Genes** (`gene`): bounded real and integer alleles with clamped mutation
//! - **Chromosomes** (`chromosome`): ordered genes plus fitness; crossover and mutation
//! - **Fitness proportion** (`fitness`): strategies turning fitness into selection weights
//! - **Population** (`population`): elitism, roulette-wheel selection and reproduction
//!
//! Fitness is lower-is-better throughout (e.g. execution time); a fitness of
//! `0.0` means "not evaluated yet".
//!
//! # Example
//!
//! ```rust
//! use hyper_ga::evolution::{GaRng, Population, inverse_fitness_proportion};
//! use hyper_ga::schema::ParameterSchema;
//!
//! let mut rng = GaRng::new(42);
//! let schema = ParameterSchema::default();
//! let generation: Vec<_> = (1..=8)
//!     .map(|i| {
//!         let mut c = rng.random_chromosome(&schema).unwrap();
//!         c.set_fitness(i as f64);
//!         c
//!     })
//!     .collect();
//!
//! let mut population = Population::new(0.7, 0.1, 0.25).unwrap().with_rng(rng);
//! population.set_fitness_proportion_strategy(inverse_fitness_proportion);
//! population.set_generation(generation).unwrap();
//!
//! let next = population.evolve_next_generation().unwrap();
//! assert_eq!(next.len(), 8);
//! ```

mod chromosome;
mod fitness;
mod gene;
mod population;
mod rng;

pub use chromosome::Chromosome;
pub use fitness::{
    FitnessProportionStrategy, PROPORTION_TOLERANCE, inverse_fitness_proportion,
    validate_proportions,
};
pub use gene::{Gene, MUTATION_SCALE};
pub use population::{Population, render_generation, roulette_wheel_index};
pub use rng::GaRng;

use crate::schema::{EvolutionParams, GeneKind, ParameterSchema};

/// Contract violations raised by the evolutionary core.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Lower bound ({lower}) must be below upper bound ({upper})")]
    InvalidBounds { lower: String, upper: String },
    #[error("Allele {allele} outside bounds [{lower}, {upper}]")]
    AlleleOutOfBounds {
        allele: String,
        lower: String,
        upper: String,
    },
    #[error("Gene kind mismatch: expected {expected:?}, found {found:?}")]
    GeneKindMismatch { expected: GeneKind, found: GeneKind },
    #[error("Gene bounds mismatch")]
    GeneBoundsMismatch,
    #[error("Gene count mismatch: expected {expected}, found {found}")]
    GeneCountMismatch { expected: usize, found: usize },
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("crossover_probability + elitism_fraction must not exceed 1.0, got {0}")]
    ProbabilitySumExceeded(f64),
    #[error("No fitness proportion strategy installed")]
    MissingStrategy,
    #[error("Chromosome {index} is invalid (fitness {fitness}, {genes} genes)")]
    InvalidChromosome {
        index: usize,
        fitness: f64,
        genes: usize,
    },
    #[error("Generation is empty")]
    EmptyGeneration,
    #[error("Invalid fitness proportions: {0}")]
    InvalidProportions(String),
}

/// Generate `size` unevaluated chromosomes laid out by `schema`.
pub fn generate_population(
    schema: &ParameterSchema,
    size: usize,
    rng: &mut GaRng,
) -> Result<Vec<Chromosome>, EvolutionError> {
    (0..size).map(|_| rng.random_chromosome(schema)).collect()
}

/// Evolve an evaluated generation one step with the inverse-fitness strategy.
///
/// The population draws from a child source seeded by `rng`.
pub fn evolve_population(
    generation: Vec<Chromosome>,
    params: &EvolutionParams,
    rng: &mut GaRng,
) -> Result<Vec<Chromosome>, EvolutionError> {
    let mut population = Population::new(
        params.crossover_probability,
        params.mutation_probability,
        params.elitism_fraction,
    )?
    .with_rng(GaRng::new(rng.next_seed()));
    population.set_fitness_proportion_strategy(inverse_fitness_proportion);
    population.set_generation(generation)?;
    population.evolve_next_generation()
}
