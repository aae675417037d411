//! Hyper GA - one generational step of a genetic algorithm over
//! hyperparameter-like configurations.
//!
//! Chromosomes mix real-valued and integer-valued genes, each bounded by its
//! own range. A run either generates a random initial population or takes a
//! fitness-annotated population and breeds the next one through roulette
//! wheel selection, uniform crossover, Gaussian mutation and elitism.
//!
//! # Architecture
//!
//! - `schema`: Configuration types (gene bounds table, step parameters)
//! - `evolution`: Genes, chromosomes, random source and the population step
//! - `io`: Flat-text population file reader and writer
//!
//! # Example
//!
//! ```rust,no_run
//! use hyper_ga::{
//!     evolution::{GaRng, evolve_population},
//!     io::{read_generation_file, write_generation_file},
//!     schema::{EvolutionParams, ParameterSchema},
//! };
//!
//! let schema = ParameterSchema::default();
//! let generation = read_generation_file("evaluated.txt", &schema, 20)?;
//!
//! let params = EvolutionParams::new(0.7, 0.1, 0.1);
//! let next = evolve_population(generation, &params, &mut GaRng::from_time())?;
//!
//! write_generation_file("next.txt", &next)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod evolution;
pub mod io;
pub mod schema;

// Re-export commonly used types
pub use evolution::{Chromosome, EvolutionError, GaRng, Gene, Population};
pub use schema::{EvolutionParams, GeneKind, ParameterSchema, RunConfig};
