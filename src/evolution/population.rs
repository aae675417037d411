//! Population and the generational step.

use log::{debug, trace};

use crate::schema::EvolutionParams;

use super::fitness::{FitnessProportionStrategy, validate_proportions};
use super::{Chromosome, EvolutionError, GaRng};

/// Fitness-sorted generation plus the parameters of one generational step.
pub struct Population {
    crossover_probability: f64,
    mutation_probability: f64,
    elitism_fraction: f64,
    strategy: Option<FitnessProportionStrategy>,
    generation: Vec<Chromosome>,
    rng: GaRng,
}

impl Population {
    /// Create an empty population, seeded from the clock.
    pub fn new(
        crossover_probability: f64,
        mutation_probability: f64,
        elitism_fraction: f64,
    ) -> Result<Self, EvolutionError> {
        for (name, value) in [
            ("crossover_probability", crossover_probability),
            ("mutation_probability", mutation_probability),
            ("elitism_fraction", elitism_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvolutionError::ProbabilityOutOfRange { name, value });
            }
        }

        let sum = crossover_probability + elitism_fraction;
        if sum > 1.0 {
            return Err(EvolutionError::ProbabilitySumExceeded(sum));
        }

        Ok(Self {
            crossover_probability,
            mutation_probability,
            elitism_fraction,
            strategy: None,
            generation: Vec::new(),
            rng: GaRng::from_time(),
        })
    }

    /// Create from configuration, seeding from `random_seed` when present.
    pub fn from_params(params: &EvolutionParams) -> Result<Self, EvolutionError> {
        let population = Self::new(
            params.crossover_probability,
            params.mutation_probability,
            params.elitism_fraction,
        )?;

        Ok(match params.random_seed {
            Some(seed) => population.with_rng(GaRng::new(seed)),
            None => population,
        })
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: GaRng) -> Self {
        self.rng = rng;
        self
    }

    /// Install the strategy that turns the sorted generation into selection weights.
    pub fn set_fitness_proportion_strategy<F>(&mut self, strategy: F)
    where
        F: Fn(&[Chromosome]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.strategy = Some(Box::new(strategy));
    }

    pub fn len(&self) -> usize {
        self.generation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generation.is_empty()
    }

    /// Current generation, ascending by fitness.
    pub fn generation(&self) -> &[Chromosome] {
        &self.generation
    }

    /// Admit one evaluated chromosome.
    pub fn add_chromosome(&mut self, chromosome: Chromosome) -> Result<(), EvolutionError> {
        check_member(&chromosome, self.generation.len())?;
        self.generation.push(chromosome);
        self.sort();
        Ok(())
    }

    /// Replace the whole generation. Nothing changes if any member is invalid.
    pub fn set_generation(&mut self, generation: Vec<Chromosome>) -> Result<(), EvolutionError> {
        for (index, chromosome) in generation.iter().enumerate() {
            check_member(chromosome, index)?;
        }
        self.generation = generation;
        self.sort();
        Ok(())
    }

    fn sort(&mut self) {
        // Stable: ties keep insertion order.
        self.generation.sort_by(Chromosome::cmp_fitness);
    }

    /// Breed the next generation.
    ///
    /// The first `round(elitism_fraction * n)` children are copies of the
    /// best (lowest-fitness) members. Every other child is either a
    /// crossover of two roulette-selected parents (with
    /// `crossover_probability`) or a copy of one, then mutated. All children
    /// come back unevaluated, and no child is returned unless all are.
    pub fn evolve_next_generation(&mut self) -> Result<Vec<Chromosome>, EvolutionError> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or(EvolutionError::MissingStrategy)?;

        if self.generation.is_empty() {
            return Err(EvolutionError::EmptyGeneration);
        }

        let size = self.generation.len();
        let proportions = strategy(self.generation.as_slice());
        validate_proportions(&proportions, size)?;

        let elite_count = ((self.elitism_fraction * size as f64).round() as usize).min(size);

        debug!(
            "Evolving generation of {} ({} elite), best fitness {}",
            size,
            elite_count,
            self.generation[0].fitness()
        );

        let mut next_generation = Vec::with_capacity(size);

        for elite in &self.generation[..elite_count] {
            let mut child = elite.clone();
            child.set_fitness(0.0);
            next_generation.push(child);
        }

        while next_generation.len() < size {
            let mut child = if self.rng.chance(self.crossover_probability) {
                let parent1 = roulette_wheel_select(&self.generation, &proportions, &mut self.rng);
                let parent2 = roulette_wheel_select(&self.generation, &proportions, &mut self.rng);
                parent1.crossover(parent2, &mut self.rng)?
            } else {
                let mut clone =
                    roulette_wheel_select(&self.generation, &proportions, &mut self.rng).clone();
                clone.set_fitness(0.0);
                clone
            };

            child.mutate(self.mutation_probability, &mut self.rng)?;
            next_generation.push(child);
        }

        debug_assert!(next_generation.iter().all(|c| c.fitness() == 0.0));
        Ok(next_generation)
    }
}

fn check_member(chromosome: &Chromosome, index: usize) -> Result<(), EvolutionError> {
    if chromosome.fitness() > 0.0 && !chromosome.is_empty() {
        Ok(())
    } else {
        Err(EvolutionError::InvalidChromosome {
            index,
            fitness: chromosome.fitness(),
            genes: chromosome.len(),
        })
    }
}

/// Pick a member with probability given by `proportions`.
fn roulette_wheel_select<'a>(
    generation: &'a [Chromosome],
    proportions: &[f64],
    rng: &mut GaRng,
) -> &'a Chromosome {
    let draw = rng.uniform_real(0.0, 1.0);
    &generation[roulette_wheel_index(proportions, draw)]
}

/// Walk `proportions` subtracting each entry from `draw`; the first index
/// where the remainder drops to zero or below wins.
///
/// When rounding leaves a positive remainder after the last entry, the last
/// index is returned.
pub fn roulette_wheel_index(proportions: &[f64], draw: f64) -> usize {
    let mut remainder = draw;
    for (i, p) in proportions.iter().enumerate() {
        remainder -= p;
        if remainder <= 0.0 {
            return i;
        }
    }

    trace!("Roulette wheel exhausted with remainder {}", remainder);
    proportions.len().saturating_sub(1)
}

/// Debug listing of a generation: a header per chromosome, its text and a blank line.
pub fn render_generation(generation: &[Chromosome]) -> String {
    let mut out = String::new();
    for (i, chromosome) in generation.iter().enumerate() {
        out.push_str(&format!("Chromosome {}\n{}\n", i, chromosome));
    }
    out
}
