//! Chromosomes: ordered genes plus a fitness score.

use std::cmp::Ordering;
use std::fmt;

use super::{EvolutionError, GaRng, Gene};

/// One candidate solution.
///
/// Fitness follows a lower-is-better convention (e.g. execution time);
/// `0.0` marks a chromosome that has not been evaluated yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chromosome {
    genes: Vec<Gene>,
    fitness: f64,
}

impl Chromosome {
    /// Empty, unevaluated chromosome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty chromosome carrying a fitness score.
    pub fn with_fitness(fitness: f64) -> Self {
        Self {
            genes: Vec::new(),
            fitness,
        }
    }

    /// Append a gene. Only used while building a chromosome.
    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.push(gene);
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != 0.0
    }

    /// Set fitness from a function of the genes.
    pub fn evaluate<F>(&mut self, fitness_fn: F)
    where
        F: FnOnce(&[Gene]) -> f64,
    {
        self.fitness = fitness_fn(&self.genes);
    }

    /// Ascending fitness order, used for stable sorting of generations.
    pub fn cmp_fitness(&self, other: &Chromosome) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }

    /// Uniform crossover.
    ///
    /// The child starts as a copy of `self`; every position independently
    /// takes `other`'s allele with probability 0.5. The child is unevaluated.
    pub fn crossover(
        &self,
        other: &Chromosome,
        rng: &mut GaRng,
    ) -> Result<Chromosome, EvolutionError> {
        if self.len() != other.len() {
            return Err(EvolutionError::GeneCountMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }

        let mut child = self.clone();
        child.fitness = 0.0;

        for (gene, donor) in child.genes.iter_mut().zip(&other.genes) {
            if rng.chance(0.5) {
                gene.copy_value_from(donor)?;
            }
        }

        Ok(child)
    }

    /// Mutate each gene independently with `mutation_probability`.
    pub fn mutate(
        &mut self,
        mutation_probability: f64,
        rng: &mut GaRng,
    ) -> Result<(), EvolutionError> {
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(EvolutionError::ProbabilityOutOfRange {
                name: "mutation_probability",
                value: mutation_probability,
            });
        }

        for gene in &mut self.genes {
            if rng.chance(mutation_probability) {
                gene.mutate(rng);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            writeln!(f, "Param{}: {}", i, gene)?;
        }
        if self.fitness != 0.0 {
            writeln!(f, "Fitness: {}", self.fitness)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParameterSchema;
    use proptest::prelude::*;

    fn sample(fitness: f64, real: f64, int: i64) -> Chromosome {
        let mut c = Chromosome::with_fitness(fitness);
        c.add_gene(Gene::real(real, 0.0, 1.0).unwrap());
        c.add_gene(Gene::integer(int, 0, 100).unwrap());
        c
    }

    #[test]
    fn test_crossover_mixes_parents() {
        let mut rng = GaRng::new(42);
        let schema = ParameterSchema::default();
        let a = rng.random_chromosome(&schema).unwrap();
        let b = rng.random_chromosome(&schema).unwrap();

        for _ in 0..50 {
            let child = a.crossover(&b, &mut rng).unwrap();
            assert_eq!(child.len(), a.len());
            assert_eq!(child.fitness(), 0.0);
            for ((g, ga), gb) in child.genes().iter().zip(a.genes()).zip(b.genes()) {
                assert!(g == ga || g == gb);
            }
        }
    }

    #[test]
    fn test_crossover_takes_from_both() {
        let mut rng = GaRng::new(42);
        let a = sample(1.0, 0.0, 0);
        let b = sample(2.0, 1.0, 100);

        let mut from_a = 0;
        let mut from_b = 0;
        for _ in 0..200 {
            let child = a.crossover(&b, &mut rng).unwrap();
            if child.genes()[0] == a.genes()[0] {
                from_a += 1;
            } else {
                from_b += 1;
            }
        }
        assert!(from_a > 50 && from_b > 50);
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = GaRng::new(42);
        let a = sample(1.0, 0.5, 5);
        let mut b = sample(1.0, 0.5, 5);
        b.add_gene(Gene::real(0.1, 0.0, 1.0).unwrap());

        assert!(matches!(
            a.crossover(&b, &mut rng),
            Err(EvolutionError::GeneCountMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_zero_mutation_is_identity() {
        let mut rng = GaRng::new(42);
        let original = rng.random_chromosome(&ParameterSchema::default()).unwrap();
        let mut mutated = original.clone();
        for _ in 0..100 {
            mutated.mutate(0.0, &mut rng).unwrap();
        }
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_full_mutation_touches_every_gene() {
        let mut rng = GaRng::new(42);
        let original = sample(0.0, 0.5, 50);
        let mut mutated = original.clone();
        mutated.mutate(1.0, &mut rng).unwrap();
        assert_ne!(mutated.genes()[0], original.genes()[0]);

        // Sigma is 5 on [0, 100]; an integer gene that is always mutated
        // moves within a handful of draws.
        let moved = (0..50).any(|_| {
            let mut c = original.clone();
            c.mutate(1.0, &mut rng).unwrap();
            c.genes()[1] != original.genes()[1]
        });
        assert!(moved);
    }

    #[test]
    fn test_mutation_probability_checked() {
        let mut rng = GaRng::new(42);
        let mut c = sample(0.0, 0.5, 50);
        assert!(c.mutate(1.5, &mut rng).is_err());
        assert!(c.mutate(-0.1, &mut rng).is_err());
    }

    #[test]
    fn test_evaluate_and_ordering() {
        let mut a = sample(0.0, 0.25, 10);
        a.evaluate(|genes| genes.iter().map(Gene::value_f64).sum());
        assert_eq!(a.fitness(), 10.25);
        assert!(a.is_evaluated());

        let b = sample(3.0, 0.5, 1);
        assert_eq!(b.cmp_fitness(&a), Ordering::Less);
        assert_eq!(a.cmp_fitness(&b), Ordering::Greater);
    }

    #[test]
    fn test_render() {
        let c = sample(0.0, 0.5, 7);
        assert_eq!(c.to_string(), "Param0: 0.5\nParam1: 7\n");

        let c = sample(12.5, 0.5, 7);
        assert_eq!(c.to_string(), "Param0: 0.5\nParam1: 7\nFitness: 12.5\n");
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_size(seed in any::<u64>(), fa in 0.1f64..100.0, fb in 0.1f64..100.0) {
            let mut rng = GaRng::new(seed);
            let schema = ParameterSchema::default();
            let mut a = rng.random_chromosome(&schema).unwrap();
            let mut b = rng.random_chromosome(&schema).unwrap();
            a.set_fitness(fa);
            b.set_fitness(fb);

            let child = a.crossover(&b, &mut rng).unwrap();
            prop_assert_eq!(child.len(), a.len());
            prop_assert_eq!(child.fitness(), 0.0);
        }
    }
}
