//! Random source for the generational step.
//!
//! Every draw made by genes, chromosomes and populations goes through an
//! explicitly owned [`GaRng`], so a run is reproducible from its seed.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::*;
use rand_distr::StandardNormal;

use crate::schema::ParameterSchema;

use super::{Chromosome, EvolutionError, Gene};

/// Random number generator wrapper for evolutionary operations.
#[derive(Debug, Clone)]
pub struct GaRng {
    rng: StdRng,
}

impl GaRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create seeded from the wall clock.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    /// Uniform real in `[lower, upper]`.
    pub fn uniform_real(&mut self, lower: f64, upper: f64) -> f64 {
        self.rng.gen_range(lower..=upper)
    }

    /// Uniform integer in `[lower, upper]`.
    pub fn uniform_int(&mut self, lower: i64, upper: i64) -> i64 {
        self.rng.gen_range(lower..=upper)
    }

    /// Sample a normal distribution.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let noise: f64 = self.rng.sample(StandardNormal);
        mean + noise * std_dev
    }

    /// Bernoulli draw. `probability` must lie in `[0, 1]`; 0 never fires and 1 always does.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Generate a random chromosome laid out by `schema`.
    pub fn random_chromosome(
        &mut self,
        schema: &ParameterSchema,
    ) -> Result<Chromosome, EvolutionError> {
        let mut chromosome = Chromosome::new();
        for spec in schema.genes() {
            chromosome.add_gene(Gene::random(spec, self)?);
        }
        Ok(chromosome)
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_reproducible() {
        let mut a = GaRng::new(42);
        let mut b = GaRng::new(42);

        for _ in 0..16 {
            assert_eq!(a.uniform_real(0.0, 1.0), b.uniform_real(0.0, 1.0));
            assert_eq!(a.uniform_int(-5, 5), b.uniform_int(-5, 5));
            assert_eq!(a.normal(0.0, 1.0), b.normal(0.0, 1.0));
        }
    }

    #[test]
    fn test_uniform_ranges() {
        let mut rng = GaRng::new(7);
        for _ in 0..1000 {
            let x = rng.uniform_real(-2.0, 3.0);
            assert!((-2.0..=3.0).contains(&x));
            let n = rng.uniform_int(0, 1);
            assert!(n == 0 || n == 1);
        }
    }

    #[test]
    fn test_chance_edges() {
        let mut rng = GaRng::new(42);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_normal_statistics() {
        let mut rng = GaRng::new(42);
        let samples: Vec<f64> = (0..20_000).map(|_| rng.normal(5.0, 2.0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!((mean - 5.0).abs() < 0.1);
        assert!((var.sqrt() - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_random_chromosome() {
        let mut rng = GaRng::new(42);
        let schema = ParameterSchema::default();
        let chromosome = rng.random_chromosome(&schema).unwrap();

        assert_eq!(chromosome.len(), schema.len());
        assert_eq!(chromosome.fitness(), 0.0);
        for (gene, spec) in chromosome.genes().iter().zip(schema.genes()) {
            assert_eq!(gene.kind(), spec.kind);
            let value = gene.value_f64();
            assert!(value >= spec.lower && value <= spec.upper);
        }
    }

    #[test]
    fn test_child_seeds() {
        let mut rng = GaRng::new(42);
        assert_ne!(rng.next_seed(), rng.next_seed());

        let mut a = GaRng::new(42);
        let mut b = GaRng::new(42);
        let mut child_a = GaRng::new(a.next_seed());
        let mut child_b = GaRng::new(b.next_seed());
        assert_eq!(child_a.uniform_int(0, 1000), child_b.uniform_int(0, 1000));
    }
}
