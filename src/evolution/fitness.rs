//! Fitness-proportion strategies.
//!
//! A strategy maps a generation sorted by ascending fitness to one selection
//! weight per member. Weights are non-negative and sum to 1.0.

use super::{Chromosome, EvolutionError};

/// Allowed deviation of a proportion vector's sum from 1.0.
pub const PROPORTION_TOLERANCE: f64 = 1e-8;

/// Strategy type installed on a population.
pub type FitnessProportionStrategy = Box<dyn Fn(&[Chromosome]) -> Vec<f64> + Send + Sync>;

/// Default strategy for cost-like fitness (lower is better).
///
/// Each fitness is inverted against the worst (largest) one, turning
/// e.g. execution times into speedups, then normalized. For fitness
/// `[2, 4, 8]` this yields `[4/7, 2/7, 1/7]`.
///
/// Expects a non-empty generation sorted ascending with every fitness > 0;
/// anything else produces a vector that fails [`validate_proportions`].
pub fn inverse_fitness_proportion(generation: &[Chromosome]) -> Vec<f64> {
    let Some(worst) = generation.last().map(Chromosome::fitness) else {
        return Vec::new();
    };

    let inverted: Vec<f64> = generation.iter().map(|c| worst / c.fitness()).collect();
    let total: f64 = inverted.iter().sum();

    inverted.into_iter().map(|value| value / total).collect()
}

/// Check a proportion vector against the generation it was computed for.
pub fn validate_proportions(proportions: &[f64], expected_len: usize) -> Result<(), EvolutionError> {
    if proportions.len() != expected_len {
        return Err(EvolutionError::InvalidProportions(format!(
            "expected {} entries, got {}",
            expected_len,
            proportions.len()
        )));
    }

    if let Some((i, p)) = proportions
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(EvolutionError::InvalidProportions(format!(
            "entry {} is {}",
            i, p
        )));
    }

    let sum: f64 = proportions.iter().sum();
    if (sum - 1.0).abs() >= PROPORTION_TOLERANCE {
        return Err(EvolutionError::InvalidProportions(format!(
            "entries sum to {}",
            sum
        )));
    }

    Ok(())
}
