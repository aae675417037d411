//! Configuration types for the generational step.

use serde::{Deserialize, Serialize};

use super::ParameterSchema;

/// Probabilities driving one generational step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Probability that a non-elite child is bred by crossover (0.0-1.0).
    #[serde(default = "default_crossover_probability")]
    pub crossover_probability: f64,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Fraction of the generation copied forward unchanged (0.0-1.0).
    #[serde(default = "default_elitism_fraction")]
    pub elitism_fraction: f64,
    /// Random seed for reproducibility. Seeded from the clock when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            crossover_probability: default_crossover_probability(),
            mutation_probability: default_mutation_probability(),
            elitism_fraction: default_elitism_fraction(),
            random_seed: None,
        }
    }
}

fn default_crossover_probability() -> f64 {
    0.8
}
fn default_mutation_probability() -> f64 {
    0.1
}
fn default_elitism_fraction() -> f64 {
    0.1
}

impl EvolutionParams {
    /// Build params from the three probabilities, leaving the seed unset.
    pub fn new(crossover_probability: f64, mutation_probability: f64, elitism_fraction: f64) -> Self {
        Self {
            crossover_probability,
            mutation_probability,
            elitism_fraction,
            random_seed: None,
        }
    }

    /// Validate probability ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::ProbabilityOutOfRange { name, value })
            }
        };

        check(self.crossover_probability, "crossover_probability")?;
        check(self.mutation_probability, "mutation_probability")?;
        check(self.elitism_fraction, "elitism_fraction")?;

        let sum = self.crossover_probability + self.elitism_fraction;
        if sum > 1.0 {
            return Err(ConfigError::CrossoverElitismSum(sum));
        }

        Ok(())
    }
}

/// Everything the command-line tool can read from a JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Gene layout shared by every chromosome of a generation.
    #[serde(default)]
    pub schema: ParameterSchema,
    /// Generational step parameters.
    #[serde(default)]
    pub evolution: EvolutionParams,
}

impl RunConfig {
    /// Validate both halves of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schema.validate()?;
        self.evolution.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("crossover_probability + elitism_fraction must not exceed 1.0, got {0}")]
    CrossoverElitismSum(f64),
    #[error("Schema validation failed: {0}")]
    Schema(#[from] super::SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(EvolutionParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_crossover_elitism_over_one() {
        let params = EvolutionParams::new(0.6, 0.1, 0.5);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::CrossoverElitismSum(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let params = EvolutionParams::new(0.5, 1.5, 0.0);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "mutation_probability",
                ..
            })
        ));

        let params = EvolutionParams::new(-0.1, 0.5, 0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_boundary_sum_accepted() {
        assert!(EvolutionParams::new(0.5, 1.0, 0.5).validate().is_ok());
        assert!(EvolutionParams::new(0.0, 0.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_serialization_defaults() {
        let parsed: EvolutionParams =
            serde_json::from_str(r#"{"crossover_probability": 0.5}"#).unwrap();
        assert_eq!(parsed.crossover_probability, 0.5);
        assert_eq!(parsed.mutation_probability, 0.1);
        assert_eq!(parsed.random_seed, None);

        let config = RunConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schema.len(), config.schema.len());
        assert!(parsed.validate().is_ok());
    }
}
