//! Bounded genes.
//!
//! A gene carries its own bounds so that mutation and clamping need no
//! external schema. Genes that interact (copy, swap) must share kind and
//! bounds; mismatches are reported as errors.

use std::fmt;

use crate::schema::{GeneKind, GeneSpec};

use super::{EvolutionError, GaRng};

/// Mutation step size as a fraction of the gene's legal range.
pub const MUTATION_SCALE: f64 = 0.05;

/// A single bounded allele.
#[derive(Debug, Clone, PartialEq)]
pub enum Gene {
    /// Real-valued allele in `[lower, upper]`.
    Real { allele: f64, lower: f64, upper: f64 },
    /// Integer-valued allele in `[lower, upper]`.
    Integer { allele: i64, lower: i64, upper: i64 },
}

impl Gene {
    /// Real gene with an explicit allele.
    pub fn real(allele: f64, lower: f64, upper: f64) -> Result<Self, EvolutionError> {
        check_bounds(lower, upper)?;
        if !(lower..=upper).contains(&allele) {
            return Err(EvolutionError::AlleleOutOfBounds {
                allele: allele.to_string(),
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        Ok(Self::Real {
            allele,
            lower,
            upper,
        })
    }

    /// Integer gene with an explicit allele.
    pub fn integer(allele: i64, lower: i64, upper: i64) -> Result<Self, EvolutionError> {
        if lower >= upper {
            return Err(EvolutionError::InvalidBounds {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        if !(lower..=upper).contains(&allele) {
            return Err(EvolutionError::AlleleOutOfBounds {
                allele: allele.to_string(),
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        Ok(Self::Integer {
            allele,
            lower,
            upper,
        })
    }

    /// Real gene with a uniformly random allele.
    pub fn random_real(lower: f64, upper: f64, rng: &mut GaRng) -> Result<Self, EvolutionError> {
        check_bounds(lower, upper)?;
        Ok(Self::Real {
            allele: rng.uniform_real(lower, upper),
            lower,
            upper,
        })
    }

    /// Integer gene with a uniformly random allele.
    pub fn random_integer(lower: i64, upper: i64, rng: &mut GaRng) -> Result<Self, EvolutionError> {
        if lower >= upper {
            return Err(EvolutionError::InvalidBounds {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        Ok(Self::Integer {
            allele: rng.uniform_int(lower, upper),
            lower,
            upper,
        })
    }

    /// Gene with a uniformly random allele, laid out by `spec`.
    pub fn random(spec: &GeneSpec, rng: &mut GaRng) -> Result<Self, EvolutionError> {
        match spec.kind {
            GeneKind::Real => Self::random_real(spec.lower, spec.upper, rng),
            GeneKind::Integer => {
                let (lower, upper) = spec.integer_bounds();
                Self::random_integer(lower, upper, rng)
            }
        }
    }

    pub fn kind(&self) -> GeneKind {
        match self {
            Self::Real { .. } => GeneKind::Real,
            Self::Integer { .. } => GeneKind::Integer,
        }
    }

    /// Allele widened to `f64`.
    pub fn value_f64(&self) -> f64 {
        match *self {
            Self::Real { allele, .. } => allele,
            Self::Integer { allele, .. } => allele as f64,
        }
    }

    /// Bounds widened to `f64`.
    pub fn bounds_f64(&self) -> (f64, f64) {
        match *self {
            Self::Real { lower, upper, .. } => (lower, upper),
            Self::Integer { lower, upper, .. } => (lower as f64, upper as f64),
        }
    }

    /// True when both genes have the same kind and bounds.
    pub fn same_domain(&self, other: &Gene) -> bool {
        match (self, other) {
            (
                Self::Real {
                    lower: l1,
                    upper: u1,
                    ..
                },
                Self::Real {
                    lower: l2,
                    upper: u2,
                    ..
                },
            ) => l1 == l2 && u1 == u2,
            (
                Self::Integer {
                    lower: l1,
                    upper: u1,
                    ..
                },
                Self::Integer {
                    lower: l2,
                    upper: u2,
                    ..
                },
            ) => l1 == l2 && u1 == u2,
            _ => false,
        }
    }

    fn check_compatible(&self, other: &Gene) -> Result<(), EvolutionError> {
        if self.kind() != other.kind() {
            return Err(kind_mismatch(self, other));
        }
        if !self.same_domain(other) {
            return Err(EvolutionError::GeneBoundsMismatch);
        }
        Ok(())
    }

    /// Overwrite this allele with `other`'s.
    pub fn copy_value_from(&mut self, other: &Gene) -> Result<(), EvolutionError> {
        self.check_compatible(other)?;
        match (self, other) {
            (Self::Real { allele, .. }, Self::Real { allele: value, .. }) => *allele = *value,
            (Self::Integer { allele, .. }, Self::Integer { allele: value, .. }) => {
                *allele = *value
            }
            (this, other) => return Err(kind_mismatch(this, other)),
        }
        Ok(())
    }

    /// Exchange alleles with `other`.
    pub fn swap_value_with(&mut self, other: &mut Gene) -> Result<(), EvolutionError> {
        self.check_compatible(other)?;
        match (self, other) {
            (Self::Real { allele: a, .. }, Self::Real { allele: b, .. }) => std::mem::swap(a, b),
            (Self::Integer { allele: a, .. }, Self::Integer { allele: b, .. }) => {
                std::mem::swap(a, b)
            }
            (this, other) => return Err(kind_mismatch(this, other)),
        }
        Ok(())
    }

    /// Gaussian random walk around the current allele, clamped to bounds.
    ///
    /// The standard deviation is `MUTATION_SCALE * (upper - lower)`; integer
    /// genes round the sample to the nearest integer before clamping.
    pub fn mutate(&mut self, rng: &mut GaRng) {
        match self {
            Self::Real {
                allele,
                lower,
                upper,
            } => {
                let std_dev = MUTATION_SCALE * (*upper - *lower);
                *allele = rng.normal(*allele, std_dev).clamp(*lower, *upper);
            }
            Self::Integer {
                allele,
                lower,
                upper,
            } => {
                // Width in f64: `upper - lower` can overflow i64.
                let std_dev = MUTATION_SCALE * (*upper as f64 - *lower as f64);
                let sample = rng.normal(*allele as f64, std_dev).round();
                // Clamp in f64 first so huge samples cannot overflow the cast.
                *allele = sample.clamp(*lower as f64, *upper as f64) as i64;
            }
        }
    }
}

fn kind_mismatch(expected: &Gene, found: &Gene) -> EvolutionError {
    EvolutionError::GeneKindMismatch {
        expected: expected.kind(),
        found: found.kind(),
    }
}

fn check_bounds(lower: f64, upper: f64) -> Result<(), EvolutionError> {
    if !(upper - lower).is_finite() || lower >= upper {
        return Err(EvolutionError::InvalidBounds {
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real { allele, .. } => write!(f, "{}", allele),
            Self::Integer { allele, .. } => write!(f, "{}", allele),
        }
    }
}
