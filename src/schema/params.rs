//! Parameter schema: the per-position gene kinds and bounds of a chromosome.

use serde::{Deserialize, Serialize};

/// Value domain of a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneKind {
    /// Real-valued allele.
    Real,
    /// Integer-valued allele.
    Integer,
}

/// Kind and bounds of one chromosome position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSpec {
    /// Label used when rendering (informational only).
    pub name: String,
    /// Allele domain.
    pub kind: GeneKind,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

impl GeneSpec {
    /// Real-valued position.
    pub fn real(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::Real,
            lower,
            upper,
        }
    }

    /// Integer-valued position.
    pub fn integer(name: impl Into<String>, lower: i64, upper: i64) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::Integer,
            lower: lower as f64,
            upper: upper as f64,
        }
    }

    /// Bounds as integers, saturating at the `i64` range. Only meaningful for `GeneKind::Integer`.
    pub fn integer_bounds(&self) -> (i64, i64) {
        (self.lower as i64, self.upper as i64)
    }

    fn validate(&self, position: usize) -> Result<(), SchemaError> {
        if !(self.upper - self.lower).is_finite() {
            return Err(SchemaError::NonFiniteBounds { position });
        }
        if self.lower >= self.upper {
            return Err(SchemaError::InvalidBounds {
                position,
                lower: self.lower,
                upper: self.upper,
            });
        }
        if self.kind == GeneKind::Integer
            && (self.lower.fract() != 0.0 || self.upper.fract() != 0.0)
        {
            return Err(SchemaError::FractionalIntegerBounds { position });
        }
        Ok(())
    }
}

/// Ordered gene layout shared by every chromosome of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    genes: Vec<GeneSpec>,
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self {
            genes: vec![
                GeneSpec::real("Param0", 0.0, 1.0),
                GeneSpec::integer("Param1", 0, 100),
                GeneSpec::real("Param2", 0.0, 1.0),
                GeneSpec::integer("Param3", 0, 20),
                GeneSpec::integer("Param4", 0, 20),
                GeneSpec::integer("Param5", 0, 20),
            ],
        }
    }
}

impl ParameterSchema {
    pub fn new(genes: Vec<GeneSpec>) -> Self {
        Self { genes }
    }

    /// Position specs in chromosome order.
    pub fn genes(&self) -> &[GeneSpec] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Validate every position.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.genes.is_empty() {
            return Err(SchemaError::Empty);
        }
        for (position, spec) in self.genes.iter().enumerate() {
            spec.validate(position)?;
        }
        Ok(())
    }
}

/// Schema validation errors.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema must declare at least one gene")]
    Empty,
    #[error("Gene {position} bounds and their width must be finite")]
    NonFiniteBounds { position: usize },
    #[error("Gene {position} lower bound ({lower}) must be below upper bound ({upper})")]
    InvalidBounds {
        position: usize,
        lower: f64,
        upper: f64,
    },
    #[error("Gene {position} is an integer gene with fractional bounds")]
    FractionalIntegerBounds { position: usize },
}
