//! Flat-text population file format.
//!
//! Each chromosome is written as one `Param{i}: {allele}` line per gene,
//! a `Fitness: {value}` line once evaluated, and a trailing blank line.
//! Reading is whitespace-tokenized: every value is preceded by a label
//! token that is skipped, and the gene kinds and bounds come from the
//! caller's [`ParameterSchema`].

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::evolution::{Chromosome, EvolutionError, Gene};
use crate::schema::{GeneKind, ParameterSchema};

/// Population file errors.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Error opening file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Unexpected end of file.")]
    UnexpectedEof,
    #[error("Chromosome {chromosome}: cannot parse {token:?} as {expected}")]
    InvalidNumber {
        chromosome: usize,
        token: String,
        expected: &'static str,
    },
    #[error("Chromosome {chromosome}, gene {position}: {source}")]
    Gene {
        chromosome: usize,
        position: usize,
        #[source]
        source: EvolutionError,
    },
}

/// Write every chromosome followed by a blank line.
pub fn write_generation<W: Write>(w: &mut W, generation: &[Chromosome]) -> Result<(), FormatError> {
    for chromosome in generation {
        write!(w, "{}", chromosome)?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Read `expected_count` evaluated chromosomes laid out by `schema`.
pub fn read_generation<R: Read>(
    r: &mut R,
    schema: &ParameterSchema,
    expected_count: usize,
) -> Result<Vec<Chromosome>, FormatError> {
    let mut text = String::new();
    r.read_to_string(&mut text)?;

    let mut tokens = Tokens {
        inner: text.split_whitespace(),
        chromosome: 0,
    };
    let mut generation = Vec::with_capacity(expected_count);

    for index in 0..expected_count {
        tokens.chromosome = index;
        let mut chromosome = Chromosome::new();

        for (position, spec) in schema.genes().iter().enumerate() {
            tokens.label()?;
            let gene = match spec.kind {
                GeneKind::Real => Gene::real(tokens.real()?, spec.lower, spec.upper),
                GeneKind::Integer => {
                    let (lower, upper) = spec.integer_bounds();
                    Gene::integer(tokens.integer()?, lower, upper)
                }
            }
            .map_err(|source| FormatError::Gene {
                chromosome: index,
                position,
                source,
            })?;
            chromosome.add_gene(gene);
        }

        tokens.label()?;
        chromosome.set_fitness(tokens.real()?);
        generation.push(chromosome);
    }

    Ok(generation)
}

/// Write a generation to `path`, replacing any existing file.
pub fn write_generation_file(
    path: impl AsRef<Path>,
    generation: &[Chromosome],
) -> Result<(), FormatError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_generation(&mut BufWriter::new(file), generation)
}

/// Read a generation from `path`.
pub fn read_generation_file(
    path: impl AsRef<Path>,
    schema: &ParameterSchema,
    expected_count: usize,
) -> Result<Vec<Chromosome>, FormatError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_generation(&mut BufReader::new(file), schema, expected_count)
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    chromosome: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Result<&'a str, FormatError> {
        self.inner.next().ok_or(FormatError::UnexpectedEof)
    }

    fn label(&mut self) -> Result<(), FormatError> {
        self.next().map(|_| ())
    }

    fn real(&mut self) -> Result<f64, FormatError> {
        let token = self.next()?;
        token.parse().map_err(|_| self.invalid(token, "a real number"))
    }

    fn integer(&mut self) -> Result<i64, FormatError> {
        let token = self.next()?;
        token.parse().map_err(|_| self.invalid(token, "an integer"))
    }

    fn invalid(&self, token: &str, expected: &'static str) -> FormatError {
        FormatError::InvalidNumber {
            chromosome: self.chromosome,
            token: token.to_string(),
            expected,
        }
    }
}
