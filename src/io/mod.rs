//! Population file input and output.
//!
//! # File Format
//!
//! ```text
//! Param0: 0.4172
//! Param1: 57
//! ...
//! Fitness: 12.75      (only once evaluated)
//!                     (blank line between chromosomes)
//! ```
//!
//! Freshly generated populations carry no fitness lines. An external
//! evaluator appends `Fitness:` to each chromosome before the file is fed
//! back in for evolution; fitness is lower-is-better.

mod format;

pub use format::{
    FormatError, read_generation, read_generation_file, write_generation, write_generation_file,
};
