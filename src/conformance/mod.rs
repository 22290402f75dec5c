//! Conformance vectors for the text and binary formats.
//!
//! Vectors pin down byte-exact behaviour that other implementations of the
//! format must reproduce: compact/indented output, the escape table, the
//! binary layout, and which inputs are rejected with which error kind.

pub mod corpus;

pub use corpus::{
    run_vector, Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector,
};

use thiserror::Error;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors loading a corpus. Failures of individual vectors are reported as
/// [`TestResult`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConformanceError {
    /// The corpus file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
    /// The corpus file is not a valid corpus document.
    #[error("invalid corpus: {0}")]
    Format(String),
}
