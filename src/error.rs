//! The error types of this crate.

use std::path::PathBuf;
use thiserror::Error;

/// Error that can appear while reading a grammar dump from disk.
#[derive(Debug, Error)]
pub struct ParsingError {
    path: PathBuf,
    msg: String,
}

impl ParsingError {
    pub(crate) fn new<P: Into<PathBuf>, S: Into<String>>(path: P, msg: S) -> Self {
        Self {
            path: path.into(),
            msg: msg.into(),
        }
    }
}

impl std::fmt::Display for ParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not load grammar dump {}: {}", self.path.display(), self.msg)
    }
}

/// Errors that can appear while combining loaded grammar halves.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The designated entrypoint is not declared anywhere
    #[error("The grammar does not declare the designated entrypoint: {0}")]
    MissingEntrypoint(String),

    /// The same rule name was declared twice
    #[error("The rule '{0}' is declared more than once")]
    DuplicateRule(String),
}
