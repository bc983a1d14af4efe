use crate::rational::RationalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The program's counts and rows do not describe a tableau.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The entering column has no positive constraint entry.
    #[error("The problem is unbounded (entering column {column} has no positive entry)")]
    Unbounded { column: usize },
    #[error(transparent)]
    Arithmetic(#[from] RationalError),
}
