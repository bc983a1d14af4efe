mod error;
mod problem;
mod rational;
mod simplex;
mod solution;
mod tableau;
mod trace;

pub use error::SolverError;
pub use problem::LinearProgram;
pub use rational::{Rational, RationalError};
pub use simplex::{Outcome, Simplex, SimplexState, solve};
pub use solution::Solution;
pub use tableau::{Basis, Tableau};
pub use trace::{Iteration, IterationTrace, Pivot};
