use crate::error::SolverError;
use crate::problem::LinearProgram;
use crate::rational::Rational;
use crate::solution::Solution;
use crate::tableau::{Basis, Tableau};
use crate::trace::{IterationTrace, Pivot};

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexState {
    /// Pivoting has not finished yet
    Running,
    /// No objective-row entry is positive
    Optimal,
    /// An entering column had no positive constraint entry
    Unbounded,
}

/// Tableau simplex engine using Dantzig's rule with a first-occurrence
/// min-ratio test. Owns the live tableau, basis and iteration trace.
#[derive(Debug, Clone)]
pub struct Simplex {
    tableau: Tableau,
    basis: Basis,
    trace: IterationTrace,
    state: SimplexState,
    unbounded_column: Option<usize>,
}

/// Everything a finished solve produces.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Outcome {
    pub trace: IterationTrace,
    pub tableau: Tableau,
    pub basis: Basis,
    pub solution: Solution,
}

/// Builds the initial tableau for `program`, pivots to optimality and
/// extracts the solution.
pub fn solve(program: &LinearProgram) -> Result<Outcome, SolverError> {
    let mut simplex = Simplex::new(program)?;
    simplex.run()?;
    Ok(simplex.into_outcome())
}

impl Simplex {
    pub fn new(program: &LinearProgram) -> Result<Self, SolverError> {
        let (tableau, basis) = Tableau::build(program)?;
        Ok(Self::from_tableau(tableau, basis))
    }

    pub fn from_tableau(tableau: Tableau, basis: Basis) -> Self {
        Self {
            tableau,
            basis,
            trace: IterationTrace::new(),
            state: SimplexState::Running,
            unbounded_column: None,
        }
    }

    pub fn state(&self) -> SimplexState {
        self.state
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn trace(&self) -> &IterationTrace {
        &self.trace
    }

    /// Pivots until the tableau is optimal or proven unbounded.
    ///
    /// Every state, the initial one included, is appended to the trace.
    /// Running an engine that already terminated returns the same result
    /// without touching the trace.
    pub fn run(&mut self) -> Result<SimplexState, SolverError> {
        match self.state {
            SimplexState::Optimal => return Ok(SimplexState::Optimal),
            SimplexState::Unbounded => {
                return Err(SolverError::Unbounded {
                    column: self.unbounded_column.unwrap_or_default(),
                });
            }
            SimplexState::Running => {}
        }

        if self.trace.is_empty() {
            self.trace.record(&self.tableau, &self.basis, None);
        }

        while let Some(pivot_col) = self.find_pivot_column() {
            let Some(pivot_row) = self.find_pivot_row(pivot_col)? else {
                tracing::info!(
                    column = pivot_col,
                    iterations = self.trace.len(),
                    "problem is unbounded"
                );
                self.state = SimplexState::Unbounded;
                self.unbounded_column = Some(pivot_col);
                return Err(SolverError::Unbounded { column: pivot_col });
            };

            let element = self.tableau.get(pivot_row, pivot_col).clone();
            self.tableau.pivot(pivot_row, pivot_col)?;
            self.basis[pivot_row] = pivot_col;

            tracing::debug!(
                iteration = self.trace.len(),
                row = pivot_row,
                column = pivot_col,
                element = %element,
                "pivot"
            );
            tracing::trace!("tableau after pivot:\n{}", self.tableau);

            self.trace.record(
                &self.tableau,
                &self.basis,
                Some(Pivot {
                    row: pivot_row,
                    column: pivot_col,
                    element,
                }),
            );
        }

        self.state = SimplexState::Optimal;
        tracing::info!(
            iterations = self.trace.len(),
            objective = %self.tableau.objective_value(),
            "optimal tableau reached"
        );
        Ok(SimplexState::Optimal)
    }

    /// Consumes the engine, extracting the solution from the final tableau.
    pub fn into_outcome(self) -> Outcome {
        let solution = Solution::extract(&self.tableau, &self.basis);
        Outcome {
            trace: self.trace,
            tableau: self.tableau,
            basis: self.basis,
            solution,
        }
    }

    /// Entering column: the first strictly largest positive objective-row entry.
    fn find_pivot_column(&self) -> Option<usize> {
        let objective = self.tableau.objective_row();
        let mut max_val = Rational::zero();
        let mut max_col = None;

        for (j, value) in objective.iter().take(self.tableau.rhs_column()).enumerate() {
            if *value > max_val {
                max_val = value.clone();
                max_col = Some(j);
            }
        }

        max_col
    }

    /// Leaving row: the first strictly smallest ratio among rows with a positive entry.
    fn find_pivot_row(&self, col: usize) -> Result<Option<usize>, SolverError> {
        let mut min_ratio: Option<Rational> = None;
        let mut min_row = None;

        for i in 0..self.tableau.constraint_count() {
            let val = self.tableau.get(i, col);
            if !val.is_positive() {
                continue;
            }
            let ratio = self.tableau.rhs(i).checked_div(val)?;
            if min_ratio.as_ref().is_none_or(|min| ratio < *min) {
                min_ratio = Some(ratio);
                min_row = Some(i);
            }
        }

        Ok(min_row)
    }
}
