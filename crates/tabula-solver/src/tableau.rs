use std::fmt;

use crate::error::SolverError;
use crate::problem::LinearProgram;
use crate::rational::Rational;

/// Column index of the basic variable of each constraint row.
pub type Basis = Vec<usize>;

/// Dense simplex tableau of shape `(m + 1) x (n + m + 1)`.
///
/// Columns `0..n` hold the decision variables, `n..n + m` the slack
/// variables and the last column the right-hand side. The last row is the
/// objective row; its right-hand side holds the negated objective value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau {
    data: Vec<Vec<Rational>>,
    variable_count: usize,
    constraint_count: usize,
}

impl Tableau {
    /// Builds the initial canonical tableau and its all-slack basis.
    pub fn build(program: &LinearProgram) -> Result<(Tableau, Basis), SolverError> {
        let n = program.variable_count;
        let m = program.constraint_count;

        if n < 1 {
            return Err(SolverError::MalformedInput(
                "at least one variable is required".to_string(),
            ));
        }
        if m < 1 {
            return Err(SolverError::MalformedInput(
                "at least one constraint is required".to_string(),
            ));
        }
        if program.rows.len().checked_sub(1) != Some(m) {
            return Err(SolverError::MalformedInput(format!(
                "expected {} constraint rows and the objective, found {} rows",
                m,
                program.rows.len()
            )));
        }
        let short_row = program.rows.iter().enumerate().find(|(_, row)| row.len() <= n);
        if let Some((i, row)) = short_row {
            return Err(SolverError::MalformedInput(format!(
                "row {} has {} values, expected {} coefficients and a right-hand side",
                i,
                row.len(),
                n
            )));
        }

        let rhs_col = n + m;
        let mut data = vec![vec![Rational::zero(); n + m + 1]; m + 1];

        for (i, row) in program.rows.iter().enumerate() {
            for (j, &coef) in row.iter().take(n).enumerate() {
                data[i][j] = Rational::from_integer(coef);
            }
            if i < m {
                data[i][n + i] = Rational::one();
                if row[n] < 0 {
                    tracing::warn!(
                        row = i,
                        rhs = row[n],
                        "negative right-hand side, starting basis is infeasible"
                    );
                }
                data[i][rhs_col] = Rational::from_integer(row[n]);
            }
        }

        let basis = (n..n + m).collect();
        Ok((
            Tableau {
                data,
                variable_count: n,
                constraint_count: m,
            },
            basis,
        ))
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn constraint_count(&self) -> usize {
        self.constraint_count
    }

    /// Number of columns, including the right-hand side.
    pub fn column_count(&self) -> usize {
        self.variable_count + self.constraint_count + 1
    }

    pub fn rhs_column(&self) -> usize {
        self.variable_count + self.constraint_count
    }

    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.data
    }

    pub fn row(&self, i: usize) -> &[Rational] {
        &self.data[i]
    }

    pub fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[row][col]
    }

    pub fn objective_row(&self) -> &[Rational] {
        &self.data[self.constraint_count]
    }

    pub fn rhs(&self, row: usize) -> &Rational {
        &self.data[row][self.rhs_column()]
    }

    /// Current objective value, the negated right-hand side of the objective row.
    pub fn objective_value(&self) -> Rational {
        -self.rhs(self.constraint_count)
    }

    /// Whether column `col` is the unit vector with its 1 in row `row`.
    pub fn is_unit_column(&self, col: usize, row: usize) -> bool {
        self.data.iter().enumerate().all(|(i, r)| {
            if i == row { r[col].is_one() } else { r[col].is_zero() }
        })
    }

    /// Gauss-Jordan pivot on `(row, col)`; the caller guarantees a non-zero element.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) -> Result<(), SolverError> {
        let pivot_val = self.data[row][col].clone();
        let normalized = self.data[row]
            .iter()
            .map(|v| v.checked_div(&pivot_val))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, current) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = current[col].clone();
            if factor.is_zero() {
                continue;
            }
            for (value, p) in current.iter_mut().zip(&normalized) {
                *value = &*value - &(&factor * p);
            }
        }

        self.data[row] = normalized;
        Ok(())
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for value in row {
                write!(f, "\t{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
