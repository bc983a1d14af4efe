use crate::rational::Rational;

/// A linear program in the raw row layout accepted by the solver.
///
/// Every row holds `variable_count` coefficients followed by a right-hand
/// side. The first `constraint_count` rows are `<=` constraints and the last
/// row is the objective to maximize (its right-hand side is ignored).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearProgram {
    /// Number of decision variables
    pub variable_count: usize,
    /// Number of `<=` constraints
    pub constraint_count: usize,
    /// `constraint_count + 1` rows, the objective last
    pub rows: Vec<Vec<i64>>,
}

impl LinearProgram {
    pub fn from_rows(variable_count: usize, constraint_count: usize, rows: Vec<Vec<i64>>) -> Self {
        Self {
            variable_count,
            constraint_count,
            rows,
        }
    }

    pub fn constraints(&self) -> &[Vec<i64>] {
        let end = self.constraint_count.min(self.rows.len());
        &self.rows[..end]
    }

    pub fn objective(&self) -> Option<&[i64]> {
        self.rows.get(self.constraint_count).map(Vec::as_slice)
    }
}

/// `sum(coefficients[j] * values[j])` over the first `n` entries.
pub(crate) fn dot(coefficients: &[i64], values: &[Rational], n: usize) -> Rational {
    coefficients
        .iter()
        .zip(values)
        .take(n)
        .fold(Rational::zero(), |acc, (&c, v)| acc + &Rational::from_integer(c) * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_and_objective() {
        let program = LinearProgram::from_rows(
            2,
            2,
            vec![vec![1, 1, 4], vec![1, 0, 3], vec![3, 2, 0]],
        );

        assert_eq!(program.constraints(), &[vec![1, 1, 4], vec![1, 0, 3]][..]);
        assert_eq!(program.objective(), Some(&[3, 2, 0][..]));
    }

    #[test]
    fn test_missing_objective_row() {
        let program = LinearProgram::from_rows(1, 1, vec![vec![1, 2]]);

        assert_eq!(program.constraints().len(), 1);
        assert_eq!(program.objective(), None);
    }

    #[test]
    fn test_dot() {
        let values = vec![Rational::from_integer(1), Rational::from_integer(2)];
        assert_eq!(dot(&[3, 2, 0], &values, 2), Rational::from_integer(7));
    }
}
