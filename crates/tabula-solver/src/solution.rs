use crate::problem::{LinearProgram, dot};
use crate::rational::Rational;
use crate::tableau::{Basis, Tableau};

/// The optimal point read off a final tableau.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Value of each decision variable
    pub values: Vec<Rational>,
    /// Value of every variable, decision variables first and slacks after
    pub all_values: Vec<Rational>,
    /// Optimal objective value
    pub objective_value: Rational,
}

impl Solution {
    /// Basic variables take their row's right-hand side, everything else is zero.
    pub fn extract(tableau: &Tableau, basis: &Basis) -> Self {
        let n = tableau.variable_count();
        let mut all_values = vec![Rational::zero(); tableau.rhs_column()];

        for (i, &basic) in basis.iter().enumerate() {
            if let Some(slot) = all_values.get_mut(basic) {
                *slot = tableau.rhs(i).clone();
            }
        }

        Self {
            values: all_values[..n].to_vec(),
            all_values,
            objective_value: tableau.objective_value(),
        }
    }

    /// Slack variable values, one per constraint.
    pub fn slack_values(&self) -> &[Rational] {
        &self.all_values[self.values.len()..]
    }

    /// Whether the decision values are non-negative and satisfy every
    /// constraint of `program`.
    pub fn satisfies(&self, program: &LinearProgram) -> bool {
        let n = program.variable_count;
        if self.values.len() != n || self.values.iter().any(Rational::is_negative) {
            return false;
        }
        program.constraints().iter().all(|row| {
            row.len() > n && dot(row, &self.values, n) <= Rational::from_integer(row[n])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Simplex;

    #[test]
    fn test_extract_from_initial_tableau() {
        let program = LinearProgram::from_rows(2, 1, vec![vec![1, 1, 4], vec![1, 1, 0]]);
        let (tableau, basis) = Tableau::build(&program).unwrap();
        let solution = Solution::extract(&tableau, &basis);

        assert_eq!(solution.values, vec![Rational::zero(), Rational::zero()]);
        assert_eq!(solution.slack_values(), &[Rational::from_integer(4)][..]);
        assert_eq!(solution.objective_value, Rational::zero());
    }

    #[test]
    fn test_extract_after_solve() {
        let program = LinearProgram::from_rows(
            2,
            3,
            vec![vec![1, 1, 4], vec![1, 0, 3], vec![0, 1, 3], vec![3, 2, 0]],
        );
        let mut simplex = Simplex::new(&program).unwrap();
        simplex.run().unwrap();
        let solution = Solution::extract(simplex.tableau(), simplex.basis());

        assert_eq!(solution.values, vec![Rational::from_integer(3), Rational::from_integer(1)]);
        assert_eq!(solution.objective_value, Rational::from_integer(11));
        let objective = program.objective().unwrap();
        assert_eq!(dot(objective, &solution.values, 2), solution.objective_value);
        assert_eq!(
            solution.slack_values(),
            &[Rational::zero(), Rational::zero(), Rational::from_integer(2)][..]
        );
        assert!(solution.satisfies(&program));
    }

    #[test]
    fn test_satisfies_rejects_violating_point() {
        let program = LinearProgram::from_rows(1, 1, vec![vec![1, 2], vec![1, 0]]);
        let solution = Solution {
            values: vec![Rational::from_integer(3)],
            all_values: vec![Rational::from_integer(3), Rational::zero()],
            objective_value: Rational::from_integer(3),
        };
        assert!(!solution.satisfies(&program));
    }
}
