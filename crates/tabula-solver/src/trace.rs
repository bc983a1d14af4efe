use crate::rational::Rational;
use crate::tableau::{Basis, Tableau};

/// The pivot that led from one iteration to the next.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
    /// The pivot element before the row was normalized
    pub element: Rational,
}

/// A deep copy of the tableau and basis at one instant of the solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iteration {
    pub tableau: Tableau,
    pub basis: Basis,
    /// `None` for the initial state
    pub pivot: Option<Pivot>,
}

/// Append-only history of every state the engine passed through, initial state first.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationTrace {
    iterations: Vec<Iteration>,
}

impl IterationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot; the live tableau and basis are cloned, never shared.
    pub fn record(&mut self, tableau: &Tableau, basis: &Basis, pivot: Option<Pivot>) {
        self.iterations.push(Iteration {
            tableau: tableau.clone(),
            basis: basis.clone(),
            pivot,
        });
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Iteration> {
        self.iterations.get(index)
    }

    pub fn first(&self) -> Option<&Iteration> {
        self.iterations.first()
    }

    pub fn last(&self) -> Option<&Iteration> {
        self.iterations.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Iteration> {
        self.iterations.iter()
    }

    /// Objective value after each iteration.
    pub fn objective_values(&self) -> Vec<Rational> {
        self.iterations.iter().map(|it| it.tableau.objective_value()).collect()
    }
}

impl<'a> IntoIterator for &'a IterationTrace {
    type Item = &'a Iteration;
    type IntoIter = std::slice::Iter<'a, Iteration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterations.iter()
    }
}
