//! The boundary to the external LP engine.
//!
//! Model construction knows nothing about the engine; an engine implements [`Solver`] and can be
//! swapped without touching the builder. Infeasible and unbounded models are expected business
//! outcomes and are reported via [`SolutionStatus`], never as errors. An `Err` from a solver
//! means the engine itself failed to execute.
use super::{Model, VariableKey};
use anyhow::{Result, bail};
use highs::{HighsModelStatus, RowProblem, Sense};
use indexmap::IndexMap;
use log::debug;
use strum::Display;

/// A column of the underlying problem
type Variable = highs::Col;

/// Outcome classification of an optimisation attempt
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The constraints cannot all be satisfied
    Infeasible,
    /// The objective can be decreased without limit
    Unbounded,
    /// The engine stopped without reaching a conclusion (e.g. a time limit was hit)
    NotSolved,
}

/// The result of solving a [`Model`].
///
/// The objective value and the variable assignments are present iff the status is
/// [`SolutionStatus::Optimal`]; a failed optimisation never exposes partial quantities.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    status: SolutionStatus,
    objective_value: Option<f64>,
    assignments: IndexMap<VariableKey, f64>,
}

impl Solution {
    /// Create a solution for an unsuccessful optimisation.
    ///
    /// Panics if `status` is [`SolutionStatus::Optimal`]: an optimal solution must carry variable
    /// values.
    pub fn not_optimal(status: SolutionStatus) -> Self {
        assert!(
            status != SolutionStatus::Optimal,
            "An optimal solution must be built from solved variable values"
        );
        Self {
            status,
            objective_value: None,
            assignments: IndexMap::new(),
        }
    }

    /// Create a solution from the solved column values, in model variable order.
    ///
    /// The objective value is recomputed from the model's own coefficients rather than read back
    /// from the engine, so it is identical across engines and across repeated runs.
    pub(crate) fn optimal(model: &Model, values: &[f64]) -> Self {
        assert_eq!(
            values.len(),
            model.num_variables(),
            "Engine returned wrong number of column values"
        );

        let assignments: IndexMap<VariableKey, f64> = model
            .variables()
            .map(|(key, _)| key.clone())
            .zip(values.iter().copied())
            .collect();
        let objective_value = model
            .objective()
            .map(|(key, coefficient)| coefficient * assignments[key])
            .sum();

        Self {
            status: SolutionStatus::Optimal,
            objective_value: Some(objective_value),
            assignments,
        }
    }

    /// The outcome of the optimisation attempt
    pub fn status(&self) -> SolutionStatus {
        self.status
    }

    /// The total cost of the optimal assignment. `None` unless the status is `Optimal`.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// The solved value for the given variable. `None` unless the status is `Optimal`.
    pub fn value(&self, key: &VariableKey) -> Option<f64> {
        self.assignments.get(key).copied()
    }

    /// Iterate over the solved variable values, in model variable order.
    ///
    /// Empty unless the status is `Optimal`.
    pub fn iter_assignments(&self) -> impl Iterator<Item = (&VariableKey, f64)> {
        self.assignments.iter().map(|(key, value)| (key, *value))
    }
}

/// An engine that can solve a [`Model`]
pub trait Solver {
    /// Solve the given model, classifying the outcome as a [`SolutionStatus`].
    ///
    /// An `Err` indicates that the engine failed to execute, not that the model is infeasible or
    /// unbounded.
    fn solve(&self, model: &Model) -> Result<Solution>;
}

/// A [`Solver`] backed by the HiGHS engine.
///
/// Without a time limit the solve call blocks until the engine finishes and cannot be
/// interrupted. With one, HiGHS gives up once the limit is hit and the solution is reported as
/// [`SolutionStatus::NotSolved`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighsSolver {
    time_limit: Option<f64>,
}

impl HighsSolver {
    /// Create a solver with no time limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver which gives up after `seconds` of wall-clock time
    pub fn with_time_limit(seconds: f64) -> Self {
        Self {
            time_limit: Some(seconds),
        }
    }
}

impl Solver for HighsSolver {
    fn solve(&self, model: &Model) -> Result<Solution> {
        let mut problem = RowProblem::default();

        // Columns are added in model variable order so that the engine's column values can be
        // zipped back with the variable keys afterwards
        let mut columns: Vec<Variable> = Vec::with_capacity(model.num_variables());
        for (key, bounds) in model.variables() {
            let coefficient = model.objective_coefficient(key).unwrap_or(0.0);
            columns.push(problem.add_column(coefficient, bounds.min..=bounds.max));
        }

        for constraint in model.constraints() {
            let terms: Vec<(Variable, f64)> = constraint
                .terms
                .iter()
                .map(|(key, coefficient)| {
                    let index = model
                        .variable_index(key)
                        .expect("No variable found for given params");
                    (columns[index], *coefficient)
                })
                .collect();
            problem.add_row(constraint.min..=constraint.max, terms);
        }

        let mut highs_model = problem.optimise(Sense::Minimise);
        // HiGHS writes progress straight to stdout, bypassing the logger
        highs_model.set_option("output_flag", false);
        if let Some(limit) = self.time_limit {
            highs_model.set_option("time_limit", limit);
        }

        let solved = highs_model.solve();
        let status = solved.status();
        debug!("HiGHS finished with status {status:?}");
        match status {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                Ok(Solution::optimal(model, &values))
            }
            HighsModelStatus::Infeasible => Ok(Solution::not_optimal(SolutionStatus::Infeasible)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(Solution::not_optimal(SolutionStatus::Unbounded))
            }
            HighsModelStatus::ReachedTimeLimit
            | HighsModelStatus::ReachedIterationLimit
            | HighsModelStatus::NotSet
            | HighsModelStatus::Unknown => Ok(Solution::not_optimal(SolutionStatus::NotSolved)),
            status => bail!("HiGHS could not execute the solve: {status:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::Constraint;
    use float_cmp::assert_approx_eq;

    fn key(plant: &str, material: &str) -> VariableKey {
        VariableKey::new(plant.into(), material.into())
    }

    /// Minimise 5x + 7y subject to x + y >= 10 and x <= 6
    fn small_model() -> Model {
        let mut model = Model::new();
        model.add_variable(key("P1", "M1"), 0.0, 6.0);
        model.add_variable(key("P2", "M1"), 0.0, f64::INFINITY);
        model.set_objective_coefficient(key("P1", "M1"), 5.0);
        model.set_objective_coefficient(key("P2", "M1"), 7.0);
        model.add_constraint(Constraint {
            name: "demand_M1".to_string(),
            terms: vec![(key("P1", "M1"), 1.0), (key("P2", "M1"), 1.0)],
            min: 10.0,
            max: f64::INFINITY,
        });

        model
    }

    #[test]
    fn test_solve_optimal() {
        let model = small_model();
        let solution = HighsSolver::new().solve(&model).unwrap();

        assert_eq!(solution.status(), SolutionStatus::Optimal);
        assert_approx_eq!(f64, solution.objective_value().unwrap(), 58.0, epsilon = 1e-6);
        assert_approx_eq!(f64, solution.value(&key("P1", "M1")).unwrap(), 6.0, epsilon = 1e-6);
        assert_approx_eq!(f64, solution.value(&key("P2", "M1")).unwrap(), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_solve_infeasible() {
        let mut model = Model::new();
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);
        model.add_constraint(Constraint {
            name: "impossible".to_string(),
            terms: vec![(key("P1", "M1"), 1.0)],
            min: f64::NEG_INFINITY,
            max: -1.0,
        });

        let solution = HighsSolver::new().solve(&model).unwrap();
        assert_eq!(solution.status(), SolutionStatus::Infeasible);
        assert_eq!(solution.objective_value(), None);
        assert_eq!(solution.iter_assignments().count(), 0);
    }

    #[test]
    fn test_solve_unbounded() {
        let mut model = Model::new();
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);
        model.set_objective_coefficient(key("P1", "M1"), -1.0);

        let solution = HighsSolver::new().solve(&model).unwrap();
        assert_eq!(solution.status(), SolutionStatus::Unbounded);
        assert_eq!(solution.objective_value(), None);
    }

    #[test]
    fn test_solution_assignments_follow_model_order() {
        let model = small_model();
        let solution = HighsSolver::new().solve(&model).unwrap();

        let keys: Vec<_> = solution
            .iter_assignments()
            .map(|(key, _)| key.clone())
            .collect();
        assert_eq!(keys, vec![key("P1", "M1"), key("P2", "M1")]);
    }
}
