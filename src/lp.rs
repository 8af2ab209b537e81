//! A small abstraction over linear programmes, independent of the solver engine.
//!
//! A [`Model`] holds decision variables keyed by (plant, material) pair, a sparse linear
//! objective and a list of named linear constraints. It is assembled once per planning run and
//! handed unchanged to a [`Solver`](solver::Solver).
pub mod solver;

use crate::material::MaterialID;
use crate::plant::PlantID;
use indexmap::IndexMap;
use std::fmt;

/// Identifies the decision variable for a (plant, material) pair.
///
/// Carries value equality and hashing so it can key ordered maps directly.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VariableKey {
    /// The plant doing the producing
    pub plant_id: PlantID,
    /// The material being produced
    pub material_id: MaterialID,
}

impl VariableKey {
    /// Create a new [`VariableKey`]
    pub fn new(plant_id: PlantID, material_id: MaterialID) -> Self {
        Self {
            plant_id,
            material_id,
        }
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "produce_{}_{}", self.plant_id, self.material_id)
    }
}

/// Lower and upper bounds for a decision variable
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableBounds {
    /// The variable's minimum value
    pub min: f64,
    /// The variable's maximum value
    pub max: f64,
}

/// A named linear constraint.
///
/// Each constraint imposes an inequality of the form:
///
/// min <= a1*x1 + a2*x2 + ... <= max
///
/// Often only one side is binding, with the other set to infinity or minus infinity.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Unique name for the constraint, used in logs and error messages
    pub name: String,
    /// The left-hand side, as (variable, coefficient) terms
    pub terms: Vec<(VariableKey, f64)>,
    /// The minimum value for the constraint
    pub min: f64,
    /// The maximum value for the constraint
    pub max: f64,
}

/// A linear programme to be minimised.
///
/// Variables and constraints are kept in insertion order so that an identical sequence of calls
/// always produces an identical model, independent of the solver engine's internal ordering.
#[derive(Default, Debug)]
pub struct Model {
    variables: IndexMap<VariableKey, VariableBounds>,
    objective: IndexMap<VariableKey, f64>,
    constraints: Vec<Constraint>,
}

impl Model {
    /// Create a new, empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decision variable with the given bounds.
    ///
    /// Panics if a variable with the same key has already been added: there must be exactly one
    /// variable per (plant, material) pair.
    pub fn add_variable(&mut self, key: VariableKey, min: f64, max: f64) {
        let existing = self.variables.insert(key.clone(), VariableBounds { min, max });
        assert!(existing.is_none(), "Duplicate variable {key}");
    }

    /// Set the objective coefficient for a variable.
    ///
    /// Variables for which no coefficient is set contribute nothing to the objective. Panics if
    /// the variable is unknown or its coefficient has already been set.
    pub fn set_objective_coefficient(&mut self, key: VariableKey, coefficient: f64) {
        assert!(
            self.variables.contains_key(&key),
            "No variable {key} in model"
        );
        let existing = self.objective.insert(key.clone(), coefficient);
        assert!(
            existing.is_none(),
            "Objective coefficient for {key} already set"
        );
    }

    /// Add a named constraint.
    ///
    /// Panics if any term refers to an unknown variable.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        for (key, _) in constraint.terms.iter() {
            assert!(
                self.variables.contains_key(key),
                "Constraint {} refers to unknown variable {key}",
                constraint.name
            );
        }
        self.constraints.push(constraint);
    }

    /// Iterate over the variables in insertion order
    pub fn variables(&self) -> impl Iterator<Item = (&VariableKey, VariableBounds)> {
        self.variables.iter().map(|(key, bounds)| (key, *bounds))
    }

    /// The number of decision variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// The position of the given variable in insertion order, if present
    pub fn variable_index(&self, key: &VariableKey) -> Option<usize> {
        self.variables.get_index_of(key)
    }

    /// The objective coefficient for the given variable, if one has been set
    pub fn objective_coefficient(&self, key: &VariableKey) -> Option<f64> {
        self.objective.get(key).copied()
    }

    /// Iterate over the (sparse) objective terms in insertion order
    pub fn objective(&self) -> impl Iterator<Item = (&VariableKey, f64)> {
        self.objective.iter().map(|(key, coeff)| (key, *coeff))
    }

    /// The constraints, in insertion order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(plant: &str, material: &str) -> VariableKey {
        VariableKey::new(plant.into(), material.into())
    }

    #[test]
    fn test_add_variable_preserves_order() {
        let mut model = Model::new();
        model.add_variable(key("P2", "M1"), 0.0, f64::INFINITY);
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);

        let keys: Vec<_> = model.variables().map(|(key, _)| key.clone()).collect();
        assert_eq!(keys, vec![key("P2", "M1"), key("P1", "M1")]);
        assert_eq!(model.variable_index(&key("P1", "M1")), Some(1));
    }

    #[test]
    #[should_panic(expected = "Duplicate variable")]
    fn test_add_variable_duplicate() {
        let mut model = Model::new();
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "No variable")]
    fn test_set_objective_coefficient_unknown_variable() {
        let mut model = Model::new();
        model.set_objective_coefficient(key("P1", "M1"), 1.0);
    }

    #[test]
    fn test_objective_is_sparse() {
        let mut model = Model::new();
        model.add_variable(key("P1", "M1"), 0.0, f64::INFINITY);
        model.add_variable(key("P1", "M2"), 0.0, f64::INFINITY);
        model.set_objective_coefficient(key("P1", "M2"), 7.0);

        assert_eq!(model.objective_coefficient(&key("P1", "M2")), Some(7.0));
        assert_eq!(model.objective_coefficient(&key("P1", "M1")), None);
        assert_eq!(model.objective().count(), 1);
    }

    #[test]
    #[should_panic(expected = "unknown variable")]
    fn test_add_constraint_unknown_variable() {
        let mut model = Model::new();
        model.add_constraint(Constraint {
            name: "bad".to_string(),
            terms: vec![(key("P1", "M1"), 1.0)],
            min: 0.0,
            max: f64::INFINITY,
        });
    }
}
