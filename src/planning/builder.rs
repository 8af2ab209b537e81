//! Code for assembling the LP model from the input tables.
//!
//! The model minimises total production cost subject to meeting aggregated demand for each
//! ordered material and staying within each plant's weekly hours.
use crate::cost::ProductionCostMap;
use crate::demand::DemandMap;
use crate::lp::{Constraint, Model, VariableKey};
use crate::material::MaterialMap;
use crate::plant::PlantMap;
use anyhow::{Context, Result};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// How to treat (plant, material) pairs with no entry in the production cost table.
///
/// The cost table may omit a pair because producing the material there is genuinely free of
/// marginal cost, or simply because the row was never entered. `Free` preserves the historical
/// reading: the pair stays usable and contributes nothing to the objective, which can route
/// demand through plants that were never costed. `Forbid` pins the pair's variable to zero so no
/// production can be assigned to it.
#[derive(
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    Default,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum MissingCostPolicy {
    /// The pair is usable and contributes zero cost
    #[default]
    #[string = "free"]
    Free,
    /// The pair must not be used
    #[string = "forbid"]
    Forbid,
}

/// Build the LP model for a planning run.
///
/// # Arguments
///
/// * `materials` - The material master
/// * `plants` - The plant master
/// * `demand` - Aggregated demand per material
/// * `production_costs` - Production cost per (plant, material) pair
/// * `missing_cost_policy` - Treatment of pairs absent from the cost table
///
/// # Returns
///
/// The assembled [`Model`]. Fails if a plant's capacity or a material's production time is
/// missing: that is checked here, eagerly, so an incomplete model never reaches the solver.
pub fn build_model(
    materials: &MaterialMap,
    plants: &PlantMap,
    demand: &DemandMap,
    production_costs: &ProductionCostMap,
    missing_cost_policy: MissingCostPolicy,
) -> Result<Model> {
    let mut model = Model::new();
    add_variables(
        &mut model,
        materials,
        plants,
        production_costs,
        missing_cost_policy,
    );
    add_objective(&mut model, production_costs);
    add_demand_constraints(&mut model, materials, plants, demand);
    add_capacity_constraints(&mut model, materials, plants)?;

    Ok(model)
}

/// Create one non-negative variable per (plant, material) pair.
///
/// Iteration is plant listing order, then material listing order, so variable ordering is stable
/// across runs. Under [`MissingCostPolicy::Forbid`], pairs absent from the cost table are pinned
/// to zero via their upper bound.
fn add_variables(
    model: &mut Model,
    materials: &MaterialMap,
    plants: &PlantMap,
    production_costs: &ProductionCostMap,
    missing_cost_policy: MissingCostPolicy,
) {
    for plant_id in plants.keys() {
        for material_id in materials.keys() {
            let key = VariableKey::new(plant_id.clone(), material_id.clone());
            let max = match missing_cost_policy {
                MissingCostPolicy::Forbid if !production_costs.contains(&key) => 0.0,
                _ => f64::INFINITY,
            };
            model.add_variable(key, 0.0, max);
        }
    }
}

/// Set the objective: total production cost across all costed pairs.
///
/// Only pairs present in the cost table get a coefficient. Uncosted pairs are left out of the
/// sum entirely, which is equivalent to a cost of zero, not to forbidding the pair.
fn add_objective(model: &mut Model, production_costs: &ProductionCostMap) {
    let keys: Vec<VariableKey> = model.variables().map(|(key, _)| key.clone()).collect();
    for key in keys {
        if let Some(cost) = production_costs.get(&key) {
            model.set_objective_coefficient(key, cost);
        }
    }
}

/// Require total production of each demanded material, across all plants, to cover its demand.
///
/// Materials absent from the demand map get no constraint and may end up not being produced.
fn add_demand_constraints(
    model: &mut Model,
    materials: &MaterialMap,
    plants: &PlantMap,
    demand: &DemandMap,
) {
    for material_id in materials.keys() {
        let Some(&quantity) = demand.get(material_id) else {
            continue;
        };

        let terms = plants
            .keys()
            .map(|plant_id| (VariableKey::new(plant_id.clone(), material_id.clone()), 1.0))
            .collect();
        model.add_constraint(Constraint {
            name: format!("demand_{material_id}"),
            terms,
            min: quantity,
            max: f64::INFINITY,
        });
    }
}

/// Limit each plant's weighted production time to its weekly capacity.
///
/// Every plant gets a constraint, whether or not any of its pairs are costed. Missing capacity
/// or production-time values are an error here, before any solve is attempted.
fn add_capacity_constraints(
    model: &mut Model,
    materials: &MaterialMap,
    plants: &PlantMap,
) -> Result<()> {
    for plant in plants.values() {
        let capacity = plant
            .capacity_hours_per_week
            .with_context(|| format!("Plant {}: capacity_hours_per_week is missing", plant.id))?;

        let mut terms = Vec::with_capacity(materials.len());
        for material in materials.values() {
            let time = material.production_time_hours.with_context(|| {
                format!("Material {}: production_time_hours is missing", material.id)
            })?;
            terms.push((VariableKey::new(plant.id.clone(), material.id.clone()), time));
        }

        model.add_constraint(Constraint {
            name: format!("capacity_{}", plant.id),
            terms,
            min: f64::NEG_INFINITY,
            max: capacity,
        });
    }

    Ok(())
}
