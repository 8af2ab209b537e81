//! Code for turning a solved model into a production schedule.
use crate::lp::VariableKey;
use crate::lp::solver::{Solution, SolutionStatus};
use crate::material::{MaterialID, MaterialMap};
use crate::plant::{PlantID, PlantMap};

/// Solved quantities at or below this threshold are treated as zero.
///
/// LP engines report values a hair away from zero for variables that are not genuinely in use;
/// listing those as production lines would be noise.
pub const QUANTITY_EPSILON: f64 = 1e-6;

/// The interpreted result of a planning run
#[derive(Clone, Debug, PartialEq)]
pub enum PlanningOutcome {
    /// An optimal schedule was found
    Schedule(ProductionSchedule),
    /// The optimisation concluded without an optimal solution; no quantities are available
    NotOptimal(SolutionStatus),
}

/// A production line item: how much of one material a plant should produce
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleLine {
    /// The material to produce
    pub material_id: MaterialID,
    /// The material's description, from the material master
    pub description: String,
    /// Number of units to produce
    pub quantity: f64,
}

/// The production assigned to a single plant
#[derive(Clone, Debug, PartialEq)]
pub struct PlantSchedule {
    /// The plant
    pub plant_id: PlantID,
    /// What the plant should produce, in material listing order
    pub lines: Vec<ScheduleLine>,
    /// Total units across all lines
    pub total_quantity: f64,
}

/// The optimal production assignment for the whole plant network
#[derive(Clone, Debug, PartialEq)]
pub struct ProductionSchedule {
    /// Per-plant schedules, in plant listing order. Every plant appears, even if idle.
    pub plants: Vec<PlantSchedule>,
    /// The total production cost of the schedule
    pub objective_value: f64,
}

/// Interpret a solution as a production schedule.
///
/// Anything other than an optimal solution is reported as its status alone: a failed
/// optimisation has no meaningful quantities, partial or otherwise. Ordering follows the plant
/// and material listings, independent of the engine's internal ordering.
pub fn extract_schedule(
    solution: &Solution,
    materials: &MaterialMap,
    plants: &PlantMap,
) -> PlanningOutcome {
    if solution.status() != SolutionStatus::Optimal {
        return PlanningOutcome::NotOptimal(solution.status());
    }

    let plant_schedules = plants
        .keys()
        .map(|plant_id| {
            let mut lines = Vec::new();
            let mut total_quantity = 0.0;
            for (material_id, material) in materials.iter() {
                let key = VariableKey::new(plant_id.clone(), material_id.clone());
                let quantity = solution
                    .value(&key)
                    .expect("No variable found for given params");
                if quantity > QUANTITY_EPSILON {
                    lines.push(ScheduleLine {
                        material_id: material_id.clone(),
                        description: material.description.clone(),
                        quantity,
                    });
                    total_quantity += quantity;
                }
            }

            PlantSchedule {
                plant_id: plant_id.clone(),
                lines,
                total_quantity,
            }
        })
        .collect();

    PlanningOutcome::Schedule(ProductionSchedule {
        plants: plant_schedules,
        objective_value: solution
            .objective_value()
            .expect("Optimal solution has no objective value"),
    })
}
