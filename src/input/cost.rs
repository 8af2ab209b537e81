//! Code for reading the cost table from CSV.
use super::*;
use crate::cost::{CostEntry, CostType};
use crate::id::IDCollection;
use itertools::Itertools;
use serde::Deserialize;
use std::collections::HashSet;

const COSTS_FILE_NAME: &str = "costs.csv";

/// Represents a single entry in the cost table
#[derive(PartialEq, Debug, Deserialize)]
struct CostEntryRaw {
    /// The plant the cost applies to
    plant_id: String,
    /// The material the cost applies to
    material_id: String,
    /// The kind of cost
    cost_type: CostType,
    /// Cost per unit of material
    cost_per_unit: f64,
}

/// Read the cost table, returning the production cost per (plant, material) pair.
///
/// Entries of other cost types are validated and then dropped; only production costs enter the
/// objective.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the input CSV tables
/// * `plant_ids` - All known plant IDs
/// * `material_ids` - All known material IDs
pub fn read_costs(
    data_dir: &Path,
    plant_ids: &IndexSet<PlantID>,
    material_ids: &IndexSet<MaterialID>,
) -> Result<ProductionCostMap> {
    let file_path = data_dir.join(COSTS_FILE_NAME);
    let iter = read_csv(&file_path)?;
    let entries = read_costs_from_iter(iter, plant_ids, material_ids)
        .with_context(|| input_err_msg(&file_path))?;

    Ok(ProductionCostMap::from_entries(entries))
}

/// Read cost entries from an iterator.
///
/// # Arguments
///
/// * `iter` - An iterator of [`CostEntryRaw`]s
/// * `plant_ids` - All known plant IDs
/// * `material_ids` - All known material IDs
fn read_costs_from_iter<I>(
    iter: I,
    plant_ids: &IndexSet<PlantID>,
    material_ids: &IndexSet<MaterialID>,
) -> Result<Vec<CostEntry>>
where
    I: Iterator<Item = CostEntryRaw>,
{
    let mut seen = HashSet::new();
    iter.map(|raw| {
        let plant_id = plant_ids.get_id_by_str(&raw.plant_id)?;
        let material_id = material_ids.get_id_by_str(&raw.material_id)?;
        ensure!(
            raw.cost_per_unit >= 0.0 && raw.cost_per_unit.is_finite(),
            "Cost for {plant_id}/{material_id}: cost_per_unit must be non-negative"
        );
        ensure!(
            seen.insert((plant_id.clone(), material_id.clone(), raw.cost_type.clone())),
            "Duplicate {:?} cost entry for {plant_id}/{material_id}",
            raw.cost_type
        );

        Ok(CostEntry {
            plant_id,
            material_id,
            cost_type: raw.cost_type,
            cost_per_unit: raw.cost_per_unit,
        })
    })
    .try_collect()
}
