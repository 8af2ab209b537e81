//! Code for reading the plant master table from CSV.
use super::*;

const PLANTS_FILE_NAME: &str = "plants.csv";

/// Read the plant master from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the input CSV tables
///
/// # Returns
///
/// A map of plants in listing order, keyed by ID.
pub fn read_plants(data_dir: &Path) -> Result<PlantMap> {
    let file_path = data_dir.join(PLANTS_FILE_NAME);
    let plants: PlantMap = read_csv_id_file(&file_path)?;
    validate_plants(&plants).with_context(|| input_err_msg(&file_path))?;

    Ok(plants)
}

/// Check each plant for field values the planner cannot work with.
///
/// A missing capacity is accepted here; the model builder rejects it later, before any solve.
fn validate_plants(plants: &PlantMap) -> Result<()> {
    for plant in plants.values() {
        if let Some(capacity) = plant.capacity_hours_per_week {
            ensure!(
                capacity >= 0.0 && capacity.is_finite(),
                "Plant {}: capacity_hours_per_week cannot be negative",
                plant.id
            );
        }
    }

    Ok(())
}
