//! Code for reading the material master table from CSV.
use super::*;
use crate::material::MaterialMap;

const MATERIALS_FILE_NAME: &str = "materials.csv";

/// Read the material master from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the input CSV tables
///
/// # Returns
///
/// A map of materials in listing order, keyed by ID.
pub fn read_materials(data_dir: &Path) -> Result<MaterialMap> {
    let file_path = data_dir.join(MATERIALS_FILE_NAME);
    let materials = read_csv_id_file(&file_path)?;
    validate_materials(&materials).with_context(|| input_err_msg(&file_path))?;

    Ok(materials)
}

/// Check each material for field values the planner cannot work with.
///
/// A missing production time is accepted here; the model builder rejects it later, once it is
/// clear the material actually enters a capacity constraint.
fn validate_materials(materials: &MaterialMap) -> Result<()> {
    for material in materials.values() {
        ensure!(
            material.unit_cost >= 0.0,
            "Material {}: unit_cost cannot be negative",
            material.id
        );
        if let Some(time) = material.production_time_hours {
            ensure!(
                time > 0.0 && time.is_finite(),
                "Material {}: production_time_hours must be positive",
                material.id
            );
        }
    }

    Ok(())
}
