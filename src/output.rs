//! The module responsible for writing output data to disk.
use crate::demand::DemandMap;
use crate::material::{MaterialID, MaterialMap};
use crate::plant::PlantID;
use crate::planning::schedule::ProductionSchedule;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which dataset-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "prodplan_results";

/// The output file name for the production schedule
const SCHEDULE_FILE_NAME: &str = "production_schedule.csv";

/// The output file name for per-plant totals
const PLANT_TOTALS_FILE_NAME: &str = "plant_totals.csv";

/// The output file name for the demand summary
const DEMAND_SUMMARY_FILE_NAME: &str = "demand_summary.csv";

/// Get the output folder for the dataset at the specified path
pub fn get_output_dir(data_dir: &Path) -> Result<PathBuf> {
    // canonicalise in case the user has specified "."
    let data_dir = data_dir
        .canonicalize()
        .context("Could not resolve path to dataset")?;

    let dataset_name = data_dir
        .file_name()
        .context("Dataset cannot be in root folder")?
        .to_str()
        .context("Invalid chars in dataset dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, dataset_name].iter().collect())
}

/// Create a new output directory for the dataset
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents a row in the production schedule CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ScheduleRow {
    plant_id: PlantID,
    material_id: MaterialID,
    description: String,
    quantity: f64,
}

/// Represents a row in the plant totals CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct PlantTotalRow {
    plant_id: PlantID,
    total_quantity: f64,
}

/// Represents a row in the demand summary CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DemandSummaryRow {
    material_id: MaterialID,
    description: String,
    quantity: f64,
    total_value: f64,
}

/// Write the production schedule and per-plant totals to CSV files.
///
/// # Arguments
///
/// * `output_dir` - Folder for output files
/// * `schedule` - The optimal production schedule
pub fn write_schedule(output_dir: &Path, schedule: &ProductionSchedule) -> Result<()> {
    let mut schedule_writer = csv::Writer::from_path(output_dir.join(SCHEDULE_FILE_NAME))?;
    let mut totals_writer = csv::Writer::from_path(output_dir.join(PLANT_TOTALS_FILE_NAME))?;
    for plant in schedule.plants.iter() {
        for line in plant.lines.iter() {
            schedule_writer.serialize(ScheduleRow {
                plant_id: plant.plant_id.clone(),
                material_id: line.material_id.clone(),
                description: line.description.clone(),
                quantity: line.quantity,
            })?;
        }

        totals_writer.serialize(PlantTotalRow {
            plant_id: plant.plant_id.clone(),
            total_quantity: plant.total_quantity,
        })?;
    }
    schedule_writer.flush()?;
    totals_writer.flush()?;

    Ok(())
}

/// Write the demand summary: quantity and order value per demanded material, biggest value
/// first.
///
/// # Arguments
///
/// * `output_dir` - Folder for output files
/// * `demand` - Aggregated demand per material
/// * `materials` - The material master, for descriptions and unit costs
pub fn write_demand_summary(
    output_dir: &Path,
    demand: &DemandMap,
    materials: &MaterialMap,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_dir.join(DEMAND_SUMMARY_FILE_NAME))?;
    let rows = demand.iter().map(|(material_id, &quantity)| {
        let material = &materials[material_id];
        DemandSummaryRow {
            material_id: material_id.clone(),
            description: material.description.clone(),
            quantity,
            total_value: quantity * material.unit_cost,
        }
    });
    for row in rows.sorted_by(|a, b| b.total_value.total_cmp(&a.total_value)) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Log the production schedule, one block per plant
pub fn log_schedule(schedule: &ProductionSchedule) {
    for plant in schedule.plants.iter() {
        info!("{}:", plant.plant_id);
        for line in plant.lines.iter() {
            info!(
                "  {} ({}): {:.1} units",
                line.material_id, line.description, line.quantity
            );
        }
        info!("  Total: {:.1} units", plant.total_quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{demand, materials};
    use crate::planning::schedule::{PlantSchedule, ScheduleLine};
    use rstest::rstest;
    use tempfile::tempdir;

    fn example_schedule() -> ProductionSchedule {
        ProductionSchedule {
            plants: vec![
                PlantSchedule {
                    plant_id: "P1".into(),
                    lines: vec![ScheduleLine {
                        material_id: "M1".into(),
                        description: "Hex bolt 10mm".to_string(),
                        quantity: 100.0,
                    }],
                    total_quantity: 100.0,
                },
                PlantSchedule {
                    plant_id: "P2".into(),
                    lines: Vec::new(),
                    total_quantity: 0.0,
                },
            ],
            objective_value: 500.0,
        }
    }

    #[test]
    fn test_write_schedule() {
        let dir = tempdir().unwrap();
        write_schedule(dir.path(), &example_schedule()).unwrap();

        let mut reader = csv::Reader::from_path(dir.path().join(SCHEDULE_FILE_NAME)).unwrap();
        let rows: Vec<ScheduleRow> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(
            rows,
            vec![ScheduleRow {
                plant_id: "P1".into(),
                material_id: "M1".into(),
                description: "Hex bolt 10mm".to_string(),
                quantity: 100.0
            }]
        );

        let mut reader = csv::Reader::from_path(dir.path().join(PLANT_TOTALS_FILE_NAME)).unwrap();
        let rows: Vec<PlantTotalRow> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(
            rows,
            vec![
                PlantTotalRow {
                    plant_id: "P1".into(),
                    total_quantity: 100.0
                },
                PlantTotalRow {
                    plant_id: "P2".into(),
                    total_quantity: 0.0
                }
            ]
        );
    }

    #[rstest]
    fn test_write_demand_summary(demand: DemandMap, materials: MaterialMap) {
        let dir = tempdir().unwrap();
        write_demand_summary(dir.path(), &demand, &materials).unwrap();

        let mut reader =
            csv::Reader::from_path(dir.path().join(DEMAND_SUMMARY_FILE_NAME)).unwrap();
        let rows: Vec<DemandSummaryRow> = reader.deserialize().map(Result::unwrap).collect();
        // Sorted by order value, biggest first
        assert_eq!(rows.len(), 2);
        assert!(rows[0].total_value >= rows[1].total_value);
    }
}
