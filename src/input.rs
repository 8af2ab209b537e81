//! Common routines for handling input data.
use crate::cost::ProductionCostMap;
use crate::id::{HasID, IDLike};
use crate::material::{MaterialID, MaterialMap};
use crate::order::OrderLine;
use crate::plant::{PlantID, PlantMap};
use anyhow::{Context, Result, ensure};
use indexmap::{IndexMap, IndexSet};
use log::info;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub mod cost;
pub mod material;
pub mod order;
pub mod plant;
use cost::read_costs;
use material::read_materials;
use order::read_orders;
use plant::read_plants;

/// All input tables for a single planning run.
///
/// Loaded once per run and treated as an immutable snapshot thereafter.
pub struct Dataset {
    /// The material master
    pub materials: MaterialMap,
    /// The plant master
    pub plants: PlantMap,
    /// Raw sales order lines
    pub orders: Vec<OrderLine>,
    /// Production cost per (plant, material) pair
    pub production_costs: ProductionCostMap,
}

/// Read all input tables from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the input CSV tables
///
/// # Returns
///
/// A validated [`Dataset`], or an error if any table is missing or malformed.
pub fn load_dataset(data_dir: &Path) -> Result<Dataset> {
    let materials = read_materials(data_dir)?;
    let plants = read_plants(data_dir)?;

    let material_ids: IndexSet<MaterialID> = materials.keys().cloned().collect();
    let plant_ids: IndexSet<PlantID> = plants.keys().cloned().collect();
    let orders = read_orders(data_dir, &material_ids)?;
    let production_costs = read_costs(data_dir, &plant_ids, &material_ids)?;

    info!(
        "Loaded {} materials, {} plants, {} order lines and {} production costs",
        materials.len(),
        plants.len(),
        orders.len(),
        production_costs.len()
    );

    Ok(Dataset {
        materials,
        plants,
        orders,
        production_costs,
    })
}

/// Read a series of type `T`s from the specified CSV file.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = read_csv_internal(file_path)?;
    ensure!(
        !vec.is_empty(),
        "CSV file {} cannot be empty",
        file_path.to_string_lossy()
    );

    Ok(vec.into_iter())
}

fn read_csv_internal<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;

    let mut vec = Vec::new();
    for result in reader.deserialize() {
        let item = result.with_context(|| input_err_msg(file_path))?;
        vec.push(item);
    }

    Ok(vec)
}

/// Read a CSV file of items with unique IDs into an ordered map keyed by ID.
///
/// Returns an error if the same ID appears more than once.
pub fn read_csv_id_file<T, ID>(file_path: &Path) -> Result<IndexMap<ID, T>>
where
    T: HasID<ID> + DeserializeOwned,
    ID: IDLike,
{
    let vec = read_csv_internal::<T>(file_path)?;
    ensure!(
        !vec.is_empty(),
        "CSV file {} cannot be empty",
        file_path.to_string_lossy()
    );

    let mut map = IndexMap::new();
    for item in vec {
        let id = item.get_id().clone();
        ensure!(
            map.insert(id.clone(), item).is_none(),
            "Duplicate ID {id} in {}",
            file_path.to_string_lossy()
        );
    }

    Ok(map)
}

/// Parse a TOML file at the specified path.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    toml::from_str(&contents).with_context(|| input_err_msg(file_path))
}

/// Format an error message to include the file path.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(PartialEq, Debug, Deserialize)]
    struct Record {
        id: String,
        value: f64,
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.csv");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id,value\na,1.0\nb,2.5").unwrap();
        }

        let records: Vec<Record> = read_csv(&file_path).unwrap().collect();
        assert_eq!(
            records,
            vec![
                Record {
                    id: "a".to_string(),
                    value: 1.0
                },
                Record {
                    id: "b".to_string(),
                    value: 2.5
                }
            ]
        );
    }

    #[test]
    fn test_read_csv_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.csv");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id,value").unwrap();
        }

        assert!(read_csv::<Record>(&file_path).is_err());
    }

    #[test]
    fn test_read_csv_non_numeric_value() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.csv");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id,value\na,lots").unwrap();
        }

        assert!(read_csv::<Record>(&file_path).is_err());
    }
}
