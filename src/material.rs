//! Materials are the products which plants can manufacture.
use crate::id::{define_id_getter, define_id_type};
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {MaterialID}

/// A material from the material master table
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Material {
    /// Unique identifier for the material (e.g. "M001")
    #[serde(rename = "material_id")]
    pub id: MaterialID,
    /// Text description of the material (e.g. "Hex bolt 10mm")
    pub description: String,
    /// Standard cost of a single unit of the material
    pub unit_cost: f64,
    /// Machine hours required to produce a single unit.
    ///
    /// May be missing from the source table. The model builder rejects the dataset in that case,
    /// as capacity constraints cannot be expressed without it.
    pub production_time_hours: Option<f64>,
}
define_id_getter! {Material, MaterialID}

/// A map of [`Material`]s, keyed by ID, in material master listing order
pub type MaterialMap = IndexMap<MaterialID, Material>;
