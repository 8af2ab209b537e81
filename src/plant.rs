//! Plants are the manufacturing sites to which production is assigned.
use crate::id::{define_id_getter, define_id_type};
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {PlantID}

/// A manufacturing plant from the plant master table
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Plant {
    /// Unique identifier for the plant (e.g. "P001")
    #[serde(rename = "plant_id")]
    pub id: PlantID,
    /// Machine hours available at the plant per week.
    ///
    /// May be missing from the source table. The model builder rejects the dataset in that case,
    /// as the plant's capacity constraint cannot be expressed without it.
    pub capacity_hours_per_week: Option<f64>,
}
define_id_getter! {Plant, PlantID}

/// A map of [`Plant`]s, keyed by ID, in plant master listing order
pub type PlantMap = IndexMap<PlantID, Plant>;
