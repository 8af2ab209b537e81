//! Cost entries from the cost table.
use crate::lp::VariableKey;
use crate::material::MaterialID;
use crate::plant::PlantID;
use indexmap::IndexMap;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// The kind of cost described by a cost table entry
#[derive(
    PartialEq, Eq, Hash, Clone, Debug, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum CostType {
    /// Cost of producing one unit of a material at a plant
    #[string = "Production"]
    Production,
    /// Cost of shipping one unit of a material out of a plant
    #[string = "Transport"]
    Transport,
    /// Cost of holding one unit of a material at a plant
    #[string = "Storage"]
    Storage,
}

/// A single entry from the cost table
#[derive(PartialEq, Debug, Clone)]
pub struct CostEntry {
    /// The plant the cost applies to
    pub plant_id: PlantID,
    /// The material the cost applies to
    pub material_id: MaterialID,
    /// The kind of cost
    pub cost_type: CostType,
    /// Cost per unit of material
    pub cost_per_unit: f64,
}

/// A sparse lookup of production cost per (plant, material) pair.
///
/// Pairs absent from the map have no recorded production cost. Whether such pairs count as free
/// or as disallowed is the model builder's decision (see
/// [`MissingCostPolicy`](crate::planning::builder::MissingCostPolicy)); this map only records
/// what the cost table actually contains.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ProductionCostMap(IndexMap<VariableKey, f64>);

impl ProductionCostMap {
    /// Create a new, empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from cost entries, keeping only those with [`CostType::Production`].
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CostEntry>,
    {
        let mut map = Self::new();
        for entry in entries {
            if entry.cost_type == CostType::Production {
                map.insert(
                    VariableKey::new(entry.plant_id, entry.material_id),
                    entry.cost_per_unit,
                );
            }
        }

        map
    }

    /// Insert a cost for a (plant, material) pair, returning any previous value
    pub fn insert(&mut self, key: VariableKey, cost_per_unit: f64) -> Option<f64> {
        self.0.insert(key, cost_per_unit)
    }

    /// Retrieve the cost for a (plant, material) pair, if known
    pub fn get(&self, key: &VariableKey) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Whether a cost is known for the given pair
    pub fn contains(&self, key: &VariableKey) -> bool {
        self.0.contains_key(key)
    }

    /// The number of known production costs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
