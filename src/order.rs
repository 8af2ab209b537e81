//! Sales orders, the source of demand for materials.
use crate::material::MaterialID;

/// A single line from the sales order table
#[derive(PartialEq, Debug, Clone)]
pub struct OrderLine {
    /// The material ordered
    pub material_id: MaterialID,
    /// Number of units ordered
    pub quantity: f64,
}
