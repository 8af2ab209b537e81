//! Code for aggregating demand from raw sales order lines.
use crate::material::MaterialID;
use crate::order::OrderLine;
use indexmap::IndexMap;

/// Total demand per material, in order of first appearance in the order table
pub type DemandMap = IndexMap<MaterialID, f64>;

/// Sum order quantities per material.
///
/// Materials without any orders are absent from the returned map. Callers must not assume a zero
/// default: absence means "no demand constraint", not "demand of zero".
pub fn aggregate_demand<'a, I>(orders: I) -> DemandMap
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    let mut demand = DemandMap::new();
    for line in orders {
        *demand.entry(line.material_id.clone()).or_insert(0.0) += line.quantity;
    }

    demand
}
