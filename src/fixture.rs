//! Fixtures for tests
use crate::cost::ProductionCostMap;
use crate::demand::DemandMap;
use crate::lp::VariableKey;
use crate::material::{Material, MaterialMap};
use crate::order::OrderLine;
use crate::plant::{Plant, PlantMap};
use indexmap::indexmap;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn materials() -> MaterialMap {
    indexmap! {
        "M1".into() => Material {
            id: "M1".into(),
            description: "Hex bolt 10mm".to_string(),
            unit_cost: 0.25,
            production_time_hours: Some(1.0),
        },
        "M2".into() => Material {
            id: "M2".into(),
            description: "Washer 10mm".to_string(),
            unit_cost: 0.05,
            production_time_hours: Some(2.0),
        },
    }
}

#[fixture]
pub fn plants() -> PlantMap {
    indexmap! {
        "P1".into() => Plant {
            id: "P1".into(),
            capacity_hours_per_week: Some(1000.0),
        },
        "P2".into() => Plant {
            id: "P2".into(),
            capacity_hours_per_week: Some(500.0),
        },
    }
}

#[fixture]
pub fn orders() -> Vec<OrderLine> {
    vec![
        OrderLine {
            material_id: "M1".into(),
            quantity: 60.0,
        },
        OrderLine {
            material_id: "M2".into(),
            quantity: 50.0,
        },
        OrderLine {
            material_id: "M1".into(),
            quantity: 40.0,
        },
    ]
}

#[fixture]
pub fn demand() -> DemandMap {
    indexmap! {
        "M1".into() => 100.0,
        "M2".into() => 50.0,
    }
}

#[fixture]
pub fn production_costs() -> ProductionCostMap {
    let mut costs = ProductionCostMap::new();
    costs.insert(VariableKey::new("P1".into(), "M1".into()), 5.0);
    costs.insert(VariableKey::new("P1".into(), "M2".into()), 8.0);
    costs.insert(VariableKey::new("P2".into(), "M1".into()), 6.0);
    costs.insert(VariableKey::new("P2".into(), "M2".into()), 7.0);

    costs
}
