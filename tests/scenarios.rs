//! Integration tests for the build-solve-extract pipeline.
use float_cmp::assert_approx_eq;
use indexmap::indexmap;
use prodplan::cost::ProductionCostMap;
use prodplan::demand::{DemandMap, aggregate_demand};
use prodplan::lp::VariableKey;
use prodplan::lp::solver::{HighsSolver, SolutionStatus, Solver};
use prodplan::material::{Material, MaterialID, MaterialMap};
use prodplan::order::OrderLine;
use prodplan::plant::{Plant, PlantMap};
use prodplan::planning::builder::{MissingCostPolicy, build_model};
use prodplan::planning::schedule::{PlanningOutcome, ProductionSchedule, extract_schedule};

/// Tolerance for comparing quantities against solver output
const EPSILON: f64 = 1e-6;

fn material(id: &str, time: f64) -> Material {
    Material {
        id: id.into(),
        description: format!("Material {id}"),
        unit_cost: 1.0,
        production_time_hours: Some(time),
    }
}

fn plant(id: &str, capacity: f64) -> Plant {
    Plant {
        id: id.into(),
        capacity_hours_per_week: Some(capacity),
    }
}

fn key(plant: &str, material: &str) -> VariableKey {
    VariableKey::new(plant.into(), material.into())
}

/// Two plants and two materials, each material cheapest at a different plant
fn two_plant_tables() -> (MaterialMap, PlantMap, ProductionCostMap) {
    let materials = indexmap! {
        "M1".into() => material("M1", 1.0),
        "M2".into() => material("M2", 2.0),
    };
    let plants = indexmap! {
        "P1".into() => plant("P1", 1000.0),
        "P2".into() => plant("P2", 500.0),
    };
    let mut costs = ProductionCostMap::new();
    costs.insert(key("P1", "M1"), 5.0);
    costs.insert(key("P2", "M1"), 6.0);
    costs.insert(key("P1", "M2"), 8.0);
    costs.insert(key("P2", "M2"), 7.0);

    (materials, plants, costs)
}

fn solve(
    materials: &MaterialMap,
    plants: &PlantMap,
    demand: &DemandMap,
    costs: &ProductionCostMap,
) -> PlanningOutcome {
    let model = build_model(materials, plants, demand, costs, MissingCostPolicy::Free).unwrap();
    let solution = HighsSolver::new().solve(&model).unwrap();
    extract_schedule(&solution, materials, plants)
}

/// Total quantity of the given material across all plants
fn total_produced(schedule: &ProductionSchedule, material_id: &MaterialID) -> f64 {
    schedule
        .plants
        .iter()
        .flat_map(|plant| plant.lines.iter())
        .filter(|line| line.material_id == *material_id)
        .map(|line| line.quantity)
        .sum()
}

#[test]
fn test_feasible_two_plants() {
    let (materials, plants, costs) = two_plant_tables();
    let demand: DemandMap = indexmap! {"M1".into() => 100.0, "M2".into() => 50.0};

    let PlanningOutcome::Schedule(schedule) = solve(&materials, &plants, &demand, &costs) else {
        panic!("Expected an optimal schedule");
    };

    // Each material is assigned entirely to its cheaper plant
    assert_approx_eq!(f64, schedule.objective_value, 850.0, epsilon = EPSILON);
    let p1 = &schedule.plants[0];
    assert_eq!(p1.lines.len(), 1);
    assert_eq!(p1.lines[0].material_id, MaterialID::new("M1"));
    assert_approx_eq!(f64, p1.lines[0].quantity, 100.0, epsilon = EPSILON);
    let p2 = &schedule.plants[1];
    assert_eq!(p2.lines.len(), 1);
    assert_eq!(p2.lines[0].material_id, MaterialID::new("M2"));
    assert_approx_eq!(f64, p2.lines[0].quantity, 50.0, epsilon = EPSILON);
}

#[test]
fn test_feasible_schedule_respects_demand_and_capacity() {
    let (materials, plants, costs) = two_plant_tables();
    let demand: DemandMap = indexmap! {"M1".into() => 700.0, "M2".into() => 300.0};

    let PlanningOutcome::Schedule(schedule) = solve(&materials, &plants, &demand, &costs) else {
        panic!("Expected an optimal schedule");
    };

    // Demand is covered for every demanded material
    for (material_id, &quantity) in demand.iter() {
        assert!(total_produced(&schedule, material_id) >= quantity - EPSILON);
    }

    // No plant exceeds its weekly hours
    for plant_schedule in schedule.plants.iter() {
        let hours: f64 = plant_schedule
            .lines
            .iter()
            .map(|line| {
                line.quantity * materials[&line.material_id].production_time_hours.unwrap()
            })
            .sum();
        let capacity = plants[&plant_schedule.plant_id]
            .capacity_hours_per_week
            .unwrap();
        assert!(hours <= capacity + EPSILON);
    }
}

#[test]
fn test_infeasible_when_demand_exceeds_capacity() {
    let (materials, plants, costs) = two_plant_tables();
    // 1 h/unit of M1 against 1500 h of combined capacity
    let demand: DemandMap = indexmap! {"M1".into() => 2000.0};

    let outcome = solve(&materials, &plants, &demand, &costs);
    assert_eq!(
        outcome,
        PlanningOutcome::NotOptimal(SolutionStatus::Infeasible)
    );
}

#[test]
fn test_uncosted_material_is_still_supplied() {
    let (mut materials, plants, costs) = two_plant_tables();
    // M3 has no cost entry at any plant
    materials.insert("M3".into(), material("M3", 0.5));
    let demand: DemandMap =
        indexmap! {"M1".into() => 100.0, "M2".into() => 50.0, "M3".into() => 20.0};

    let PlanningOutcome::Schedule(schedule) = solve(&materials, &plants, &demand, &costs) else {
        panic!("Expected an optimal schedule");
    };

    // M3's demand is met, but it adds nothing to the total cost
    assert!(total_produced(&schedule, &MaterialID::new("M3")) >= 20.0 - EPSILON);
    assert_approx_eq!(f64, schedule.objective_value, 850.0, epsilon = EPSILON);
}

#[test]
fn test_rebuild_and_resolve_is_deterministic() {
    let (materials, plants, costs) = two_plant_tables();
    let orders = vec![
        OrderLine {
            material_id: "M1".into(),
            quantity: 100.0,
        },
        OrderLine {
            material_id: "M2".into(),
            quantity: 50.0,
        },
    ];
    let demand = aggregate_demand(&orders);

    let build = || build_model(&materials, &plants, &demand, &costs, MissingCostPolicy::Free);
    let first = build().unwrap();
    let second = build().unwrap();

    let first_keys: Vec<_> = first.variables().map(|(key, _)| key.clone()).collect();
    let second_keys: Vec<_> = second.variables().map(|(key, _)| key.clone()).collect();
    assert_eq!(first_keys, second_keys);

    let solver = HighsSolver::new();
    let first_solution = solver.solve(&first).unwrap();
    let second_solution = solver.solve(&second).unwrap();
    assert_eq!(
        first_solution.objective_value(),
        second_solution.objective_value()
    );
}
