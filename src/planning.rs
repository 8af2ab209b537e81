//! Code for performing a planning run: build the model, solve it, interpret the result.
pub mod builder;
pub mod schedule;

use crate::demand::aggregate_demand;
use crate::input::Dataset;
use crate::lp::solver::{HighsSolver, Solver};
use crate::output;
use crate::settings::Settings;
use anyhow::{Context, Result};
use builder::build_model;
use log::{info, warn};
use schedule::{PlanningOutcome, extract_schedule};
use std::path::Path;

/// Run a full planning pass over the given dataset, writing results to `output_dir`.
///
/// Data errors abort before any solve is attempted. An infeasible or unbounded model is not an
/// error: it is a property of the dataset, reported via the returned [`PlanningOutcome`].
///
/// The solve step blocks. If `settings.solve_time_limit` is set it is forwarded to the engine
/// and a timed-out run comes back as [`SolutionStatus::NotSolved`](crate::lp::solver::SolutionStatus);
/// without it the call cannot be interrupted.
///
/// # Arguments
///
/// * `dataset` - The input tables
/// * `settings` - Program settings
/// * `output_dir` - Folder for output files (must exist)
pub fn run(dataset: &Dataset, settings: &Settings, output_dir: &Path) -> Result<PlanningOutcome> {
    let demand = aggregate_demand(&dataset.orders);
    info!(
        "Total demand: {} units across {} materials",
        demand.values().sum::<f64>(),
        demand.len()
    );
    output::write_demand_summary(output_dir, &demand, &dataset.materials)
        .context("Failed to write demand summary.")?;

    let model = build_model(
        &dataset.materials,
        &dataset.plants,
        &demand,
        &dataset.production_costs,
        settings.missing_cost_policy,
    )?;
    info!(
        "Built model with {} variables and {} constraints",
        model.num_variables(),
        model.constraints().len()
    );

    let solver = match settings.solve_time_limit {
        Some(limit) => HighsSolver::with_time_limit(limit),
        None => HighsSolver::new(),
    };
    let solution = solver.solve(&model).context("Failed to execute the solve.")?;

    let outcome = extract_schedule(&solution, &dataset.materials, &dataset.plants);
    match &outcome {
        PlanningOutcome::Schedule(production_schedule) => {
            info!(
                "Optimal schedule found with total cost {:.2}",
                production_schedule.objective_value
            );
            output::write_schedule(output_dir, production_schedule)
                .context("Failed to write production schedule.")?;
            output::log_schedule(production_schedule);
        }
        PlanningOutcome::NotOptimal(status) => {
            warn!("No optimal schedule found: {status}");
        }
    }

    Ok(outcome)
}
