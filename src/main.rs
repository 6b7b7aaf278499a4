use std::path::Path;

use shock_tube_fd::{
    SolverResult,
    initialization::{initialize_params_by_file, initialize_shock_tube},
    io::{param_parser::SolverParamParser, write_to_csv::write_to_csv},
    solve,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let param_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inputs/solverparam.json".to_string());
    if let Err(err) = run(&param_file) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(param_file: &str) -> SolverResult<()> {
    let params = if Path::new(param_file).exists() {
        initialize_params_by_file(param_file)?
    } else {
        info!(param_file, "parameter file not found, using defaults");
        SolverParamParser::default()
    };
    let solver_params = params.solver_params();
    let (mesh, mut state) = initialize_shock_tube(&params.shock_tube)?;
    let output = solve(
        params.variant,
        mesh.dx(),
        &mut state.pressure,
        &mut state.temperature,
        &mut state.velocity,
        &solver_params,
    )?;
    let (p_min, p_max) = output
        .pressure
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    info!(
        variant = ?params.variant,
        steps = output.summary.steps,
        time = output.summary.final_time,
        p_min,
        p_max,
        "shock tube solved"
    );
    write_to_csv(&output, &mesh, &params.output)?;
    info!(output = %params.output, "solution written");
    Ok(())
}
