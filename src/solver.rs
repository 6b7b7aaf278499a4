use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::disc::{
    euler1d::{
        Disc1dEuler,
        state::{IdealGas, PrimitiveField},
    },
    mesh::mesh1d::Mesh1d,
};
use crate::error::{SolverError, SolverResult};

/// Gas properties and artificial-viscosity strength.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParameters {
    /// Ratio of specific heats.
    pub gamma: f64,
    /// Specific gas constant, J/(kg K).
    pub gas_constant: f64,
    /// Specific heat at constant pressure, J/(kg K).
    pub cp: f64,
    /// Artificial-viscosity coefficient; 0 disables the pressure sensor.
    pub cx: f64,
}
impl Default for FlowParameters {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            gas_constant: 287.05,
            cp: 1005.0,
            cx: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverVariant {
    /// MacCormack on `{rho, u, e}`: backward predictor, forward corrector.
    NonConservativeMacCormack,
    /// MacCormack on `{rho, rho u, rho E}`: forward predictor, backward corrector.
    ConservativeMacCormack,
    /// Single-stage first-order upwind on the conservative fluxes.
    UpwindConservative,
}
impl SolverVariant {
    pub fn default_target_cfl(self) -> f64 {
        match self {
            SolverVariant::NonConservativeMacCormack | SolverVariant::ConservativeMacCormack => 0.2,
            SolverVariant::UpwindConservative => 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParameters {
    pub init_dt: f64,
    pub final_time: f64,
    pub target_cfl: f64,
    /// Largest Courant number tolerated before the run is declared divergent.
    pub cfl_limit: f64,
    pub max_steps: usize,
    pub flow: FlowParameters,
}
impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            init_dt: 0.001,
            final_time: 0.14267,
            target_cfl: 0.2,
            cfl_limit: 1.0,
            max_steps: 1_000_000,
            flow: FlowParameters::default(),
        }
    }
}
impl SolverParameters {
    /// Defaults with the target CFL appropriate for `variant`.
    pub fn for_variant(variant: SolverVariant) -> Self {
        Self {
            target_cfl: variant.default_target_cfl(),
            ..Self::default()
        }
    }
    pub fn validate(&self) -> SolverResult<()> {
        let positive = [
            ("init_dt", self.init_dt),
            ("final_time", self.final_time),
            ("target_cfl", self.target_cfl),
            ("gas_constant", self.flow.gas_constant),
            ("cp", self.flow.cp),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolverError::configuration(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.flow.gamma.is_finite() || self.flow.gamma <= 1.0 {
            return Err(SolverError::configuration(format!(
                "gamma must exceed 1, got {}",
                self.flow.gamma
            )));
        }
        if !self.flow.cx.is_finite() || self.flow.cx < 0.0 {
            return Err(SolverError::configuration(format!(
                "cx must be non-negative, got {}",
                self.flow.cx
            )));
        }
        if !self.cfl_limit.is_finite() || self.cfl_limit <= self.target_cfl {
            return Err(SolverError::configuration(format!(
                "cfl_limit {} must exceed target_cfl {}",
                self.cfl_limit, self.target_cfl
            )));
        }
        if self.max_steps == 0 {
            return Err(SolverError::configuration("max_steps must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub final_time: f64,
    /// Timestep proposed by the controller after the last step.
    pub final_dt: f64,
    pub last_max_cfl: f64,
}

/// Flow state at the end of a run.
#[derive(Clone, Debug)]
pub struct SolverOutput {
    pub pressure: Array1<f64>,
    pub velocity: Array1<f64>,
    pub temperature: Array1<f64>,
    pub density: Array1<f64>,
    pub summary: RunSummary,
}

/// Runs `variant` from the initial `pressure`, `temperature`, `velocity` on
/// the grid `dx`. The three arrays are overwritten with the final state.
pub fn solve(
    variant: SolverVariant,
    dx: ArrayView1<f64>,
    pressure: &mut Array1<f64>,
    temperature: &mut Array1<f64>,
    velocity: &mut Array1<f64>,
    solver_param: &SolverParameters,
) -> SolverResult<SolverOutput> {
    solver_param.validate()?;
    let mesh = Mesh1d::new(dx.to_owned())?;
    for field in [pressure.view(), temperature.view(), velocity.view()] {
        mesh.check_field(field)?;
    }
    let mut state = PrimitiveField::new(
        std::mem::take(pressure),
        std::mem::take(temperature),
        std::mem::take(velocity),
    );
    info!(
        ?variant,
        cells = mesh.elem_num,
        final_time = solver_param.final_time,
        target_cfl = solver_param.target_cfl,
        "starting run"
    );
    let mut disc = Disc1dEuler::new(variant, &mesh, solver_param)?;
    let result = disc.solve(&mut state);
    *pressure = state.pressure;
    *temperature = state.temperature;
    *velocity = state.velocity;
    let summary = result?;
    let gas = IdealGas::new(&solver_param.flow);
    let density = gas.density_field(temperature.view(), pressure.view());
    info!(
        steps = summary.steps,
        time = summary.final_time,
        max_cfl = summary.last_max_cfl,
        "run finished"
    );
    Ok(SolverOutput {
        pressure: pressure.clone(),
        velocity: velocity.clone(),
        temperature: temperature.clone(),
        density,
        summary,
    })
}

pub fn solve_nonconservative_maccormack(
    dx: ArrayView1<f64>,
    pressure: &mut Array1<f64>,
    temperature: &mut Array1<f64>,
    velocity: &mut Array1<f64>,
    solver_param: &SolverParameters,
) -> SolverResult<SolverOutput> {
    solve(
        SolverVariant::NonConservativeMacCormack,
        dx,
        pressure,
        temperature,
        velocity,
        solver_param,
    )
}

pub fn solve_conservative_maccormack(
    dx: ArrayView1<f64>,
    pressure: &mut Array1<f64>,
    temperature: &mut Array1<f64>,
    velocity: &mut Array1<f64>,
    solver_param: &SolverParameters,
) -> SolverResult<SolverOutput> {
    solve(
        SolverVariant::ConservativeMacCormack,
        dx,
        pressure,
        temperature,
        velocity,
        solver_param,
    )
}

pub fn solve_upwind_conservative(
    dx: ArrayView1<f64>,
    pressure: &mut Array1<f64>,
    temperature: &mut Array1<f64>,
    velocity: &mut Array1<f64>,
    solver_param: &SolverParameters,
) -> SolverResult<SolverOutput> {
    solve(
        SolverVariant::UpwindConservative,
        dx,
        pressure,
        temperature,
        velocity,
        solver_param,
    )
}
