//! Explicit finite-difference integration of the 1d compressible Euler
//! equations for shock-tube problems.
//!
//! Three schemes share one time loop: MacCormack predictor-corrector in
//! non-conservative and conservative form, and a first-order upwind
//! conservative update. All of them are stabilised by a pressure-sensor
//! artificial viscosity and driven by an adaptive CFL timestep controller.
pub mod disc;
pub mod error;
pub mod initialization;
pub mod io;
pub mod solver;

pub use disc::euler1d::state::{
    ConservativeField, ConservativeState, IdealGas, PrimitiveField, PrimitiveState,
};
pub use disc::mesh::mesh1d::Mesh1d;
pub use error::{SolverError, SolverResult};
pub use solver::{
    FlowParameters, RunSummary, SolverOutput, SolverParameters, SolverVariant, solve,
    solve_conservative_maccormack, solve_nonconservative_maccormack, solve_upwind_conservative,
};
