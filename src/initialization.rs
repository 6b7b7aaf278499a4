use serde::{Deserialize, Serialize};

use crate::{
    disc::{
        euler1d::state::{PrimitiveField, PrimitiveState},
        mesh::mesh1d::Mesh1d,
    },
    error::SolverResult,
    io::param_parser::SolverParamParser,
};

/// Two constant states separated by a diaphragm at the middle of the tube.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockTubeParameters {
    pub cell_num: usize,
    /// Tube length in metres, long enough that no wave reaches the ends.
    pub length: f64,
    pub left: PrimitiveState,
    pub right: PrimitiveState,
}
impl Default for ShockTubeParameters {
    fn default() -> Self {
        Self {
            cell_num: 100,
            length: 200.0,
            left: PrimitiveState {
                pressure: 1.0e5,
                temperature: 348.0,
                velocity: 0.0,
            },
            right: PrimitiveState {
                pressure: 1.0e4,
                temperature: 278.0,
                velocity: 0.0,
            },
        }
    }
}

pub fn initialize_params_by_file(file_path: &str) -> SolverResult<SolverParamParser> {
    SolverParamParser::parse(file_path)
}
pub fn initialize_mesh1d(cell_num: usize, length: f64) -> SolverResult<Mesh1d> {
    Ok(Mesh1d::uniform(cell_num, length)?.with_origin(-0.5 * length))
}
/// Uniform grid centred on the diaphragm with the left state on cells whose
/// centre lies left of it.
pub fn initialize_shock_tube(
    param: &ShockTubeParameters,
) -> SolverResult<(Mesh1d, PrimitiveField)> {
    let mesh = initialize_mesh1d(param.cell_num, param.length)?;
    let mut state = PrimitiveField::uniform(mesh.elem_num, param.right);
    for (ielem, &x) in mesh.cell_centers().iter().enumerate() {
        if x < 0.0 {
            state.pressure[ielem] = param.left.pressure;
            state.temperature[ielem] = param.left.temperature;
            state.velocity[ielem] = param.left.velocity;
        }
    }
    Ok((mesh, state))
}
