use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::{disc::mesh::mesh1d::Mesh1d, error::SolverResult, solver::SolverOutput};

#[derive(Serialize)]
struct PointData {
    x: f64,
    pressure: f64,
    temperature: f64,
    velocity: f64,
    density: f64,
}

/// Writes one row per cell centre, with a header line.
pub fn write_to_csv(
    output: &SolverOutput,
    mesh: &Mesh1d,
    filename: impl AsRef<Path>,
) -> SolverResult<()> {
    let filename = filename.as_ref();
    if let Some(parent) = filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = Writer::from_path(filename)?;
    for (ielem, &x) in mesh.cell_centers().iter().enumerate() {
        writer.serialize(PointData {
            x,
            pressure: output.pressure[ielem],
            temperature: output.temperature[ielem],
            velocity: output.velocity[ielem],
            density: output.density[ielem],
        })?;
    }
    writer.flush()?;
    Ok(())
}
