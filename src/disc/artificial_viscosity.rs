use ndarray::{Array1, ArrayView1, Zip};

use super::finite_difference::{central2_grad_denominator, central2_grad_numerator};
use crate::error::SolverResult;

/// Lower bound on the sensor normaliser, in Pa.
pub const SENSOR_DENOMINATOR_FLOOR: f64 = 1.0e-12;

/// Pressure-curvature shock sensor `cx * |p[i+1] - 2p[i] + p[i-1]| / (p[i+1] + 2p[i] + p[i-1])`.
///
/// Large across shocks, close to zero in smooth flow. The two edge cells carry
/// a zero coefficient.
pub fn pressure_sensor(
    dx: ArrayView1<f64>,
    pressure: ArrayView1<f64>,
    cx: f64,
) -> SolverResult<Array1<f64>> {
    let numerator = central2_grad_numerator(dx, &[pressure])?;
    let denominator = central2_grad_denominator(dx, &[pressure])?;
    let n = pressure.len();
    let mut sensor = Array1::zeros(n);
    for i in 1..n.saturating_sub(1) {
        sensor[i] = cx * numerator[0][i].abs() / denominator[0][i].max(SENSOR_DENOMINATOR_FLOOR);
    }
    Ok(sensor)
}

/// Damping increments `sensor[i] * (q[i+1] - 2q[i] + q[i-1])`, one per quantity.
pub fn damping(
    dx: ArrayView1<f64>,
    sensor: ArrayView1<f64>,
    quantities: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let mut curvatures = central2_grad_numerator(dx, quantities)?;
    for curvature in curvatures.iter_mut() {
        Zip::from(curvature).and(sensor).for_each(|c, &s| *c *= s);
    }
    Ok(curvatures)
}
