use ndarray::ArrayView1;

use super::euler1d::state::IdealGas;
use super::mesh::mesh1d::Mesh1d;

/// Damped proportional timestep controller driving the largest cell Courant
/// number toward `target_cfl`.
#[derive(Clone, Copy, Debug)]
pub struct CflController {
    pub target_cfl: f64,
    /// Fraction of the gap to the ideal timestep closed per step.
    pub gain: f64,
}
impl CflController {
    pub fn new(target_cfl: f64) -> Self {
        Self {
            target_cfl,
            gain: 0.2,
        }
    }
    /// `max_i (|u_i| + c(T_i)) dt / dx_i`
    pub fn max_cfl(
        &self,
        mesh: &Mesh1d,
        velocity: ArrayView1<f64>,
        temperature: ArrayView1<f64>,
        gas: &IdealGas,
        dt: f64,
    ) -> f64 {
        let mut max_cfl = f64::NEG_INFINITY;
        for ((&u, &t), &dx) in velocity.iter().zip(temperature.iter()).zip(mesh.dx.iter()) {
            let cfl = (u.abs() + gas.sound_speed(t)) * dt / dx;
            // NaN must win so the caller sees the divergence
            if cfl.is_nan() {
                return f64::NAN;
            }
            max_cfl = max_cfl.max(cfl);
        }
        max_cfl
    }
    pub fn next_time_step(&self, dt: f64, max_cfl: f64) -> f64 {
        dt * ((self.target_cfl / max_cfl - 1.0) * self.gain + 1.0)
    }
    /// Shortens `dt` so that the step lands exactly on `final_time`.
    pub fn clamp_to_final(dt: f64, current_time: f64, final_time: f64) -> f64 {
        let remaining = final_time - current_time;
        if remaining < dt { remaining } else { dt }
    }
}
