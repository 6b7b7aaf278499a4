pub mod state;

use ndarray::{Array1, ArrayView1, Zip};
use tracing::{debug, warn};

use super::{
    artificial_viscosity::{damping, pressure_sensor},
    boundary::{BoundaryCopy, copy_boundary},
    cfl::CflController,
    finite_difference::{backward_gradient, forward_gradient, upwind_gradient},
    mesh::mesh1d::Mesh1d,
};
use crate::{
    error::{SolverError, SolverResult},
    solver::{RunSummary, SolverParameters, SolverVariant},
};
use state::{ConservativeField, IdealGas, PrimitiveField};

/// Explicit time marching of the 1d Euler equations on a non-uniform grid.
///
/// Each step reads the current primitive field, builds a predicted state in a
/// separate buffer, corrects it, and only then replaces the current field.
/// Interior cells `1..=n-2` follow the PDE, the two edge cells are refreshed
/// by the variant's boundary copies.
pub struct Disc1dEuler<'a> {
    pub current_time: f64,
    pub current_step: usize,
    pub dt: f64,
    pub last_max_cfl: f64,
    pub variant: SolverVariant,
    mesh: &'a Mesh1d,
    solver_param: &'a SolverParameters,
    gas: IdealGas,
    cfl: CflController,
}
impl<'a> Disc1dEuler<'a> {
    pub fn new(
        variant: SolverVariant,
        mesh: &'a Mesh1d,
        solver_param: &'a SolverParameters,
    ) -> SolverResult<Disc1dEuler<'a>> {
        solver_param.validate()?;
        Ok(Disc1dEuler {
            current_time: 0.0,
            current_step: 0,
            dt: solver_param.init_dt,
            last_max_cfl: 0.0,
            variant,
            mesh,
            solver_param,
            gas: IdealGas::new(&solver_param.flow),
            cfl: CflController::new(solver_param.target_cfl),
        })
    }
    pub fn solve(&mut self, state: &mut PrimitiveField) -> SolverResult<RunSummary> {
        if self.boundary_copies().iter().any(BoundaryCopy::is_noop) {
            debug!(variant = ?self.variant, "right edge cell is held fixed by a self-copy");
        }
        while self.current_time < self.solver_param.final_time {
            if self.current_step >= self.solver_param.max_steps {
                return Err(SolverError::divergence(
                    format!(
                        "step limit {} reached at t = {} before final time {}",
                        self.solver_param.max_steps,
                        self.current_time,
                        self.solver_param.final_time
                    ),
                    self.current_step,
                ));
            }
            self.step(state)?;
        }
        Ok(RunSummary {
            steps: self.current_step,
            final_time: self.current_time,
            final_dt: self.dt,
            last_max_cfl: self.last_max_cfl,
        })
    }
    /// Advances `state` by one timestep and adapts the next timestep.
    /// Returns the largest Courant number of the completed step.
    pub fn step(&mut self, state: &mut PrimitiveField) -> SolverResult<f64> {
        for field in [&state.pressure, &state.temperature, &state.velocity] {
            self.mesh.check_field(field.view())?;
        }
        let final_time = self.solver_param.final_time;
        let dt = CflController::clamp_to_final(self.dt, self.current_time, final_time);
        let finishing = dt < self.dt || self.current_time + dt >= final_time;
        let mut next = match self.variant {
            SolverVariant::NonConservativeMacCormack => self.nonconservative_maccormack(state, dt)?,
            SolverVariant::ConservativeMacCormack => self.conservative_maccormack(state, dt)?,
            SolverVariant::UpwindConservative => self.upwind_conservative(state, dt)?,
        };
        let copies = self.boundary_copies();
        copy_boundary(next.pressure.view_mut(), &copies);
        copy_boundary(next.temperature.view_mut(), &copies);
        copy_boundary(next.velocity.view_mut(), &copies);

        let max_cfl = self.cfl.max_cfl(
            self.mesh,
            next.velocity.view(),
            next.temperature.view(),
            &self.gas,
            dt,
        );
        if !max_cfl.is_finite() || max_cfl > self.solver_param.cfl_limit {
            return Err(SolverError::divergence(
                format!(
                    "max CFL {} exceeds limit {}",
                    max_cfl, self.solver_param.cfl_limit
                ),
                self.current_step + 1,
            ));
        }
        // the step is accepted only once it passed every check
        *state = next;
        self.current_step += 1;
        self.current_time = if finishing {
            final_time
        } else {
            self.current_time + dt
        };
        if max_cfl > 2.0 * self.solver_param.target_cfl {
            warn!(
                step = self.current_step,
                max_cfl,
                target = self.solver_param.target_cfl,
                "CFL far above target"
            );
        }
        self.last_max_cfl = max_cfl;
        if !finishing {
            self.dt = self.cfl.next_time_step(dt, max_cfl);
        }
        debug!(
            step = self.current_step,
            time = self.current_time,
            dt,
            max_cfl,
            next_dt = self.dt,
            "step done"
        );
        Ok(max_cfl)
    }
    /// `(source, destination)` pairs applied after every step.
    pub fn boundary_copies(&self) -> [BoundaryCopy; 2] {
        let n = self.mesh.elem_num;
        match self.variant {
            SolverVariant::NonConservativeMacCormack | SolverVariant::UpwindConservative => {
                [BoundaryCopy::new(1, 0), BoundaryCopy::new(n - 2, n - 1)]
            }
            SolverVariant::ConservativeMacCormack => {
                [BoundaryCopy::new(1, 0), BoundaryCopy::new(n - 1, n - 1)]
            }
        }
    }
    fn nonconservative_maccormack(
        &self,
        state: &PrimitiveField,
        dt: f64,
    ) -> SolverResult<PrimitiveField> {
        let dx = self.mesh.dx();
        let cx = self.solver_param.flow.cx;
        let rho = self.gas.density_field(state.temperature.view(), state.pressure.view());
        let u = &state.velocity;
        let p = &state.pressure;
        let e = state.temperature.mapv(|t| self.gas.internal_energy(t));
        // predictor
        let grads = backward_gradient(dx, &[rho.view(), u.view(), p.view(), e.view()])?;
        let rates = nonconservative_rates(rho.view(), u.view(), p.view(), &grads);
        let sensor = pressure_sensor(dx, p.view(), cx)?;
        let damp = damping(dx, sensor.view(), &[rho.view(), u.view(), e.view()])?;
        let rho_bar = predict(rho.view(), rates[0].view(), damp[0].view(), dt);
        let u_bar = predict(u.view(), rates[1].view(), damp[1].view(), dt);
        let e_bar = predict(e.view(), rates[2].view(), damp[2].view(), dt);
        let predicted = self.decode_internal_energy(&rho_bar, u_bar, &e_bar);
        self.check_state(rho_bar.view(), &predicted)?;
        // corrector
        let p_bar = &predicted.pressure;
        let grads = forward_gradient(
            dx,
            &[rho_bar.view(), predicted.velocity.view(), p_bar.view(), e_bar.view()],
        )?;
        let rates_bar =
            nonconservative_rates(rho_bar.view(), predicted.velocity.view(), p_bar.view(), &grads);
        let sensor = pressure_sensor(dx, p_bar.view(), cx)?;
        let damp = damping(
            dx,
            sensor.view(),
            &[rho_bar.view(), predicted.velocity.view(), e_bar.view()],
        )?;
        let rho_new = correct(rho.view(), &rates[0], &rates_bar[0], damp[0].view(), dt);
        let u_new = correct(u.view(), &rates[1], &rates_bar[1], damp[1].view(), dt);
        let e_new = correct(e.view(), &rates[2], &rates_bar[2], damp[2].view(), dt);
        let corrected = self.decode_internal_energy(&rho_new, u_new, &e_new);
        self.check_state(rho_new.view(), &corrected)?;
        Ok(corrected)
    }
    fn conservative_maccormack(
        &self,
        state: &PrimitiveField,
        dt: f64,
    ) -> SolverResult<PrimitiveField> {
        let dx = self.mesh.dx();
        let cx = self.solver_param.flow.cx;
        let q = self.gas.encode_field(state);
        // predictor, forward differences
        let flux = conservative_fluxes(&q, state);
        let grads = forward_gradient(dx, &flux_views(&flux))?;
        let sensor = pressure_sensor(dx, state.pressure.view(), cx)?;
        let damp = damping(dx, sensor.view(), &cons_views(&q))?;
        let rates: Vec<Array1<f64>> = grads.into_iter().map(|g| -g).collect();
        let q_bar = ConservativeField {
            density: predict(q.density.view(), rates[0].view(), damp[0].view(), dt),
            momentum: predict(q.momentum.view(), rates[1].view(), damp[1].view(), dt),
            total_energy: predict(q.total_energy.view(), rates[2].view(), damp[2].view(), dt),
        };
        let predicted = self.gas.decode_field(&q_bar);
        self.check_state(q_bar.density.view(), &predicted)?;
        // corrector, backward differences
        let flux_bar = conservative_fluxes(&q_bar, &predicted);
        let grads = backward_gradient(dx, &flux_views(&flux_bar))?;
        let sensor = pressure_sensor(dx, predicted.pressure.view(), cx)?;
        let damp = damping(dx, sensor.view(), &cons_views(&q_bar))?;
        let rates_bar: Vec<Array1<f64>> = grads.into_iter().map(|g| -g).collect();
        let q_new = ConservativeField {
            density: correct(q.density.view(), &rates[0], &rates_bar[0], damp[0].view(), dt),
            momentum: correct(q.momentum.view(), &rates[1], &rates_bar[1], damp[1].view(), dt),
            total_energy: correct(
                q.total_energy.view(),
                &rates[2],
                &rates_bar[2],
                damp[2].view(),
                dt,
            ),
        };
        let corrected = self.gas.decode_field(&q_new);
        self.check_state(q_new.density.view(), &corrected)?;
        Ok(corrected)
    }
    fn upwind_conservative(&self, state: &PrimitiveField, dt: f64) -> SolverResult<PrimitiveField> {
        let dx = self.mesh.dx();
        let q = self.gas.encode_field(state);
        let flux = conservative_fluxes(&q, state);
        let grads = upwind_gradient(dx, state.velocity.view(), &flux_views(&flux))?;
        let sensor = pressure_sensor(dx, state.pressure.view(), self.solver_param.flow.cx)?;
        let damp = damping(dx, sensor.view(), &cons_views(&q))?;
        let rates: Vec<Array1<f64>> = grads.into_iter().map(|g| -g).collect();
        let q_new = ConservativeField {
            density: predict(q.density.view(), rates[0].view(), damp[0].view(), dt),
            momentum: predict(q.momentum.view(), rates[1].view(), damp[1].view(), dt),
            total_energy: predict(q.total_energy.view(), rates[2].view(), damp[2].view(), dt),
        };
        let updated = self.gas.decode_field(&q_new);
        self.check_state(q_new.density.view(), &updated)?;
        Ok(updated)
    }
    fn decode_internal_energy(
        &self,
        density: &Array1<f64>,
        velocity: Array1<f64>,
        internal_energy: &Array1<f64>,
    ) -> PrimitiveField {
        let temperature = internal_energy.mapv(|e| self.gas.temperature(e));
        let pressure = Zip::from(density)
            .and(&temperature)
            .map_collect(|&rho, &t| self.gas.pressure(rho, t));
        PrimitiveField::new(pressure, temperature, velocity)
    }
    /// Rejects non-finite values and non-positive density or temperature.
    fn check_state<'b>(
        &self,
        density: ArrayView1<'b, f64>,
        prim: &'b PrimitiveField,
    ) -> SolverResult<()> {
        let step = self.current_step;
        let fields = [
            ("density", density),
            ("pressure", prim.pressure.view()),
            ("temperature", prim.temperature.view()),
            ("velocity", prim.velocity.view()),
        ];
        for (name, field) in fields.iter() {
            if let Some(ielem) = field.iter().position(|v| !v.is_finite()) {
                return Err(SolverError::divergence(
                    format!("non-finite {} in cell {}", name, ielem),
                    step,
                ));
            }
        }
        for (quantity, field) in [fields[0], fields[2]] {
            if let Some(ielem) = field.iter().position(|&v| v <= 0.0) {
                return Err(SolverError::NonPhysicalState {
                    quantity,
                    cell: ielem,
                    value: field[ielem],
                    step,
                });
            }
        }
        Ok(())
    }
}

/// Time derivatives of `{rho, u, e}` from gradients of `{rho, u, p, e}`.
fn nonconservative_rates(
    rho: ArrayView1<f64>,
    u: ArrayView1<f64>,
    p: ArrayView1<f64>,
    grads: &[Array1<f64>],
) -> [Array1<f64>; 3] {
    let (drho, du, dp, de) = (&grads[0], &grads[1], &grads[2], &grads[3]);
    let n = rho.len();
    let mut rho_t = Array1::zeros(n);
    let mut u_t = Array1::zeros(n);
    let mut e_t = Array1::zeros(n);
    for i in 0..n {
        rho_t[i] = -(rho[i] * du[i] + u[i] * drho[i]);
        u_t[i] = -(u[i] * du[i] + dp[i] / rho[i]);
        e_t[i] = -(u[i] * de[i] + p[i] / rho[i] * du[i]);
    }
    [rho_t, u_t, e_t]
}

/// Fluxes `{rho u, rho u^2 + p, u (rho E + p)}`.
fn conservative_fluxes(q: &ConservativeField, prim: &PrimitiveField) -> [Array1<f64>; 3] {
    let mass = q.momentum.clone();
    let momentum = Zip::from(&q.momentum)
        .and(&prim.velocity)
        .and(&prim.pressure)
        .map_collect(|&m, &u, &p| m * u + p);
    let energy = Zip::from(&q.total_energy)
        .and(&prim.velocity)
        .and(&prim.pressure)
        .map_collect(|&et, &u, &p| u * (et + p));
    [mass, momentum, energy]
}

fn flux_views(flux: &[Array1<f64>; 3]) -> [ArrayView1<'_, f64>; 3] {
    [flux[0].view(), flux[1].view(), flux[2].view()]
}

fn cons_views(q: &ConservativeField) -> [ArrayView1<'_, f64>; 3] {
    [q.density.view(), q.momentum.view(), q.total_energy.view()]
}

/// `q + dt * rate + damping` on interior cells, edges carried over.
fn predict(
    q: ArrayView1<f64>,
    rate: ArrayView1<f64>,
    damping: ArrayView1<f64>,
    dt: f64,
) -> Array1<f64> {
    let n = q.len();
    let mut out = q.to_owned();
    for i in 1..n - 1 {
        out[i] = q[i] + dt * rate[i] + damping[i];
    }
    out
}

/// Trapezoidal update `q + dt/2 * (rate + rate_bar) + damping` on interior cells.
fn correct(
    q: ArrayView1<f64>,
    rate: &Array1<f64>,
    rate_bar: &Array1<f64>,
    damping: ArrayView1<f64>,
    dt: f64,
) -> Array1<f64> {
    let n = q.len();
    let mut out = q.to_owned();
    for i in 1..n - 1 {
        out[i] = q[i] + 0.5 * dt * (rate[i] + rate_bar[i]) + damping[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::FlowParameters;
    use approx::assert_relative_eq;
    use state::PrimitiveState;

    const VARIANTS: [SolverVariant; 3] = [
        SolverVariant::NonConservativeMacCormack,
        SolverVariant::ConservativeMacCormack,
        SolverVariant::UpwindConservative,
    ];

    fn still_air(n: usize) -> PrimitiveField {
        PrimitiveField::uniform(
            n,
            PrimitiveState {
                pressure: 1.0e5,
                temperature: 300.0,
                velocity: 0.0,
            },
        )
    }

    /// Gaussian pressure bump at rest, centred in the domain.
    fn pressure_bump(n: usize, amplitude: f64) -> PrimitiveField {
        let mut state = still_air(n);
        let centre = (n / 2) as f64;
        for i in 0..n {
            let r = (i as f64 - centre) / 3.0;
            state.pressure[i] *= 1.0 + amplitude * (-r * r).exp();
        }
        state
    }

    #[test]
    fn uniform_state_is_a_fixed_point() {
        let dx = Array1::from_iter((0..12).map(|i| 1.0 + 0.1 * (i % 3) as f64));
        let mesh = Mesh1d::new(dx).unwrap();
        for variant in VARIANTS {
            let mut state = PrimitiveField::uniform(
                12,
                PrimitiveState {
                    pressure: 1.0e5,
                    temperature: 300.0,
                    velocity: 20.0,
                },
            );
            let param = SolverParameters {
                final_time: 0.01,
                ..SolverParameters::for_variant(variant)
            };
            let mut disc = Disc1dEuler::new(variant, &mesh, &param).unwrap();
            let summary = disc.solve(&mut state).unwrap();
            assert!(summary.steps > 1);
            assert_eq!(summary.final_time, 0.01);
            for i in 0..12 {
                assert_relative_eq!(state.pressure[i], 1.0e5, max_relative = 1e-9);
                assert_relative_eq!(state.temperature[i], 300.0, max_relative = 1e-9);
                assert_relative_eq!(state.velocity[i], 20.0, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn conservative_step_keeps_interior_mass() {
        let n = 41;
        let mesh = Mesh1d::uniform(n, n as f64).unwrap();
        let param = SolverParameters {
            init_dt: 2.0e-4,
            flow: FlowParameters {
                cx: 0.0,
                ..FlowParameters::default()
            },
            ..SolverParameters::default()
        };
        let gas = IdealGas::new(&param.flow);
        let mut state = pressure_bump(n, 0.05);
        let interior_mass = |s: &PrimitiveField| {
            let rho = gas.density_field(s.temperature.view(), s.pressure.view());
            (1..n - 1).map(|i| rho[i] * mesh.dx[i]).sum::<f64>()
        };
        let before = interior_mass(&state);
        let mut disc =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        disc.step(&mut state).unwrap();
        let after = interior_mass(&state);
        // the bump has already set the gas in motion
        assert!(state.velocity[n / 2 - 2].abs() > 1.0e-3);
        assert_relative_eq!(after, before, max_relative = 1e-12);
    }

    #[test]
    fn interior_mass_changes_by_edge_fluxes() {
        let n = 21;
        let mesh = Mesh1d::uniform(n, n as f64).unwrap();
        let dt = 2.0e-4;
        let param = SolverParameters {
            init_dt: dt,
            flow: FlowParameters {
                cx: 0.0,
                ..FlowParameters::default()
            },
            ..SolverParameters::default()
        };
        let gas = IdealGas::new(&param.flow);
        let mut state = PrimitiveField::new(
            Array1::from_iter((0..n).map(|i| 1.0e5 * (1.0 + 0.01 * i as f64))),
            Array1::from_elem(n, 300.0),
            Array1::from_elem(n, 30.0),
        );
        let q = gas.encode_field(&state);
        let m = &q.momentum;
        let momentum_flux = |i: usize| m[i] * state.velocity[i] + state.pressure[i];
        // predicted mass flux next to the right edge, forward-differenced
        let m_bar = m[n - 2] - dt * (momentum_flux(n - 1) - momentum_flux(n - 2)) / mesh.dx[n - 2];
        let expected = -0.5 * dt * ((m[n - 1] - m[1]) + (m_bar - m[0]));

        let interior_mass = |s: &PrimitiveField| {
            let rho = gas.density_field(s.temperature.view(), s.pressure.view());
            (1..n - 1).map(|i| rho[i] * mesh.dx[i]).sum::<f64>()
        };
        let before = interior_mass(&state);
        let mut disc =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        disc.step(&mut state).unwrap();
        let after = interior_mass(&state);
        assert!(expected.abs() > 1.0e-4);
        assert_relative_eq!(after - before, expected, max_relative = 1e-8);
    }

    #[test]
    fn cfl_settles_on_target_for_smooth_flow() {
        let n = 60;
        let mesh = Mesh1d::uniform(n, n as f64).unwrap();
        for variant in [
            SolverVariant::NonConservativeMacCormack,
            SolverVariant::ConservativeMacCormack,
        ] {
            let param = SolverParameters {
                final_time: 10.0,
                ..SolverParameters::for_variant(variant)
            };
            let mut state = pressure_bump(n, 0.01);
            let mut disc = Disc1dEuler::new(variant, &mesh, &param).unwrap();
            let mut history = Vec::new();
            for _ in 0..80 {
                history.push(disc.step(&mut state).unwrap());
            }
            for &cfl in &history[40..] {
                assert!((cfl - param.target_cfl).abs() < 2.0e-3, "cfl {}", cfl);
            }
            assert!(history.iter().all(|&c| c < 0.5));
        }
    }

    #[test]
    fn last_step_lands_on_final_time() {
        let mesh = Mesh1d::uniform(10, 10.0).unwrap();
        let param = SolverParameters {
            init_dt: 1.0e-4,
            final_time: 3.5e-4,
            ..SolverParameters::default()
        };
        let mut state = still_air(10);
        let mut disc =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        let summary = disc.solve(&mut state).unwrap();
        assert_eq!(summary.final_time, 3.5e-4);
        assert_eq!(summary.steps, 3);
    }

    #[test]
    fn boundary_copies_per_variant() {
        let mesh = Mesh1d::uniform(8, 8.0).unwrap();
        let param = SolverParameters::default();
        let nonconservative =
            Disc1dEuler::new(SolverVariant::NonConservativeMacCormack, &mesh, &param).unwrap();
        assert_eq!(
            nonconservative.boundary_copies(),
            [BoundaryCopy::new(1, 0), BoundaryCopy::new(6, 7)]
        );
        let conservative =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        assert!(conservative.boundary_copies()[1].is_noop());
        let upwind = Disc1dEuler::new(SolverVariant::UpwindConservative, &mesh, &param).unwrap();
        assert_eq!(upwind.boundary_copies()[1], BoundaryCopy::new(6, 7));
    }

    #[test]
    fn edge_cells_follow_their_neighbour() {
        let n = 21;
        let mesh = Mesh1d::uniform(n, n as f64).unwrap();
        let param = SolverParameters::for_variant(SolverVariant::NonConservativeMacCormack);
        let mut state = pressure_bump(n, 0.02);
        state.pressure[0] = 0.9e5;
        let mut disc =
            Disc1dEuler::new(SolverVariant::NonConservativeMacCormack, &mesh, &param).unwrap();
        disc.step(&mut state).unwrap();
        assert_eq!(state.pressure[0], state.pressure[1]);
        assert_eq!(state.pressure[n - 1], state.pressure[n - 2]);
    }

    #[test]
    fn negative_temperature_is_non_physical() {
        let mesh = Mesh1d::uniform(6, 6.0).unwrap();
        let param = SolverParameters::default();
        for variant in VARIANTS {
            let mut state = still_air(6);
            state.temperature.fill(-300.0);
            let mut disc = Disc1dEuler::new(variant, &mesh, &param).unwrap();
            let err = disc.solve(&mut state).unwrap_err();
            assert!(
                matches!(err, SolverError::NonPhysicalState { .. }),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn check_state_flags_nan() {
        let mesh = Mesh1d::uniform(4, 4.0).unwrap();
        let param = SolverParameters::default();
        let disc = Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        let mut prim = still_air(4);
        prim.velocity[2] = f64::NAN;
        let rho = Array1::from_elem(4, 1.0);
        let err = disc.check_state(rho.view(), &prim).unwrap_err();
        assert!(matches!(err, SolverError::NumericalDivergence { .. }));
    }

    #[test]
    fn check_state_flags_non_positive_density() {
        let mesh = Mesh1d::uniform(4, 4.0).unwrap();
        let param = SolverParameters::default();
        let disc = Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        let prim = still_air(4);
        let rho = ndarray::array![1.0, 1.0, 0.0, 1.0];
        let err = disc.check_state(rho.view(), &prim).unwrap_err();
        assert!(matches!(
            err,
            SolverError::NonPhysicalState {
                quantity: "density",
                cell: 2,
                ..
            }
        ));
    }

    #[test]
    fn invalid_parameters_are_rejected_on_construction() {
        let mesh = Mesh1d::uniform(6, 6.0).unwrap();
        for param in [
            SolverParameters {
                init_dt: -1.0e-3,
                ..SolverParameters::default()
            },
            SolverParameters {
                final_time: 0.0,
                ..SolverParameters::default()
            },
        ] {
            let disc = Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param);
            assert!(matches!(disc, Err(SolverError::Configuration { .. })));
        }
    }

    #[test]
    fn mismatched_field_is_rejected_by_step() {
        let mesh = Mesh1d::uniform(6, 6.0).unwrap();
        let param = SolverParameters::default();
        for variant in VARIANTS {
            let mut state = still_air(6);
            state.temperature = Array1::from_elem(5, 300.0);
            let mut disc = Disc1dEuler::new(variant, &mesh, &param).unwrap();
            let err = disc.solve(&mut state).unwrap_err();
            assert!(matches!(
                err,
                SolverError::FieldLengthMismatch {
                    expected: 6,
                    found: 5
                }
            ));
            assert_eq!(disc.current_step, 0);
            assert_eq!(disc.current_time, 0.0);
        }
    }

    #[test]
    fn oversized_timestep_is_divergent() {
        let mesh = Mesh1d::uniform(6, 6.0).unwrap();
        let param = SolverParameters {
            init_dt: 0.1,
            ..SolverParameters::default()
        };
        let mut state = still_air(6);
        let mut disc =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        let err = disc.step(&mut state).unwrap_err();
        assert!(matches!(err, SolverError::NumericalDivergence { step: 1, .. }));
    }

    #[test]
    fn rejected_step_leaves_state_untouched() {
        let n = 21;
        let mesh = Mesh1d::uniform(n, n as f64).unwrap();
        // about 1.4 times the sound crossing time of one cell
        let param = SolverParameters {
            init_dt: 4.0e-3,
            flow: FlowParameters {
                cx: 0.0,
                ..FlowParameters::default()
            },
            ..SolverParameters::default()
        };
        let initial = pressure_bump(n, 1.0e-6);
        let mut state = initial.clone();
        let mut disc =
            Disc1dEuler::new(SolverVariant::ConservativeMacCormack, &mesh, &param).unwrap();
        let err = disc.step(&mut state).unwrap_err();
        assert!(matches!(err, SolverError::NumericalDivergence { step: 1, .. }));
        assert_eq!(state.pressure, initial.pressure);
        assert_eq!(state.temperature, initial.temperature);
        assert!(state.velocity.iter().all(|&u| u == 0.0));
        assert_eq!(disc.current_step, 0);
        assert_eq!(disc.current_time, 0.0);
    }

    #[test]
    fn step_limit_is_reported() {
        let mesh = Mesh1d::uniform(6, 6.0).unwrap();
        let param = SolverParameters {
            max_steps: 3,
            ..SolverParameters::default()
        };
        let mut state = still_air(6);
        let mut disc = Disc1dEuler::new(SolverVariant::UpwindConservative, &mesh, &param).unwrap();
        let err = disc.solve(&mut state).unwrap_err();
        assert!(matches!(err, SolverError::NumericalDivergence { step: 3, .. }));
    }
}
