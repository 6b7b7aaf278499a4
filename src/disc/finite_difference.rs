//! Directional first-derivative and second-difference operators.
//!
//! Every operator takes any number of fields sharing the grid spacing `dx` and
//! returns one array per field, in input order. Entries a stencil cannot reach
//! (the first or last cell, depending on direction) are exactly zero; the
//! boundary fixup overwrites those cells afterwards.
use ndarray::{Array1, ArrayView1};

use crate::error::{SolverError, SolverResult};

fn check_lengths(dx: ArrayView1<f64>, fields: &[ArrayView1<f64>]) -> SolverResult<usize> {
    let n = dx.len();
    for field in fields {
        if field.len() != n {
            return Err(SolverError::FieldLengthMismatch {
                expected: n,
                found: field.len(),
            });
        }
    }
    Ok(n)
}

pub fn forward_gradient(
    dx: ArrayView1<f64>,
    fields: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let n = check_lengths(dx, fields)?;
    Ok(fields
        .iter()
        .map(|v| {
            let mut grad = Array1::zeros(n);
            for i in 0..n.saturating_sub(1) {
                grad[i] = (v[i + 1] - v[i]) / dx[i];
            }
            grad
        })
        .collect())
}

pub fn backward_gradient(
    dx: ArrayView1<f64>,
    fields: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let n = check_lengths(dx, fields)?;
    Ok(fields
        .iter()
        .map(|v| {
            let mut grad = Array1::zeros(n);
            for i in 1..n {
                grad[i] = (v[i] - v[i - 1]) / dx[i - 1];
            }
            grad
        })
        .collect())
}

/// Unnormalised second difference `v[i+1] - 2 v[i] + v[i-1]`.
pub fn central2_grad_numerator(
    dx: ArrayView1<f64>,
    fields: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let n = check_lengths(dx, fields)?;
    Ok(fields
        .iter()
        .map(|v| {
            let mut grad = Array1::zeros(n);
            for i in 1..n.saturating_sub(1) {
                grad[i] = v[i + 1] - 2.0 * v[i] + v[i - 1];
            }
            grad
        })
        .collect())
}

/// Magnitude normaliser `v[i+1] + 2 v[i] + v[i-1]` for the pressure sensor.
pub fn central2_grad_denominator(
    dx: ArrayView1<f64>,
    fields: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let n = check_lengths(dx, fields)?;
    Ok(fields
        .iter()
        .map(|v| {
            let mut grad = Array1::zeros(n);
            for i in 1..n.saturating_sub(1) {
                grad[i] = v[i + 1] + 2.0 * v[i] + v[i - 1];
            }
            grad
        })
        .collect())
}

/// Direction-adaptive gradient keyed on the sign of `velocity`.
///
/// Positive velocity takes the backward difference, zero velocity the central
/// difference, negative velocity the forward difference. An edge cell whose
/// upwind neighbour lies outside the domain gets a zero gradient.
pub fn upwind_gradient(
    dx: ArrayView1<f64>,
    velocity: ArrayView1<f64>,
    fields: &[ArrayView1<f64>],
) -> SolverResult<Vec<Array1<f64>>> {
    let n = check_lengths(dx, fields)?;
    check_lengths(dx, &[velocity])?;
    Ok(fields
        .iter()
        .map(|v| {
            let mut grad = Array1::zeros(n);
            for i in 0..n {
                let u = velocity[i];
                let interior = i > 0 && i + 1 < n;
                grad[i] = if u > 0.0 {
                    if i > 0 {
                        (v[i] - v[i - 1]) / dx[i - 1]
                    } else {
                        0.0
                    }
                } else if u == 0.0 && interior {
                    (v[i + 1] - v[i - 1]) / (dx[i - 1] + dx[i])
                } else if i + 1 < n {
                    (v[i + 1] - v[i]) / dx[i]
                } else {
                    0.0
                };
            }
            grad
        })
        .collect())
}
