use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

/// Errors raised while validating a run or marching it in time.
///
/// The integrator never continues with a corrupted state: every variant below
/// aborts the time loop and is surfaced to the caller.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("field length mismatch: expected {expected} cells, found {found}")]
    FieldLengthMismatch { expected: usize, found: usize },

    /// Density or temperature became non-positive after a decode.
    #[error("non-physical {quantity} = {value} in cell {cell} at step {step}")]
    NonPhysicalState {
        quantity: &'static str,
        cell: usize,
        value: f64,
        step: usize,
    },

    #[error("numerical divergence at step {step}: {reason}")]
    NumericalDivergence { reason: String, step: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

impl SolverError {
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
    pub fn divergence(reason: impl Into<String>, step: usize) -> Self {
        Self::NumericalDivergence {
            reason: reason.into(),
            step,
        }
    }
}
