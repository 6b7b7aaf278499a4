use ndarray::{Array1, ArrayView1};

use crate::error::{SolverError, SolverResult};

/// Non-uniform 1d grid described by its cell widths.
#[derive(Clone, Debug)]
pub struct Mesh1d {
    pub dx: Array1<f64>,
    pub elem_num: usize,
    pub x0: f64,
}
impl Mesh1d {
    pub fn new(dx: Array1<f64>) -> SolverResult<Self> {
        let elem_num = dx.len();
        if elem_num < 3 {
            return Err(SolverError::invalid_grid(format!(
                "at least 3 cells are required, got {}",
                elem_num
            )));
        }
        if let Some((ielem, &width)) = dx
            .indexed_iter()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(SolverError::invalid_grid(format!(
                "cell {} has non-positive width {}",
                ielem, width
            )));
        }
        Ok(Self {
            dx,
            elem_num,
            x0: 0.0,
        })
    }
    pub fn uniform(elem_num: usize, length: f64) -> SolverResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SolverError::invalid_grid(format!(
                "domain length must be positive, got {}",
                length
            )));
        }
        Self::new(Array1::from_elem(elem_num, length / elem_num as f64))
    }
    pub fn with_origin(mut self, x0: f64) -> Self {
        self.x0 = x0;
        self
    }
    pub fn dx(&self) -> ArrayView1<f64> {
        self.dx.view()
    }
    pub fn length(&self) -> f64 {
        self.dx.sum()
    }
    /// Cell centre coordinates, accumulated from `x0`.
    pub fn cell_centers(&self) -> Array1<f64> {
        let mut centers = Array1::zeros(self.elem_num);
        let mut x_left = self.x0;
        for (ielem, &width) in self.dx.iter().enumerate() {
            centers[ielem] = x_left + 0.5 * width;
            x_left += width;
        }
        centers
    }
    /// Checks that a field is aligned with this grid.
    pub fn check_field(&self, field: ArrayView1<f64>) -> SolverResult<()> {
        if field.len() != self.elem_num {
            return Err(SolverError::FieldLengthMismatch {
                expected: self.elem_num,
                found: field.len(),
            });
        }
        Ok(())
    }
}
