use ndarray::ArrayViewMut1;

/// Zero-gradient extrapolation into an edge cell: `field[destination] = field[source]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryCopy {
    pub source: usize,
    pub destination: usize,
}
impl BoundaryCopy {
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

pub fn copy_boundary(mut field: ArrayViewMut1<f64>, copies: &[BoundaryCopy]) {
    for copy in copies {
        field[copy.destination] = field[copy.source];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn copies_in_order() {
        let mut v = array![0.0, 1.0, 2.0, 3.0];
        copy_boundary(
            v.view_mut(),
            &[BoundaryCopy::new(1, 0), BoundaryCopy::new(2, 3)],
        );
        assert_eq!(v, array![1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn self_copy_leaves_field_untouched() {
        let mut v = array![0.0, 1.0, 2.0];
        let copy = BoundaryCopy::new(2, 2);
        assert!(copy.is_noop());
        copy_boundary(v.view_mut(), &[copy]);
        assert_eq!(v, array![0.0, 1.0, 2.0]);
    }
}
