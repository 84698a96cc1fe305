//! Row-major stride arithmetic with bounds-checked coordinate lookup.

/// Row-major strides for a set of extents.
///
/// `offset` is the only way coordinates are turned into linear element
/// offsets in this crate, so every lookup goes through the same bounds check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strides {
    extents: Vec<usize>,
    strides: Vec<usize>,
}

/// Compute row-major strides from extents.
/// strides[i] = product of extents[i+1..]
fn compute_strides(extents: &[usize]) -> Vec<usize> {
    let mut strides = vec![0usize; extents.len()];
    if extents.is_empty() {
        return strides;
    }
    strides[extents.len() - 1] = 1;
    for i in (0..extents.len() - 1).rev() {
        strides[i] = strides[i + 1] * extents[i + 1];
    }
    strides
}

impl Strides {
    /// Strides of a contiguous row-major buffer with the given extents.
    pub fn row_major(extents: &[usize]) -> Self {
        Self {
            extents: extents.to_vec(),
            strides: compute_strides(extents),
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.strides
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Linear element offset of `coords`.
    ///
    /// # Panics
    /// Panics if `coords` has the wrong rank or any coordinate is outside its extent.
    pub fn offset(&self, coords: &[usize]) -> usize {
        assert_eq!(
            coords.len(),
            self.extents.len(),
            "Coordinate rank {} does not match extents {:?}",
            coords.len(),
            self.extents
        );
        let mut offset = 0;
        for (axis, (&c, &stride)) in coords.iter().zip(&self.strides).enumerate() {
            assert!(
                c < self.extents[axis],
                "Coordinate {:?} out of bounds for extents {:?}",
                coords,
                self.extents
            );
            offset += c * stride;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_strides() {
        assert_eq!(compute_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[3, 5]), vec![5, 1]);
        assert_eq!(compute_strides(&[10]), vec![1]);
        assert_eq!(compute_strides(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_row_major_4d() {
        let s = Strides::row_major(&[2, 3, 4, 5]);
        assert_eq!(s.as_slice(), &[60, 20, 5, 1]);
        assert_eq!(s.extents(), &[2, 3, 4, 5]);
    }

    #[test]
    fn test_offset() {
        let s = Strides::row_major(&[1, 2, 2, 3]);
        assert_eq!(s.offset(&[0, 0, 0, 0]), 0);
        assert_eq!(s.offset(&[0, 0, 1, 0]), 3);
        assert_eq!(s.offset(&[0, 1, 0, 2]), 8);
        assert_eq!(s.offset(&[0, 1, 1, 2]), 11);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_offset_out_of_bounds() {
        let s = Strides::row_major(&[2, 3]);
        s.offset(&[0, 3]);
    }

    #[test]
    #[should_panic(expected = "does not match extents")]
    fn test_offset_wrong_rank() {
        let s = Strides::row_major(&[2, 3]);
        s.offset(&[1]);
    }
}
