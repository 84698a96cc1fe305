//! Axis permutation of row-major tensors.
//!
//! A [`PermutationVector`] maps each source axis to its destination axis:
//! `mappings[src_axis] = dst_axis`. The destination shape and every
//! destination coordinate follow from that single rule.

pub mod swizzle;

use crate::error::LayoutError;
use crate::tensor::{Strides, TensorShape, MAX_RANK};

pub use swizzle::{swizzle_nn4d_tensor, swizzled_info};

/// A validated bijection over `0..rank`, or the empty "don't permute" vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationVector {
    mappings: Vec<usize>,
}

impl PermutationVector {
    /// Returns `InvalidPermutation` unless `mappings` is a bijection over
    /// `0..mappings.len()` with at most [`MAX_RANK`] entries.
    pub fn new(mappings: &[usize]) -> Result<Self, LayoutError> {
        if mappings.len() > MAX_RANK {
            return Err(LayoutError::InvalidPermutation(format!(
                "{} mappings exceed max rank {}",
                mappings.len(),
                MAX_RANK
            )));
        }
        let mut seen = [false; MAX_RANK];
        for &dst in mappings {
            if dst >= mappings.len() || seen[dst] {
                return Err(LayoutError::InvalidPermutation(format!(
                    "{:?} is not a bijection over 0..{}",
                    mappings,
                    mappings.len()
                )));
            }
            seen[dst] = true;
        }
        Ok(Self {
            mappings: mappings.to_vec(),
        })
    }

    /// The empty vector, meaning the data is already in the target layout.
    pub fn dont_permute() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }

    pub fn identity(rank: usize) -> Self {
        Self {
            mappings: (0..rank).collect(),
        }
    }

    /// NHWC source to NCHW destination: {0, 2, 3, 1}.
    pub fn nhwc_to_nchw() -> Self {
        Self {
            mappings: vec![0, 2, 3, 1],
        }
    }

    /// NCHW source to NHWC destination: {0, 3, 1, 2}.
    pub fn nchw_to_nhwc() -> Self {
        Self {
            mappings: vec![0, 3, 1, 2],
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.mappings
    }

    /// The permutation that undoes this one.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0usize; self.mappings.len()];
        for (src, &dst) in self.mappings.iter().enumerate() {
            inverse[dst] = src;
        }
        Self { mappings: inverse }
    }
}

fn permuted_extents(extents: &[usize], mappings: &PermutationVector) -> Vec<usize> {
    if mappings.is_empty() {
        return extents.to_vec();
    }
    let mut out = vec![0usize; extents.len()];
    for (src_axis, &dst_axis) in mappings.as_slice().iter().enumerate() {
        out[dst_axis] = extents[src_axis];
    }
    out
}

/// Shape of the destination tensor: `out[mappings[i]] = shape[i]`.
pub fn permuted_shape(
    shape: &TensorShape,
    mappings: &PermutationVector,
) -> Result<TensorShape, LayoutError> {
    if !mappings.is_empty() && mappings.len() != shape.rank() {
        return Err(LayoutError::InvalidPermutation(format!(
            "{} mappings for rank {} shape {}",
            mappings.len(),
            shape.rank(),
            shape
        )));
    }
    TensorShape::new(&permuted_extents(shape.dims(), mappings))
}

/// Walks the source index space in row-major order, yielding
/// `(src_offset, dst_offset)` element pairs.
#[derive(Debug, Clone)]
pub struct PermutedOffsets {
    src_strides: Strides,
    dst_strides: Strides,
    mappings: Vec<usize>,
    src_coord: Vec<usize>,
    dst_coord: Vec<usize>,
    remaining: usize,
}

impl PermutedOffsets {
    /// # Panics
    /// Panics if a non-empty `mappings` does not have one entry per axis.
    pub fn new(src_extents: &[usize], mappings: &PermutationVector) -> Self {
        let rank = src_extents.len();
        let mappings = if mappings.is_empty() {
            PermutationVector::identity(rank)
        } else {
            mappings.clone()
        };
        assert_eq!(
            mappings.len(),
            rank,
            "Permutation {:?} does not match rank {}",
            mappings.as_slice(),
            rank
        );
        let dst_extents = permuted_extents(src_extents, &mappings);
        Self {
            src_strides: Strides::row_major(src_extents),
            dst_strides: Strides::row_major(&dst_extents),
            mappings: mappings.mappings,
            src_coord: vec![0; rank],
            dst_coord: vec![0; rank],
            remaining: src_extents.iter().product(),
        }
    }

    fn advance(&mut self) {
        let extents = self.src_strides.extents();
        for axis in (0..self.src_coord.len()).rev() {
            self.src_coord[axis] += 1;
            if self.src_coord[axis] < extents[axis] {
                return;
            }
            self.src_coord[axis] = 0;
        }
    }
}

impl Iterator for PermutedOffsets {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for (axis, &dst_axis) in self.mappings.iter().enumerate() {
            self.dst_coord[dst_axis] = self.src_coord[axis];
        }
        let pair = (
            self.src_strides.offset(&self.src_coord),
            self.dst_strides.offset(&self.dst_coord),
        );
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PermutedOffsets {}

/// Copy every element of `src` (shape `src_extents`) to its permuted
/// position in `dst`.
///
/// # Panics
/// Panics if either slice does not hold exactly the tensor's element count.
pub fn permute<T: Copy>(
    src_extents: &[usize],
    mappings: &PermutationVector,
    src: &[T],
    dst: &mut [T],
) {
    let n_elements: usize = src_extents.iter().product();
    assert_eq!(
        src.len(),
        n_elements,
        "Source length {} does not match extents {:?}",
        src.len(),
        src_extents
    );
    assert_eq!(
        dst.len(),
        n_elements,
        "Destination length {} does not match extents {:?}",
        dst.len(),
        src_extents
    );
    for (s, d) in PermutedOffsets::new(src_extents, mappings) {
        dst[d] = src[s];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn all_rank4_permutations() -> Vec<PermutationVector> {
        let mut out = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        if let Ok(p) = PermutationVector::new(&[a, b, c, d]) {
                            out.push(p);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_twenty_four_rank4_permutations() {
        assert_eq!(all_rank4_permutations().len(), 24);
    }

    #[test]
    fn test_rejects_non_bijection() {
        assert!(PermutationVector::new(&[0, 0, 1, 2]).is_err());
        assert!(PermutationVector::new(&[0, 1, 2, 4]).is_err());
        assert!(PermutationVector::new(&[0, 1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_dont_permute_is_empty() {
        let p = PermutationVector::dont_permute();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(
            PermutationVector::nhwc_to_nchw().inverse(),
            PermutationVector::nchw_to_nhwc()
        );
        let p = PermutationVector::new(&[2, 0, 1]).unwrap();
        assert_eq!(p.inverse().as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_permuted_shape() {
        let shape = TensorShape::new(&[1, 4, 5, 3]).unwrap();
        let nchw = permuted_shape(&shape, &PermutationVector::nhwc_to_nchw()).unwrap();
        assert_eq!(nchw.dims(), &[1, 3, 4, 5]);

        let same = permuted_shape(&shape, &PermutationVector::dont_permute()).unwrap();
        assert_eq!(same, shape);
    }

    #[test]
    fn test_permuted_shape_rank_mismatch() {
        let shape = TensorShape::new(&[4, 5]).unwrap();
        let err = permuted_shape(&shape, &PermutationVector::nhwc_to_nchw()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPermutation(_)));
    }

    #[test]
    fn test_offsets_cover_destination_once() {
        let extents = [2, 3, 4, 5];
        for p in all_rank4_permutations() {
            let mut hit = vec![false; 120];
            let offsets = PermutedOffsets::new(&extents, &p);
            assert_eq!(offsets.len(), 120);
            for (_, d) in offsets {
                assert!(!hit[d], "offset {} written twice for {:?}", d, p);
                hit[d] = true;
            }
            assert!(hit.iter().all(|&h| h));
        }
    }

    #[test]
    fn test_permute_2d_transpose() {
        let src = [1, 2, 3, 4, 5, 6];
        let mut dst = [0; 6];
        permute(&[2, 3], &PermutationVector::new(&[1, 0]).unwrap(), &src, &mut dst);
        assert_eq!(dst, [1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_permute_round_trip_all_rank4() {
        let extents = [2, 3, 4, 5];
        let src: Vec<u32> = (0..120).collect();
        for p in all_rank4_permutations() {
            let mut permuted = vec![0u32; 120];
            permute(&extents, &p, &src, &mut permuted);

            let dst_extents = permuted_extents(&extents, &p);
            let mut back = vec![0u32; 120];
            permute(&dst_extents, &p.inverse(), &permuted, &mut back);
            assert_eq!(back, src, "round trip failed for {:?}", p);
        }
    }

    #[test]
    fn test_permute_empty_tensor() {
        let src: [f32; 0] = [];
        let mut dst: [f32; 0] = [];
        permute(&[1, 0, 2, 2], &PermutationVector::nhwc_to_nchw(), &src, &mut dst);
    }

    #[test]
    #[should_panic(expected = "Destination length")]
    fn test_permute_short_destination() {
        let src = [0u8; 6];
        let mut dst = [0u8; 5];
        permute(&[2, 3], &PermutationVector::identity(2), &src, &mut dst);
    }
}
