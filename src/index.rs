//! Row-major (C order) address arithmetic.
//!
//! These functions map an index tuple to the offset of the element in the flattened buffer, where the last index
//! varies fastest. They trust the caller: the number of indices must equal the rank of the shape and every index
//! must be smaller than its extent. Only the number of indices is asserted, and only in debug builds. The
//! individual indices are never checked against their extents, so an out of range index that still maps to an
//! offset inside the buffer silently addresses another element.

/// Compute the offset of `indices` in an array of the given shape.
///
/// ```rust
/// use mdarray_core::index::compute_index;
///
/// assert_eq!(compute_index(&[2, 3], &[1, 2]), 5);
/// assert_eq!(compute_index(&[2, 2, 2], &[1, 0, 1]), 5);
/// ```
#[inline]
pub fn compute_index(shape: &[i32], indices: &[usize]) -> usize {
    debug_assert_eq!(
        indices.len(),
        shape.len(),
        "index tuple length must match the rank"
    );
    let mut offset = indices[0];
    for k in 1..indices.len() {
        offset = offset * shape[k] as usize + indices[k];
    }
    offset
}

/// Compute the offset of `[x, y]` in a rank-2 array.
#[inline]
pub fn compute_index2(shape: &[i32], x: usize, y: usize) -> usize {
    debug_assert_eq!(shape.len(), 2, "rank-2 access on a rank-{} shape", shape.len());
    shape[1] as usize * x + y
}

/// Compute the offset of `[x, y, z]` in a rank-3 array.
#[inline]
pub fn compute_index3(shape: &[i32], x: usize, y: usize, z: usize) -> usize {
    debug_assert_eq!(shape.len(), 3, "rank-3 access on a rank-{} shape", shape.len());
    shape[2] as usize * (shape[1] as usize * x + y) + z
}

/// Compute the index tuple of the element at `offset`, the inverse of [`compute_index`].
///
/// `offset` must be smaller than the number of elements of the shape.
///
/// ```rust
/// use mdarray_core::index::compute_reverse_index;
///
/// assert_eq!(compute_reverse_index(&[2, 2, 2], 5), vec![1, 0, 1]);
/// ```
pub fn compute_reverse_index(shape: &[i32], offset: usize) -> Vec<usize> {
    let mut indices = vec![0; shape.len()];
    let mut rest = offset;
    for (index, &extent) in indices.iter_mut().zip(shape).skip(1).rev() {
        *index = rest % extent as usize;
        rest /= extent as usize;
    }
    if let Some(first) = indices.first_mut() {
        *first = rest;
    }
    indices
}

/// Iterator over all index tuples of a shape, in row-major order.
///
/// A shape with a zero extent, or with no dimensions at all, has no index tuples.
///
/// ```rust
/// use mdarray_core::index::Indices;
///
/// let all = Indices::new(&[2, 2]).collect::<Vec<_>>();
/// assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Indices {
    extents: Vec<usize>,
    next: Option<Vec<usize>>,
}
impl Indices {
    /// Create an iterator over all index tuples of `shape`.
    pub fn new(shape: &[i32]) -> Self {
        let extents = shape.iter().map(|&e| e.max(0) as usize).collect::<Vec<_>>();
        let has_elements = !extents.is_empty() && extents.iter().all(|&e| e > 0);
        let next = has_elements.then(|| vec![0; extents.len()]);
        Self { extents, next }
    }
}
impl Iterator for Indices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut following = current.clone();
        // odometer increment, last index fastest
        for dim in (0..following.len()).rev() {
            following[dim] += 1;
            if following[dim] < self.extents[dim] {
                self.next = Some(following);
                break;
            }
            following[dim] = 0;
        }
        Some(current)
    }
}
