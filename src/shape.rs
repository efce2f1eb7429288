//! Shapes and the arithmetic on them.
//!
//! A shape is an ordered sequence of non-negative extents, one per dimension. Arrays store shapes
//! with 32-bit extents, while callers may hand in 64-bit shapes; [`to_int`] and [`to_long`] convert
//! between the two representations and [`length`] computes the number of elements a shape holds.

use crate::Error;

/// Narrow a 64-bit shape to a 32-bit one.
///
/// Fails with [`Error::DimensionOverflow`] if any extent does not survive the narrowing. Only the
/// width of each dimension is checked here, the total length is the concern of [`length`].
///
/// ```rust
/// use mdarray_core::shape::to_int;
///
/// assert_eq!(to_int(&[2, 3]).unwrap(), vec![2, 3]);
/// assert!(to_int(&[2, 1 << 31]).is_err());
/// ```
pub fn to_int(shape: &[i64]) -> Result<Vec<i32>, Error> {
    shape
        .iter()
        .enumerate()
        .map(|(dim, &extent)| {
            i32::try_from(extent).map_err(|_| {
                crate::trace!("Extent {} of dimension {} overflows 32 bits", extent, dim);
                Error::DimensionOverflow { dim, extent }
            })
        })
        .collect()
}

/// Widen a 32-bit shape to a 64-bit one.
pub fn to_long(shape: &[i32]) -> Vec<i64> {
    shape.iter().map(|&extent| extent as i64).collect()
}

/// Get the number of elements of an array with the given shape.
///
/// A rank-0 (empty) shape holds no elements and yields `0`. Otherwise the extents are multiplied in
/// a 64-bit accumulator and the result must fit into an `i32`, or [`Error::LengthOverflow`] is
/// returned.
///
/// # Accumulator wrap
///
/// The accumulator itself is not guarded: it wraps on overflow, which only shapes with a product
/// beyond `i64::MAX` can reach. Such a shape may wrap back into range and yield a small length,
/// e.g. `[65536, 65536, 65536, 65536]` has length `0`.
///
/// ```rust
/// use mdarray_core::shape::length;
///
/// assert_eq!(length(&[2, 3, 4]).unwrap(), 24);
/// assert_eq!(length(&[0, 5]).unwrap(), 0);
/// assert_eq!(length(&[]).unwrap(), 0);
/// assert!(length(&[65536, 65536]).is_err());
/// ```
pub fn length(shape: &[i32]) -> Result<i32, Error> {
    accumulate(shape.iter().map(|&extent| extent as i64))
}

/// Same as [`length`], for a 64-bit shape.
pub fn length_long(shape: &[i64]) -> Result<i32, Error> {
    accumulate(shape.iter().copied())
}

fn accumulate(mut extents: impl Iterator<Item = i64>) -> Result<i32, Error> {
    let Some(first) = extents.next() else {
        return Ok(0);
    };
    let length = extents.fold(first, |acc, extent| acc.wrapping_mul(extent));
    i32::try_from(length).map_err(|_| {
        crate::trace!("Array length {} overflows 32 bits", length);
        Error::LengthOverflow { length }
    })
}

/// The immutable shape of an array.
///
/// Holds the 32-bit extents together with the element count computed by [`length`]. Every extent is
/// known to be non-negative. The element count is the value [`length`] returns, which is the true
/// product of the extents unless the accumulator wrapped, see [its notes](length#accumulator-wrap).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    extents: Box<[i32]>,
    len: usize,
}
impl Shape {
    /// Creates a shape from 32-bit extents.
    ///
    /// Fails with [`Error::NegativeExtent`] or [`Error::LengthOverflow`].
    pub fn new(extents: &[i32]) -> Result<Self, Error> {
        if let Some((dim, &extent)) = extents.iter().enumerate().find(|&(_, &e)| e < 0) {
            crate::trace!("Extent {} of dimension {} is negative", extent, dim);
            return Err(Error::NegativeExtent {
                dim,
                extent: extent as i64,
            });
        }
        let len = length(extents)? as usize;
        Ok(Self {
            extents: extents.into(),
            len,
        })
    }

    /// Creates a shape from 64-bit extents, narrowing them with [`to_int`] first.
    pub fn from_long(extents: &[i64]) -> Result<Self, Error> {
        Self::new(&to_int(extents)?)
    }

    /// Get the number of dimensions.
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Get the extent of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= self.rank()`.
    pub fn extent(&self, dim: usize) -> usize {
        self.extents[dim] as usize
    }

    /// Get the extents.
    pub fn as_slice(&self) -> &[i32] {
        &self.extents
    }

    /// Get the extents widened to 64 bits.
    pub fn to_long(&self) -> Vec<i64> {
        to_long(&self.extents)
    }

    /// Get the number of elements, as computed by [`length`].
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the shape holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shape({:?})", self.extents)
    }
}
impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.extents)
    }
}
impl TryFrom<&[i32]> for Shape {
    type Error = Error;

    fn try_from(extents: &[i32]) -> Result<Self, Self::Error> {
        Self::new(extents)
    }
}
impl TryFrom<&[i64]> for Shape {
    type Error = Error;

    fn try_from(extents: &[i64]) -> Result<Self, Self::Error> {
        Self::from_long(extents)
    }
}
