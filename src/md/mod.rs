//! Multi-dimensional arrays over a single flattened buffer.
//!
//! The [`MdArray`] struct is the main struct in this module. It is generic over its element type, so each element
//! kind (bytes, ints, floats, ...) gets its own array type, with the address arithmetic of [`crate::index`] shared
//! between all of them. The [`DynMdArray`] trait erases the element type for callers that only learn it at runtime.

mod element;
pub use element::*;

mod params;
pub use params::*;

#[cfg(feature = "ndarray")]
mod interop;

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::index::{self, Indices};
use crate::shape::Shape;
use crate::Error;

/// A fixed-rank array stored in a single flattened buffer, in row-major order.
///
/// The array holds an immutable [`Shape`] and a buffer `S` of `T` elements, where element `[i0, i1, ..., iN]` lives
/// at the offset computed by [`index::compute_index`]. The buffer is any type that can be viewed as a slice: by
/// default a `Vec<T>` owned by the array, but a borrowed `&mut [T]` (or `&[T]` for read-only arrays) works as well,
/// in which case the array and the caller share the memory for the borrow's lifetime.
///
/// Element access trusts the caller, matching the index arithmetic it is built on: the number of indices should
/// match the rank and every index should be within its extent. Debug builds assert the number of indices and the
/// rank of the `get1`/`get2`/`get3` style accessors. Individual indices are never checked against their extents:
/// `get(&[0, 5])` on a `[2, 3]` array reads the element at `[1, 2]`. In all builds an offset beyond the buffer
/// panics on the slice access.
///
/// ```rust
/// use mdarray_core::md::MdIntArray;
///
/// let mut arr = MdIntArray::from_flat(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
/// assert_eq!(arr.get2(1, 0), 4);
/// assert_eq!(arr.get(&[1, 2]), 6);
///
/// arr.set2(0, 1, 20);
/// assert_eq!(arr.as_flat(), &[1, 20, 3, 4, 5, 6]);
/// assert_eq!(arr.to_string(), "[[1, 20, 3], [4, 5, 6]]");
/// ```
pub struct MdArray<T, S = Vec<T>> {
    shape: Shape,
    data: S,
    elem: PhantomData<T>,
}

/// An array of bytes.
pub type MdByteArray = MdArray<i8>;
/// An array of 16-bit integers.
pub type MdShortArray = MdArray<i16>;
/// An array of 32-bit integers.
pub type MdIntArray = MdArray<i32>;
/// An array of 64-bit integers.
pub type MdLongArray = MdArray<i64>;
/// An array of 32-bit floats.
pub type MdFloatArray = MdArray<f32>;
/// An array of 64-bit floats.
pub type MdDoubleArray = MdArray<f64>;

impl<T: Element> MdArray<T> {
    /// Creates a new array of the given shape, with every element set to zero (`T::default()`).
    ///
    /// Fails if the shape has a negative extent or holds more than `i32::MAX` elements.
    ///
    /// ```rust
    /// use mdarray_core::md::MdIntArray;
    ///
    /// let arr = MdIntArray::zeros(&[3]).unwrap();
    /// assert_eq!(arr.size(), 3);
    /// assert!(arr.iter().all(|&v| v == 0));
    /// ```
    pub fn zeros(shape: &[i32]) -> Result<Self, Error> {
        Self::zeros_of(Shape::new(shape)?)
    }

    /// Same as [`Self::zeros`], for a 64-bit shape.
    ///
    /// Fails with [`Error::DimensionOverflow`] if any extent does not fit into 32 bits.
    pub fn zeros_long(shape: &[i64]) -> Result<Self, Error> {
        Self::zeros_of(Shape::from_long(shape)?)
    }

    /// Creates a new zero-filled array with a prebuilt [`Shape`].
    pub fn zeros_of(shape: Shape) -> Result<Self, Error> {
        let data = vec![T::default(); shape.len()];
        Self::new(data, shape, Validation::Strict)
    }

    /// Creates a rank-2 array from its rows.
    ///
    /// All rows must have the same length, otherwise [`Error::BufferLength`] reports the first row that differs
    /// from the first one.
    ///
    /// ```rust
    /// use mdarray_core::md::MdDoubleArray;
    ///
    /// let arr = MdDoubleArray::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    /// assert_eq!(arr.shape(), &[3, 2]);
    /// assert_eq!(arr.get2(2, 1), 6.0);
    /// assert_eq!(arr.to_rows()[1], vec![3.0, 4.0]);
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, Error>
    where
        R: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != cols) {
            crate::trace!(
                "Ragged rows: found a row of length {}, expected {}",
                row.as_ref().len(),
                cols
            );
            return Err(Error::BufferLength {
                actual: row.as_ref().len(),
                expected: cols,
            });
        }
        let shape = Shape::from_long(&[rows.len() as i64, cols as i64])?;
        let mut data = Vec::with_capacity(shape.len());
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Self::new(data, shape, Validation::Strict)
    }
}

impl<T: Element, S: AsRef<[T]>> MdArray<T, S> {
    /// Creates an array over an existing flattened buffer.
    ///
    /// The buffer must hold exactly `length(shape)` elements in row-major order, otherwise
    /// [`Error::BufferLength`] reports both lengths.
    pub fn from_flat(data: S, shape: &[i32]) -> Result<Self, Error> {
        Self::from_flat_with(data, shape, Validation::Strict)
    }

    /// Creates an array over an existing flattened buffer, with an explicit [`Validation`] mode.
    ///
    /// With [`Validation::TrustCaller`] the buffer length is not checked against the shape, and accesses beyond the
    /// end of a short buffer panic.
    ///
    /// ```rust
    /// use mdarray_core::md::{MdByteArray, Validation};
    ///
    /// assert!(MdByteArray::from_flat_with(vec![1, 2, 3, 4, 5], &[2, 3], Validation::Strict).is_err());
    ///
    /// let arr = MdByteArray::from_flat_with(vec![1, 2, 3, 4, 5], &[2, 3], Validation::TrustCaller).unwrap();
    /// assert_eq!(arr.get2(1, 1), 5);
    /// assert_eq!(arr.size(), 5);
    /// ```
    pub fn from_flat_with(data: S, shape: &[i32], validation: Validation) -> Result<Self, Error> {
        Self::new(data, Shape::new(shape)?, validation)
    }

    /// Same as [`Self::from_flat_with`], for a 64-bit shape.
    ///
    /// Fails with [`Error::DimensionOverflow`] if any extent does not fit into 32 bits.
    pub fn from_flat_long(data: S, shape: &[i64], validation: Validation) -> Result<Self, Error> {
        Self::new(data, Shape::from_long(shape)?, validation)
    }

    /// Creates an array over an existing flattened buffer with a prebuilt [`Shape`].
    ///
    /// All other constructors end up here.
    pub fn new(data: S, shape: Shape, validation: Validation) -> Result<Self, Error> {
        validation.check(data.as_ref().len(), shape.len())?;
        Ok(Self {
            shape,
            data,
            elem: PhantomData,
        })
    }

    /// Get the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Get the extent of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= self.rank()`.
    pub fn extent(&self, dim: usize) -> usize {
        self.shape.extent(dim)
    }

    /// Get the shape of the array.
    pub fn shape(&self) -> &[i32] {
        self.shape.as_slice()
    }

    /// Get the shape of the array widened to 64 bits.
    pub fn shape_as_long(&self) -> Vec<i64> {
        self.shape.to_long()
    }

    /// Get the shape of the array as a [`Shape`].
    pub fn dims(&self) -> &Shape {
        &self.shape
    }

    /// Get the number of elements, which is the length of the backing buffer.
    ///
    /// This equals the element count of the shape unless the array was built with [`Validation::TrustCaller`].
    pub fn size(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Get the offset of `indices` in the backing buffer.
    pub fn compute_index(&self, indices: &[usize]) -> usize {
        index::compute_index(self.shape(), indices)
    }

    /// Get the index tuple of the element at `offset` in the backing buffer.
    pub fn compute_reverse_index(&self, offset: usize) -> Vec<usize> {
        index::compute_reverse_index(self.shape(), offset)
    }

    /// Get the element at `indices`.
    #[inline]
    pub fn get(&self, indices: &[usize]) -> T {
        self.data.as_ref()[self.compute_index(indices)]
    }

    /// Get the element at `i` of a rank-1 array.
    #[inline]
    pub fn get1(&self, i: usize) -> T {
        debug_assert_eq!(self.rank(), 1, "rank-1 access on a rank-{} array", self.rank());
        self.data.as_ref()[i]
    }

    /// Get the element at `[x, y]` of a rank-2 array.
    #[inline]
    pub fn get2(&self, x: usize, y: usize) -> T {
        self.data.as_ref()[index::compute_index2(self.shape(), x, y)]
    }

    /// Get the element at `[x, y, z]` of a rank-3 array.
    #[inline]
    pub fn get3(&self, x: usize, y: usize, z: usize) -> T {
        self.data.as_ref()[index::compute_index3(self.shape(), x, y, z)]
    }

    /// Get the element at `offset` of the backing buffer, regardless of the rank.
    #[inline]
    pub fn get_flat(&self, offset: usize) -> T {
        self.data.as_ref()[offset]
    }

    /// Get the backing buffer.
    pub fn as_flat(&self) -> &[T] {
        self.data.as_ref()
    }

    /// Get a copy of the backing buffer.
    pub fn to_flat_vec(&self) -> Vec<T> {
        self.data.as_ref().to_vec()
    }

    /// Consume the array and get back its backing buffer.
    pub fn into_flat(self) -> S {
        self.data
    }

    /// Iterate over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.as_ref().iter()
    }

    /// Iterate over the elements in row-major order, together with their index tuples.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> + '_ {
        Indices::new(self.shape()).zip(self.data.as_ref())
    }

    /// Get the rows of a rank-2 array.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        debug_assert_eq!(self.rank(), 2, "rank-2 access on a rank-{} array", self.rank());
        let (rows, cols) = (self.extent(0), self.extent(1));
        if cols == 0 {
            return vec![Vec::new(); rows];
        }
        self.as_flat()
            .chunks(cols)
            .take(rows)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> MdArray<T, S> {
    /// Set the element at `indices`.
    #[inline]
    pub fn set(&mut self, indices: &[usize], value: T) {
        let offset = self.compute_index(indices);
        self.data.as_mut()[offset] = value;
    }

    /// Set the element at `i` of a rank-1 array.
    #[inline]
    pub fn set1(&mut self, i: usize, value: T) {
        debug_assert_eq!(self.rank(), 1, "rank-1 access on a rank-{} array", self.rank());
        self.data.as_mut()[i] = value;
    }

    /// Set the element at `[x, y]` of a rank-2 array.
    #[inline]
    pub fn set2(&mut self, x: usize, y: usize, value: T) {
        let offset = index::compute_index2(self.shape(), x, y);
        self.data.as_mut()[offset] = value;
    }

    /// Set the element at `[x, y, z]` of a rank-3 array.
    #[inline]
    pub fn set3(&mut self, x: usize, y: usize, z: usize, value: T) {
        let offset = index::compute_index3(self.shape(), x, y, z);
        self.data.as_mut()[offset] = value;
    }

    /// Set the element at `offset` of the backing buffer, regardless of the rank.
    #[inline]
    pub fn set_flat(&mut self, offset: usize, value: T) {
        self.data.as_mut()[offset] = value;
    }

    /// Get a mutable reference to the element at `indices`.
    pub fn get_mut(&mut self, indices: &[usize]) -> &mut T {
        let offset = self.compute_index(indices);
        &mut self.data.as_mut()[offset]
    }

    /// Get the backing buffer for writing.
    ///
    /// Writes through the returned slice are seen by all later reads of the array, this is the intended way to
    /// fill or drain an array in bulk.
    pub fn as_flat_mut(&mut self) -> &mut [T] {
        self.data.as_mut()
    }
}

impl<T: Element, S: AsRef<[T]>> Index<&[usize]> for MdArray<T, S> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        &self.data.as_ref()[self.compute_index(indices)]
    }
}
impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> IndexMut<&[usize]> for MdArray<T, S> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        self.get_mut(indices)
    }
}
impl<T: Element, S: AsRef<[T]>> Index<[usize; 1]> for MdArray<T, S> {
    type Output = T;

    fn index(&self, [i]: [usize; 1]) -> &T {
        debug_assert_eq!(self.rank(), 1, "rank-1 access on a rank-{} array", self.rank());
        &self.data.as_ref()[i]
    }
}
impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> IndexMut<[usize; 1]> for MdArray<T, S> {
    fn index_mut(&mut self, [i]: [usize; 1]) -> &mut T {
        debug_assert_eq!(self.rank(), 1, "rank-1 access on a rank-{} array", self.rank());
        &mut self.data.as_mut()[i]
    }
}
impl<T: Element, S: AsRef<[T]>> Index<[usize; 2]> for MdArray<T, S> {
    type Output = T;

    fn index(&self, [x, y]: [usize; 2]) -> &T {
        &self.data.as_ref()[index::compute_index2(self.shape(), x, y)]
    }
}
impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> IndexMut<[usize; 2]> for MdArray<T, S> {
    fn index_mut(&mut self, [x, y]: [usize; 2]) -> &mut T {
        let offset = index::compute_index2(self.shape(), x, y);
        &mut self.data.as_mut()[offset]
    }
}
impl<T: Element, S: AsRef<[T]>> Index<[usize; 3]> for MdArray<T, S> {
    type Output = T;

    fn index(&self, [x, y, z]: [usize; 3]) -> &T {
        &self.data.as_ref()[index::compute_index3(self.shape(), x, y, z)]
    }
}
impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> IndexMut<[usize; 3]> for MdArray<T, S> {
    fn index_mut(&mut self, [x, y, z]: [usize; 3]) -> &mut T {
        let offset = index::compute_index3(self.shape(), x, y, z);
        &mut self.data.as_mut()[offset]
    }
}

impl<T: Element, S: Clone> Clone for MdArray<T, S> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.clone(),
            elem: PhantomData,
        }
    }
}

impl<T, S1, S2> PartialEq<MdArray<T, S2>> for MdArray<T, S1>
where
    T: Element,
    S1: AsRef<[T]>,
    S2: AsRef<[T]>,
{
    fn eq(&self, other: &MdArray<T, S2>) -> bool {
        let (a, b) = (self.as_flat(), other.as_flat());
        self.shape == other.shape && a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same(y))
    }
}
impl<T: Element, S: AsRef<[T]>> Eq for MdArray<T, S> {}

impl<T: Element, S: AsRef<[T]>> Hash for MdArray<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let data = self.as_flat();
        state.write_usize(data.len());
        for item in data {
            item.hash_into(state);
        }
        self.shape.hash(state);
    }
}

impl<T: Element, S: AsRef<[T]>> std::fmt::Debug for MdArray<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdArray")
            .field("kind", &T::KIND)
            .field("shape", &self.shape())
            .field("data", &self.as_flat())
            .finish()
    }
}

impl<T: Element, S: AsRef<[T]>> std::fmt::Display for MdArray<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rank() == 0 {
            return f.write_str("[]");
        }
        write_nested(f, self.shape(), self.as_flat())
    }
}

fn write_nested<T: std::fmt::Debug>(
    f: &mut std::fmt::Formatter<'_>,
    extents: &[i32],
    data: &[T],
) -> std::fmt::Result {
    let Some((&outer, inner)) = extents.split_first() else {
        return Ok(());
    };
    f.write_str("[")?;
    if inner.is_empty() {
        for (i, item) in data.iter().take(outer as usize).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item:?}")?;
        }
    } else {
        let stride = inner.iter().map(|&e| e as usize).product::<usize>();
        for i in 0..outer as usize {
            if i > 0 {
                f.write_str(", ")?;
            }
            // a buffer shorter than the shape is rendered truncated
            let start = (i * stride).min(data.len());
            let end = ((i + 1) * stride).min(data.len());
            write_nested(f, inner, &data[start..end])?;
        }
    }
    f.write_str("]")
}

/// A multi-dimensional array with its element type erased.
///
/// Implemented by every writable [`MdArray`], this trait lets generic or reflective callers query the shape and
/// access elements boxed as [`Value`]s, without knowing the element type at compile time. It is slower than the typed
/// accessors and is not meant for hot loops.
///
/// The trait includes [`DynMdArray::set_boxed`], so it is implemented only for arrays whose storage is writable:
/// `Vec<T>` and `&mut [T]`. A read-only `MdArray<T, &[T]>` offers the typed accessors only.
///
/// ```rust
/// use mdarray_core::md::{DynMdArray, ElementKind, MdFloatArray, MdIntArray, Value};
///
/// let mut arrays: Vec<Box<dyn DynMdArray>> = vec![
///     Box::new(MdIntArray::zeros(&[2, 2]).unwrap()),
///     Box::new(MdFloatArray::zeros(&[4]).unwrap()),
/// ];
/// arrays[0].set_boxed(&[1, 1], Value::I32(7)).unwrap();
/// assert_eq!(arrays[0].get_boxed(&[1, 1]), Value::I32(7));
/// assert!(arrays[1].set_boxed(&[0], Value::I32(7)).is_err());
/// assert_eq!(arrays[1].kind(), ElementKind::F32);
/// ```
pub trait DynMdArray: std::fmt::Debug {
    /// Get the kind of the elements.
    fn kind(&self) -> ElementKind;

    /// Get the number of dimensions.
    fn rank(&self) -> usize;

    /// Get the extent of dimension `dim`, which must be smaller than the rank.
    fn extent(&self, dim: usize) -> usize;

    /// Get the shape.
    fn shape(&self) -> &[i32];

    /// Get the shape widened to 64 bits.
    fn shape_as_long(&self) -> Vec<i64> {
        crate::shape::to_long(self.shape())
    }

    /// Get the number of elements in the backing buffer.
    fn size(&self) -> usize;

    /// Get the element at `indices`, boxed.
    fn get_boxed(&self, indices: &[usize]) -> Value;

    /// Get the element at `offset` of the backing buffer, boxed.
    fn get_flat_boxed(&self, offset: usize) -> Value;

    /// Set the element at `indices` from a boxed value.
    ///
    /// Fails with [`Error::ElementKind`] if the value is not of the array's element kind.
    fn set_boxed(&mut self, indices: &[usize], value: Value) -> Result<(), Error>;

    /// Structural equality with another type-erased array.
    ///
    /// Arrays of different element kinds are never equal, even if their elements convert into each other.
    fn dyn_eq(&self, other: &dyn DynMdArray) -> bool {
        self.kind() == other.kind()
            && self.shape() == other.shape()
            && self.size() == other.size()
            && (0..self.size()).all(|i| self.get_flat_boxed(i) == other.get_flat_boxed(i))
    }
}

impl<T: Element, S: AsRef<[T]> + AsMut<[T]>> DynMdArray for MdArray<T, S> {
    fn kind(&self) -> ElementKind {
        T::KIND
    }

    fn rank(&self) -> usize {
        MdArray::rank(self)
    }

    fn extent(&self, dim: usize) -> usize {
        MdArray::extent(self, dim)
    }

    fn shape(&self) -> &[i32] {
        MdArray::shape(self)
    }

    fn shape_as_long(&self) -> Vec<i64> {
        MdArray::shape_as_long(self)
    }

    fn size(&self) -> usize {
        MdArray::size(self)
    }

    fn get_boxed(&self, indices: &[usize]) -> Value {
        self.get(indices).into_value()
    }

    fn get_flat_boxed(&self, offset: usize) -> Value {
        self.get_flat(offset).into_value()
    }

    fn set_boxed(&mut self, indices: &[usize], value: Value) -> Result<(), Error> {
        let value = T::from_value(value).ok_or_else(|| {
            crate::trace!("Cannot store a {} value in a {} array", value.kind(), T::KIND);
            Error::ElementKind {
                expected: T::KIND,
                actual: value.kind(),
            }
        })?;
        self.set(indices, value);
        Ok(())
    }
}

impl PartialEq for dyn DynMdArray + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use rand::prelude::*;

    use super::{
        DynMdArray, ElementKind, MdArray, MdByteArray, MdDoubleArray, MdFloatArray, MdIntArray,
        MdLongArray, MdShortArray, Validation, Value,
    };
    use crate::shape::Shape;
    use crate::util::{f16, Complex};
    use crate::Error;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn rand_shape(rand: &mut impl Rng) -> Vec<i32> {
        let rank = rand.random_range(1..=5);
        (0..rank).map(|_| rand.random_range(1..=6)).collect()
    }

    fn rand_indices(shape: &[i32], rand: &mut impl Rng) -> Vec<usize> {
        shape
            .iter()
            .map(|&e| rand.random_range(0..e as usize))
            .collect()
    }

    #[test]
    fn rank2_scenario() {
        let arr = MdIntArray::from_flat(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert_eq!(arr.get2(0, 0), 1);
        assert_eq!(arr.get2(0, 2), 3);
        assert_eq!(arr.get2(1, 0), 4);
        assert_eq!(arr.get2(1, 2), 6);
        assert_eq!(arr[[1, 1]], 5);
        assert_eq!(arr.rank(), 2);
        assert_eq!(arr.extent(0), 2);
        assert_eq!(arr.extent(1), 3);
        assert_eq!(arr.shape_as_long(), vec![2_i64, 3]);
    }

    #[test]
    fn rank3_scenario() {
        let arr = MdLongArray::from_flat((0..8).collect(), &[2, 2, 2]).unwrap();
        assert_eq!(arr.get3(1, 0, 1), 5);
        assert_eq!(arr.get(&[1, 0, 1]), 5);
        assert_eq!(arr[[1, 1, 0]], 6);
    }

    #[test]
    fn zeros() {
        let arr = MdIntArray::zeros(&[3]).unwrap();
        assert_eq!(arr.size(), 3);
        assert_eq!(arr.as_flat(), &[0, 0, 0]);

        let arr = MdFloatArray::zeros_long(&[2, 0, 4]).unwrap();
        assert_eq!(arr.size(), 0);
        assert!(arr.is_empty());
        assert_eq!(arr.rank(), 3);

        let arr = MdShortArray::zeros(&[]).unwrap();
        assert_eq!(arr.size(), 0);
        assert_eq!(arr.rank(), 0);
        assert_eq!(arr.to_string(), "[]");

        assert_eq!(
            MdByteArray::zeros(&[4, -2]).unwrap_err(),
            Error::NegativeExtent { dim: 1, extent: -2 }
        );
        assert!(matches!(
            MdByteArray::zeros(&[1 << 16, 1 << 16]),
            Err(Error::LengthOverflow { .. })
        ));
        // the length accumulator wraps 2^64 around to 0
        let wrapped = MdByteArray::zeros(&[65536, 65536, 65536, 65536]).unwrap();
        assert_eq!(wrapped.size(), 0);
        assert_eq!(wrapped.rank(), 4);
        assert!(wrapped.is_empty());

        assert!(matches!(
            MdByteArray::zeros_long(&[1 << 32]),
            Err(Error::DimensionOverflow { dim: 0, .. })
        ));
    }

    #[test]
    fn buffer_validation() {
        let err = MdByteArray::from_flat(vec![1, 2, 3, 4, 5], &[2, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferLength {
                actual: 5,
                expected: 6
            }
        );
        assert!(err.is_argument_error());

        let arr =
            MdByteArray::from_flat_with(vec![1, 2, 3, 4, 5], &[2, 3], Validation::TrustCaller)
                .unwrap();
        assert_eq!(arr.size(), 5);
        assert_eq!(arr.get2(1, 1), 5);
        assert_eq!(arr.to_string(), "[[1, 2, 3], [4, 5]]");

        let arr =
            MdByteArray::from_flat_with(vec![0; 8], &[2, 3], Validation::TrustCaller).unwrap();
        assert_eq!(arr.size(), 8);

        assert!(
            MdByteArray::from_flat_long(vec![0; 6], &[2, 3], Validation::Strict).is_ok()
        );
        assert!(matches!(
            MdByteArray::from_flat_long(vec![0; 6], &[2, 1 << 40], Validation::TrustCaller),
            Err(Error::DimensionOverflow { dim: 1, .. })
        ));
    }

    #[test]
    #[should_panic]
    fn short_buffer_panics_on_access() {
        let arr =
            MdByteArray::from_flat_with(vec![1, 2, 3, 4, 5], &[2, 3], Validation::TrustCaller)
                .unwrap();
        arr.get2(1, 2);
    }

    #[test]
    fn indices_are_not_checked_against_extents() {
        let arr = MdIntArray::from_flat(vec![0, 1, 2, 3, 4, 5], &[2, 3]).unwrap();
        assert_eq!(arr.get(&[0, 5]), 5);
        assert_eq!(arr.get(&[0, 5]), arr.get(&[1, 2]));
        assert_eq!(arr.get2(0, 4), 4);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let arr = MdIntArray::zeros(&[2, 3]).unwrap();
        arr.get(&[2, 0]);
    }

    #[test]
    fn set_then_get() {
        let mut rand = StdRng::seed_from_u64(0x3d8f0e71c2a9b654);
        for _ in 0..50 {
            let shape = rand_shape(&mut rand);
            let mut arr = MdDoubleArray::zeros(&shape).unwrap();
            for _ in 0..20 {
                let idx = rand_indices(&shape, &mut rand);
                let value = rand.random::<f64>();
                arr.set(&idx, value);
                assert_eq!(arr.get(&idx), value);
                assert_eq!(arr[idx.as_slice()], value);
                assert_eq!(arr.compute_reverse_index(arr.compute_index(&idx)), idx);
            }
        }
    }

    #[test]
    fn fast_paths_match_general_path() {
        let mut rand = StdRng::seed_from_u64(0xc41a6e2f9d07b385);
        let mut a = MdIntArray::zeros(&[4, 7]).unwrap();
        let mut b = MdIntArray::zeros(&[4, 7]).unwrap();
        for _ in 0..100 {
            let (x, y) = (rand.random_range(0..4), rand.random_range(0..7));
            let value = rand.random::<i32>();
            a.set2(x, y, value);
            b.set(&[x, y], value);
            assert_eq!(a.get2(x, y), a.get(&[x, y]));
        }
        assert_eq!(a, b);

        let mut a = MdIntArray::zeros(&[3, 2, 5]).unwrap();
        let mut b = MdIntArray::zeros(&[3, 2, 5]).unwrap();
        for _ in 0..100 {
            let idx = rand_indices(&[3, 2, 5], &mut rand);
            let value = rand.random::<i32>();
            a.set3(idx[0], idx[1], idx[2], value);
            b[[idx[0], idx[1], idx[2]]] = value;
            assert_eq!(a.get3(idx[0], idx[1], idx[2]), b.get(&idx));
        }
        assert_eq!(a, b);

        let mut arr = MdLongArray::zeros(&[5]).unwrap();
        arr.set1(3, 9);
        arr[[4]] = 10;
        assert_eq!(arr.get1(3), 9);
        assert_eq!(arr.get(&[4]), 10);
    }

    #[test]
    fn flat_view_aliases_array() {
        let mut arr = MdIntArray::zeros(&[2, 3]).unwrap();
        arr.as_flat_mut()[4] = 42;
        assert_eq!(arr.get2(1, 1), 42);
        arr.set2(0, 2, 7);
        assert_eq!(arr.as_flat()[2], 7);
        arr.set_flat(5, 8);
        assert_eq!(arr.get(&[1, 2]), 8);
        *arr.get_mut(&[0, 0]) = -1;
        assert_eq!(arr.into_flat(), vec![-1, 0, 7, 0, 42, 8]);
    }

    #[test]
    fn borrowed_storage() {
        let mut buf = [0_u16; 6];
        {
            let mut arr = MdArray::<u16, _>::from_flat(&mut buf[..], &[3, 2]).unwrap();
            arr.set2(2, 1, 11);
            arr.set2(0, 1, 12);
        }
        assert_eq!(buf, [0, 12, 0, 0, 0, 11]);

        let arr = MdArray::<u16, &[u16]>::from_flat(&buf[..], &[2, 3]).unwrap();
        assert_eq!(arr.get2(0, 1), 12);
        assert_eq!(arr.get2(1, 2), 11);

        let mut arr = MdArray::<u16, _>::from_flat(&mut buf[..], &[6]).unwrap();
        let erased: &mut dyn DynMdArray = &mut arr;
        erased.set_boxed(&[3], Value::U16(13)).unwrap();
        assert_eq!(erased.get_flat_boxed(5), Value::U16(11));
        assert_eq!(buf, [0, 12, 0, 13, 0, 11]);
    }

    #[test]
    fn equality_and_hash() {
        let a = MdFloatArray::from_flat(vec![1.0, 2.0, f32::NAN, 4.0], &[2, 2]).unwrap();
        let mut b = MdFloatArray::from_flat(vec![1.0, 2.0, f32::NAN, 4.0], &[2, 2]).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        b.set2(1, 1, 5.0);
        assert_ne!(a, b);

        // same buffer, different shape
        let c = MdFloatArray::from_flat(vec![1.0, 2.0, f32::NAN, 4.0], &[4]).unwrap();
        assert_ne!(a, c);

        let borrowed = [1.0, 2.0, f32::NAN, 4.0];
        let d = MdArray::<f32, _>::from_flat(&borrowed[..], &[2, 2]).unwrap();
        assert!(a == d);
        assert_eq!(hash_of(&a), hash_of(&d));

        let g = MdFloatArray::from_flat(vec![1.0, 2.0, f32::from_bits(0x7fc0_0001), 4.0], &[2, 2])
            .unwrap();
        assert_eq!(a, g);
        assert_eq!(hash_of(&a), hash_of(&g));

        let e = MdFloatArray::from_flat(vec![0.0, -0.0], &[2]).unwrap();
        let f = MdFloatArray::from_flat(vec![0.0, 0.0], &[2]).unwrap();
        assert_ne!(e, f);
    }

    #[test]
    fn boxed_access() {
        let mut arr = MdShortArray::zeros(&[2, 2]).unwrap();
        {
            let erased: &mut dyn DynMdArray = &mut arr;
            assert_eq!(erased.kind(), ElementKind::I16);
            assert_eq!(erased.rank(), 2);
            assert_eq!(erased.extent(1), 2);
            assert_eq!(erased.shape(), &[2, 2]);
            assert_eq!(erased.shape_as_long(), vec![2_i64, 2]);
            assert_eq!(erased.size(), 4);

            erased.set_boxed(&[0, 1], Value::I16(-5)).unwrap();
            assert_eq!(erased.get_boxed(&[0, 1]), Value::I16(-5));
            assert_eq!(erased.get_flat_boxed(1), Value::I16(-5));
            assert_eq!(
                erased.set_boxed(&[0, 1], Value::I32(-5)),
                Err(Error::ElementKind {
                    expected: ElementKind::I16,
                    actual: ElementKind::I32
                })
            );
        }
        assert_eq!(arr.get2(0, 1), -5);
    }

    #[test]
    fn boxed_equality_across_kinds() {
        let ints = MdIntArray::from_flat(vec![1, 2, 3], &[3]).unwrap();
        let longs = MdLongArray::from_flat(vec![1, 2, 3], &[3]).unwrap();
        let ints2 = MdIntArray::from_flat(vec![1, 2, 3], &[3]).unwrap();
        let a: &dyn DynMdArray = &ints;
        let b: &dyn DynMdArray = &longs;
        let c: &dyn DynMdArray = &ints2;
        assert!(a != b);
        assert!(a == c);
    }

    #[test]
    fn all_kinds() {
        fn check<T: super::Element>(value: T) {
            let mut arr = MdArray::<T>::zeros(&[2, 3, 2]).unwrap();
            assert!(arr.iter().all(|v| v.same(&T::default())));
            arr.set3(1, 2, 0, value);
            assert!(arr.get(&[1, 2, 0]).same(&value));
            let erased: &dyn DynMdArray = &arr;
            assert_eq!(erased.kind(), T::KIND);
            assert_eq!(erased.get_boxed(&[1, 2, 0]), value.into_value());
        }
        check(1_i8);
        check(2_i16);
        check(3_i32);
        check(4_i64);
        check(5_u8);
        check(6_u16);
        check(7_u32);
        check(8_u64);
        check(f16::from_bits(0x4000));
        check(9.5_f32);
        check(10.5_f64);
        check(Complex::<f32>::new(1.0, 2.0));
        check(Complex::<f64>::new(3.0, 4.0));
        check(true);
    }

    #[test]
    fn rows() {
        let arr = MdIntArray::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr.as_flat(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(arr.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);

        assert_eq!(
            MdIntArray::from_rows(&[vec![1, 2], vec![3]]).unwrap_err(),
            Error::BufferLength {
                actual: 1,
                expected: 2
            }
        );

        let empty = MdIntArray::from_rows::<Vec<i32>>(&[]).unwrap();
        assert_eq!(empty.shape(), &[0, 0]);
        let no_cols = MdIntArray::from_rows(&[Vec::<i32>::new(), Vec::new()]).unwrap();
        assert_eq!(no_cols.to_rows(), vec![Vec::<i32>::new(), Vec::new()]);
    }

    #[test]
    fn iteration() {
        let arr = MdIntArray::from_flat((0..6).collect(), &[3, 2]).unwrap();
        let pairs = arr.indexed_iter().collect::<Vec<_>>();
        assert_eq!(pairs.len(), 6);
        for (idx, &value) in pairs {
            assert_eq!(arr.get(&idx), value);
            assert_eq!(arr.compute_index(&idx), value as usize);
        }
        assert_eq!(arr.iter().sum::<i32>(), 15);
        assert_eq!(arr.to_flat_vec(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn display() {
        let arr = MdIntArray::from_flat((0..8).collect(), &[2, 2, 2]).unwrap();
        assert_eq!(arr.to_string(), "[[[0, 1], [2, 3]], [[4, 5], [6, 7]]]");
        let arr = MdIntArray::zeros(&[2, 0]).unwrap();
        assert_eq!(arr.to_string(), "[[], []]");
        let arr = MdByteArray::from_flat(vec![3], &[1]).unwrap();
        assert_eq!(arr.to_string(), "[3]");
        assert!(format!("{arr:?}").contains("I8"));
    }

    #[test]
    fn prebuilt_shape() {
        let shape = Shape::new(&[3, 3]).unwrap();
        let arr = MdDoubleArray::zeros_of(shape.clone()).unwrap();
        assert_eq!(arr.dims(), &shape);
        let arr2 = MdDoubleArray::new(vec![0.0; 9], shape, Validation::Strict).unwrap();
        assert_eq!(arr, arr2);
        assert_eq!(arr.clone(), arr2);
    }
}
