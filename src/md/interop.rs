//! Conversions between [`MdArray`] and the `ndarray` crate's [`ndarray::ArrayBase`].

use crate::md::{Element, MdArray, Validation};
use crate::shape::Shape;
use crate::Error;

impl<T: Element> MdArray<T> {
    /// Creates a new array with the data copied from an [`ndarray::ArrayBase`].
    ///
    /// The elements are copied in logical (row-major) order, whatever the memory layout of the source is.
    /// A zero-dimensional source holds one element while a rank-0 [`MdArray`] holds none, so it is rejected with
    /// [`Error::BufferLength`].
    ///
    /// ```rust
    /// use mdarray_core::md::MdIntArray;
    ///
    /// let arr = MdIntArray::from_ndarray(&mdarray_core::ndarray::array![[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(arr.shape(), &[2, 3]);
    /// assert_eq!(arr.get2(1, 0), 4);
    /// ```
    pub fn from_ndarray<S, D>(array: &ndarray::ArrayBase<S, D>) -> Result<Self, Error>
    where
        S: ndarray::Data<Elem = T>,
        D: ndarray::Dimension,
    {
        let extents = array.shape().iter().map(|&e| e as i64).collect::<Vec<_>>();
        let shape = Shape::from_long(&extents)?;
        let data = array.iter().copied().collect::<Vec<_>>();
        Self::new(data, shape, Validation::Strict)
    }
}

impl<T: Element, S: AsRef<[T]>> MdArray<T, S> {
    /// Get an [`ndarray::ArrayD`] with the data copied from this array.
    ///
    /// Fails with [`Error::BufferLength`] if the array was built with [`Validation::TrustCaller`] over a buffer that
    /// does not match its shape.
    pub fn to_ndarray(&self) -> Result<ndarray::ArrayD<T>, Error> {
        let dims = self
            .shape()
            .iter()
            .map(|&e| e as usize)
            .collect::<Vec<_>>();
        ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&dims), self.to_flat_vec()).map_err(|e| {
            crate::trace!("Cannot convert to ndarray: {}", e);
            Error::BufferLength {
                actual: self.size(),
                expected: dims.iter().product(),
            }
        })
    }
}
