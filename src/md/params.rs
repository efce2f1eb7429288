/// How strictly a caller-supplied buffer is checked against the shape at construction.
///
/// Used by [`MdArray::from_flat_with`](crate::md::MdArray::from_flat_with) and the other constructors that wrap an
/// existing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Validation {
    /// The buffer length must equal the number of elements of the shape.
    #[default]
    Strict,
    /// The buffer is accepted as is, even if it is shorter or longer than the shape requires.
    ///
    /// Accessing an offset beyond the end of a short buffer panics, like any out of bounds slice access.
    TrustCaller,
}
impl Validation {
    pub(crate) fn check(self, actual: usize, expected: usize) -> Result<(), crate::Error> {
        match self {
            Validation::TrustCaller => Ok(()),
            Validation::Strict if actual == expected => Ok(()),
            Validation::Strict => {
                crate::trace!(
                    "Buffer length {} does not match the shape length {}",
                    actual,
                    expected
                );
                Err(crate::Error::BufferLength { actual, expected })
            }
        }
    }
}
