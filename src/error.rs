use crate::md::ElementKind;

/// Errors returned when building or converting multi-dimensional arrays.
///
/// All of these are raised at construction (or conversion) time, before any array is observable.
/// Out-of-range indices are not reported through this type: they panic at the buffer access, like
/// any slice access would.
///
/// For debugging purposes, you can set the environment variable `MDARRAY_TRACE` to print a trace
/// line describing each failure as it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The flattened buffer does not hold exactly as many elements as the shape requires.
    BufferLength {
        /// Length of the supplied buffer.
        actual: usize,
        /// Length implied by the shape.
        expected: usize,
    },
    /// A shape extent is negative.
    NegativeExtent {
        /// The dimension holding the bad extent.
        dim: usize,
        /// The extent as supplied.
        extent: i64,
    },
    /// A 64-bit extent does not fit into the 32-bit shape representation.
    DimensionOverflow {
        /// The dimension holding the bad extent.
        dim: usize,
        /// The extent as supplied.
        extent: i64,
    },
    /// The total number of elements does not fit into the 32-bit addressing range.
    LengthOverflow {
        /// The accumulated product of all extents.
        length: i64,
    },
    /// A boxed value of one element kind was written into an array of another kind.
    ElementKind {
        /// Kind of the array.
        expected: ElementKind,
        /// Kind of the supplied value.
        actual: ElementKind,
    },
}
impl Error {
    /// Whether this error reports a malformed argument (bad shape or buffer) rather than an overflow.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::BufferLength { .. }
                | Error::NegativeExtent { .. }
                | Error::ElementKind { .. }
        )
    }
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BufferLength { actual, expected } => write!(
                f,
                "Buffer has length {actual}, but the shape requires {expected} elements"
            ),
            Error::NegativeExtent { dim, extent } => {
                write!(f, "Dimension {dim} has negative extent {extent}")
            }
            Error::DimensionOverflow { dim, extent } => {
                write!(f, "Dimension {dim} with extent {extent} does not fit into 32 bits")
            }
            Error::LengthOverflow { length } => {
                write!(f, "Array length {length} does not fit into 32 bits")
            }
            Error::ElementKind { expected, actual } => {
                write!(f, "Expected a {expected} element, got a {actual} element")
            }
        }
    }
}
impl std::error::Error for Error {}
