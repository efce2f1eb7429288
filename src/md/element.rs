use std::hash::{Hash, Hasher};

use crate::util::{f16, Complex};

/// The kind of element stored in an [`MdArray`](crate::md::MdArray).
///
/// Every array stores exactly one kind of element, fixed by its type parameter. The kind is available at runtime
/// through [`DynMdArray::kind`](crate::md::DynMdArray::kind) for callers that only hold a type-erased array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// [`i8`] elements, a.k.a. bytes.
    I8,
    /// [`i16`] elements, a.k.a. shorts.
    I16,
    /// [`i32`] elements, a.k.a. ints.
    I32,
    /// [`i64`] elements, a.k.a. longs.
    I64,
    /// [`u8`] elements.
    U8,
    /// [`u16`] elements.
    U16,
    /// [`u32`] elements.
    U32,
    /// [`u64`] elements.
    U64,
    /// [`f16`] elements.
    F16,
    /// [`f32`] elements, a.k.a. floats.
    F32,
    /// [`f64`] elements, a.k.a. doubles.
    F64,
    /// [`Complex<f32>`] elements.
    ComplexF32,
    /// [`Complex<f64>`] elements.
    ComplexF64,
    /// [`bool`] elements.
    Bool,
}
impl ElementKind {
    /// Get the size of one element in bytes.
    pub fn itemsize(&self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Bool => 1,
            Self::I16 | Self::U16 | Self::F16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 | Self::ComplexF32 => 8,
            Self::ComplexF64 => 16,
        }
    }

    /// Get the Rust name of the element type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::ComplexF32 => "Complex<f32>",
            Self::ComplexF64 => "Complex<f64>",
            Self::Bool => "bool",
        }
    }
}
impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single element of any kind.
///
/// This is the boxed form used by [`DynMdArray::get_boxed`](crate::md::DynMdArray::get_boxed) and
/// [`DynMdArray::set_boxed`](crate::md::DynMdArray::set_boxed), for callers that do not know the element type at
/// compile time. Typed code should use the unboxed accessors of [`MdArray`](crate::md::MdArray) instead.
///
/// Two values are equal only if they have the same kind and the same element, where floating point elements are
/// compared by their bit pattern after collapsing every NaN into one canonical NaN.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    #[allow(missing_docs)]
    I8(i8),
    #[allow(missing_docs)]
    I16(i16),
    #[allow(missing_docs)]
    I32(i32),
    #[allow(missing_docs)]
    I64(i64),
    #[allow(missing_docs)]
    U8(u8),
    #[allow(missing_docs)]
    U16(u16),
    #[allow(missing_docs)]
    U32(u32),
    #[allow(missing_docs)]
    U64(u64),
    #[allow(missing_docs)]
    F16(f16),
    #[allow(missing_docs)]
    F32(f32),
    #[allow(missing_docs)]
    F64(f64),
    #[allow(missing_docs)]
    ComplexF32(Complex<f32>),
    #[allow(missing_docs)]
    ComplexF64(Complex<f64>),
    #[allow(missing_docs)]
    Bool(bool),
}
impl Value {
    /// Get the kind of the held element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::I8(_) => ElementKind::I8,
            Self::I16(_) => ElementKind::I16,
            Self::I32(_) => ElementKind::I32,
            Self::I64(_) => ElementKind::I64,
            Self::U8(_) => ElementKind::U8,
            Self::U16(_) => ElementKind::U16,
            Self::U32(_) => ElementKind::U32,
            Self::U64(_) => ElementKind::U64,
            Self::F16(_) => ElementKind::F16,
            Self::F32(_) => ElementKind::F32,
            Self::F64(_) => ElementKind::F64,
            Self::ComplexF32(_) => ElementKind::ComplexF32,
            Self::ComplexF64(_) => ElementKind::ComplexF64,
            Self::Bool(_) => ElementKind::Bool,
        }
    }

    /// Unbox the held element, if it is a `T`.
    pub fn get<T: Element>(self) -> Option<T> {
        T::from_value(self)
    }
}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        fn same<T: Element>(a: &T, b: Value) -> bool {
            T::from_value(b).is_some_and(|b| a.same(&b))
        }
        match self {
            Self::I8(v) => same(v, *other),
            Self::I16(v) => same(v, *other),
            Self::I32(v) => same(v, *other),
            Self::I64(v) => same(v, *other),
            Self::U8(v) => same(v, *other),
            Self::U16(v) => same(v, *other),
            Self::U32(v) => same(v, *other),
            Self::U64(v) => same(v, *other),
            Self::F16(v) => same(v, *other),
            Self::F32(v) => same(v, *other),
            Self::F64(v) => same(v, *other),
            Self::ComplexF32(v) => same(v, *other),
            Self::ComplexF64(v) => same(v, *other),
            Self::Bool(v) => same(v, *other),
        }
    }
}
impl Eq for Value {}

mod private {
    pub trait Sealed {}
}

/// A type that can be stored in an [`MdArray`](crate::md::MdArray).
///
/// The trait is implemented for every [`ElementKind`] and is sealed. It supplies the boxing conversions used by the
/// type-erased access path, and a bitwise notion of equality and hashing that keeps `Eq` and `Hash` of arrays
/// consistent for floating point elements. All NaNs are treated as the same value, whatever their payload, while
/// `0.0` and `-0.0` stay distinct.
pub trait Element: Copy + Default + std::fmt::Debug + 'static + private::Sealed {
    /// The kind of this element type.
    const KIND: ElementKind;

    /// Box the element.
    fn into_value(self) -> Value;

    /// Unbox an element, if the value holds this element type.
    fn from_value(value: Value) -> Option<Self>;

    /// Bitwise equality of two elements, with all NaNs equal.
    fn same(&self, other: &Self) -> bool;

    /// Feed the element into a hasher, consistently with [`Element::same`].
    fn hash_into<H: Hasher>(&self, state: &mut H);
}
macro_rules! impl_element {
    ($ty:ty, $kind:ident, |$v:ident| $key:expr) => {
        impl private::Sealed for $ty {}
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }

            #[inline]
            fn same(&self, other: &Self) -> bool {
                let key = |$v: &$ty| $key;
                key(self) == key(other)
            }

            #[inline]
            fn hash_into<H: Hasher>(&self, state: &mut H) {
                let key = |$v: &$ty| $key;
                key(self).hash(state)
            }
        }
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$kind(value)
            }
        }
    };
}

/// Bit pattern of an `f16`, with every NaN mapped to the canonical quiet NaN.
fn f16_key(v: f16) -> u16 {
    let bits = v.to_bits();
    if bits & 0x7c00 == 0x7c00 && bits & 0x03ff != 0 {
        0x7e00
    } else {
        bits
    }
}

fn f32_key(v: f32) -> u32 {
    if v.is_nan() {
        f32::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

fn f64_key(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl_element!(i8, I8, |v| *v);
impl_element!(i16, I16, |v| *v);
impl_element!(i32, I32, |v| *v);
impl_element!(i64, I64, |v| *v);
impl_element!(u8, U8, |v| *v);
impl_element!(u16, U16, |v| *v);
impl_element!(u32, U32, |v| *v);
impl_element!(u64, U64, |v| *v);
impl_element!(f16, F16, |v| f16_key(*v));
impl_element!(f32, F32, |v| f32_key(*v));
impl_element!(f64, F64, |v| f64_key(*v));
impl_element!(Complex<f32>, ComplexF32, |v| (f32_key(v.re), f32_key(v.im)));
impl_element!(Complex<f64>, ComplexF64, |v| (f64_key(v.re), f64_key(v.im)));
impl_element!(bool, Bool, |v| *v);
