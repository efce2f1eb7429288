#![cfg_attr(deny_warnings, deny(warnings))]
#![cfg_attr(deny_warnings, deny(missing_docs))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Fixed-rank multi-dimensional arrays over a single flattened buffer.
//!
//! The crate provides [`MdArray`](crate::md::MdArray), an n-dimensional array of numeric elements stored
//! contiguously in row-major (C) order. It is meant as the in-memory container for array-structured scientific
//! data, such as raw sample buffers, that external codecs read and write in bulk through the flat buffer.
//!
//!
//! ### Getting Started
//!
//! To use this library, add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! mdarray-core = "0.1"
//! ```
//!
//! An array is created from a shape, either zero-filled or over an existing buffer, and then accessed by index
//! tuples. Rank 1, 2 and 3 arrays have dedicated accessors that skip building an index tuple:
//! ```rust
//! use mdarray_core::md::{MdFloatArray, MdIntArray};
//!
//! let mut image = MdFloatArray::zeros(&[480, 640]).unwrap();
//! image.set2(10, 20, 0.5);
//! assert_eq!(image.get(&[10, 20]), 0.5);
//!
//! let cube = MdIntArray::from_flat((0..8).collect(), &[2, 2, 2]).unwrap();
//! assert_eq!(cube.get3(1, 0, 1), 5);
//! assert_eq!(cube.as_flat().len(), 8);
//! ```
//!
//! Shapes are given with 32-bit extents, and the total number of elements must fit into an `i32`. 64-bit shapes are
//! accepted by the `*_long` constructors and narrowed first, see the [`shape`] module.
//!
//! The address arithmetic lives in the [`index`] module and is shared by all element types. It does not validate
//! individual indices against their extents: an index that maps past the end of the buffer panics on the buffer
//! access, while one that maps inside it addresses another element. Debug builds only assert the number of
//! indices.
//!
//! ## Features
//! - `ndarray`: Enable conversions between [`MdArray`](crate::md::MdArray) and the `ndarray` crate's `ArrayBase`
//!   types.
//! - `half`: Add a dependency to the `half` crate, and use `half::f16` as the 16-bit float element type. See the
//!   [`util`] module for the info.
//! - `num-complex`: Add a dependency to the `num-complex` crate, and use `num_complex::Complex` as the complex
//!   element type. See the [`util`] module for the info.
//!
//! ## Error Handling
//! Constructors return [`Error`] for malformed shapes and buffers. In addition, if the environment variable
//! `MDARRAY_TRACE` is set, a detailed trace line is printed to stderr for every failure, which is useful for
//! debugging.

pub mod index;
pub mod md;
pub mod shape;
pub mod util;

mod error;
pub use error::Error;

mod tracing;
pub(crate) use tracing::trace;

/// The version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "ndarray")]
pub use ndarray;
