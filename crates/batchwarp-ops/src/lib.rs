#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The operator in this crate takes a batch of rank-3 images and one 2x3
//! affine matrix per image, and produces warped images of a single requested
//! size. The pixel work is delegated to backend kernels that only exist for
//! a fixed menu of element types and channel counts; the value of this crate
//! is the dispatch around that menu: layout resolution, per-image type and
//! channel selection, and greedy grouping of planar channels into the largest
//! supported kernel calls.

/// backend primitive interface, kernel registry and the CPU reference backend.
pub mod backend;

/// channel-group decomposition for planar layouts.
pub mod batching;

/// kernel selection per element type, layout and channel count.
pub mod dispatch;

/// error types for warp operations.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// image layout and size types.
pub mod layout;

/// image geometric transformations module.
pub mod warp;
