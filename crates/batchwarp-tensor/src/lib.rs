#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `batchwarp-tensor` is the container side of the batchwarp workspace: a
//! rank-dynamic tensor whose element type is a runtime tag rather than a
//! generic parameter. Batched image operators dispatch on that tag, hand raw
//! byte views to backend kernels, and retype/resize caller-owned outputs in
//! place.
//!
//! The crate is organized into:
//!
//! - **[`tensor::Tensor`]**: shape + dtype + owned contiguous buffer
//! - **[`storage::TensorStorage`]**: byte buffer with explicit element alignment
//! - **[`allocator::TensorAllocator`]**: allocation trait with a system-allocator impl
//! - **[`dtype::DType`] / [`dtype::Element`]**: the closed scalar-type universe

/// Allocator module containing memory management utilities.
pub mod allocator;

/// Dtype module containing the runtime element-type tag and scalar trait.
pub mod dtype;

/// Storage module containing the owned byte buffer implementation.
pub mod storage;

/// Tensor module containing the container and its error type.
pub mod tensor;

pub use crate::allocator::{CpuAllocator, TensorAllocator, TensorAllocatorError};
pub use crate::dtype::{cast_slice, cast_slice_mut, DType, Element};
pub use crate::storage::TensorStorage;
pub use crate::tensor::{Tensor, TensorError};
