use thiserror::Error;

use crate::{
    allocator::TensorAllocatorError,
    dtype::{cast_slice, cast_slice_mut, DType, Element},
    storage::TensorStorage,
};

/// An error type for tensor container operations.
#[derive(Debug, Error, PartialEq)]
pub enum TensorError {
    /// The data length does not match the requested shape.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on the shape.
        expected: usize,
        /// Actual number of elements in the data.
        actual: usize,
    },

    /// Typed access was requested with the wrong element type.
    #[error("Dtype mismatch: tensor holds {actual:?}, requested {requested:?}")]
    DTypeMismatch {
        /// The tensor's runtime element type.
        actual: DType,
        /// The element type the caller asked for.
        requested: DType,
    },

    /// The axis exceeds the tensor rank.
    #[error("Axis {axis} out of bounds for rank {rank}")]
    AxisOutOfBounds {
        /// The invalid axis.
        axis: usize,
        /// The tensor rank.
        rank: usize,
    },

    /// The underlying storage operation failed.
    #[error("Storage error: {0}")]
    StorageError(#[from] TensorAllocatorError),
}

/// A rank-dynamic tensor with a runtime element type.
///
/// This is the container batched operators consume: the shape and element
/// type are runtime values, the data is an owned contiguous buffer accessed
/// as raw bytes or through typed slices. Operators retype and resize
/// caller-owned output tensors in place via [`Tensor::set_dtype`] and
/// [`Tensor::resize`].
///
/// # Examples
///
/// ```
/// use batchwarp_tensor::{DType, Tensor};
///
/// let t = Tensor::from_vec(&[2, 3, 1], vec![0u8; 6]).unwrap();
/// assert_eq!(t.dtype(), DType::U8);
/// assert_eq!(t.rank(), 3);
/// assert_eq!(t.numel(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor {
    dtype: DType,
    shape: Vec<usize>,
    storage: TensorStorage,
}

impl Tensor {
    /// Creates an empty tensor with the given element type.
    ///
    /// The shape is `[0]`; resize before writing into it.
    pub fn empty(dtype: DType) -> Self {
        Self {
            dtype,
            shape: vec![0],
            storage: TensorStorage::empty(dtype.align_of()),
        }
    }

    /// Creates a tensor from typed data.
    ///
    /// Fails when the data length does not match the shape product.
    pub fn from_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(TensorError::InvalidShape {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            dtype: T::DTYPE,
            shape: shape.to_vec(),
            storage: TensorStorage::from_vec(data)?,
        })
    }

    /// Creates a zero-filled tensor.
    pub fn zeros(shape: &[usize], dtype: DType) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        Ok(Self {
            dtype,
            shape: shape.to_vec(),
            storage: TensorStorage::zeroed(numel * dtype.size_of(), dtype.align_of())?,
        })
    }

    /// Returns the runtime element type.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the extent along `axis`.
    pub fn dim(&self, axis: usize) -> Result<usize, TensorError> {
        self.shape
            .get(axis)
            .copied()
            .ok_or(TensorError::AxisOutOfBounds {
                axis,
                rank: self.shape.len(),
            })
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns the tensor data as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    /// Returns the tensor data as mutable raw bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.storage.as_bytes_mut()
    }

    /// Returns a typed view of the data.
    ///
    /// Fails unless `T` matches the runtime element type.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], TensorError> {
        if T::DTYPE != self.dtype {
            return Err(TensorError::DTypeMismatch {
                actual: self.dtype,
                requested: T::DTYPE,
            });
        }
        Ok(cast_slice(self.storage.as_bytes()))
    }

    /// Returns a mutable typed view of the data.
    ///
    /// Fails unless `T` matches the runtime element type.
    pub fn as_slice_mut<T: Element>(&mut self) -> Result<&mut [T], TensorError> {
        if T::DTYPE != self.dtype {
            return Err(TensorError::DTypeMismatch {
                actual: self.dtype,
                requested: T::DTYPE,
            });
        }
        Ok(cast_slice_mut(self.storage.as_bytes_mut()))
    }

    /// Changes the element type.
    ///
    /// The element count is preserved. When the new type has a different
    /// size or alignment the buffer is reallocated and zero-filled.
    pub fn set_dtype(&mut self, dtype: DType) -> Result<(), TensorError> {
        if dtype != self.dtype {
            let numel = self.numel();
            if dtype.size_of() != self.dtype.size_of()
                || dtype.align_of() != self.storage.alignment()
            {
                self.storage = TensorStorage::zeroed(numel * dtype.size_of(), dtype.align_of())?;
            }
            self.dtype = dtype;
        }
        Ok(())
    }

    /// Resizes the tensor to `shape`.
    ///
    /// When the byte size changes the buffer is reallocated and zero-filled;
    /// otherwise the contents are kept and reinterpreted under the new shape.
    pub fn resize(&mut self, shape: &[usize]) -> Result<(), TensorError> {
        let bytes = shape.iter().product::<usize>() * self.dtype.size_of();
        if bytes != self.storage.len() {
            self.storage = TensorStorage::zeroed(bytes, self.dtype.align_of())?;
        }
        self.shape = shape.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_from_vec() -> Result<(), TensorError> {
        let t = Tensor::from_vec(&[2, 2], vec![1i32, 2, 3, 4])?;
        assert_eq!(t.dtype(), DType::I32);
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.as_slice::<i32>()?, &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_tensor_from_vec_bad_shape() {
        let res = Tensor::from_vec(&[2, 3], vec![0u8; 5]);
        assert!(matches!(
            res,
            Err(TensorError::InvalidShape {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_tensor_dim() -> Result<(), TensorError> {
        let t = Tensor::zeros(&[3, 4, 2], DType::F32)?;
        assert_eq!(t.dim(0)?, 3);
        assert_eq!(t.dim(2)?, 2);
        assert!(matches!(
            t.dim(3),
            Err(TensorError::AxisOutOfBounds { axis: 3, rank: 3 })
        ));
        Ok(())
    }

    #[test]
    fn test_tensor_typed_access_checks_dtype() -> Result<(), TensorError> {
        let t = Tensor::zeros(&[4], DType::F32)?;
        assert!(t.as_slice::<f32>().is_ok());
        assert!(matches!(
            t.as_slice::<u8>(),
            Err(TensorError::DTypeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_tensor_resize_reallocates() -> Result<(), TensorError> {
        let mut t = Tensor::empty(DType::U8);
        assert_eq!(t.numel(), 0);
        t.resize(&[2, 3, 4])?;
        assert_eq!(t.numel(), 24);
        assert_eq!(t.as_bytes().len(), 24);
        assert!(t.as_bytes().iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_tensor_resize_same_size_keeps_data() -> Result<(), TensorError> {
        let mut t = Tensor::from_vec(&[2, 2], vec![1u8, 2, 3, 4])?;
        t.resize(&[4])?;
        assert_eq!(t.as_slice::<u8>()?, &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_tensor_set_dtype() -> Result<(), TensorError> {
        let mut t = Tensor::from_vec(&[4], vec![1u8, 2, 3, 4])?;
        t.set_dtype(DType::F32)?;
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.as_bytes().len(), 16);
        // same element size keeps the buffer
        let mut t = Tensor::from_vec(&[2], vec![1i32, 2])?;
        t.set_dtype(DType::F32)?;
        assert_eq!(t.as_bytes().len(), 8);
        Ok(())
    }
}
