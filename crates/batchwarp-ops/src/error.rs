use thiserror::Error;

use batchwarp_tensor::{DType, TensorError};

use crate::layout::ImageLayout;

/// The family a [`WarpError`] belongs to.
///
/// Callers that only care about the class of failure can match on this
/// instead of the full variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A malformed argument: shape, rank, length or type of an input.
    InvalidArgument,
    /// A (dtype, layout, channels) combination no backend entry point serves.
    UnsupportedConfiguration,
    /// A non-zero status reported by a backend kernel.
    BackendFailure,
}

/// An error type for batched warp operations.
#[derive(Debug, Error, PartialEq)]
pub enum WarpError {
    /// The requested output extent is empty.
    #[error("output size must be non-zero, got {width}x{height}")]
    InvalidOutputSize {
        /// Requested output width.
        width: usize,
        /// Requested output height.
        height: usize,
    },

    /// An image in the batch is not rank-3.
    #[error("expected a rank-3 image tensor, got rank {0}")]
    InvalidRank(usize),

    /// An image in the batch has an empty extent.
    #[error("image {index} has empty extent {width}x{height}")]
    EmptyImage {
        /// Index of the offending image in the batch.
        index: usize,
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },

    /// The transform tensor does not hold f32 coefficients.
    #[error("transform matrices must be float32, got {0:?}")]
    InvalidTransformType(DType),

    /// The transform tensor length is not 6 x batch size.
    #[error("transform batch holds {actual} values, expected 6 x {batch}")]
    InvalidTransformLength {
        /// Number of values in the transform tensor.
        actual: usize,
        /// Number of images in the batch.
        batch: usize,
    },

    /// The output batch length does not match the input batch length.
    #[error("output batch holds {outputs} tensors for {inputs} images")]
    BatchLengthMismatch {
        /// Number of input images.
        inputs: usize,
        /// Number of output tensors.
        outputs: usize,
    },

    /// The batch mixes element types.
    #[error("image {index} has dtype {actual:?}, batch dtype is {expected:?}")]
    MixedBatchDType {
        /// Index of the offending image in the batch.
        index: usize,
        /// Element type of the first image.
        expected: DType,
        /// Element type of the offending image.
        actual: DType,
    },

    /// No backend entry point serves this combination.
    #[error("unsupported configuration: {channels} channel(s), {layout:?}, {dtype:?}")]
    UnsupportedConfiguration {
        /// Element type of the image.
        dtype: DType,
        /// Layout of the image.
        layout: ImageLayout,
        /// Channel count of the image.
        channels: usize,
    },

    /// A backend kernel reported a failure.
    #[error("backend kernel failed with status {0}")]
    BackendFailure(i32),

    /// The tensor container rejected an operation.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}

impl WarpError {
    pub(crate) fn unsupported(dtype: DType, layout: ImageLayout, channels: usize) -> Self {
        Self::UnsupportedConfiguration {
            dtype,
            layout,
            channels,
        }
    }

    /// Returns the family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedConfiguration { .. } => ErrorKind::UnsupportedConfiguration,
            Self::BackendFailure(_) => ErrorKind::BackendFailure,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        let err = WarpError::unsupported(DType::F64, ImageLayout::ChannelFirst, 3);
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
        assert_eq!(WarpError::BackendFailure(-3).kind(), ErrorKind::BackendFailure);
        assert_eq!(WarpError::InvalidRank(2).kind(), ErrorKind::InvalidArgument);
    }
}
