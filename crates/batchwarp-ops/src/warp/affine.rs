use std::f32::consts::PI;

use batchwarp_tensor::{DType, Tensor};

use crate::backend::{
    row_stride_bytes, Extent, KernelCall, KernelRegistry, Roi, WarpKernelFn, STATUS_SUCCESS,
};
use crate::dispatch;
use crate::error::WarpError;
use crate::interpolation::{native_interp, InterpolationMode};
use crate::layout::{ImageLayout, ImageSize};

/// Inverts a 2x3 affine transformation matrix.
///
/// Useful for turning a source-to-destination mapping into the
/// destination-to-source form [`WarpAffineBatch`] consumes.
///
/// # Arguments
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// # Returns
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // a singular matrix maps everything to zero, as OpenCV does
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Batched affine warp over a fixed-menu backend.
///
/// Each image in the batch is warped by its own 2x3 matrix into an output of
/// one configured size. Destination pixel (x, y) samples source pixel
/// (a·x + b·y + c, d·x + e·y + f); samples falling outside the source keep
/// the output's zero fill.
///
/// Images are processed strictly in batch order and each backend call
/// completes before the next one is issued; the first failure aborts the
/// rest of the batch.
///
/// # Examples
///
/// ```
/// use batchwarp_ops::backend::cpu;
/// use batchwarp_ops::layout::ImageSize;
/// use batchwarp_ops::warp::WarpAffineBatch;
/// use batchwarp_tensor::{DType, Tensor};
///
/// let op = WarpAffineBatch::new(ImageSize {
///     width: 4,
///     height: 4,
/// })
/// .unwrap();
///
/// let images = [Tensor::from_vec(&[4, 4, 1], (0u8..16).collect()).unwrap()];
/// let transforms = Tensor::from_vec(&[6], vec![1.0f32, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
/// let mut outputs = [Tensor::empty(DType::U8)];
///
/// op.apply(cpu::registry(), &images, &transforms, &mut outputs)
///     .unwrap();
///
/// assert_eq!(outputs[0].shape(), &[4, 4, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct WarpAffineBatch {
    output_size: ImageSize,
    layout: ImageLayout,
    interpolation: InterpolationMode,
}

impl WarpAffineBatch {
    /// Creates an operator producing images of `output_size`.
    ///
    /// Defaults to the interleaved [`ImageLayout::ChannelLast`] layout and
    /// [`InterpolationMode::Nearest`].
    ///
    /// # Errors
    ///
    /// Fails when either output extent is zero.
    pub fn new(output_size: ImageSize) -> Result<Self, WarpError> {
        if output_size.width == 0 || output_size.height == 0 {
            return Err(WarpError::InvalidOutputSize {
                width: output_size.width,
                height: output_size.height,
            });
        }
        Ok(Self {
            output_size,
            layout: ImageLayout::ChannelLast,
            interpolation: InterpolationMode::Nearest,
        })
    }

    /// Sets the image layout.
    pub fn layout(mut self, layout: ImageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the interpolation mode.
    pub fn interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Warps every image in the batch into `outputs`.
    ///
    /// `images` must be rank-3 tensors of one shared element type;
    /// `transforms` must be a float32 tensor of flat length 6 x batch size;
    /// `outputs` must hold one tensor per image. Each output is retyped and
    /// resized in place before the first backend call that touches it.
    ///
    /// # Errors
    ///
    /// [`WarpError`] with kind `InvalidArgument` for malformed inputs,
    /// `UnsupportedConfiguration` when the registry has no entry point for
    /// an image, and `BackendFailure` for the first non-zero kernel status.
    /// On failure the remaining images are not processed and their outputs
    /// are left untouched.
    pub fn apply(
        &self,
        registry: &KernelRegistry,
        images: &[Tensor],
        transforms: &Tensor,
        outputs: &mut [Tensor],
    ) -> Result<(), WarpError> {
        if outputs.len() != images.len() {
            return Err(WarpError::BatchLengthMismatch {
                inputs: images.len(),
                outputs: outputs.len(),
            });
        }
        let coeffs_all = transform_coeffs(transforms, images.len())?;
        let batch_dtype = images.first().map(Tensor::dtype);
        let interp = native_interp(self.interpolation);

        for (index, (src, dst)) in images.iter().zip(outputs.iter_mut()).enumerate() {
            let dtype = src.dtype();
            if let Some(expected) = batch_dtype {
                if dtype != expected {
                    return Err(WarpError::MixedBatchDType {
                        index,
                        expected,
                        actual: dtype,
                    });
                }
            }
            if src.rank() != 3 {
                return Err(WarpError::InvalidRank(src.rank()));
            }
            let (height, width, channels) = self.layout.dims(src.shape());
            if width == 0 || height == 0 {
                return Err(WarpError::EmptyImage {
                    index,
                    width,
                    height,
                });
            }
            let coeffs = widen_coeffs(&coeffs_all[6 * index..6 * index + 6]);
            log::debug!(
                "warp image {index}: {width}x{height}x{channels} {dtype:?} -> {}x{}",
                self.output_size.width,
                self.output_size.height
            );

            match self.layout {
                ImageLayout::ChannelLast => {
                    // one call per image; resolve it before touching the output
                    let kernel = dispatch::select_interleaved(registry, dtype, channels)?;
                    dst.set_dtype(dtype)?;
                    dst.resize(&self.layout.output_shape(self.output_size, channels))?;
                    self.run_interleaved(kernel, src, dst, height, width, channels, coeffs, interp)?;
                }
                ImageLayout::ChannelFirst => {
                    // one call per channel group; resolve the whole plan first
                    let plan = dispatch::select_planar(registry, dtype, channels)?;
                    dst.set_dtype(dtype)?;
                    dst.resize(&self.layout.output_shape(self.output_size, channels))?;
                    self.run_planar(&plan, src, dst, height, width, coeffs, interp)?;
                }
            }
        }
        Ok(())
    }

    /// Issues the single interleaved call for one image.
    #[allow(clippy::too_many_arguments)]
    fn run_interleaved(
        &self,
        kernel: WarpKernelFn,
        src: &Tensor,
        dst: &mut Tensor,
        height: usize,
        width: usize,
        channels: usize,
        coeffs: [[f64; 3]; 2],
        interp: i32,
    ) -> Result<(), WarpError> {
        let dtype = src.dtype();
        let src_size = Extent { width, height };
        let dst_roi = Roi {
            x: 0,
            y: 0,
            width: self.output_size.width,
            height: self.output_size.height,
        };
        let src_planes = [src.as_bytes()];
        let mut dst_planes = [dst.as_bytes_mut()];

        let status = kernel(&mut KernelCall {
            src_planes: &src_planes,
            src_size,
            src_step: row_stride_bytes(dtype, channels, width),
            src_roi: Roi::full(src_size),
            dst_planes: &mut dst_planes,
            dst_step: row_stride_bytes(dtype, channels, self.output_size.width),
            dst_roi,
            coeffs,
            interp,
            channels,
        });
        if status != STATUS_SUCCESS {
            return Err(WarpError::BackendFailure(status));
        }
        Ok(())
    }

    /// Issues one call per channel group for one planar image, advancing the
    /// source and destination plane offsets between calls.
    #[allow(clippy::too_many_arguments)]
    fn run_planar(
        &self,
        plan: &[(WarpKernelFn, usize)],
        src: &Tensor,
        dst: &mut Tensor,
        height: usize,
        width: usize,
        coeffs: [[f64; 3]; 2],
        interp: i32,
    ) -> Result<(), WarpError> {
        let dtype = src.dtype();
        let src_plane_bytes = height * width * dtype.size_of();
        let dst_plane_bytes = self.output_size.height * self.output_size.width * dtype.size_of();
        let src_size = Extent { width, height };
        let dst_roi = Roi {
            x: 0,
            y: 0,
            width: self.output_size.width,
            height: self.output_size.height,
        };

        let src_planes: Vec<&[u8]> = src.as_bytes().chunks_exact(src_plane_bytes).collect();
        let mut dst_planes: Vec<&mut [u8]> =
            dst.as_bytes_mut().chunks_exact_mut(dst_plane_bytes).collect();

        let mut offset = 0;
        for &(kernel, group) in plan {
            let status = kernel(&mut KernelCall {
                src_planes: &src_planes[offset..offset + group],
                src_size,
                src_step: row_stride_bytes(dtype, 1, width),
                src_roi: Roi::full(src_size),
                dst_planes: &mut dst_planes[offset..offset + group],
                dst_step: row_stride_bytes(dtype, 1, self.output_size.width),
                dst_roi,
                coeffs,
                interp,
                channels: 1,
            });
            if status != STATUS_SUCCESS {
                return Err(WarpError::BackendFailure(status));
            }
            offset += group;
        }
        Ok(())
    }
}

/// Validates the transform tensor and returns its coefficients.
fn transform_coeffs(transforms: &Tensor, batch: usize) -> Result<&[f32], WarpError> {
    if transforms.dtype() != DType::F32 {
        return Err(WarpError::InvalidTransformType(transforms.dtype()));
    }
    let data = transforms.as_slice::<f32>()?;
    if data.len() != 6 * batch {
        return Err(WarpError::InvalidTransformLength {
            actual: data.len(),
            batch,
        });
    }
    Ok(data)
}

/// Widens one image's six coefficients into the backend's matrix form.
fn widen_coeffs(m: &[f32]) -> [[f64; 3]; 2] {
    [
        [f64::from(m[0]), f64::from(m[1]), f64::from(m[2])],
        [f64::from(m[3]), f64::from(m[4]), f64::from(m[5])],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_output() {
        let err = WarpAffineBatch::new(ImageSize {
            width: 0,
            height: 4,
        })
        .unwrap_err();
        assert!(matches!(err, WarpError::InvalidOutputSize { .. }));
        assert!(WarpAffineBatch::new(ImageSize {
            width: 4,
            height: 0,
        })
        .is_err());
    }

    #[test]
    fn invert_affine_identity() {
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        assert_eq!(invert_affine_transform(&m), m);
    }

    #[test]
    fn invert_affine_scale() {
        let m = [2.0, 0.0, 0.0, 0.0, 2.0, 0.0];
        assert_eq!(
            invert_affine_transform(&m),
            [0.5, 0.0, -0.0, 0.0, 0.5, -0.0]
        );
    }

    #[test]
    fn rotation_matrix_90_degrees() {
        let m = get_rotation_matrix2d((0.0, 0.0), 90.0, 1.0);
        assert!((m[0]).abs() < 1e-6);
        assert!((m[1] - 1.0).abs() < 1e-6);
        assert!((m[3] + 1.0).abs() < 1e-6);
        assert!((m[4]).abs() < 1e-6);
    }

    #[test]
    fn widen_coeffs_preserves_order() {
        let widened = widen_coeffs(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(widened, [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }
}
