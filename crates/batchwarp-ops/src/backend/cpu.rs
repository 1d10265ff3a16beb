//! CPU reference backend.
//!
//! One generic kernel monomorphized per element type, registered for every
//! (layout, channel count) in the menu. The kernel warps one interleaved
//! image or one planar channel group per call and parallelizes over rows of
//! the destination region internally; callers see a strictly synchronous
//! entry point.

use std::sync::OnceLock;

use batchwarp_tensor::{cast_slice, cast_slice_mut, Element};
use rayon::prelude::*;

use crate::interpolation::{bicubic_sample, bilinear_sample, nearest_sample};
use crate::layout::ImageLayout;

use super::{
    Extent, KernelCall, KernelRegistry, Roi, INTERP_CUBIC, INTERP_LINEAR, INTERP_NEAREST,
    STATUS_BAD_EXTENT, STATUS_SUCCESS, STATUS_UNSUPPORTED_MODE,
};

type SampleFn<T> = fn(&[T], Extent, usize, usize, f64, f64, usize) -> f64;

/// Returns the process-wide CPU kernel registry, built on first use.
pub fn registry() -> &'static KernelRegistry {
    static REGISTRY: OnceLock<KernelRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();
    register_element::<u8>(&mut registry);
    register_element::<i16>(&mut registry);
    register_element::<i32>(&mut registry);
    register_element::<f32>(&mut registry);
    register_element::<f64>(&mut registry);
    registry
}

fn register_element<T: Element>(registry: &mut KernelRegistry) {
    for channels in [1, 3, 4] {
        registry.register(
            T::DTYPE,
            ImageLayout::ChannelLast,
            channels,
            warp_kernel::<T>,
        );
        registry.register(
            T::DTYPE,
            ImageLayout::ChannelFirst,
            channels,
            warp_kernel::<T>,
        );
    }
}

/// Reference warp entry point, monomorphized per element type.
fn warp_kernel<T: Element>(call: &mut KernelCall<'_, '_>) -> i32 {
    // resolve the sampler once per call, not per pixel
    let sample: SampleFn<T> = match call.interp {
        INTERP_NEAREST => nearest_sample::<T>,
        INTERP_LINEAR => bilinear_sample::<T>,
        INTERP_CUBIC => bicubic_sample::<T>,
        _ => return STATUS_UNSUPPORTED_MODE,
    };

    if call.src_size.width == 0 || call.src_size.height == 0 {
        return STATUS_BAD_EXTENT;
    }
    if call.src_planes.len() != call.dst_planes.len() {
        return STATUS_BAD_EXTENT;
    }
    let elem = std::mem::size_of::<T>();
    if call.src_step % elem != 0 || call.dst_step % elem != 0 {
        return STATUS_BAD_EXTENT;
    }

    let src_planes = call.src_planes;
    let src_size = call.src_size;
    let src_step = call.src_step / elem;
    let src_roi = call.src_roi;
    let dst_step = call.dst_step / elem;
    let dst_roi = call.dst_roi;
    let coeffs = call.coeffs;
    let channels = call.channels;

    for (dst_plane, src_plane) in call.dst_planes.iter_mut().zip(src_planes.iter()) {
        let src: &[T] = cast_slice(src_plane);
        let dst: &mut [T] = cast_slice_mut(&mut **dst_plane);
        warp_plane(
            src, src_size, src_step, src_roi, dst, dst_step, dst_roi, channels, coeffs, sample,
        );
    }
    STATUS_SUCCESS
}

/// Warps one plane: rows of the destination region in parallel, destination
/// pixels mapped through the coefficient matrix into the source.
///
/// Destination pixels whose source position falls outside the source region
/// are left untouched.
#[allow(clippy::too_many_arguments)]
fn warp_plane<T: Element>(
    src: &[T],
    src_size: Extent,
    src_step: usize,
    src_roi: Roi,
    dst: &mut [T],
    dst_step: usize,
    dst_roi: Roi,
    channels: usize,
    coeffs: [[f64; 3]; 2],
    sample: SampleFn<T>,
) {
    let [[a, b, c], [d, e, f]] = coeffs;
    let u_min = src_roi.x as f64;
    let v_min = src_roi.y as f64;
    let u_max = (src_roi.x + src_roi.width) as f64;
    let v_max = (src_roi.y + src_roi.height) as f64;

    dst.par_chunks_mut(dst_step)
        .enumerate()
        .skip(dst_roi.y)
        .take(dst_roi.height)
        .for_each(|(y, row)| {
            for x in dst_roi.x..dst_roi.x + dst_roi.width {
                let u = a * x as f64 + b * y as f64 + c;
                let v = d * x as f64 + e * y as f64 + f;
                if u >= u_min && u < u_max && v >= v_min && v < v_max {
                    for k in 0..channels {
                        let value = sample(src, src_size, src_step, channels, u, v, k);
                        row[x * channels + k] = T::from_f64(value);
                    }
                }
            }
        });
}
