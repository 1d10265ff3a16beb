use batchwarp_tensor::Element;

use crate::backend::Extent;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `src` - The source plane data.
/// * `extent` - The source extent in pixels.
/// * `row_step` - The source row stride in elements.
/// * `channels` - The channels per pixel within the plane.
/// * `u` - The x coordinate of the pixel to sample.
/// * `v` - The y coordinate of the pixel to sample.
/// * `k` - The channel to sample.
///
/// # Returns
///
/// The sampled pixel value, widened to f64.
pub(crate) fn nearest_sample<T: Element>(
    src: &[T],
    extent: Extent,
    row_step: usize,
    channels: usize,
    u: f64,
    v: f64,
    k: usize,
) -> f64 {
    let iu = (u.round() as usize).min(extent.width - 1);
    let iv = (v.round() as usize).min(extent.height - 1);

    src[iv * row_step + iu * channels + k].to_f64()
}
