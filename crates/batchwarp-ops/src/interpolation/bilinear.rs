use batchwarp_tensor::Element;

use crate::backend::Extent;

/// Kernel for bilinear interpolation
///
/// Samples the four neighbors of (u, v) and blends them by the fractional
/// offsets; neighbors beyond the border are clamped to the edge.
pub(crate) fn bilinear_sample<T: Element>(
    src: &[T],
    extent: Extent,
    row_step: usize,
    channels: usize,
    u: f64,
    v: f64,
    k: usize,
) -> f64 {
    let iu0 = (u.trunc() as usize).min(extent.width - 1);
    let iv0 = (v.trunc() as usize).min(extent.height - 1);
    let iu1 = (iu0 + 1).min(extent.width - 1);
    let iv1 = (iv0 + 1).min(extent.height - 1);

    let frac_u = u.fract();
    let frac_v = v.fract();
    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let p00 = src[iv0 * row_step + iu0 * channels + k].to_f64();
    let p01 = src[iv0 * row_step + iu1 * channels + k].to_f64();
    let p10 = src[iv1 * row_step + iu0 * channels + k].to_f64();
    let p11 = src[iv1 * row_step + iu1 * channels + k].to_f64();

    p00 * w00 + p01 * w01 + p10 * w10 + p11 * w11
}
