use batchwarp_tensor::Element;

use crate::backend::Extent;

// Cubic convolution parameter; the value classic bicubic resamplers use.
const A: f64 = -0.75;

fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        (((t - 5.0) * t + 8.0) * t - 4.0) * A
    } else {
        0.0
    }
}

/// Kernel for bicubic interpolation
///
/// Cubic convolution over the 4x4 neighborhood of (u, v); neighbors beyond
/// the border are clamped to the edge. Exact at integer coordinates.
pub(crate) fn bicubic_sample<T: Element>(
    src: &[T],
    extent: Extent,
    row_step: usize,
    channels: usize,
    u: f64,
    v: f64,
    k: usize,
) -> f64 {
    let iu = u.floor();
    let iv = v.floor();
    let frac_u = u - iu;
    let frac_v = v - iv;

    let mut acc = 0.0;
    for n in -1i64..=2 {
        let wy = cubic_weight(n as f64 - frac_v);
        let y = (iv as i64 + n).clamp(0, extent.height as i64 - 1) as usize;
        for m in -1i64..=2 {
            let wx = cubic_weight(m as f64 - frac_u);
            let x = (iu as i64 + m).clamp(0, extent.width as i64 - 1) as usize;
            acc += wx * wy * src[y * row_step + x * channels + k].to_f64();
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_vanish_at_integer_offsets() {
        assert_eq!(cubic_weight(0.0), 1.0);
        assert_eq!(cubic_weight(1.0), 0.0);
        assert_eq!(cubic_weight(-1.0), 0.0);
        assert_eq!(cubic_weight(2.0), 0.0);
        assert_eq!(cubic_weight(2.5), 0.0);
    }
}
