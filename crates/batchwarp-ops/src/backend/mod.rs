//! The backend primitive interface.
//!
//! A backend exposes warp kernels through a [`KernelRegistry`]: one entry
//! point per (element type, layout, channel count) it can serve. The executor
//! treats every entry point as an opaque, assumed-correct primitive that
//! takes raw plane bytes, strides, regions of interest and a coefficient
//! matrix, and answers with an integer status.

use std::collections::HashMap;

use batchwarp_tensor::DType;

use crate::layout::ImageLayout;

pub mod cpu;

/// Status returned by a kernel on success.
pub const STATUS_SUCCESS: i32 = 0;

/// Status for a source or destination extent the kernel cannot serve.
pub const STATUS_BAD_EXTENT: i32 = -1;

/// Status for an interpolation constant outside the kernel's menu.
pub const STATUS_UNSUPPORTED_MODE: i32 = -2;

/// Native constant for nearest-neighbor interpolation.
pub const INTERP_NEAREST: i32 = 1;

/// Native constant for bilinear interpolation.
pub const INTERP_LINEAR: i32 = 2;

/// Native constant for bicubic interpolation.
pub const INTERP_CUBIC: i32 = 4;

/// Width and height of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

/// Rectangular region of interest within a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    /// Left edge in pixels.
    pub x: usize,
    /// Top edge in pixels.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Roi {
    /// The full-extent region of a buffer.
    pub const fn full(extent: Extent) -> Self {
        Self {
            x: 0,
            y: 0,
            width: extent.width,
            height: extent.height,
        }
    }
}

/// One primitive invocation: everything a kernel needs to warp one
/// interleaved image or one planar channel group.
///
/// `src_planes` and `dst_planes` hold one entry per plane; interleaved data
/// travels as a single plane with `channels > 1`. Row strides are in bytes,
/// matching the native interface the kernels were shaped after.
pub struct KernelCall<'a, 'b> {
    /// Source plane byte slices.
    pub src_planes: &'a [&'a [u8]],
    /// Source extent in pixels.
    pub src_size: Extent,
    /// Source row stride in bytes.
    pub src_step: usize,
    /// Source region of interest.
    pub src_roi: Roi,
    /// Destination plane byte slices.
    pub dst_planes: &'a mut [&'b mut [u8]],
    /// Destination row stride in bytes.
    pub dst_step: usize,
    /// Destination region of interest.
    pub dst_roi: Roi,
    /// 2x3 destination-to-source coefficient matrix.
    pub coeffs: [[f64; 3]; 2],
    /// Native interpolation constant.
    pub interp: i32,
    /// Channels per pixel within a plane: the interleaved channel count, or
    /// 1 for planar planes.
    pub channels: usize,
}

/// A backend warp entry point.
///
/// Returns [`STATUS_SUCCESS`] or a backend-specific failure code; the
/// executor surfaces any non-zero status verbatim.
pub type WarpKernelFn = fn(&mut KernelCall<'_, '_>) -> i32;

/// Key identifying one kernel entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KernelKey {
    dtype: DType,
    layout: ImageLayout,
    channels: usize,
}

/// Registry of kernel entry points keyed by (dtype, layout, channel count).
///
/// A backend builds its registry once and the dispatcher queries it
/// immutably afterwards. A missing entry is an unsupported configuration,
/// never a crash.
#[derive(Default)]
pub struct KernelRegistry {
    entries: HashMap<KernelKey, WarpKernelFn>,
}

impl KernelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers an entry point, replacing any previous one for the key.
    pub fn register(
        &mut self,
        dtype: DType,
        layout: ImageLayout,
        channels: usize,
        kernel: WarpKernelFn,
    ) {
        self.entries.insert(
            KernelKey {
                dtype,
                layout,
                channels,
            },
            kernel,
        );
    }

    /// Looks up the entry point for a (dtype, layout, channel count).
    pub fn lookup(
        &self,
        dtype: DType,
        layout: ImageLayout,
        channels: usize,
    ) -> Option<WarpKernelFn> {
        self.entries
            .get(&KernelKey {
                dtype,
                layout,
                channels,
            })
            .copied()
    }

    /// Number of registered entry points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry points are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Row stride in bytes for `width` pixels of `channels` interleaved channels.
///
/// The one stride helper shared by the interleaved and planar paths; planar
/// rows pass `channels = 1`.
pub fn row_stride_bytes(dtype: DType, channels: usize, width: usize) -> usize {
    dtype.size_of() * channels * width
}
