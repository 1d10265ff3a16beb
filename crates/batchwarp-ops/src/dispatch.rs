//! Kernel selection per element type, layout and channel count.
//!
//! The dispatcher turns an image description into concrete backend entry
//! points before any pixel work happens. Everything it cannot resolve is an
//! unsupported configuration, reported to the caller rather than discovered
//! mid-batch inside a kernel.

use batchwarp_tensor::DType;

use crate::backend::{KernelRegistry, WarpKernelFn};
use crate::batching::plane_groups;
use crate::error::WarpError;
use crate::layout::ImageLayout;

/// Per-image channel ceiling shared by every backend.
pub const MAX_CHANNELS: usize = 512;

/// Resolves the single entry point for an interleaved image.
///
/// Interleaved kernels exist for 1, 3 and 4 channels; 2 is explicitly not
/// part of the menu, and no image may reach [`MAX_CHANNELS`].
pub fn select_interleaved(
    registry: &KernelRegistry,
    dtype: DType,
    channels: usize,
) -> Result<WarpKernelFn, WarpError> {
    let layout = ImageLayout::ChannelLast;
    if channels >= MAX_CHANNELS || !matches!(channels, 1 | 3 | 4) {
        return Err(WarpError::unsupported(dtype, layout, channels));
    }
    registry
        .lookup(dtype, layout, channels)
        .ok_or_else(|| WarpError::unsupported(dtype, layout, channels))
}

/// Resolves the execution plan for a planar image: one (entry point, group
/// size) pair per channel group of the greedy decomposition.
///
/// The whole plan is resolved up front so a missing entry point (a backend
/// without, say, f64 planar kernels) fails the image before its first call.
pub fn select_planar(
    registry: &KernelRegistry,
    dtype: DType,
    channels: usize,
) -> Result<Vec<(WarpKernelFn, usize)>, WarpError> {
    let layout = ImageLayout::ChannelFirst;
    if channels >= MAX_CHANNELS {
        return Err(WarpError::unsupported(dtype, layout, channels));
    }
    let groups = plane_groups(channels);
    log::trace!("planar plan for {channels} channels: {groups:?}");
    groups
        .into_iter()
        .map(|group| {
            registry
                .lookup(dtype, layout, group)
                .map(|kernel| (kernel, group))
                .ok_or_else(|| WarpError::unsupported(dtype, layout, channels))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::cpu;
    use crate::error::ErrorKind;

    #[test]
    fn interleaved_menu_resolves_for_every_dtype() {
        for dtype in [DType::U8, DType::I16, DType::I32, DType::F32, DType::F64] {
            for channels in [1, 3, 4] {
                assert!(select_interleaved(cpu::registry(), dtype, channels).is_ok());
            }
        }
    }

    #[test]
    fn interleaved_two_channels_is_unsupported() {
        let err = select_interleaved(cpu::registry(), DType::U8, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
    }

    #[test]
    fn interleaved_channel_ceiling() {
        for channels in [512, 600] {
            let err = select_interleaved(cpu::registry(), DType::U8, channels).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
        }
    }

    #[test]
    fn planar_plan_matches_decomposition() {
        let plan = select_planar(cpu::registry(), DType::F32, 7).unwrap();
        let sizes: Vec<usize> = plan.iter().map(|(_, g)| *g).collect();
        assert_eq!(sizes, vec![4, 3]);
    }

    #[test]
    fn planar_channel_ceiling() {
        let err = select_planar(cpu::registry(), DType::F32, 512).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
    }

    #[test]
    fn planar_missing_entry_points_are_unsupported() {
        // a registry without f64 planar kernels, as an accelerator backend
        // might ship
        let registry = KernelRegistry::new();
        let err = select_planar(&registry, DType::F64, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
    }
}
