//! Batched geometric warp operators.

mod affine;

pub use affine::{get_rotation_matrix2d, invert_affine_transform, WarpAffineBatch};
