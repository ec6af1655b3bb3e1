//! Pixel to planar coordinate transforms

mod affine;
mod builder;

pub use affine::AffineTransform;
pub use builder::{AffineTransformBuilder, Placement};
