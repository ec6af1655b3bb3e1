//! Per-image descriptors
//!
//! An [`ImageRecord`] joins a matched pair with its parsed metadata and the
//! image's pixel dimensions. Deriving the transform turns it into an
//! [`ImageDescriptor`], the row the georeferencer consumes.

mod builder;
mod types;

pub use builder::ImageDescriptorBuilder;
pub use types::{ImageDescriptor, ImageRecord, PixelDimensions};
