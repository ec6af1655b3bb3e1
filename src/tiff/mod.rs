//! GeoTIFF writing module
//!
//! This module provides structures and functions for writing
//! georeferenced TIFF and BigTIFF files, and for reading their
//! directory back.

pub mod builder;
mod builders;
pub mod compression;
pub(crate) mod constants;
pub mod ifd;
pub mod inspect;
#[cfg(test)]
mod tests;

pub use builder::{GeoTiffBuilder, RasterLayout};
pub use compression::OutputCompression;
pub use constants::tags;
pub use ifd::{IFDEntry, IFD};
pub use inspect::{TagDirectory, TagValues};
