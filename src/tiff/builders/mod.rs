//! GeoTiffBuilder strategy modules
//!
//! Tag strategies and the file writer, organized by functionality category.

pub mod basic_tags;
pub mod geo_tags;
pub mod writer;
