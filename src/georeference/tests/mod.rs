//! Tests for raster writing

mod test_utils;
mod georeferencer_tests;
