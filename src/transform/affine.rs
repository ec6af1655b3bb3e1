//! Affine transform between pixel and planar coordinates

use std::fmt;

/// Six-parameter affine, in GDAL geotransform order
///
/// Maps pixel (col, row) to planar (x, y):
/// `x = origin_x + col * scale_x + row * skew_x`,
/// `y = origin_y + col * skew_y + row * scale_y`.
/// `scale_y` is negative for top-left origin rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub origin_x: f64,
    pub scale_x: f64,
    pub skew_x: f64,
    pub origin_y: f64,
    pub skew_y: f64,
    pub scale_y: f64,
}

impl AffineTransform {
    pub fn new(origin_x: f64, scale_x: f64, skew_x: f64, origin_y: f64, skew_y: f64, scale_y: f64) -> Self {
        AffineTransform { origin_x, scale_x, skew_x, origin_y, skew_y, scale_y }
    }

    /// The six floats handed to the raster writer
    pub fn to_geo_transform(&self) -> [f64; 6] {
        [self.origin_x, self.scale_x, self.skew_x, self.origin_y, self.skew_y, self.scale_y]
    }

    pub fn from_geo_transform(gt: [f64; 6]) -> Self {
        Self::new(gt[0], gt[1], gt[2], gt[3], gt[4], gt[5])
    }

    /// Planar coordinates of a pixel position
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.scale_x + row * self.skew_x,
            self.origin_y + col * self.skew_y + row * self.scale_y,
        )
    }

    /// Whether either skew term is non-zero
    pub fn has_skew(&self) -> bool {
        self.skew_x != 0.0 || self.skew_y != 0.0
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            self.origin_x, self.scale_x, self.skew_x, self.origin_y, self.skew_y, self.scale_y
        )
    }
}
