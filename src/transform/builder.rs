//! Deriving the affine transform of a record
//!
//! The rotation from the metadata goes into both skew slots unchanged. This
//! matches what the scanning software's files have always been read as.

use log::debug;

use crate::descriptor::{ImageDescriptor, ImageRecord, PixelDimensions};
use crate::errors::{ReferenceError, ReferenceResult};
use crate::metadata::MetadataRecord;
use super::affine::AffineTransform;

/// Resolution and upper-left corner of a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub resolution_x: f64,
    pub resolution_y: f64,
    pub upleftx: f64,
    pub uplefty: f64,
}

impl Placement {
    /// Read the placement back out of a transform
    pub fn from_transform(transform: &AffineTransform) -> Self {
        Placement {
            resolution_x: transform.scale_x,
            resolution_y: -transform.scale_y,
            upleftx: transform.origin_x,
            uplefty: transform.origin_y,
        }
    }

    /// Physical center and size for an image of `dimensions`
    ///
    /// Returns `(center_x, center_y, size_x, size_y)`.
    pub fn center_and_size(&self, dimensions: &PixelDimensions) -> (f64, f64, f64, f64) {
        let size_x = self.resolution_x * dimensions.source_size_x as f64;
        let size_y = self.resolution_y * dimensions.source_size_y as f64;
        (self.upleftx + size_x / 2.0, self.uplefty + size_y / 2.0, size_x, size_y)
    }
}

/// Derives transforms from physical placement and pixel size
pub struct AffineTransformBuilder;

impl AffineTransformBuilder {
    /// Resolution and upper-left corner for metadata and pixel size
    pub fn placement(metadata: &MetadataRecord, dimensions: &PixelDimensions) -> ReferenceResult<Placement> {
        if dimensions.source_size_x == 0 || dimensions.source_size_y == 0 {
            return Err(ReferenceError::ArithmeticError(format!(
                "cannot derive resolution for an image of {}", dimensions)));
        }

        Ok(Placement {
            resolution_x: metadata.size_x / dimensions.source_size_x as f64,
            resolution_y: metadata.size_y / dimensions.source_size_y as f64,
            upleftx: metadata.center_x - metadata.size_x / 2.0,
            uplefty: metadata.center_y - metadata.size_y / 2.0,
        })
    }

    /// Transform for metadata and pixel size
    pub fn transform(metadata: &MetadataRecord, dimensions: &PixelDimensions) -> ReferenceResult<AffineTransform> {
        let placement = Self::placement(metadata, dimensions)?;
        Ok(Self::from_placement(&placement, metadata.rotation))
    }

    fn from_placement(placement: &Placement, rotation: f64) -> AffineTransform {
        AffineTransform::new(
            placement.upleftx,
            placement.resolution_x,
            rotation,
            placement.uplefty,
            rotation,
            -placement.resolution_y,
        )
    }

    /// Complete a record into a descriptor
    pub fn derive(record: ImageRecord) -> ReferenceResult<ImageDescriptor> {
        let placement = Self::placement(&record.metadata, &record.dimensions)?;
        let transform = Self::from_placement(&placement, record.metadata.rotation);
        debug!("{}: transform {}", record.pair.image.name(), transform);

        Ok(ImageDescriptor {
            pair: record.pair,
            metadata: record.metadata,
            dimensions: record.dimensions,
            resolution_x: placement.resolution_x,
            resolution_y: placement.resolution_y,
            upleftx: placement.upleftx,
            uplefty: placement.uplefty,
            transform,
        })
    }

    /// Derive every record, stopping at the first failure
    pub fn derive_all(records: Vec<ImageRecord>) -> ReferenceResult<Vec<ImageDescriptor>> {
        records.into_iter().map(Self::derive).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{FileHandle, MatchedPair};
    use crate::metadata::SchemaExtras;

    fn metadata(rotation: f64, center: (f64, f64), size: (f64, f64)) -> MetadataRecord {
        MetadataRecord {
            rotation,
            center_x: center.0,
            center_y: center.1,
            size_x: size.0,
            size_y: size.1,
            extras: SchemaExtras::Composite { focus: 0.0 },
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_example() {
        let record = ImageRecord {
            pair: MatchedPair::new(
                FileHandle::new("/in/Image_1.png").unwrap(),
                FileHandle::new("/in/Image_1.Align").unwrap(),
            ),
            metadata: metadata(0.0, (100.0, 50.0), (20.0, 10.0)),
            dimensions: PixelDimensions::new(200, 100, 3),
        };

        let descriptor = AffineTransformBuilder::derive(record).unwrap();

        assert!(close(descriptor.resolution_x, 0.1));
        assert!(close(descriptor.resolution_y, 0.1));
        assert_eq!(descriptor.upleftx, 90.0);
        assert_eq!(descriptor.uplefty, 45.0);
        let gt = descriptor.transform.to_geo_transform();
        let expected = [90.0, 0.1, 0.0, 45.0, 0.0, -0.1];
        for (got, want) in gt.iter().zip(expected.iter()) {
            assert!(close(*got, *want), "{:?} != {:?}", gt, expected);
        }
    }

    #[test]
    fn rotation_fills_both_skews() {
        let t = AffineTransformBuilder::transform(
            &metadata(0.75, (0.0, 0.0), (4.0, 2.0)),
            &PixelDimensions::new(4, 2, 1),
        ).unwrap();

        assert_eq!(t.skew_x, 0.75);
        assert_eq!(t.skew_y, 0.75);
        assert_eq!(t.scale_y, -1.0);
        assert!(t.has_skew());
    }

    #[test]
    fn zero_dimension_is_arithmetic_error() {
        let err = AffineTransformBuilder::transform(
            &metadata(0.0, (1.0, 1.0), (1.0, 1.0)),
            &PixelDimensions::new(0, 10, 1),
        ).unwrap_err();

        assert!(matches!(err, ReferenceError::ArithmeticError(_)));
    }

    #[test]
    fn inverse_recovers_center_and_size() {
        let cases = [
            ((100.0, 50.0), (20.0, 10.0), (200, 100)),
            ((-3250.125, 88.5), (0.75, 1.5), (1024, 768)),
            ((35000.25, 21000.0), (1200.0, 900.0), (4096, 3072)),
        ];

        for (center, size, (w, h)) in cases {
            let dims = PixelDimensions::new(w, h, 3);
            let t = AffineTransformBuilder::transform(&metadata(0.0, center, size), &dims).unwrap();
            let encoded = AffineTransform::from_geo_transform(t.to_geo_transform());

            let (cx, cy, sx, sy) = Placement::from_transform(&encoded).center_and_size(&dims);
            assert!(close(cx, center.0) && close(cy, center.1), "center {:?}", (cx, cy));
            assert!(close(sx, size.0) && close(sy, size.1), "size {:?}", (sx, sy));
        }
    }

    #[test]
    fn apply_maps_corners() {
        let t = AffineTransform::new(90.0, 0.1, 0.0, 45.0, 0.0, -0.1);

        assert_eq!(t.apply(0.0, 0.0), (90.0, 45.0));
        let (x, y) = t.apply(200.0, 100.0);
        assert!(close(x, 110.0) && close(y, 35.0));
    }
}
