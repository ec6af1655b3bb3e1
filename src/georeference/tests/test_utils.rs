use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::decode::{DecodedImage, ImageDecoder, PixelData, SampleDepth};
use crate::descriptor::{ImageDescriptor, ImageRecord, PixelDimensions};
use crate::errors::ReferenceResult;
use crate::georeference::{RasterDriver, RasterHandle};
use crate::matching::{FileHandle, MatchedPair};
use crate::metadata::{MetadataRecord, SchemaExtras};
use crate::transform::AffineTransformBuilder;

/// Decoder handing out the same image for every path
pub struct FixedDecoder {
    pub image: DecodedImage,
}

impl FixedDecoder {
    /// RGB image whose samples count up from zero
    pub fn rgb(width: u32, height: u32) -> Self {
        let dims = PixelDimensions::new(width, height, 3);
        let samples = (0..dims.sample_count()).map(|i| i as u8).collect();
        FixedDecoder {
            image: DecodedImage::new(dims, PixelData::Eight(samples)).unwrap(),
        }
    }
}

impl ImageDecoder for FixedDecoder {
    fn dimensions(&self, _path: &Path) -> ReferenceResult<PixelDimensions> {
        Ok(self.image.dimensions)
    }

    fn decode(&self, _path: &Path) -> ReferenceResult<DecodedImage> {
        Ok(self.image.clone())
    }
}

/// Driver recording every call it receives
#[derive(Default)]
pub struct RecordingDriver {
    pub calls: Rc<RefCell<Vec<String>>>,
}

pub struct RecordingHandle {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RasterDriver for RecordingDriver {
    type Handle = RecordingHandle;

    fn create_raster(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        bands: u16,
        depth: SampleDepth,
    ) -> ReferenceResult<RecordingHandle> {
        self.calls.borrow_mut().push(format!(
            "create {} {}x{}x{} {}",
            path.file_name().unwrap().to_string_lossy(), width, height, bands, depth.bits()
        ));
        Ok(RecordingHandle { calls: Rc::clone(&self.calls) })
    }
}

impl RasterHandle for RecordingHandle {
    fn set_spatial_reference(&mut self, epsg: u32) -> ReferenceResult<()> {
        self.calls.borrow_mut().push(format!("srs {}", epsg));
        Ok(())
    }

    fn set_geo_transform(&mut self, geo_transform: [f64; 6]) -> ReferenceResult<()> {
        self.calls.borrow_mut().push(format!("gt {:?}", geo_transform));
        Ok(())
    }

    fn write_band(&mut self, band: u16, data: &[u8]) -> ReferenceResult<()> {
        self.calls.borrow_mut().push(format!("band {} {}", band, data.len()));
        Ok(())
    }

    fn close(self) -> ReferenceResult<()> {
        self.calls.borrow_mut().push("close".to_string());
        Ok(())
    }
}

/// Descriptor for the reference example: 20x10 units centered at (100, 50)
pub fn descriptor(image_name: &str, dimensions: PixelDimensions) -> ImageDescriptor {
    let base = image_name.split('.').next().unwrap();
    let record = ImageRecord {
        pair: MatchedPair::new(
            FileHandle::new(PathBuf::from("/scans").join(image_name)).unwrap(),
            FileHandle::new(PathBuf::from("/scans").join(format!("{}.Align", base))).unwrap(),
        ),
        metadata: MetadataRecord {
            rotation: 0.0,
            center_x: 100.0,
            center_y: 50.0,
            size_x: 20.0,
            size_y: 10.0,
            extras: SchemaExtras::Composite { focus: 1.0 },
        },
        dimensions,
    };
    AffineTransformBuilder::derive(record).unwrap()
}
