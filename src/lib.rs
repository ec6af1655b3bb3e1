pub mod errors;
pub mod config;
pub mod matching;
pub mod metadata;
pub mod decode;
pub mod descriptor;
pub mod transform;
pub mod tiff;
pub mod georeference;
pub mod referencer;
pub mod commands;
pub mod utils;

pub use crate::referencer::{BatchReport, Referencer, RowFailure};

pub use config::{FailurePolicy, ReferencerConfig};
pub use errors::{ReferenceError, ReferenceResult};
pub use matching::{FileHandle, FileMatcher, MatchedPair};
pub use metadata::{MetadataParser, MetadataRecord};
pub use descriptor::{ImageDescriptor, ImageRecord, PixelDimensions};
pub use transform::{AffineTransform, AffineTransformBuilder};
pub use georeference::{GeoTiffDriver, Georeferencer, RasterDriver, RasterHandle};
