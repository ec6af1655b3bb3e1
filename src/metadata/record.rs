//! Normalized metadata record

use super::schema::MetadataSchema;

/// Values only one schema carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaExtras {
    /// Composite scans record the focus position
    Composite {
        focus: f64,
    },
    /// Single scans record the camera settings of the capture
    SingleScan {
        brightness: f64,
        contrast: f64,
        autoexposure: f64,
        exposure_time: f64,
    },
}

/// Physical placement of one scan, independent of the schema it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetadataRecord {
    /// Rotation in degrees
    pub rotation: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub size_x: f64,
    pub size_y: f64,
    pub extras: SchemaExtras,
}

impl MetadataRecord {
    /// Schema the record was parsed from
    pub fn schema(&self) -> MetadataSchema {
        match self.extras {
            SchemaExtras::Composite { .. } => MetadataSchema::Composite,
            SchemaExtras::SingleScan { .. } => MetadataSchema::SingleScan,
        }
    }

    pub fn focus(&self) -> Option<f64> {
        match self.extras {
            SchemaExtras::Composite { focus } => Some(focus),
            _ => None,
        }
    }

    pub fn brightness(&self) -> Option<f64> {
        match self.extras {
            SchemaExtras::SingleScan { brightness, .. } => Some(brightness),
            _ => None,
        }
    }

    pub fn contrast(&self) -> Option<f64> {
        match self.extras {
            SchemaExtras::SingleScan { contrast, .. } => Some(contrast),
            _ => None,
        }
    }

    pub fn autoexposure(&self) -> Option<f64> {
        match self.extras {
            SchemaExtras::SingleScan { autoexposure, .. } => Some(autoexposure),
            _ => None,
        }
    }

    pub fn exposure_time(&self) -> Option<f64> {
        match self.extras {
            SchemaExtras::SingleScan { exposure_time, .. } => Some(exposure_time),
            _ => None,
        }
    }
}
