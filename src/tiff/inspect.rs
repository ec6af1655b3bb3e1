//! Reading back the directory of a written GeoTIFF
//!
//! Only the little-endian, single-IFD files this crate writes are
//! understood. Used to verify output and to report on it.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::errors::{ReferenceError, ReferenceResult};
use crate::tiff::constants::{field_types, geo_keys, header, tags};
use crate::tiff::ifd::IFDEntry;

/// Values of one tag, decoded
#[derive(Debug, Clone, PartialEq)]
pub enum TagValues {
    Unsigned(Vec<u64>),
    Double(Vec<f64>),
    Ascii(String),
}

impl TagValues {
    pub fn as_unsigned(&self) -> Option<&[u64]> {
        match self {
            TagValues::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            TagValues::Double(v) => Some(v),
            _ => None,
        }
    }
}

/// Tags of the first IFD of a file
#[derive(Debug, Clone)]
pub struct TagDirectory {
    pub is_big_tiff: bool,
    pub entries: Vec<IFDEntry>,
    pub values: BTreeMap<u16, TagValues>,
}

impl TagDirectory {
    /// Read the directory of a file on disk
    pub fn open(path: &Path) -> ReferenceResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Read the directory from any seekable source
    pub fn read<R: Read + Seek>(reader: &mut R) -> ReferenceResult<Self> {
        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker)?;
        if marker != header::LITTLE_ENDIAN_MARKER {
            return Err(ReferenceError::FormatError(format!(
                "Unsupported byte order marker {:?}", marker)));
        }

        let is_big_tiff = match reader.read_u16::<LittleEndian>()? {
            header::TIFF_VERSION => false,
            header::BIG_TIFF_VERSION => true,
            version => {
                return Err(ReferenceError::FormatError(format!(
                    "Unsupported TIFF version: {}", version)))
            },
        };

        let ifd_offset = if is_big_tiff {
            let _offset_size = reader.read_u16::<LittleEndian>()?;
            let _reserved = reader.read_u16::<LittleEndian>()?;
            reader.read_u64::<LittleEndian>()?
        } else {
            reader.read_u32::<LittleEndian>()? as u64
        };

        reader.seek(SeekFrom::Start(ifd_offset))?;
        let count = if is_big_tiff {
            reader.read_u64::<LittleEndian>()?
        } else {
            reader.read_u16::<LittleEndian>()? as u64
        };

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let tag = reader.read_u16::<LittleEndian>()?;
            let field_type = reader.read_u16::<LittleEndian>()?;
            let (count, value_offset) = if is_big_tiff {
                (reader.read_u64::<LittleEndian>()?, reader.read_u64::<LittleEndian>()?)
            } else {
                (reader.read_u32::<LittleEndian>()? as u64, reader.read_u32::<LittleEndian>()? as u64)
            };
            entries.push(IFDEntry::new(tag, field_type, count, value_offset));
        }

        let mut values = BTreeMap::new();
        for entry in &entries {
            let bytes = if entry.is_value_inline(is_big_tiff) {
                entry.value_offset.to_le_bytes()[..entry.data_size()].to_vec()
            } else {
                let mut data = vec![0u8; entry.data_size()];
                reader.seek(SeekFrom::Start(entry.value_offset))?;
                reader.read_exact(&mut data)?;
                data
            };
            values.insert(entry.tag, Self::decode(entry.field_type, &bytes)?);
        }

        Ok(TagDirectory { is_big_tiff, entries, values })
    }

    fn decode(field_type: u16, bytes: &[u8]) -> ReferenceResult<TagValues> {
        let mut cursor = bytes;
        let size = field_types::size(field_type);
        let count = bytes.len() / size;

        let values = match field_type {
            field_types::ASCII => TagValues::Ascii(
                String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string(),
            ),
            field_types::DOUBLE => TagValues::Double(
                (0..count).map(|_| cursor.read_f64::<LittleEndian>()).collect::<Result<_, _>>()?,
            ),
            field_types::SHORT => TagValues::Unsigned(
                (0..count)
                    .map(|_| cursor.read_u16::<LittleEndian>().map(u64::from))
                    .collect::<Result<_, _>>()?,
            ),
            field_types::LONG => TagValues::Unsigned(
                (0..count)
                    .map(|_| cursor.read_u32::<LittleEndian>().map(u64::from))
                    .collect::<Result<_, _>>()?,
            ),
            field_types::LONG8 => TagValues::Unsigned(
                (0..count).map(|_| cursor.read_u64::<LittleEndian>()).collect::<Result<_, _>>()?,
            ),
            other => {
                return Err(ReferenceError::FormatError(format!("Unsupported field type: {}", other)))
            },
        };
        Ok(values)
    }

    pub fn get(&self, tag: u16) -> Option<&TagValues> {
        self.values.get(&tag)
    }

    /// First unsigned value of a tag
    pub fn unsigned(&self, tag: u16) -> Option<u64> {
        self.get(tag)?.as_unsigned()?.first().copied()
    }

    pub fn dimensions(&self) -> Option<(u64, u64, u64)> {
        Some((
            self.unsigned(tags::IMAGE_WIDTH)?,
            self.unsigned(tags::IMAGE_LENGTH)?,
            self.unsigned(tags::SAMPLES_PER_PIXEL)?,
        ))
    }

    /// ProjectedCSType from the key directory
    pub fn epsg(&self) -> Option<u16> {
        let keys = self.get(tags::GEO_KEY_DIRECTORY_TAG)?.as_unsigned()?;
        keys.chunks(4)
            .skip(1)
            .find(|key| key[0] == geo_keys::PROJECTED_CS_TYPE as u64)
            .and_then(|key| key.get(3))
            .map(|v| *v as u16)
    }

    /// Geotransform in GDAL order, from whichever georeferencing tags exist
    pub fn geo_transform(&self) -> Option<[f64; 6]> {
        if let Some(m) = self.get(tags::MODEL_TRANSFORMATION_TAG).and_then(TagValues::as_doubles) {
            if m.len() == 16 {
                return Some([m[3], m[0], m[1], m[7], m[4], m[5]]);
            }
        }

        let scale = self.get(tags::MODEL_PIXEL_SCALE_TAG)?.as_doubles()?;
        let tiepoint = self.get(tags::MODEL_TIEPOINT_TAG)?.as_doubles()?;
        if scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        Some([
            tiepoint[3] - tiepoint[0] * scale[0],
            scale[0],
            0.0,
            tiepoint[4] + tiepoint[1] * scale[1],
            0.0,
            -scale[1],
        ])
    }

    /// Raw strip bytes as stored, compressed or not
    pub fn read_strip<R: Read + Seek>(&self, reader: &mut R) -> ReferenceResult<Vec<u8>> {
        let offset = self.unsigned(tags::STRIP_OFFSETS).ok_or_else(|| {
            ReferenceError::FormatError("StripOffsets missing".to_string())
        })?;
        let length = self.unsigned(tags::STRIP_BYTE_COUNTS).ok_or_else(|| {
            ReferenceError::FormatError("StripByteCounts missing".to_string())
        })?;

        let mut strip = vec![0u8; length as usize];
        reader.seek(SeekFrom::Start(offset))?;
        reader.read_exact(&mut strip)?;
        Ok(strip)
    }
}
