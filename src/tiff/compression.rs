//! Strip compression for written rasters

use std::fmt;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;

use crate::errors::{ReferenceError, ReferenceResult};
use crate::tiff::constants::compression;

/// Zstandard level used for output strips
const ZSTD_LEVEL: i32 = 3;

/// Compression applied to the output strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCompression {
    #[default]
    None,
    /// Adobe Deflate (zlib), code 8
    Deflate,
    /// Zstandard, code 14
    Zstd,
}

impl OutputCompression {
    /// Look a compression up by name
    pub fn from_name(name: &str) -> ReferenceResult<Self> {
        match name.to_lowercase().as_str() {
            "none" | "uncompressed" => Ok(OutputCompression::None),
            "deflate" | "zip" | "adobe deflate" => Ok(OutputCompression::Deflate),
            "zstd" => Ok(OutputCompression::Zstd),
            _ => Err(ReferenceError::ConfigError(format!("Unknown compression type: {}", name))),
        }
    }

    /// TIFF compression code
    pub fn code(&self) -> u16 {
        match self {
            OutputCompression::None => compression::NONE,
            OutputCompression::Deflate => compression::DEFLATE,
            OutputCompression::Zstd => compression::ZSTD,
        }
    }

    /// Compress one strip
    pub fn compress(&self, data: &[u8]) -> ReferenceResult<Vec<u8>> {
        let compressed = match self {
            OutputCompression::None => return Ok(data.to_vec()),
            OutputCompression::Deflate => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()?
            },
            OutputCompression::Zstd => zstd::encode_all(data, ZSTD_LEVEL).map_err(|e| {
                ReferenceError::WriteError(format!("ZSTD compression error: {}", e))
            })?,
        };
        debug!("{} compressed {} bytes to {}", self, data.len(), compressed.len());
        Ok(compressed)
    }
}

impl fmt::Display for OutputCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputCompression::None => "none",
            OutputCompression::Deflate => "deflate",
            OutputCompression::Zstd => "zstd",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn deflate_and_zstd_round_trip() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();

        let deflated = OutputCompression::Deflate.compress(&data).unwrap();
        let mut inflated = Vec::new();
        flate2::read::ZlibDecoder::new(&deflated[..]).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, data);

        let packed = OutputCompression::Zstd.compress(&data).unwrap();
        assert_eq!(zstd::decode_all(&packed[..]).unwrap(), data);
    }

    #[test]
    fn names_map_to_codes() {
        assert_eq!(OutputCompression::from_name("ZIP").unwrap().code(), 8);
        assert_eq!(OutputCompression::from_name("zstd").unwrap().code(), 14);
        assert_eq!(OutputCompression::from_name("none").unwrap().code(), 1);
        assert!(OutputCompression::from_name("lzw").is_err());
    }
}
