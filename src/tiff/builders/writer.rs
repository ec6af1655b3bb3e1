//! TIFF writing strategy
//!
//! Layout of a written file: header, the IFD, external tag data in tag
//! order (each block word-aligned), then the image strip. Offsets are
//! computed up front so everything is written in one forward pass.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;

use crate::errors::{ReferenceError, ReferenceResult};
use crate::tiff::constants::{header, tags};
use crate::tiff::ifd::{IFDEntry, IFD};

/// Handles writing TIFF files to disk
pub struct WriterBuilder;

impl WriterBuilder {
    /// Write the file to any sink
    pub fn write_to(
        writer: &mut impl Write,
        is_big_tiff: bool,
        ifd: &IFD,
        external_data: &BTreeMap<u16, Vec<u8>>,
        strip: &[u8],
    ) -> ReferenceResult<()> {
        let entries = ifd.sorted_entries();
        let header_size = Self::header_size(is_big_tiff);
        let ifd_offset = header_size;

        let (data_offsets, strip_offset) =
            Self::calculate_offsets(&entries, external_data, header_size, is_big_tiff)?;

        if !is_big_tiff && strip_offset + strip.len() as u64 > u32::MAX as u64 {
            return Err(ReferenceError::WriteError(format!(
                "{} bytes of image data do not fit a classic TIFF", strip.len())));
        }

        Self::write_header(writer, is_big_tiff, ifd_offset)?;
        Self::write_ifd(writer, &entries, &data_offsets, strip_offset, is_big_tiff)?;

        let mut position = ifd_offset + Self::ifd_size(entries.len(), is_big_tiff);
        for (tag, data) in external_data {
            if let Some(&offset) = data_offsets.get(tag) {
                Self::write_padding(writer, offset - position)?;
                writer.write_all(data)?;
                position = offset + data.len() as u64;
            }
        }

        Self::write_padding(writer, strip_offset - position)?;
        writer.write_all(strip)?;
        debug!("Wrote {} IFD entries, {} external blocks, strip at {}",
               entries.len(), data_offsets.len(), strip_offset);
        Ok(())
    }

    fn header_size(is_big_tiff: bool) -> u64 {
        if is_big_tiff { 16 } else { 8 }
    }

    /// Size of an IFD
    fn ifd_size(entry_count: usize, is_big_tiff: bool) -> u64 {
        let entry_count = entry_count as u64;
        match is_big_tiff {
            // count, 20-byte entries, next IFD offset
            true => 8 + (20 * entry_count) + 8,
            // count, 12-byte entries, next IFD offset
            false => 2 + (12 * entry_count) + 4,
        }
    }

    /// Offsets of external tag data and of the strip
    fn calculate_offsets(
        entries: &[IFDEntry],
        external_data: &BTreeMap<u16, Vec<u8>>,
        header_size: u64,
        is_big_tiff: bool,
    ) -> ReferenceResult<(HashMap<u16, u64>, u64)> {
        let mut current_offset = header_size + Self::ifd_size(entries.len(), is_big_tiff);
        let mut data_offsets = HashMap::new();

        for entry in entries.iter().filter(|e| !e.is_value_inline(is_big_tiff)) {
            let data = external_data.get(&entry.tag).ok_or_else(|| ReferenceError::WriteError(
                format!("No data stored for tag {} ({})", entry.tag, tags::name(entry.tag))))?;
            if data.len() != entry.data_size() {
                return Err(ReferenceError::WriteError(format!(
                    "Tag {} declares {} bytes but has {}", entry.tag, entry.data_size(), data.len())));
            }

            current_offset = Self::align_to_4_bytes(current_offset);
            data_offsets.insert(entry.tag, current_offset);
            current_offset += data.len() as u64;
        }

        Ok((data_offsets, Self::align_to_4_bytes(current_offset)))
    }

    /// Write TIFF header, always little-endian
    fn write_header(writer: &mut impl Write, is_big_tiff: bool, ifd_offset: u64) -> ReferenceResult<()> {
        writer.write_all(&header::LITTLE_ENDIAN_MARKER)?;

        if is_big_tiff {
            writer.write_u16::<LittleEndian>(header::BIG_TIFF_VERSION)?;
            writer.write_u16::<LittleEndian>(header::BIGTIFF_OFFSET_SIZE)?;
            writer.write_u16::<LittleEndian>(0)?;
            writer.write_u64::<LittleEndian>(ifd_offset)?;
        } else {
            writer.write_u16::<LittleEndian>(header::TIFF_VERSION)?;
            writer.write_u32::<LittleEndian>(ifd_offset as u32)?;
        }

        Ok(())
    }

    /// Write the IFD, patching external offsets and the strip position
    fn write_ifd(
        writer: &mut impl Write,
        entries: &[IFDEntry],
        data_offsets: &HashMap<u16, u64>,
        strip_offset: u64,
        is_big_tiff: bool,
    ) -> ReferenceResult<()> {
        match is_big_tiff {
            true => writer.write_u64::<LittleEndian>(entries.len() as u64)?,
            false => writer.write_u16::<LittleEndian>(entries.len() as u16)?,
        }

        for entry in entries {
            let value_offset = if entry.tag == tags::STRIP_OFFSETS {
                strip_offset
            } else {
                data_offsets.get(&entry.tag).copied().unwrap_or(entry.value_offset)
            };

            writer.write_u16::<LittleEndian>(entry.tag)?;
            writer.write_u16::<LittleEndian>(entry.field_type)?;

            match is_big_tiff {
                true => {
                    writer.write_u64::<LittleEndian>(entry.count)?;
                    writer.write_u64::<LittleEndian>(value_offset)?;
                },
                false => {
                    writer.write_u32::<LittleEndian>(entry.count as u32)?;
                    writer.write_u32::<LittleEndian>(value_offset as u32)?;
                },
            }
        }

        // Single IFD, no next
        match is_big_tiff {
            true => writer.write_u64::<LittleEndian>(0)?,
            false => writer.write_u32::<LittleEndian>(0)?,
        }

        Ok(())
    }

    fn align_to_4_bytes(offset: u64) -> u64 {
        (offset + 3) & !3
    }

    fn write_padding(writer: &mut impl Write, count: u64) -> ReferenceResult<()> {
        for _ in 0..count {
            writer.write_u8(0)?;
        }
        Ok(())
    }
}
