//! Image File Directory (IFD) structures for writing
//!
//! An output raster has exactly one IFD. Entries whose data fits the value
//! slot carry it packed in `value_offset`; larger data lives in the
//! builder's external data and the writer patches in its file offset.

use std::fmt;

use log::trace;

use crate::tiff::constants::{field_types, tags};

/// Represents an entry in an Image File Directory (IFD)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Packed inline value, or placeholder for an external offset
    pub value_offset: u64,
}

impl IFDEntry {
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        IFDEntry { tag, field_type, count, value_offset }
    }

    /// Size of this entry's data in bytes
    pub fn data_size(&self) -> usize {
        field_types::size(self.field_type) * self.count as usize
    }

    /// Whether the data fits the value slot of the entry
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        self.data_size() <= if is_big_tiff { 8 } else { 4 }
    }
}

impl fmt::Display for IFDEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag: {} ({}), Type: {}, Count: {}, Value/Offset: {}",
               self.tag, tags::name(self.tag), self.field_type, self.count, self.value_offset)
    }
}

/// The directory of the raster being written
#[derive(Debug, Clone, Default)]
pub struct IFD {
    entries: Vec<IFDEntry>,
}

impl IFD {
    pub fn new() -> Self {
        IFD { entries: Vec::new() }
    }

    /// Add an entry, replacing any entry with the same tag
    pub fn set_entry(&mut self, entry: IFDEntry) {
        trace!("Setting IFD entry: {}", entry);
        self.entries.retain(|e| e.tag != entry.tag);
        self.entries.push(entry);
    }

    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Entries in ascending tag order, as TIFF requires
    pub fn sorted_entries(&self) -> Vec<IFDEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.tag);
        sorted
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Width and height, if both tags are set
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_entry(tags::IMAGE_WIDTH)?.value_offset;
        let height = self.get_entry(tags::IMAGE_LENGTH)?.value_offset;
        Some((width, height))
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD ({} entries)", self.entries.len())?;
        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }
        for entry in self.sorted_entries() {
            writeln!(f, "  {}", entry)?;
        }
        Ok(())
    }
}
