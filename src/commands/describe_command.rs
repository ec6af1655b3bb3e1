//! Descriptor table command
//!
//! Prints the per-image table the georeferencer would consume, one tab
//! separated row per pair.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::options::RunOptions;
use crate::descriptor::ImageDescriptor;
use crate::errors::ReferenceResult;
use crate::referencer::Referencer;

/// Column names of the printed table
pub const DESCRIPTOR_COLUMNS: [&str; 13] = [
    "image", "metadata", "schema", "rotation", "center_x", "center_y", "size_x", "size_y",
    "source_size_x", "source_size_y", "source_size_band", "upleft", "geotransform",
];

/// Command printing descriptors without writing rasters
pub struct DescribeCommand {
    options: RunOptions,
}

impl DescribeCommand {
    pub fn new(args: &ArgMatches) -> ReferenceResult<Self> {
        Ok(DescribeCommand {
            options: RunOptions::from_args(args)?,
        })
    }

    /// One table row
    pub fn format_row(descriptor: &ImageDescriptor) -> String {
        let metadata = &descriptor.metadata;
        let dims = &descriptor.dimensions;
        let gt = descriptor.transform.to_geo_transform();
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{},{}\t{}",
            descriptor.pair.image.name(),
            descriptor.pair.metadata.name(),
            metadata.schema(),
            metadata.rotation,
            metadata.center_x,
            metadata.center_y,
            metadata.size_x,
            metadata.size_y,
            dims.source_size_x,
            dims.source_size_y,
            dims.source_size_band,
            descriptor.upleftx,
            descriptor.uplefty,
            gt.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(","),
        )
    }
}

impl Command for DescribeCommand {
    fn execute(&self) -> ReferenceResult<()> {
        info!("Describing pairs in {}", self.options.infolder.display());

        let referencer = Referencer::new(self.options.config.clone())?;
        let pairs = referencer.match_files(
            &self.options.infolder,
            &self.options.metadata_pattern,
            &self.options.image_pattern,
        )?;
        let descriptors = referencer.build_descriptors(&pairs)?;

        println!("{}", DESCRIPTOR_COLUMNS.join("\t"));
        for descriptor in &descriptors {
            println!("{}", Self::format_row(descriptor));
        }
        Ok(())
    }
}
