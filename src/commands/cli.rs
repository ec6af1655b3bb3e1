//! Command-line argument definitions

use clap::{Arg, ArgAction, Command as ClapCommand};

use crate::referencer::{DEFAULT_IMAGE_PATTERN, DEFAULT_METADATA_PATTERN};

/// The `scanref` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("scanref")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Georeference microscope scan images from their Align metadata")
        .arg(
            Arg::new("infolder")
                .help("Folder holding the images and Align files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("outfolder")
                .help("Folder the GeoTIFFs are written to (created if missing)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("align-pattern")
                .long("align-pattern")
                .help("Glob selecting the Align files, relative to infolder (`**` searches subfolders)")
                .value_name("PATTERN")
                .default_value(DEFAULT_METADATA_PATTERN),
        )
        .arg(
            Arg::new("image-pattern")
                .long("image-pattern")
                .help("Glob selecting the images, relative to infolder (`**` searches subfolders)")
                .value_name("PATTERN")
                .default_value(DEFAULT_IMAGE_PATTERN),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file overriding the bundled naming conventions")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("epsg")
                .long("epsg")
                .help("EPSG code of the output CRS")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("compression")
                .long("compression")
                .help("Output compression (none, deflate, zstd)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("keep-going")
                .short('k')
                .long("keep-going")
                .help("Skip pairs that fail instead of stopping the batch")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-matches")
                .short('l')
                .long("list-matches")
                .help("Only list matched image/Align pairs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("describe")
                .short('d')
                .long("describe")
                .help("Only print the descriptor table")
                .action(ArgAction::SetTrue)
                .conflicts_with("list-matches"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Audit log of referenced pairs")
                .value_name("FILE")
                .required(false),
        )
}
