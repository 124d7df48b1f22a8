//! Command line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the clap command for the `regioncrop` binary
///
/// Batch mode takes the raster and annotation directories as positionals;
/// single pair mode takes `--raster` and `--annotation` instead.
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("regioncrop")
        .version("1.0")
        .about("Crop annotated regions out of georeferenced rasters")
        .arg(
            Arg::new("raster-dir")
                .help("Directory with the GeoTIFF rasters")
                .value_name("RASTER_DIR")
                .required_unless_present("raster")
                .conflicts_with("raster")
                .index(1),
        )
        .arg(
            Arg::new("annotation-dir")
                .help("Directory with one annotation sub-directory per raster")
                .value_name("ANNOTATION_DIR")
                .required_unless_present("raster")
                .conflicts_with("raster")
                .index(2),
        )
        .arg(
            Arg::new("raster")
                .long("raster")
                .help("Single raster file to crop")
                .value_name("FILE")
                .requires("annotation")
                .required(false),
        )
        .arg(
            Arg::new("annotation")
                .long("annotation")
                .help("DXF annotation for --raster")
                .value_name("FILE")
                .requires("raster")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output image format (png, tif)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .help("Regex an annotation file name must match (default: Quadra)")
                .value_name("REGEX")
                .required(false),
        )
        .arg(
            Arg::new("layer")
                .long("layer")
                .help("Only use annotation entities on this DXF layer")
                .value_name("LAYER")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("parallel")
                .short('p')
                .long("parallel")
                .help("Process raster/annotation pairs in parallel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Report the windows and output paths without writing images")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
