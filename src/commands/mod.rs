//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod batch_command;
pub mod pair_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use batch_command::BatchCommand;
pub use pair_command::PairCommand;


use clap::ArgMatches;
use log::info;

use crate::config::CropConfig;
use crate::utils::logger::Logger;
use crate::errors::{CropError, CropResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct RegionCropCommandFactory;

impl RegionCropCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RegionCropCommandFactory
    }
}

impl Default for RegionCropCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for RegionCropCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CropResult<Box<dyn Command + 'a>> {
        let config = build_config(args)?;

        // A single raster/annotation pair takes precedence over directory mode
        if args.contains_id("raster") || args.contains_id("annotation") {
            Ok(Box::new(PairCommand::new(args, config, logger)?))
        } else {
            Ok(Box::new(BatchCommand::new(args, config, logger)?))
        }
    }
}

/// Build the run configuration from an optional config file and CLI overrides
pub fn build_config(args: &ArgMatches) -> CropResult<CropConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Loading configuration from {}", path);
            CropConfig::from_file(path)?
        }
        None => CropConfig::default(),
    };

    if let Some(format) = args.get_one::<String>("format") {
        config.set_output_format(format)?;
    }

    if let Some(pattern) = args.get_one::<String>("pattern") {
        config.set_annotation_pattern(pattern)?;
    }

    if let Some(layer) = args.get_one::<String>("layer") {
        config.layer = Some(layer.clone());
    }

    if args.get_flag("parallel") {
        config.parallel = true;
    }

    if args.get_flag("dry-run") {
        config.dry_run = true;
    }

    info!("Output format: {}", config.output_format);
    info!("Annotation pattern: {}", config.annotation_pattern.as_str());
    info!("Parallel: {}, dry run: {}", config.parallel, config.dry_run);
    Ok(config)
}

/// Fetch a required string argument
pub(crate) fn required_arg(args: &ArgMatches, id: &str, what: &str) -> CropResult<String> {
    args.get_one::<String>(id)
        .cloned()
        .ok_or_else(|| CropError::GenericError(format!("Missing {}", what)))
}
