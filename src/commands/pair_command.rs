//! Single pair command

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::api::RegionCropper;
use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::config::CropConfig;
use crate::errors::CropResult;
use crate::extractor::ExportResult;
use crate::utils::logger::Logger;

/// Command for cropping the regions of one annotation out of one raster
pub struct PairCommand<'a> {
    raster: PathBuf,
    annotation: PathBuf,
    config: CropConfig,
    logger: &'a Logger,
}

impl<'a> PairCommand<'a> {
    /// Create a new pair command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Run configuration
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new PairCommand instance or an error
    pub fn new(args: &ArgMatches, config: CropConfig, logger: &'a Logger) -> CropResult<Self> {
        let raster = PathBuf::from(required_arg(args, "raster", "raster file (--raster)")?);
        let annotation = PathBuf::from(required_arg(args, "annotation", "annotation file (--annotation)")?);
        info!("Raster: {}, annotation: {}", raster.display(), annotation.display());

        Ok(PairCommand {
            raster,
            annotation,
            config,
            logger,
        })
    }
}

impl<'a> Command for PairCommand<'a> {
    fn execute(&self) -> CropResult<()> {
        let cropper = RegionCropper::new(self.config.clone(), self.logger)?;
        let report = cropper.crop_pair(&self.raster, &self.annotation);

        for result in &report.results {
            match result {
                ExportResult::Exported { index, path, window } => {
                    println!("  #{} saved {} ({})", index, path.display(), window)
                }
                ExportResult::Planned { index, path, window } => {
                    println!("  #{} would save {} ({})", index, path.display(), window)
                }
                ExportResult::Skipped { index, reason } => println!("  #{} skipped: {}", index, reason),
            }
        }
        println!("{}", report.summary());

        Ok(())
    }
}
