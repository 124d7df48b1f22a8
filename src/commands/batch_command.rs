//! Directory batch command
//!
//! Pairs every raster of a directory with its annotation drawing and
//! crops all regions of all pairs.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::api::RegionCropper;
use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::config::CropConfig;
use crate::errors::{CropError, CropResult};
use crate::utils::logger::Logger;

/// Command for cropping every raster/annotation pair of two directories
pub struct BatchCommand<'a> {
    /// Directory holding the rasters
    raster_dir: PathBuf,
    /// Directory holding one annotation sub-directory per raster
    annotation_dir: PathBuf,
    /// Run configuration
    config: CropConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    /// Create a new batch command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Run configuration
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new BatchCommand instance or an error
    pub fn new(args: &ArgMatches, config: CropConfig, logger: &'a Logger) -> CropResult<Self> {
        let raster_dir = PathBuf::from(required_arg(args, "raster-dir", "raster directory")?);
        let annotation_dir = PathBuf::from(required_arg(args, "annotation-dir", "annotation directory")?);

        for dir in [&raster_dir, &annotation_dir] {
            if !dir.is_dir() {
                return Err(CropError::GenericError(format!("Not a directory: {}", dir.display())));
            }
        }

        info!("Raster directory: {}", raster_dir.display());
        info!("Annotation directory: {}", annotation_dir.display());

        Ok(BatchCommand {
            raster_dir,
            annotation_dir,
            config,
            logger,
        })
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> CropResult<()> {
        let cropper = RegionCropper::new(self.config.clone(), self.logger)?.with_progress(true);
        let reports = cropper.crop_directories(&self.raster_dir, &self.annotation_dir)?;

        for report in &reports {
            println!("{}", report.summary());
        }

        let exported: usize = reports.iter().map(|r| r.exported_count() + r.planned_count()).sum();
        let skipped: usize = reports.iter().map(|r| r.skipped_count()).sum();
        let failed = reports.iter().filter(|r| r.is_failed()).count();
        println!(
            "Done: {} pair(s), {} image(s), {} polygon(s) skipped, {} pair(s) skipped",
            reports.len(), exported, skipped, failed
        );

        Ok(())
    }
}
