use std::path::Path;

use log::{info, warn};
use rayon::prelude::*;

use crate::annotation::{AnnotationReader, DxfAnnotationReader};
use crate::config::CropConfig;
use crate::errors::CropResult;
use crate::extractor::{ExportOrchestrator, ImageEncoder, ImageEncoderFactory, PairReport};
use crate::pairing::{self, DatasetPair};
use crate::raster::{GeoTiffReader, RasterReader};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Main interface to the region cropping library
pub struct RegionCropper<'a> {
    config: CropConfig,
    logger: &'a Logger,
    annotations: Box<dyn AnnotationReader>,
    rasters: Box<dyn RasterReader>,
    encoder: Box<dyn ImageEncoder>,
    show_progress: bool,
}

impl<'a> RegionCropper<'a> {
    /// Create a new RegionCropper with DXF annotations and GeoTIFF rasters
    ///
    /// # Arguments
    /// * `config` - Run configuration
    /// * `logger` - Logger receiving per-pair summaries
    ///
    /// # Returns
    /// A RegionCropper instance or an error if the output format is unknown
    pub fn new(config: CropConfig, logger: &'a Logger) -> CropResult<Self> {
        let encoder = ImageEncoderFactory::create_encoder(&config.output_format)?;
        let annotations = DxfAnnotationReader::new().with_layer(config.layer.clone());

        Ok(RegionCropper {
            config,
            logger,
            annotations: Box::new(annotations),
            rasters: Box::new(GeoTiffReader::new()),
            encoder,
            show_progress: false,
        })
    }

    /// Replace the raster reader
    pub fn with_raster_reader(mut self, rasters: Box<dyn RasterReader>) -> Self {
        self.rasters = rasters;
        self
    }

    /// Replace the annotation reader
    pub fn with_annotation_reader(mut self, annotations: Box<dyn AnnotationReader>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Draw a progress bar over pairs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Crop every polygon of one annotation out of one raster
    ///
    /// # Arguments
    /// * `raster` - Path to the raster
    /// * `annotation` - Path to the annotation drawing
    ///
    /// # Returns
    /// The report for the pair; opening failures are recorded on it
    pub fn crop_pair(&self, raster: &Path, annotation: &Path) -> PairReport {
        let pair = DatasetPair::new(raster, annotation);
        let report = self.orchestrator().process_pair(&pair, self.annotations.as_ref(), self.rasters.as_ref());
        self.log_run_summary(std::slice::from_ref(&report));
        report
    }

    /// Pair the two directories and crop every pair
    ///
    /// # Arguments
    /// * `raster_dir` - Directory holding the rasters
    /// * `annotation_dir` - Directory holding one annotation sub-directory per raster
    ///
    /// # Returns
    /// One report per pair, or an error if a directory cannot be listed
    pub fn crop_directories(&self, raster_dir: &Path, annotation_dir: &Path) -> CropResult<Vec<PairReport>> {
        let pairs = pairing::pair_directories(raster_dir, annotation_dir, &self.config)?;
        Ok(self.crop_pairs(&pairs))
    }

    /// Crop a list of already matched pairs
    pub fn crop_pairs(&self, pairs: &[DatasetPair]) -> Vec<PairReport> {
        let progress = if self.show_progress {
            ProgressTracker::new(pairs.len() as u64, "Cropping regions")
        } else {
            ProgressTracker::hidden()
        };

        let orchestrator = self.orchestrator();
        let run_pair = |pair: &DatasetPair| {
            if let Some(name) = pair.annotation.file_name() {
                progress.set_message(&name.to_string_lossy());
            }
            let report = orchestrator.process_pair(pair, self.annotations.as_ref(), self.rasters.as_ref());
            progress.increment(1);
            report
        };

        let reports: Vec<PairReport> = if self.config.parallel {
            info!("Processing {} pair(s) in parallel", pairs.len());
            pairs.par_iter().map(run_pair).collect()
        } else {
            pairs.iter().map(run_pair).collect()
        };

        progress.finish();
        self.log_run_summary(&reports);
        reports
    }

    fn orchestrator(&self) -> ExportOrchestrator<'_> {
        ExportOrchestrator::new(self.encoder.as_ref(), self.logger).with_dry_run(self.config.dry_run)
    }

    fn log_run_summary(&self, reports: &[PairReport]) {
        let failed = reports.iter().filter(|r| r.is_failed()).count();
        let exported: usize = reports.iter().map(|r| r.exported_count() + r.planned_count()).sum();
        let skipped: usize = reports.iter().map(|r| r.skipped_count()).sum();

        info!(
            "Finished {} pair(s): {} image(s) exported, {} polygon(s) skipped, {} pair(s) skipped",
            reports.len(), exported, skipped, failed
        );
        if let Err(e) = self.logger.print_run_summary(reports.len(), failed, exported, skipped) {
            warn!("Failed to write run summary to log file: {}", e);
        }
    }
}
