//! Per-pair export orchestration
//!
//! Drives the geometry-to-pixel pipeline for one (raster, annotation) pair:
//! every polygon is transformed, windowed, read and written on its own, and
//! its outcome is recorded as a value. Nothing that goes wrong with one
//! polygon stops the next one, and nothing that goes wrong with one pair
//! stops the next pair.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::encoder_strategy::ImageEncoder;
use super::window_extractor::extract_window;
use crate::annotation::AnnotationReader;
use crate::coordinate::{PixelWindow, WindowRejection};
use crate::geometry::{polygons_from_records, Polygon};
use crate::pairing::DatasetPair;
use crate::raster::{RasterDataset, RasterReader};
use crate::utils::logger::Logger;
use crate::utils::path_utils;

/// Why a polygon produced no image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The polygon had no vertices
    EmptyGeometry,
    /// The pixel bounding box has zero width or height
    DegenerateWindow,
    /// The pixel bounding box is wider or taller than any raster can be
    WindowTooLarge,
    /// The raster window could not be read
    ReadFailed(String),
    /// The image could not be encoded or written
    WriteFailed(String),
}

impl From<WindowRejection> for SkipReason {
    fn from(rejection: WindowRejection) -> Self {
        match rejection {
            WindowRejection::EmptyGeometry => SkipReason::EmptyGeometry,
            WindowRejection::DegenerateWindow => SkipReason::DegenerateWindow,
            WindowRejection::WindowTooLarge => SkipReason::WindowTooLarge,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyGeometry => write!(f, "empty geometry"),
            SkipReason::DegenerateWindow => write!(f, "degenerate window"),
            SkipReason::WindowTooLarge => write!(f, "window too large"),
            SkipReason::ReadFailed(msg) => write!(f, "raster read failed: {}", msg),
            SkipReason::WriteFailed(msg) => write!(f, "image write failed: {}", msg),
        }
    }
}

/// Outcome for one polygon; `index` is 1-based
#[derive(Debug, Clone, PartialEq)]
pub enum ExportResult {
    /// The crop was written to `path`
    Exported { index: usize, path: PathBuf, window: PixelWindow },
    /// Dry run: the crop would have been written to `path`
    Planned { index: usize, path: PathBuf, window: PixelWindow },
    /// The polygon was skipped
    Skipped { index: usize, reason: SkipReason },
}

impl ExportResult {
    pub fn index(&self) -> usize {
        match self {
            ExportResult::Exported { index, .. }
            | ExportResult::Planned { index, .. }
            | ExportResult::Skipped { index, .. } => *index,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ExportResult::Skipped { .. })
    }

    /// Output path for exported or planned crops
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportResult::Exported { path, .. } | ExportResult::Planned { path, .. } => Some(path),
            ExportResult::Skipped { .. } => None,
        }
    }
}

/// Everything that happened to one (raster, annotation) pair
#[derive(Debug, Clone)]
pub struct PairReport {
    pub raster: PathBuf,
    pub annotation: PathBuf,
    /// Per-polygon outcomes in polygon order
    pub results: Vec<ExportResult>,
    /// Set when the pair could not be processed at all
    pub failure: Option<String>,
}

impl PairReport {
    fn new(pair: &DatasetPair) -> Self {
        PairReport {
            raster: pair.raster.clone(),
            annotation: pair.annotation.clone(),
            results: Vec::new(),
            failure: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn exported_count(&self) -> usize {
        self.results.iter().filter(|r| matches!(r, ExportResult::Exported { .. })).count()
    }

    pub fn planned_count(&self) -> usize {
        self.results.iter().filter(|r| matches!(r, ExportResult::Planned { .. })).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        match &self.failure {
            Some(reason) => format!(
                "{}: pair skipped ({})",
                self.annotation.display(), reason
            ),
            None => format!(
                "{}: {} exported, {} planned, {} skipped",
                self.annotation.display(),
                self.exported_count(),
                self.planned_count(),
                self.skipped_count()
            ),
        }
    }
}

/// Runs the per-polygon pipeline and writes crops through an encoder
pub struct ExportOrchestrator<'a> {
    /// Encoder used for every crop
    encoder: &'a dyn ImageEncoder,
    /// Logger for recording per-pair summaries
    logger: &'a Logger,
    /// Compute windows and paths without reading or writing pixels
    dry_run: bool,
}

impl<'a> ExportOrchestrator<'a> {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `encoder` - Image encoder for the crops
    /// * `logger` - Logger for recording operations
    pub fn new(encoder: &'a dyn ImageEncoder, logger: &'a Logger) -> Self {
        ExportOrchestrator { encoder, logger, dry_run: false }
    }

    /// Only plan the exports, writing nothing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process one pair: open both files, then export every polygon
    ///
    /// Failure to open either file is recorded on the report; it is never
    /// returned as an error.
    pub fn process_pair(
        &self,
        pair: &DatasetPair,
        annotations: &dyn AnnotationReader,
        rasters: &dyn RasterReader,
    ) -> PairReport {
        info!("Processing {} with {}", pair.annotation.display(), pair.raster.display());
        let mut report = PairReport::new(pair);

        let records = match annotations.read_records(&pair.annotation) {
            Ok(records) => records,
            Err(e) => {
                warn!("Skipping pair: cannot read annotation {}: {}", pair.annotation.display(), e);
                report.failure = Some(format!("annotation unreadable: {}", e));
                self.log_summary(&report);
                return report;
            }
        };

        let mut dataset = match rasters.open(&pair.raster) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!("Skipping pair: cannot open raster {}: {}", pair.raster.display(), e);
                report.failure = Some(format!("raster unreadable: {}", e));
                self.log_summary(&report);
                return report;
            }
        };

        report.results = self.export_polygons(dataset.as_mut(), polygons_from_records(&records), &pair.annotation);
        self.log_summary(&report);
        report
    }

    /// Export every polygon of one annotation from an open raster
    ///
    /// # Arguments
    /// * `dataset` - Open raster the polygons are cropped from
    /// * `polygons` - Polygons in annotation order
    /// * `annotation` - Annotation file path, used for naming and placing outputs
    ///
    /// # Returns
    /// One result per polygon, indexed from 1
    pub fn export_polygons<I>(&self, dataset: &mut dyn RasterDataset, polygons: I, annotation: &Path) -> Vec<ExportResult>
    where
        I: IntoIterator<Item = Polygon>,
    {
        let mut results = Vec::new();
        for (i, polygon) in polygons.into_iter().enumerate() {
            results.push(self.export_polygon(dataset, &polygon, i + 1, annotation));
        }
        results
    }

    /// Export a single polygon
    pub fn export_polygon(&self, dataset: &mut dyn RasterDataset, polygon: &Polygon, index: usize, annotation: &Path) -> ExportResult {
        let transform = *dataset.geo_transform();

        let window = match PixelWindow::from_pixels(polygon.to_pixels(&transform)) {
            Ok(window) => window,
            Err(rejection) => return self.skip(index, annotation, rejection.into()),
        };
        debug!("Polygon {} of {} maps to window {}", index, annotation.display(), window);

        let path = path_utils::output_path(annotation, index, self.encoder.extension());

        if self.dry_run {
            info!("Would save polygon {} to {}", index, path.display());
            return ExportResult::Planned { index, path, window };
        }

        let pixels = match extract_window(dataset, &window) {
            Ok(pixels) => pixels,
            Err(e) => return self.skip(index, annotation, SkipReason::ReadFailed(e.to_string())),
        };

        if !self.encoder.supports(&pixels) {
            let reason = format!(
                "{} output cannot hold {} band(s) of {} samples",
                self.encoder.extension(),
                pixels.bands(),
                pixels.sample_type()
            );
            return self.skip(index, annotation, SkipReason::WriteFailed(reason));
        }

        if let Err(e) = self.encoder.encode_to_file(&pixels, &path) {
            return self.skip(index, annotation, SkipReason::WriteFailed(e.to_string()));
        }

        info!("Image saved to {}", path.display());
        ExportResult::Exported { index, path, window }
    }

    fn skip(&self, index: usize, annotation: &Path, reason: SkipReason) -> ExportResult {
        warn!("Skipping polygon {} in {}: {}", index, annotation.display(), reason);
        ExportResult::Skipped { index, reason }
    }

    fn log_summary(&self, report: &PairReport) {
        if let Err(e) = self.logger.log(&report.summary()) {
            warn!("Failed to write pair summary to log file: {}", e);
        }
    }
}
