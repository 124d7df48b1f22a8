//! Crop extraction and export
//!
//! This module reads pixel windows out of a raster, encodes them with a
//! pluggable image encoder strategy, and orchestrates the per-polygon
//! pipeline for each (raster, annotation) pair.

mod window_extractor;
mod encoder_strategy;
mod export;


pub use window_extractor::extract_window;
pub use encoder_strategy::{ImageEncoder, ImageEncoderFactory, PngImageEncoder, TiffImageEncoder};
pub use export::{ExportOrchestrator, ExportResult, PairReport, SkipReason};
