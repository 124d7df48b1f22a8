pub mod errors;
pub mod config;
pub mod coordinate;
pub mod geometry;
pub mod annotation;
pub mod raster;
pub mod extractor;
pub mod pairing;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::RegionCropper;
pub use crate::config::CropConfig;
pub use crate::errors::{CropError, CropResult};

pub use annotation::{AnnotationReader, DxfAnnotationReader};
pub use coordinate::{GeoTransform, PixelWindow, Point};
pub use extractor::{ExportOrchestrator, ExportResult, PairReport, SkipReason};
pub use geometry::{GeometryRecord, Polygon};
pub use pairing::DatasetPair;
pub use raster::{GeoTiffReader, RasterDataset, RasterReader};
