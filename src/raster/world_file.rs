//! ESRI world file (.tfw) sidecar support
//!
//! A world file holds six lines: pixel width, row rotation, column
//! rotation, pixel height, and the world coordinates of the *centre* of
//! the top-left pixel.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::coordinate::GeoTransform;
use crate::errors::{CropError, CropResult};

/// Candidate world file paths for a raster, in lookup order
pub fn candidate_paths(raster_path: &Path) -> Vec<PathBuf> {
    ["tfw", "tifw", "wld", "TFW", "TIFW", "WLD"]
        .iter()
        .map(|ext| raster_path.with_extension(ext))
        .collect()
}

/// Parse the contents of a world file into a geotransform
pub fn parse_world_file(content: &str) -> CropResult<GeoTransform> {
    let values: Vec<f64> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(6)
        .map(|line| {
            line.parse::<f64>()
                .map_err(|_| CropError::RasterError(format!("Invalid world file value: {}", line)))
        })
        .collect::<CropResult<_>>()?;

    if values.len() < 6 {
        return Err(CropError::RasterError(format!(
            "World file needs 6 values, found {}",
            values.len()
        )));
    }

    let (a, d, b, e, c, f) = (values[0], values[1], values[2], values[3], values[4], values[5]);

    // Shift from pixel centre to pixel corner
    Ok(GeoTransform::from_coefficients([
        c - a / 2.0 - b / 2.0,
        a,
        b,
        f - d / 2.0 - e / 2.0,
        d,
        e,
    ]))
}

/// Look for a world file next to the raster and parse the first one found
pub fn find_world_file(raster_path: &Path) -> CropResult<Option<GeoTransform>> {
    for candidate in candidate_paths(raster_path) {
        if candidate.is_file() {
            debug!("Using world file {}", candidate.display());
            let content = fs::read_to_string(&candidate)?;
            return parse_world_file(&content).map(Some);
        }
    }
    Ok(None)
}
