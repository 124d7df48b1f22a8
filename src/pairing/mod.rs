//! Pairing of raster files with their annotation drawings
//!
//! Rasters live flat in one directory. Annotations live in a second
//! directory, one sub-directory per raster named after the raster's base
//! name, e.g.
//!
//! ```text
//! rasters/ORTO_0412_.tif        annotations/ORTO_0412/Quadra_0412.dxf
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::CropConfig;
use crate::errors::CropResult;
use crate::utils::path_utils;


/// A raster and the annotation drawing that outlines regions on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPair {
    pub raster: PathBuf,
    pub annotation: PathBuf,
}

impl DatasetPair {
    pub fn new<R: Into<PathBuf>, A: Into<PathBuf>>(raster: R, annotation: A) -> Self {
        DatasetPair {
            raster: raster.into(),
            annotation: annotation.into(),
        }
    }
}

/// Key used to find a raster's annotation directory
///
/// The base name of the raster, with one trailing `_` removed when
/// `strip_trailing_underscore` is set.
pub fn raster_key(raster: &Path, strip_trailing_underscore: bool) -> String {
    let base = path_utils::base_name(raster);
    if strip_trailing_underscore {
        if let Some(stripped) = base.strip_suffix('_') {
            return stripped.to_string();
        }
    }
    base
}

/// Find the annotation drawing inside one annotation directory
///
/// Returns the first `.dxf` file, by name, whose name matches the
/// configured pattern.
pub fn find_annotation(dir: &Path, config: &CropConfig) -> CropResult<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<PathBuf> = sorted_files(dir)?
        .into_iter()
        .filter(|path| path_utils::has_extension(path, &["dxf".to_string()]))
        .filter(|path| {
            path.file_name()
                .map(|name| config.annotation_pattern.is_match(&name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    if candidates.is_empty() {
        return Ok(None);
    }
    Ok(Some(candidates.remove(0)))
}

/// Pair every raster in `raster_dir` with its annotation under `annotation_dir`
///
/// Rasters without an annotation are left out. Each annotation is paired
/// with at most one raster, the first by sorted path, since its crops are
/// written next to it. The result is sorted by annotation path.
pub fn pair_directories(raster_dir: &Path, annotation_dir: &Path, config: &CropConfig) -> CropResult<Vec<DatasetPair>> {
    info!("Pairing rasters in {} with annotations in {}", raster_dir.display(), annotation_dir.display());

    let mut by_annotation: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
    for raster in sorted_files(raster_dir)? {
        if !path_utils::has_extension(&raster, &config.raster_extensions) {
            continue;
        }

        let key = raster_key(&raster, config.strip_trailing_underscore);
        let subdir = annotation_dir.join(&key);
        let annotation = match find_annotation(&subdir, config)? {
            Some(annotation) => annotation,
            None => {
                debug!("No annotation for {} in {}", raster.display(), subdir.display());
                continue;
            }
        };

        match by_annotation.entry(annotation) {
            Entry::Vacant(slot) => {
                debug!("Paired {} with {}", raster.display(), slot.key().display());
                slot.insert(raster);
            }
            Entry::Occupied(slot) => warn!(
                "Ignoring {}: {} is already paired with {}",
                raster.display(),
                slot.key().display(),
                slot.get().display()
            ),
        }
    }

    let pairs: Vec<DatasetPair> = by_annotation
        .into_iter()
        .map(|(annotation, raster)| DatasetPair::new(raster, annotation))
        .collect();
    info!("Found {} raster/annotation pair(s)", pairs.len());
    Ok(pairs)
}

/// Regular files of a directory, sorted by path
fn sorted_files(dir: &Path) -> CropResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
