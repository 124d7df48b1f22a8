//! Path naming helpers
//!
//! Base names follow the "everything before the first dot" rule, so
//! `Quadra_01.v2.dxf` has the base name `Quadra_01`.

use std::path::{Path, PathBuf};

/// File name up to (not including) the first `.`
pub fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split_once('.') {
        Some((base, _)) => base.to_string(),
        None => file_name,
    }
}

/// Output path for polygon `index` of an annotation
///
/// The crop is placed next to the annotation as `<base>_<index>.<extension>`.
pub fn output_path(annotation: &Path, index: usize, extension: &str) -> PathBuf {
    let file_name = format!("{}_{}.{}", base_name(annotation), index, extension);
    match annotation.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Case-insensitive extension check against a list of accepted extensions
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
