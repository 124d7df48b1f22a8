//! Annotation reader interface

use std::path::Path;

use crate::errors::CropResult;
use crate::geometry::GeometryRecord;

/// Source of geometry records for one annotation file
///
/// Failing to open or parse the file is fatal for that file only; callers
/// report it and move on to the next pair.
pub trait AnnotationReader: Send + Sync {
    /// Read all region records of the drawing, in drawing order
    fn read_records(&self, path: &Path) -> CropResult<Vec<GeometryRecord>>;

    /// Check if this reader understands the given file
    fn supports_format(&self, path: &Path) -> bool;
}
