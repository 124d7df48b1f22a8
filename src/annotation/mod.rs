//! Annotation drawing readers
//!
//! Readers open a vector drawing and hand back the region-outlining
//! geometry records it contains.

mod reader;
mod dxf_reader;

#[cfg(test)]
mod tests;

pub use reader::AnnotationReader;
pub use dxf_reader::{records_from_drawing, DxfAnnotationReader};
