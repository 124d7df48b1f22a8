//! Annotation geometry normalization
//!
//! Annotation drawings outline regions with several entity shapes. This
//! module reduces each of them to a plain ordered list of vertices.

mod record;
mod polygon;


pub use record::GeometryRecord;
pub use polygon::{Polygon, polygons_from_records};
