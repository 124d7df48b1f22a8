//! DXF drawing reader
//!
//! Walks the model space entities of a DXF drawing and keeps polylines,
//! splines and 3D faces. Everything else in the drawing is ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dxf::entities::{Entity, EntityType};
use dxf::Drawing;
use log::{debug, info};

use super::reader::AnnotationReader;
use crate::coordinate::Point;
use crate::errors::CropResult;
use crate::geometry::GeometryRecord;

/// Annotation reader for AutoCAD DXF drawings
#[derive(Debug, Clone, Default)]
pub struct DxfAnnotationReader {
    /// Only keep entities on this layer, when set
    layer: Option<String>,
}

impl DxfAnnotationReader {
    pub fn new() -> Self {
        DxfAnnotationReader { layer: None }
    }

    /// Restrict extraction to entities on a single layer
    pub fn with_layer(mut self, layer: Option<String>) -> Self {
        self.layer = layer;
        self
    }
}

impl AnnotationReader for DxfAnnotationReader {
    fn read_records(&self, path: &Path) -> CropResult<Vec<GeometryRecord>> {
        info!("Reading annotation drawing: {}", path.display());

        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        let drawing = Drawing::load(&mut reader)?;

        let records = records_from_drawing(&drawing, self.layer.as_deref());
        info!("Found {} region records in {}", records.len(), path.display());
        Ok(records)
    }

    fn supports_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(|ext| ext.eq_ignore_ascii_case("dxf"))
            .unwrap_or(false)
    }
}

/// Collect the region records of a loaded drawing
///
/// # Arguments
/// * `drawing` - The parsed drawing
/// * `layer` - Optional layer name; entities on other layers are skipped
///
/// # Returns
/// Records for every model space polyline, spline and 3D face, in drawing order
pub fn records_from_drawing(drawing: &Drawing, layer: Option<&str>) -> Vec<GeometryRecord> {
    drawing
        .entities()
        .filter(|entity| !entity.common.is_in_paper_space)
        .filter(|entity| layer.map_or(true, |name| entity.common.layer == name))
        .filter_map(entity_to_record)
        .collect()
}

fn entity_to_record(entity: &Entity) -> Option<GeometryRecord> {
    match &entity.specific {
        EntityType::Polyline(polyline) => {
            let vertices = polyline
                .vertices()
                .map(|v| to_point(&v.location))
                .collect();
            Some(GeometryRecord::Polyline { vertices })
        }
        EntityType::Spline(spline) => Some(GeometryRecord::Spline {
            fit_points: spline.fit_points.iter().map(to_point).collect(),
            control_points: spline.control_points.iter().map(to_point).collect(),
        }),
        EntityType::Face3D(face) => Some(GeometryRecord::TriangleFace {
            corners: [
                to_point(&face.first_corner),
                to_point(&face.second_corner),
                to_point(&face.third_corner),
                to_point(&face.fourth_corner),
            ],
        }),
        _ => {
            debug!("Ignoring non-region entity on layer '{}'", entity.common.layer);
            None
        }
    }
}

fn to_point(p: &dxf::Point) -> Point {
    Point::from_xyz(p.x, p.y, p.z)
}
