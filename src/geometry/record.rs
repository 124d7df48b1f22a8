//! Geometry records read from an annotation drawing

use crate::coordinate::Point;

/// A region-outlining entity in its native representation
///
/// The set of shapes is closed; readers map anything else in a drawing to
/// nothing rather than to a record.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryRecord {
    /// Vertex sequence of a polyline, in drawing order
    Polyline {
        vertices: Vec<Point>,
    },
    /// Spline with its optional fit points and its control points
    Spline {
        fit_points: Vec<Point>,
        control_points: Vec<Point>,
    },
    /// Four-cornered face; the fourth corner repeats the third for triangles
    TriangleFace {
        corners: [Point; 4],
    },
}

impl GeometryRecord {
    /// Short name used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryRecord::Polyline { .. } => "polyline",
            GeometryRecord::Spline { .. } => "spline",
            GeometryRecord::TriangleFace { .. } => "face",
        }
    }

    /// Ordered outline vertices of this record
    ///
    /// Splines use their fit points when they have any and their control
    /// points otherwise; the two lists are never merged.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            GeometryRecord::Polyline { vertices } => vertices.clone(),
            GeometryRecord::Spline { fit_points, control_points } => {
                if !fit_points.is_empty() {
                    fit_points.clone()
                } else {
                    control_points.clone()
                }
            }
            GeometryRecord::TriangleFace { corners } => corners.to_vec(),
        }
    }
}
