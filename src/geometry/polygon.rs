//! Polygon outlines produced from geometry records

use super::record::GeometryRecord;
use crate::coordinate::{GeoTransform, PixelPoint, Point};

/// Ordered sequence of world coordinates outlining one region
///
/// The outline is not assumed to be closed and may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Project every vertex into the pixel space of a raster
    pub fn to_pixels<'a>(&'a self, transform: &'a GeoTransform) -> impl Iterator<Item = PixelPoint> + 'a {
        self.vertices.iter().map(move |v| transform.world_to_pixel(v))
    }
}

impl From<&GeometryRecord> for Polygon {
    fn from(record: &GeometryRecord) -> Self {
        Polygon::new(record.outline())
    }
}

/// Lazily turn geometry records into polygons, one per record, in order
pub fn polygons_from_records<'a, I>(records: I) -> impl Iterator<Item = Polygon> + 'a
where
    I: IntoIterator<Item = &'a GeometryRecord>,
    I::IntoIter: 'a,
{
    records.into_iter().map(Polygon::from)
}
