//! Tests for the DXF annotation reader

extern crate std;

use dxf::entities::{Circle, Entity, EntityType, Face3D, Polyline, Spline, Vertex};
use dxf::Drawing;

use crate::annotation::{records_from_drawing, AnnotationReader, DxfAnnotationReader};
use crate::coordinate::Point;
use crate::geometry::GeometryRecord;

fn dxf_point(x: f64, y: f64, z: f64) -> dxf::Point {
    dxf::Point::new(x, y, z)
}

fn polyline_entity(drawing: &mut Drawing, coords: &[(f64, f64, f64)]) -> Entity {
    let mut polyline = Polyline::default();
    for &(x, y, z) in coords {
        polyline.add_vertex(drawing, Vertex::new(dxf_point(x, y, z)));
    }
    Entity::new(EntityType::Polyline(polyline))
}

#[test]
fn test_polyline_drops_elevation() {
    let mut drawing = Drawing::new();
    let entity = polyline_entity(&mut drawing, &[(1.0, 2.0, 30.0), (3.0, 4.0, 31.0)]);
    drawing.add_entity(entity);

    let records = records_from_drawing(&drawing, None);
    std::assert_eq!(records, vec![GeometryRecord::Polyline {
        vertices: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
    }]);
}

#[test]
fn test_spline_keeps_both_point_lists() {
    let mut drawing = Drawing::new();
    let mut spline = Spline::default();
    spline.fit_points.push(dxf_point(1.0, 1.0, 0.0));
    spline.control_points.push(dxf_point(5.0, 5.0, 0.0));
    spline.control_points.push(dxf_point(6.0, 6.0, 0.0));
    drawing.add_entity(Entity::new(EntityType::Spline(spline)));

    let records = records_from_drawing(&drawing, None);
    std::assert_eq!(records.len(), 1);
    std::assert_eq!(records[0].outline(), vec![Point::new(1.0, 1.0)]);
}

#[test]
fn test_face_keeps_corner_order() {
    let mut drawing = Drawing::new();
    let mut face = Face3D::default();
    face.first_corner = dxf_point(0.0, 0.0, 0.0);
    face.second_corner = dxf_point(2.0, 0.0, 0.0);
    face.third_corner = dxf_point(2.0, 2.0, 0.0);
    face.fourth_corner = dxf_point(2.0, 2.0, 0.0);
    drawing.add_entity(Entity::new(EntityType::Face3D(face)));

    let records = records_from_drawing(&drawing, None);
    std::assert_eq!(records[0].outline(), vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 2.0),
    ]);
}

#[test]
fn test_other_entities_are_ignored() {
    let mut drawing = Drawing::new();
    drawing.add_entity(Entity::new(EntityType::Circle(Circle::default())));
    let entity = polyline_entity(&mut drawing, &[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)]);
    drawing.add_entity(entity);

    let records = records_from_drawing(&drawing, None);
    std::assert_eq!(records.len(), 1);
    std::assert_eq!(records[0].kind(), "polyline");
}

#[test]
fn test_layer_filter() {
    let mut drawing = Drawing::new();
    let mut on_layer = polyline_entity(&mut drawing, &[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)]);
    on_layer.common.layer = "REGIONS".to_string();
    drawing.add_entity(on_layer);
    let other = polyline_entity(&mut drawing, &[(5.0, 5.0, 0.0), (6.0, 6.0, 0.0)]);
    drawing.add_entity(other);

    std::assert_eq!(records_from_drawing(&drawing, None).len(), 2);
    let filtered = records_from_drawing(&drawing, Some("REGIONS"));
    std::assert_eq!(filtered.len(), 1);
    std::assert_eq!(filtered[0].outline()[0], Point::new(0.0, 0.0));
}

#[test]
fn test_supports_format() {
    let reader = DxfAnnotationReader::new();
    std::assert!(reader.supports_format(std::path::Path::new("Quadra_01.dxf")));
    std::assert!(reader.supports_format(std::path::Path::new("QUADRA.DXF")));
    std::assert!(!reader.supports_format(std::path::Path::new("Quadra_01.dwg")));
}

#[test]
fn test_missing_file_is_an_error() {
    let reader = DxfAnnotationReader::new();
    std::assert!(reader.read_records(std::path::Path::new("/nonexistent/region.dxf")).is_err());
}
