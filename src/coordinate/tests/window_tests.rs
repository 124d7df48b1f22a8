//! Tests for the bounding window builder

extern crate std;

use crate::coordinate::{PixelPoint, PixelWindow, WindowRejection};

fn pixels(coords: &[(i64, i64)]) -> Vec<PixelPoint> {
    coords.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect()
}

#[test]
fn test_window_from_box() {
    let window = PixelWindow::from_pixels(pixels(&[(10, 10), (20, 10), (20, 20), (10, 20)])).unwrap();
    std::assert_eq!(window.min_x(), 10);
    std::assert_eq!(window.min_y(), 10);
    std::assert_eq!(window.width(), 10);
    std::assert_eq!(window.height(), 10);
    std::assert_eq!(window.area(), 100);
}

#[test]
fn test_window_contains_every_vertex() {
    let points = pixels(&[(3, 17), (-4, 2), (11, 9), (0, 0), (7, -3)]);
    let window = PixelWindow::from_pixels(points.clone()).unwrap();

    std::assert!(window.width() > 0 && window.height() > 0);
    for p in points {
        std::assert!(window.min_x() <= p.px && p.px <= window.end_x());
        std::assert!(window.min_y() <= p.py && p.py <= window.end_y());
    }
}

#[test]
fn test_empty_polygon_is_rejected() {
    let result = PixelWindow::from_pixels(Vec::new());
    std::assert_eq!(result, Err(WindowRejection::EmptyGeometry));
    std::assert_eq!(WindowRejection::EmptyGeometry.to_string(), "empty geometry");
}

#[test]
fn test_shared_column_is_degenerate() {
    let result = PixelWindow::from_pixels(pixels(&[(5, 1), (5, 9), (5, 4)]));
    std::assert_eq!(result, Err(WindowRejection::DegenerateWindow));
    std::assert_eq!(WindowRejection::DegenerateWindow.to_string(), "degenerate window");
}

#[test]
fn test_shared_row_is_degenerate() {
    let result = PixelWindow::from_pixels(pixels(&[(1, 8), (9, 8)]));
    std::assert_eq!(result, Err(WindowRejection::DegenerateWindow));
}

#[test]
fn test_single_point_is_degenerate() {
    let result = PixelWindow::from_pixels(pixels(&[(4, 4)]));
    std::assert_eq!(result, Err(WindowRejection::DegenerateWindow));
}

#[test]
fn test_fits_within() {
    let window = PixelWindow::new(0, 0, 10, 10).unwrap();
    std::assert!(window.fits_within(10, 10));
    std::assert!(!window.fits_within(9, 10));

    let negative = PixelWindow::new(-1, 0, 5, 5).unwrap();
    std::assert!(!negative.fits_within(100, 100));
}

#[test]
fn test_new_rejects_zero_size() {
    std::assert!(PixelWindow::new(0, 0, 0, 5).is_none());
    std::assert!(PixelWindow::new(0, 0, 5, 0).is_none());
}

#[test]
fn test_oversized_extent_is_too_large() {
    let wide = PixelWindow::from_pixels(pixels(&[(0, 0), (i64::from(u32::MAX) + 1, 5)]));
    std::assert_eq!(wide, Err(WindowRejection::WindowTooLarge));

    // Saturated coordinates from far-away geometry must not overflow
    let extreme = PixelWindow::from_pixels(pixels(&[(i64::MIN, 0), (i64::MAX, 5)]));
    std::assert_eq!(extreme, Err(WindowRejection::WindowTooLarge));

    let widest = PixelWindow::from_pixels(pixels(&[(0, 0), (i64::from(u32::MAX), 5)])).unwrap();
    std::assert_eq!(widest.width(), u32::MAX);
}
