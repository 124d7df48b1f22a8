//! Tests for world file parsing

extern crate std;

use std::fs;

use crate::raster::world_file::{find_world_file, parse_world_file};
use crate::utils::scratch::ScratchDir;

#[test]
fn test_parse_world_file_shifts_to_corner() {
    let content = "0.5\n0.0\n0.0\n-0.5\n1000.25\n1999.75\n";
    let gt = parse_world_file(content).unwrap();
    std::assert_eq!(gt.coefficients(), [1000.0, 0.5, 0.0, 2000.0, 0.0, -0.5]);
}

#[test]
fn test_parse_world_file_tolerates_blank_lines() {
    let content = "  2.0\n\n0\n0\n-2.0\n101\n  199 \n";
    let gt = parse_world_file(content).unwrap();
    std::assert_eq!(gt.origin_x, 100.0);
    std::assert_eq!(gt.origin_y, 200.0);
}

#[test]
fn test_parse_world_file_errors() {
    std::assert!(parse_world_file("1\n0\n0\n-1\n").is_err());
    std::assert!(parse_world_file("1\n0\nabc\n-1\n0\n0\n").is_err());
}

#[test]
fn test_find_world_file_next_to_raster() {
    let dir = ScratchDir::new("find_world_file_next_to_raster");
    let raster = dir.path().join("ortho.tif");
    std::assert!(find_world_file(&raster).unwrap().is_none());

    fs::write(dir.path().join("ortho.tfw"), "1\n0\n0\n-1\n10.5\n20.5\n").unwrap();
    let gt = find_world_file(&raster).unwrap().unwrap();
    std::assert_eq!(gt.origin_x, 10.0);
    std::assert_eq!(gt.origin_y, 21.0);
}
