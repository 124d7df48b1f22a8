//! End-to-end tests: GeoTIFF + DXF on disk in, cropped images out

extern crate std;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use dxf::entities::{Entity, EntityType, Polyline, Vertex};
use dxf::Drawing;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

use regioncrop::utils::logger::Logger;
use regioncrop::{CropConfig, ExportResult, RegionCropper, SkipReason};

/// Directory under the system temp dir, removed again on drop
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("regioncrop_it_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&path).ok();
        fs::create_dir_all(&path).unwrap();
        ScratchDir { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.path).ok();
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 30x30 RGB raster with 0.5 unit pixels whose top-left corner is (1000, 2000)
///
/// Pixel (row, col) holds [row, col, row + col].
fn write_orthophoto(path: &Path, georeferenced: bool) {
    let (width, height) = (30u32, 30u32);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for row in 0..height {
        for col in 0..width {
            data.extend_from_slice(&[row as u8, col as u8, (row + col) as u8]);
        }
    }

    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
    let mut image = encoder.new_image::<colortype::RGB8>(width, height).unwrap();
    image.rows_per_strip(7).unwrap();
    if georeferenced {
        let pixel_scale = [0.5f64, 0.5, 0.0];
        let tiepoint = [0.0f64, 0.0, 0.0, 1000.0, 2000.0, 0.0];
        image.encoder().write_tag(Tag::ModelPixelScaleTag, &pixel_scale[..]).unwrap();
        image.encoder().write_tag(Tag::ModelTiepointTag, &tiepoint[..]).unwrap();
    }
    image.write_data(&data).unwrap();
}

/// Save a drawing with one closed polyline per rectangle (min_x, min_y, max_x, max_y)
fn write_annotation(path: &Path, boxes: &[(f64, f64, f64, f64)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut drawing = Drawing::new();
    for &(min_x, min_y, max_x, max_y) in boxes {
        let mut polyline = Polyline::default();
        for (x, y) in [(min_x, max_y), (max_x, max_y), (max_x, min_y), (min_x, min_y)] {
            polyline.add_vertex(&mut drawing, Vertex::new(dxf::Point::new(x, y, 0.0)));
        }
        drawing.add_entity(Entity::new(EntityType::Polyline(polyline)));
    }

    let mut file = BufWriter::new(File::create(path).unwrap());
    drawing.save(&mut file).unwrap();
}

#[test]
fn test_directory_batch_crops_every_pair() {
    init_logging();
    let root = ScratchDir::new("directory_batch_crops_every_pair");
    let rasters = root.path().join("rasters");
    let annotations = root.path().join("annotations");
    fs::create_dir_all(&rasters).unwrap();

    write_orthophoto(&rasters.join("ORTO_01_.tif"), true);
    write_orthophoto(&rasters.join("ORTO_02.tif"), false);
    write_orthophoto(&rasters.join("ORTO_03.tif"), true);

    // Pixels 4..14 across and 8..20 down, then a box west of the raster, then pixels 20..26 x 2..6
    let first = annotations.join("ORTO_01").join("Quadra_01.dxf");
    write_annotation(&first, &[
        (1002.0, 1990.0, 1007.0, 1996.0),
        (990.0, 1990.0, 995.0, 1995.0),
        (1010.0, 1997.0, 1013.0, 1999.0),
    ]);
    let second = annotations.join("ORTO_02").join("Quadra_02.dxf");
    write_annotation(&second, &[(1002.0, 1990.0, 1007.0, 1996.0)]);
    // Name does not match the annotation pattern
    write_annotation(&annotations.join("ORTO_03").join("Lote_03.dxf"), &[(1002.0, 1990.0, 1007.0, 1996.0)]);

    let logger = Logger::disabled();
    let cropper = RegionCropper::new(CropConfig::default(), &logger).unwrap();
    let reports = cropper.crop_directories(&rasters, &annotations).unwrap();

    std::assert_eq!(reports.len(), 2);

    let report = &reports[0];
    std::assert_eq!(report.annotation, first);
    std::assert!(!report.is_failed());
    std::assert_eq!(report.exported_count(), 2);
    std::assert!(matches!(
        &report.results[1],
        ExportResult::Skipped { index: 2, reason: SkipReason::ReadFailed(_) }
    ));

    let crop = image::open(first.with_file_name("Quadra_01_1.png")).unwrap().to_rgb8();
    std::assert_eq!(crop.dimensions(), (10, 12));
    std::assert_eq!(crop.get_pixel(0, 0).0, [8, 4, 12]);
    std::assert_eq!(crop.get_pixel(9, 11).0, [19, 13, 32]);
    std::assert!(!first.with_file_name("Quadra_01_2.png").exists());

    let small = image::open(first.with_file_name("Quadra_01_3.png")).unwrap().to_rgb8();
    std::assert_eq!(small.dimensions(), (6, 4));
    std::assert_eq!(small.get_pixel(0, 0).0, [2, 20, 22]);

    // No georeferencing: the pair is skipped, the batch is not
    std::assert_eq!(reports[1].annotation, second);
    std::assert!(reports[1].is_failed());
    std::assert!(!second.with_file_name("Quadra_02_1.png").exists());
}

#[test]
fn test_parallel_tiff_output_matches_sequential_naming() {
    init_logging();
    let root = ScratchDir::new("parallel_tiff_output_matches_sequential_naming");
    let rasters = root.path().join("rasters");
    let annotations = root.path().join("annotations");
    fs::create_dir_all(&rasters).unwrap();

    for name in ["A", "B", "C"] {
        write_orthophoto(&rasters.join(format!("{}.tif", name)), true);
        write_annotation(
            &annotations.join(name).join(format!("Quadra_{}.dxf", name)),
            &[(1002.0, 1990.0, 1007.0, 1996.0)],
        );
    }

    let mut config = CropConfig::default();
    config.set_output_format("tif").unwrap();
    config.parallel = true;

    let logger = Logger::disabled();
    let cropper = RegionCropper::new(config, &logger).unwrap();
    let reports = cropper.crop_directories(&rasters, &annotations).unwrap();

    std::assert_eq!(reports.len(), 3);
    for (report, name) in reports.iter().zip(["A", "B", "C"]) {
        std::assert!(report.annotation.ends_with(format!("Quadra_{}.dxf", name)));
        std::assert_eq!(report.exported_count(), 1);

        let output = annotations.join(name).join(format!("Quadra_{}_1.tif", name));
        let mut decoder = tiff::decoder::Decoder::new(File::open(&output).unwrap()).unwrap();
        std::assert_eq!(decoder.dimensions().unwrap(), (10, 12));
    }
}

#[test]
fn test_single_pair_dry_run_writes_nothing() {
    init_logging();
    let root = ScratchDir::new("single_pair_dry_run_writes_nothing");
    let raster = root.path().join("ortho.tif");
    let annotation = root.path().join("Quadra.dxf");
    write_orthophoto(&raster, true);
    write_annotation(&annotation, &[(1002.0, 1990.0, 1007.0, 1996.0), (1004.0, 1990.0, 1004.2, 1996.0)]);

    let mut config = CropConfig::default();
    config.dry_run = true;

    let logger = Logger::disabled();
    let cropper = RegionCropper::new(config, &logger).unwrap();
    let report = cropper.crop_pair(&raster, &annotation);

    std::assert_eq!(report.planned_count(), 1);
    std::assert_eq!(report.exported_count(), 0);
    std::assert!(matches!(
        &report.results[1],
        ExportResult::Skipped { index: 2, reason: SkipReason::DegenerateWindow }
    ));
    std::assert!(!root.path().join("Quadra_1.png").exists());
}
