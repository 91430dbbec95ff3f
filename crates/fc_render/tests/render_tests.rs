// crates/fc_render/tests/render_tests.rs

//! 渲染到文件

use fc_inference::DepthGrid;
use fc_render::{OverlayRenderer, OverlayStyle};
use fc_terrain::{ElevationGrid, GeoTransform};
use ndarray::Array2;

fn scene() -> (ElevationGrid, DepthGrid) {
    let elevation = ElevationGrid::from_raw(
        Array2::from_shape_fn((4, 6), |(r, c)| (r + c) as f64 * 0.5),
        GeoTransform::new(500_000.0, 9_250_000.0, 30.0, -30.0),
        None,
    );
    let depth = DepthGrid::from_values(Array2::from_shape_fn((4, 6), |(r, c)| {
        if r + c < 3 {
            40.0
        } else {
            -10.0
        }
    }));
    (elevation, depth)
}

#[test]
fn writes_png_and_world_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("maps").join("flood_map.png");
    let (elevation, depth) = scene();

    let summary = OverlayRenderer::default()
        .render_to_file(&out, &elevation, &depth)
        .unwrap();

    assert!(out.exists());
    assert_eq!((summary.width, summary.height), (6, 4));
    assert_eq!(summary.flooded_pixels, 6);

    let wf = summary.world_file.unwrap();
    let lines: Vec<f64> = std::fs::read_to_string(wf)
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(lines[0], 30.0);
    assert_eq!(lines[3], -30.0);
    assert_eq!(lines[4], 500_015.0);
    assert_eq!(lines[5], 9_249_985.0);

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 4));
}

#[test]
fn world_file_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("flood_map.png");
    let (elevation, depth) = scene();

    let summary = OverlayRenderer::new(OverlayStyle::default())
        .unwrap()
        .with_world_file(false)
        .render_to_file(&out, &elevation, &depth)
        .unwrap();

    assert!(summary.world_file.is_none());
    assert!(!dir.path().join("flood_map.pgw").exists());
}

#[test]
fn writes_depth_legend_beside_map() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("flood_map.png");
    let (elevation, depth) = scene();

    let summary = OverlayRenderer::default()
        .render_to_file(&out, &elevation, &depth)
        .unwrap();

    assert_eq!(summary.legend.label, "积水深度 (cm)");
    assert_eq!((summary.legend.vmin, summary.legend.vmax), (0.0, 100.0));
    let legend = summary.legend_path.unwrap();
    assert_eq!(legend, dir.path().join("flood_map_legend.png"));

    let ramp = image::open(&legend).unwrap().to_rgba8();
    assert!(ramp.height() > ramp.width());
    // 顶部深水偏蓝，底部浅水偏红
    let top = ramp.get_pixel(0, 0);
    let bottom = ramp.get_pixel(0, ramp.height() - 1);
    assert!(top[2] > top[0]);
    assert!(bottom[0] > bottom[2]);

    // 叠加图尺寸不受色标影响
    assert_eq!(image::open(&out).unwrap().to_rgba8().dimensions(), (6, 4));
}

#[test]
fn legend_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("flood_map.png");
    let (elevation, depth) = scene();

    let summary = OverlayRenderer::default()
        .with_legend(false)
        .render_to_file(&out, &elevation, &depth)
        .unwrap();

    assert!(summary.legend_path.is_none());
    assert!(!dir.path().join("flood_map_legend.png").exists());
}
