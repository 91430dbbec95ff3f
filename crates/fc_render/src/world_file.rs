// crates/fc_render/src/world_file.rs

//! ESRI World File (`.pgw`)
//!
//! 六行文本：A D B E C F，其中 C/F 为左上角像素中心的坐标。
//! 让 PNG 在 GIS 软件中与源栅格保持同一范围。

use std::fs;
use std::path::{Path, PathBuf};

use fc_terrain::GeoTransform;

use crate::error::RenderResult;

/// PNG 对应的 world file 路径（`map.png` → `map.pgw`）
pub fn world_file_path(image_path: impl AsRef<Path>) -> PathBuf {
    image_path.as_ref().with_extension("pgw")
}

/// 生成 world file 内容
pub fn world_file_contents(transform: &GeoTransform) -> String {
    let [x0, a, b, y0, d, e] = transform.to_gdal();
    let c = x0 + 0.5 * a + 0.5 * b;
    let f = y0 + 0.5 * d + 0.5 * e;
    format!("{a}\n{d}\n{b}\n{e}\n{c}\n{f}\n")
}

/// 写出 world file，返回其路径
pub fn write_world_file(
    image_path: impl AsRef<Path>,
    transform: &GeoTransform,
) -> RenderResult<PathBuf> {
    let path = world_file_path(image_path);
    fs::write(&path, world_file_contents(transform))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path() {
        assert_eq!(world_file_path("out/flood_map.png"), PathBuf::from("out/flood_map.pgw"));
    }

    #[test]
    fn test_contents() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);
        let text = world_file_contents(&gt);
        let lines: Vec<f64> = text.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(lines, vec![10.0, 0.0, 0.0, -10.0, 105.0, 195.0]);
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("map.png");
        let written = write_world_file(&png, &GeoTransform::default()).unwrap();
        assert!(written.exists());
        assert_eq!(fs::read_to_string(written).unwrap().lines().count(), 6);
    }
}
