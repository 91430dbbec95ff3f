// crates/fc_terrain/src/transform.rs

//! 仿射变换（栅格坐标 ↔ 地理坐标）
//!
//! 系数顺序与 GDAL 一致：`[x_origin, x_res, x_rot, y_origin, y_rot, y_res]`。
//! 本模块只做坐标的透传与换算，不做任何重投影。

use serde::{Deserialize, Serialize};

/// 仿射变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// 左上角 x 坐标
    pub origin_x: f64,
    /// 左上角 y 坐标
    pub origin_y: f64,
    /// 像素宽度（x 方向分辨率）
    pub pixel_width: f64,
    /// 像素高度（y 方向分辨率，通常为负）
    pub pixel_height: f64,
    /// x 方向旋转（通常为 0）
    pub rotation_x: f64,
    /// y 方向旋转（通常为 0）
    pub rotation_y: f64,
}

impl Default for GeoTransform {
    /// 单位像素变换：原点 (0, 0)，像素 1×1，y 向下
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

impl GeoTransform {
    /// 创建简单的仿射变换（无旋转）
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            rotation_x: 0.0,
            rotation_y: 0.0,
        }
    }

    /// 从 GDAL 六参数数组创建
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        Self {
            origin_x: gt[0],
            pixel_width: gt[1],
            rotation_x: gt[2],
            origin_y: gt[3],
            rotation_y: gt[4],
            pixel_height: gt[5],
        }
    }

    /// 转为 GDAL 六参数数组
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.rotation_x,
            self.origin_y,
            self.rotation_y,
            self.pixel_height,
        ]
    }

    /// 栅格坐标转地理坐标（像素左上角为整数坐标）
    #[inline]
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.origin_x + px * self.pixel_width + py * self.rotation_x;
        let y = self.origin_y + px * self.rotation_y + py * self.pixel_height;
        (x, y)
    }

    /// 地理坐标转栅格坐标
    ///
    /// 变换不可逆（行列式为 0）时返回 `None`。
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let det = self.pixel_width * self.pixel_height - self.rotation_x * self.rotation_y;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let px = (dx * self.pixel_height - dy * self.rotation_x) / det;
        let py = (dy * self.pixel_width - dx * self.rotation_y) / det;
        Some((px, py))
    }

    /// 像素中心的地理坐标
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        self.pixel_to_geo(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// 获取像素分辨率（绝对值）
    pub fn resolution(&self) -> (f64, f64) {
        (self.pixel_width.abs(), self.pixel_height.abs())
    }

    /// 指定行列数的栅格覆盖范围
    pub fn bounds(&self, rows: usize, cols: usize) -> Bounds {
        let corners = [
            self.pixel_to_geo(0.0, 0.0),
            self.pixel_to_geo(cols as f64, 0.0),
            self.pixel_to_geo(0.0, rows as f64),
            self.pixel_to_geo(cols as f64, rows as f64),
        ];
        let mut b = Bounds {
            left: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::INFINITY,
            top: f64::NEG_INFINITY,
        };
        for (x, y) in corners {
            b.left = b.left.min(x);
            b.right = b.right.max(x);
            b.bottom = b.bottom.min(y);
            b.top = b.top.max(y);
        }
        b
    }
}

/// 地理范围 (left, right, bottom, top)，使用栅格原生坐标系
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// 西边界
    pub left: f64,
    /// 东边界
    pub right: f64,
    /// 南边界
    pub bottom: f64,
    /// 北边界
    pub top: f64,
}

impl Bounds {
    /// 宽度
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// 高度
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// 以 `[left, right, bottom, top]` 形式返回，便于叠加显示
    pub fn extent(&self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    /// 点是否落在范围内（含边界）
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_north_up() {
        let gt = GeoTransform::new(110.0, -6.9, 0.001, -0.001);
        let b = gt.bounds(100, 200);
        assert!((b.left - 110.0).abs() < 1e-10);
        assert!((b.right - 110.2).abs() < 1e-10);
        assert!((b.top - (-6.9)).abs() < 1e-10);
        assert!((b.bottom - (-7.0)).abs() < 1e-10);
        assert!((b.width() - 0.2).abs() < 1e-10);
        assert!((b.height() - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_pixel_geo_roundtrip() {
        let gt = GeoTransform {
            origin_x: 100.0,
            origin_y: 50.0,
            pixel_width: 2.0,
            pixel_height: -2.0,
            rotation_x: 0.5,
            rotation_y: 0.25,
        };
        let (x, y) = gt.pixel_to_geo(3.0, 7.0);
        let (px, py) = gt.geo_to_pixel(x, y).unwrap();
        assert!((px - 3.0).abs() < 1e-10);
        assert!((py - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_gdal_array_roundtrip() {
        let arr = [1.0, 2.0, 0.0, 3.0, 0.0, -2.0];
        assert_eq!(GeoTransform::from_gdal(arr).to_gdal(), arr);
    }

    #[test]
    fn test_cell_center() {
        let gt = GeoTransform::new(0.0, 10.0, 1.0, -1.0);
        let (x, y) = gt.cell_center(0, 0);
        assert!((x - 0.5).abs() < 1e-10);
        assert!((y - 9.5).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_transform() {
        let gt = GeoTransform::new(0.0, 0.0, 0.0, 0.0);
        assert!(gt.geo_to_pixel(1.0, 1.0).is_none());
    }
}
