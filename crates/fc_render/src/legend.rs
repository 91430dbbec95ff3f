// crates/fc_render/src/legend.rs

//! 积水深度色标
//!
//! 叠加图本身必须与高程栅格逐像素对齐（world file 依赖这一点），
//! 所以色标单独输出为 `<stem>_legend.png`：一条竖直色带，顶部为 `vmax`，底部为 `vmin`。
//! 标题与刻度以元数据形式随 [`RenderSummary`](crate::RenderSummary) 返回。

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::colormap::Colormap;
use crate::overlay::OverlayStyle;

/// 默认色标标题
pub const DEPTH_LABEL: &str = "积水深度 (cm)";

/// 色标图像默认尺寸 (宽, 高)
pub const DEFAULT_LEGEND_SIZE: (u32, u32) = (24, 256);

/// 色标描述
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarLegend {
    /// 标题
    pub label: String,
    /// 色带下限 [cm]
    pub vmin: f64,
    /// 色带上限 [cm]
    pub vmax: f64,
    /// 色带
    pub colormap: Colormap,
}

impl ColorbarLegend {
    /// 由叠加样式生成淹没层色标
    pub fn from_style(style: &OverlayStyle) -> Self {
        Self {
            label: DEPTH_LABEL.to_string(),
            vmin: style.vmin,
            vmax: style.vmax,
            colormap: style.flood_colormap,
        }
    }

    /// 等距刻度，包含两端；`count < 2` 时只返回两端
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let n = count.max(2);
        let step = (self.vmax - self.vmin) / (n - 1) as f64;
        (0..n).map(|i| self.vmin + step * i as f64).collect()
    }

    /// 竖直色带图像，第 0 行为 `vmax`
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let last = height.saturating_sub(1).max(1) as f64;
        ImageBuffer::from_fn(width, height, |_, y| {
            let t = 1.0 - y as f64 / last;
            let c = self.colormap.sample(t);
            Rgba([to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), 255])
        })
    }
}

/// 叠加图对应的色标路径：`flood_map.png` → `flood_map_legend.png`
pub fn legend_path(image_path: impl AsRef<Path>) -> PathBuf {
    let path = image_path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_legend.png"))
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_style() {
        let legend = ColorbarLegend::from_style(&OverlayStyle::default());
        assert_eq!(legend.label, DEPTH_LABEL);
        assert_eq!((legend.vmin, legend.vmax), (0.0, 100.0));
        assert_eq!(legend.colormap.name(), "bwr_r");
    }

    #[test]
    fn test_ticks() {
        let legend = ColorbarLegend::from_style(&OverlayStyle::default());
        assert_eq!(legend.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(legend.ticks(0), vec![0.0, 100.0]);
    }

    #[test]
    fn test_ramp_deep_on_top() {
        let img = ColorbarLegend::from_style(&OverlayStyle::default()).render(4, 11);
        assert_eq!(img.dimensions(), (4, 11));
        // 顶部深水为蓝，底部浅水为红，中间为白
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(3, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(2, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_legend_path() {
        assert_eq!(
            legend_path("out/flood_map.png"),
            PathBuf::from("out/flood_map_legend.png")
        );
    }
}
