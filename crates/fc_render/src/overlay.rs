// crates/fc_render/src/overlay.rs

//! 高程底图 + 积水深度叠加
//!
//! 底图：有效高程按 [min, max] 归一化后经 `terrain` 色带着色，以 `base_alpha`
//! 叠在背景色上，缺测格子保持背景色。
//! 淹没层：仅未被显示掩膜隐藏的格子，按 [vmin, vmax] 经 `bwr_r` 色带着色，
//! 以 `flood_alpha` 叠在底图上。
//!
//! 图像第 `y` 行第 `x` 列对应栅格 `(row = y, col = x)`，两层共用同一索引。
//! 深度色标另存为独立图像，见 [`crate::legend`]。

use std::fs;
use std::path::{Path, PathBuf};

use fc_inference::DepthGrid;
use fc_terrain::ElevationGrid;
use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::colormap::{Colormap, Normalize, BWR_R, TERRAIN};
use crate::error::{RenderError, RenderResult};
use crate::legend::{legend_path, ColorbarLegend, DEFAULT_LEGEND_SIZE};
use crate::world_file::write_world_file;

/// 叠加样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// 底图透明度
    pub base_alpha: f64,
    /// 淹没层透明度
    pub flood_alpha: f64,
    /// 深度色带下限 [cm]
    pub vmin: f64,
    /// 深度色带上限 [cm]
    pub vmax: f64,
    /// 背景色 (RGB, 0–1)
    pub background: [f64; 3],
    /// 底图色带
    pub base_colormap: Colormap,
    /// 淹没层色带
    pub flood_colormap: Colormap,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            base_alpha: 0.8,
            flood_alpha: 0.7,
            vmin: 0.0,
            vmax: 100.0,
            background: [1.0, 1.0, 1.0],
            base_colormap: TERRAIN,
            flood_colormap: BWR_R,
        }
    }
}

impl OverlayStyle {
    /// 校验参数
    pub fn validate(&self) -> RenderResult<()> {
        for (name, alpha) in [("base_alpha", self.base_alpha), ("flood_alpha", self.flood_alpha)] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(RenderError::InvalidStyle(format!(
                    "{name} 必须在 [0, 1] 内: {alpha}"
                )));
            }
        }
        if !self.vmin.is_finite() || !self.vmax.is_finite() || self.vmax <= self.vmin {
            return Err(RenderError::InvalidStyle(format!(
                "深度范围无效: vmin={}, vmax={}",
                self.vmin, self.vmax
            )));
        }
        Ok(())
    }
}

/// 一次渲染的输出
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    /// PNG 路径
    pub image_path: PathBuf,
    /// world file 路径（若写出）
    pub world_file: Option<PathBuf>,
    /// 图像宽度
    pub width: u32,
    /// 图像高度
    pub height: u32,
    /// 着色的淹没格子数
    pub flooded_pixels: usize,
    /// 深度色标
    pub legend: ColorbarLegend,
    /// 色标图像路径（若写出）
    pub legend_path: Option<PathBuf>,
}

/// 叠加渲染器
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    world_file: bool,
    legend: bool,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self {
            style: OverlayStyle::default(),
            world_file: true,
            legend: true,
        }
    }
}

impl OverlayRenderer {
    /// 使用给定样式
    pub fn new(style: OverlayStyle) -> RenderResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            world_file: true,
            legend: true,
        })
    }

    /// 是否写出 world file
    pub fn with_world_file(mut self, enabled: bool) -> Self {
        self.world_file = enabled;
        self
    }

    /// 是否写出色标图像
    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.legend = enabled;
        self
    }

    /// 淹没层色标
    pub fn legend(&self) -> ColorbarLegend {
        ColorbarLegend::from_style(&self.style)
    }

    /// 当前样式
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// 合成图像
    pub fn compose(&self, elevation: &ElevationGrid, depth: &DepthGrid) -> RenderResult<RgbaImage> {
        let shape = elevation.shape();
        if depth.shape() != shape {
            return Err(RenderError::ShapeMismatch {
                expected: shape,
                actual: depth.shape(),
            });
        }
        let (width, height) = image_size(shape)?;

        let base_norm = elevation
            .statistics()
            .map(|s| Normalize::new(s.min, s.max))
            .unwrap_or(Normalize::new(0.0, 1.0));
        let flood_norm = Normalize::new(self.style.vmin, self.style.vmax);
        let elev = elevation.values();
        let bg = self.style.background;

        Ok(ImageBuffer::from_fn(width, height, |x, y| {
            let (row, col) = (y as usize, x as usize);
            let mut rgb = bg;

            let e = elev[[row, col]];
            if !e.is_nan() {
                let c = self.style.base_colormap.sample(base_norm.apply(e));
                rgb = blend(c, rgb, self.style.base_alpha);
            }

            if let Some(d) = depth.visible_value(row, col) {
                let c = self.style.flood_colormap.sample(flood_norm.apply(d));
                rgb = blend(c, rgb, self.style.flood_alpha);
            }

            Rgba([to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), 255])
        }))
    }

    /// 合成并写出 PNG（以及可选的 world file）
    pub fn render_to_file(
        &self,
        path: impl AsRef<Path>,
        elevation: &ElevationGrid,
        depth: &DepthGrid,
    ) -> RenderResult<RenderSummary> {
        let path = path.as_ref();
        let image = self.compose(elevation, depth)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        image.save_with_format(path, ImageFormat::Png)?;
        info!("已写出叠加图: {} ({}x{})", path.display(), image.width(), image.height());

        let world_file = if self.world_file {
            let wf = write_world_file(path, elevation.transform())?;
            debug!("已写出 world file: {}", wf.display());
            Some(wf)
        } else {
            None
        };

        let legend = self.legend();
        let legend_file = if self.legend {
            let lp = legend_path(path);
            let (w, h) = DEFAULT_LEGEND_SIZE;
            legend.render(w, h).save_with_format(&lp, ImageFormat::Png)?;
            debug!(
                "已写出色标: {} ({}, {} ~ {})",
                lp.display(),
                legend.label,
                legend.vmin,
                legend.vmax
            );
            Some(lp)
        } else {
            None
        };

        Ok(RenderSummary {
            image_path: path.to_path_buf(),
            world_file,
            width: image.width(),
            height: image.height(),
            flooded_pixels: depth.visible_count(),
            legend,
            legend_path: legend_file,
        })
    }
}

fn image_size((rows, cols): (usize, usize)) -> RenderResult<(u32, u32)> {
    let invalid = || RenderError::InvalidSize { rows, cols };
    if rows == 0 || cols == 0 {
        return Err(invalid());
    }
    let width = u32::try_from(cols).map_err(|_| invalid())?;
    let height = u32::try_from(rows).map_err(|_| invalid())?;
    Ok((width, height))
}

#[inline]
fn blend(top: [f64; 3], bottom: [f64; 3], alpha: f64) -> [f64; 3] {
    [
        top[0] * alpha + bottom[0] * (1.0 - alpha),
        top[1] * alpha + bottom[1] * (1.0 - alpha),
        top[2] * alpha + bottom[2] * (1.0 - alpha),
    ]
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_terrain::GeoTransform;
    use ndarray::array;

    fn elevation() -> ElevationGrid {
        ElevationGrid::from_raw(
            array![[0.0, 1.0], [-9999.0, 2.0]],
            GeoTransform::default(),
            None,
        )
    }

    #[test]
    fn test_nodata_is_background() {
        let depth = DepthGrid::from_values(array![[0.0, 0.0], [0.0, 0.0]]);
        let img = OverlayRenderer::default().compose(&elevation(), &depth).unwrap();
        assert_eq!(img.get_pixel(0, 1), &Rgba([255, 255, 255, 255]));
        assert_ne!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_flood_layer_changes_pixel() {
        let dry = DepthGrid::from_values(array![[0.0, 0.0], [0.0, 0.0]]);
        let wet = DepthGrid::from_values(array![[100.0, 0.0], [0.0, -5.0]]);
        let r = OverlayRenderer::default();
        let a = r.compose(&elevation(), &dry).unwrap();
        let b = r.compose(&elevation(), &wet).unwrap();

        assert_ne!(a.get_pixel(0, 0), b.get_pixel(0, 0));
        // 负值被掩膜，不着色
        assert_eq!(a.get_pixel(1, 1), b.get_pixel(1, 1));
        // 深水偏蓝
        let p = b.get_pixel(0, 0);
        assert!(p[2] > p[0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let depth = DepthGrid::from_values(array![[1.0, 2.0, 3.0]]);
        let err = OverlayRenderer::default().compose(&elevation(), &depth).unwrap_err();
        assert!(matches!(err, RenderError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_style_validation() {
        let style = OverlayStyle {
            flood_alpha: 1.5,
            ..Default::default()
        };
        assert!(OverlayRenderer::new(style).is_err());

        let style = OverlayStyle {
            vmin: 10.0,
            vmax: 10.0,
            ..Default::default()
        };
        assert!(OverlayRenderer::new(style).is_err());
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend([1.0; 3], [0.0; 3], 0.25), [0.25; 3]);
        assert_eq!(to_u8(1.2), 255);
        assert_eq!(to_u8(-0.1), 0);
    }
}
