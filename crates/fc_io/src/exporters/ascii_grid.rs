// crates/fc_io/src/exporters/ascii_grid.rs

//! ESRI ASCII Grid 导出器
//!
//! 将二维栅格（如原始预测深度）写为 `.asc`，NaN 写为 NoData 值。
//! 只支持无旋转、正方形像素、北向上的变换。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fc_terrain::GeoTransform;
use ndarray::ArrayView2;
use tracing::info;

use crate::error::{IoError, IoResult};

/// 默认 NoData 值
pub const DEFAULT_NODATA: f64 = -9999.0;

/// 像素尺寸比较容差
const CELL_EPS: f64 = 1e-9;

/// ASCII Grid 导出器
#[derive(Debug, Clone)]
pub struct AsciiGridWriter {
    /// NoData 值
    nodata: f64,
    /// 小数位数
    precision: usize,
}

impl Default for AsciiGridWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiGridWriter {
    /// 创建导出器
    pub fn new() -> Self {
        Self {
            nodata: DEFAULT_NODATA,
            precision: 4,
        }
    }

    /// 设置 NoData 值
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = nodata;
        self
    }

    /// 设置小数位数
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// 写入文件
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        values: ArrayView2<'_, f64>,
        transform: &GeoTransform,
    ) -> IoResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, values, transform)?;
        writer.flush()?;

        info!(
            "导出 ASCII Grid: {} ({} x {})",
            path.display(),
            values.nrows(),
            values.ncols()
        );
        Ok(())
    }

    /// 写入任意输出流
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        values: ArrayView2<'_, f64>,
        transform: &GeoTransform,
    ) -> IoResult<()> {
        let cellsize = transform.pixel_width;
        if transform.rotation_x != 0.0
            || transform.rotation_y != 0.0
            || cellsize <= 0.0
            || (transform.pixel_height + cellsize).abs() > CELL_EPS
        {
            return Err(IoError::UnsupportedTransform {
                reason: "ASCII Grid 只支持北向上的正方形像素".to_string(),
            });
        }

        let (rows, cols) = values.dim();
        let bottom = transform.origin_y - rows as f64 * cellsize;

        writeln!(out, "ncols {cols}")?;
        writeln!(out, "nrows {rows}")?;
        writeln!(out, "xllcorner {}", transform.origin_x)?;
        writeln!(out, "yllcorner {bottom}")?;
        writeln!(out, "cellsize {cellsize}")?;
        writeln!(out, "NODATA_value {}", self.nodata)?;

        for row in values.rows() {
            let line = row
                .iter()
                .map(|&v| {
                    if v.is_finite() {
                        format!("{:.*}", self.precision, v)
                    } else {
                        format!("{}", self.nodata)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
