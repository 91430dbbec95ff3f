// crates/fc_io/src/drivers/ascii_grid.rs

//! ESRI ASCII Grid 驱动
//!
//! 读取 `.asc` 文本栅格。文件头格式：
//!
//! ```text
//! ncols         4
//! nrows         3
//! xllcorner     110.35
//! yllcorner     -7.05
//! cellsize      0.0001
//! NODATA_value  -9999
//! 5.1 4.9 ...
//! ```
//!
//! 也接受 `xllcenter` / `yllcenter`。数据行自北向南排列，与内部行主序一致。
//! 该格式只有一个波段。

use std::path::{Path, PathBuf};

use fc_terrain::GeoTransform;

use crate::drivers::raster::{RasterBand, RasterDriver, RasterMetadata};
use crate::error::{IoError, IoResult};

/// ESRI ASCII Grid 驱动
#[derive(Debug, Clone)]
pub struct AsciiGridDriver {
    metadata: RasterMetadata,
    data: Vec<f64>,
}

/// 解析中的文件头
#[derive(Debug, Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<(f64, bool)>,
    yll: Option<(f64, bool)>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

impl AsciiGridDriver {
    /// 打开 `.asc` 文件
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// 从字符串解析
    pub fn from_str_content(content: &str) -> IoResult<Self> {
        Self::parse(content, Path::new("<memory>"))
    }

    fn parse(content: &str, file: &Path) -> IoResult<Self> {
        let err = |line: usize, message: String| IoError::ParseError {
            file: PathBuf::from(file),
            line,
            message,
        };

        let mut header = Header::default();
        let mut lines = content.lines().enumerate().peekable();

        // 文件头：以字母开头的行
        while let Some((idx, line)) = lines.peek().copied() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                lines.next();
                continue;
            }
            if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
                break;
            }
            lines.next();

            let line_no = idx + 1;
            let mut parts = trimmed.split_whitespace();
            let key = parts.next().unwrap_or_default().to_ascii_lowercase();
            let value = parts
                .next()
                .ok_or_else(|| err(line_no, format!("文件头 {key} 缺少取值")))?;

            let as_f64 = |v: &str| {
                v.parse::<f64>()
                    .map_err(|_| err(line_no, format!("文件头 {key} 取值无效: {v}")))
            };
            let as_usize = |v: &str| {
                v.parse::<usize>()
                    .map_err(|_| err(line_no, format!("文件头 {key} 取值无效: {v}")))
            };

            match key.as_str() {
                "ncols" => header.ncols = Some(as_usize(value)?),
                "nrows" => header.nrows = Some(as_usize(value)?),
                "xllcorner" => header.xll = Some((as_f64(value)?, false)),
                "xllcenter" => header.xll = Some((as_f64(value)?, true)),
                "yllcorner" => header.yll = Some((as_f64(value)?, false)),
                "yllcenter" => header.yll = Some((as_f64(value)?, true)),
                "cellsize" => header.cellsize = Some(as_f64(value)?),
                "nodata_value" => header.nodata = Some(as_f64(value)?),
                _ => return Err(err(line_no, format!("未知文件头: {key}"))),
            }
        }

        let missing = |name: &str| err(0, format!("缺少文件头 {name}"));
        let ncols = header.ncols.ok_or_else(|| missing("ncols"))?;
        let nrows = header.nrows.ok_or_else(|| missing("nrows"))?;
        let (xll, x_center) = header.xll.ok_or_else(|| missing("xllcorner"))?;
        let (yll, y_center) = header.yll.ok_or_else(|| missing("yllcorner"))?;
        let cellsize = header.cellsize.ok_or_else(|| missing("cellsize"))?;
        if nrows == 0 || ncols == 0 {
            return Err(err(0, format!("栅格尺寸必须为正: {nrows}x{ncols}")));
        }
        let expected = nrows
            .checked_mul(ncols)
            .ok_or_else(|| err(0, format!("栅格尺寸溢出: {nrows}x{ncols}")))?;
        if cellsize.is_nan() || cellsize <= 0.0 {
            return Err(err(0, format!("cellsize 必须为正: {cellsize}")));
        }

        let left = if x_center { xll - cellsize / 2.0 } else { xll };
        let bottom = if y_center { yll - cellsize / 2.0 } else { yll };
        let top = bottom + nrows as f64 * cellsize;

        // 每个数值至少占两个字节（数字加分隔符），按内容长度限制预分配
        let mut data = Vec::with_capacity(expected.min(content.len() / 2));
        for (idx, line) in lines {
            for token in line.split_whitespace() {
                let v = token
                    .parse::<f64>()
                    .map_err(|_| err(idx + 1, format!("无效数值: {token}")))?;
                data.push(v);
            }
        }
        if data.len() != expected {
            return Err(IoError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let metadata = RasterMetadata {
            width: ncols,
            height: nrows,
            band_count: 1,
            geo_transform: GeoTransform::new(left, top, cellsize, -cellsize),
            projection: None,
            nodata: header.nodata,
        };

        Ok(Self { metadata, data })
    }
}

impl RasterDriver for AsciiGridDriver {
    fn driver_name(&self) -> &'static str {
        "ascii_grid"
    }

    fn metadata(&self) -> &RasterMetadata {
        &self.metadata
    }

    fn read_band(&self, band: usize) -> IoResult<RasterBand> {
        if band != 1 {
            return Err(IoError::BandNotFound { band, count: 1 });
        }
        Ok(RasterBand {
            data: self.data.clone(),
            width: self.metadata.width,
            height: self.metadata.height,
            nodata: self.metadata.nodata,
        })
    }
}
