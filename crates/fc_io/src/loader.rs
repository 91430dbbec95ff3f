// crates/fc_io/src/loader.rs

//! 高程栅格加载
//!
//! 按扩展名选择驱动，读取第 1 波段并转换为 [`ElevationGrid`]。

use std::path::Path;

use fc_terrain::ElevationGrid;
use tracing::{debug, info};

use crate::drivers::{AsciiGridDriver, GdalDriver, RasterDriver};
use crate::error::{IoError, IoResult};

/// 高程所在波段（固定读取第 1 波段）
pub const ELEVATION_BAND: usize = 1;

/// GDAL 负责的扩展名
const GDAL_EXTENSIONS: &[&str] = &["tif", "tiff", "img", "vrt"];

/// ASCII Grid 扩展名
const ASCII_EXTENSIONS: &[&str] = &["asc"];

/// 支持的扩展名列表
pub fn supported_extensions() -> Vec<&'static str> {
    ASCII_EXTENSIONS
        .iter()
        .chain(GDAL_EXTENSIONS.iter())
        .copied()
        .collect()
}

/// 按扩展名打开栅格
pub fn open_raster(path: impl AsRef<Path>) -> IoResult<Box<dyn RasterDriver>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let driver: Box<dyn RasterDriver> = if ASCII_EXTENSIONS.contains(&extension.as_str()) {
        Box::new(AsciiGridDriver::open(path)?)
    } else if GDAL_EXTENSIONS.contains(&extension.as_str()) {
        open_gdal(path)?
    } else {
        return Err(IoError::UnknownFormat {
            path: path.to_path_buf(),
            extension,
        });
    };

    debug!("栅格驱动: {} ({})", driver.driver_name(), path.display());
    Ok(driver)
}

#[cfg(feature = "gdal")]
fn open_gdal(path: &Path) -> IoResult<Box<dyn RasterDriver>> {
    Ok(Box::new(GdalDriver::open(path)?))
}

#[cfg(not(feature = "gdal"))]
use crate::drivers::GdalError;

#[cfg(not(feature = "gdal"))]
fn open_gdal(path: &Path) -> IoResult<Box<dyn RasterDriver>> {
    // 未启用 gdal 时 open 总是失败
    let err = GdalDriver::open(path).err().unwrap_or(GdalError::NotAvailable);
    Err(err.into())
}

/// 读取高程栅格
///
/// 读取第 1 波段，并将不高于 `nodata_threshold` 的值及声明的 NoData 值
/// 替换为 NaN。
pub fn load_elevation(path: impl AsRef<Path>, nodata_threshold: f64) -> IoResult<ElevationGrid> {
    let path = path.as_ref();
    let driver = open_raster(path)?;
    let meta = driver.metadata().clone();

    info!(
        "读取高程栅格: {} ({} x {}, {} 波段)",
        path.display(),
        meta.height,
        meta.width,
        meta.band_count
    );

    let band = driver.read_band(ELEVATION_BAND)?;
    let nodata = band.nodata.or(meta.nodata);
    let data = band.into_array()?;

    Ok(ElevationGrid::from_raw_with_threshold(
        data,
        meta.geo_transform,
        nodata,
        nodata_threshold,
    ))
}
