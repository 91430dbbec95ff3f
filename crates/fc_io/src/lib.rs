// crates/fc_io/src/lib.rs

//! Floodcast IO 模块
//!
//! 提供高程栅格的读取和深度栅格的导出。
//!
//! # 模块
//!
//! - [`drivers`]: 栅格读取驱动 (ESRI ASCII Grid, GDAL)
//! - [`exporters`]: 栅格导出 (ESRI ASCII Grid)
//! - [`loader`]: 按扩展名选择驱动并读取第 1 波段为高程栅格
//!
//! # 可选依赖
//!
//! - `gdal`: 启用 GDAL 栅格驱动 (GeoTIFF 等)
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use fc_io::loader::load_elevation;
//!
//! let grid = load_elevation("dem.asc", fc_terrain::NODATA_THRESHOLD)?;
//! println!("{:?}", grid.bounds());
//! ```

pub mod drivers;
pub mod error;
pub mod exporters;
pub mod loader;

// 重导出常用类型
pub use drivers::{AsciiGridDriver, GdalDriver, GdalError, RasterBand, RasterDriver, RasterMetadata};
pub use error::{IoError, IoResult};
pub use exporters::AsciiGridWriter;
pub use loader::{load_elevation, open_raster, supported_extensions, ELEVATION_BAND};
