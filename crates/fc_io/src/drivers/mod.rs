// crates/fc_io/src/drivers/mod.rs

//! 数据驱动模块
//!
//! 提供读取各种栅格格式的驱动程序。

pub mod ascii_grid;
pub mod gdal;
pub mod raster;

// 重导出
pub use self::ascii_grid::AsciiGridDriver;
pub use self::gdal::{GdalDriver, GdalError};
pub use raster::*;
