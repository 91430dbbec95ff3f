// crates/fc_io/src/drivers/gdal/mod.rs

//! GDAL 栅格驱动模块
//!
//! 提供读取 GeoTIFF 等栅格格式的功能。
//!
//! # 依赖
//!
//! 需要启用 `gdal` feature 并安装 GDAL 库。未启用时 [`GdalDriver::open`]
//! 返回 [`GdalError::NotAvailable`]。

mod driver;
mod error;

pub use driver::*;
pub use error::*;
