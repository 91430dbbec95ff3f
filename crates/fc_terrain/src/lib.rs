// crates/fc_terrain/src/lib.rs

//! 地形数据管理
//!
//! 提供带地理参考的高程栅格存储和访问功能。
//!
//! # 模块
//!
//! - `transform`: 仿射变换与地理范围
//! - `elevation`: 高程栅格（无数据值统一为 NaN）

pub mod elevation;
pub mod transform;

// 重导出常用类型
pub use elevation::{ElevationGrid, ElevationStatistics, NODATA_THRESHOLD};
pub use transform::{Bounds, GeoTransform};
