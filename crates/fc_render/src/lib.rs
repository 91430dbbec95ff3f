// crates/fc_render/src/lib.rs

//! Floodcast 渲染层
//!
//! 把高程底图与积水深度叠加为一张 PNG。只做图层合成，
//! 深度栅格与高程栅格共用同一套像素索引和仿射变换，不做坐标转换。
//!
//! - [`colormap`]: 分段线性色带
//! - [`legend`]: 积水深度色标
//! - [`overlay`]: 图层合成与输出
//! - [`world_file`]: PNG 配套的 `.pgw` 坐标文件

pub mod colormap;
pub mod error;
pub mod legend;
pub mod overlay;
pub mod world_file;

pub use colormap::{Colormap, Normalize, BWR_R, TERRAIN};
pub use error::{RenderError, RenderResult};
pub use legend::{legend_path, ColorbarLegend};
pub use overlay::{OverlayRenderer, OverlayStyle, RenderSummary};
pub use world_file::{world_file_path, write_world_file};
