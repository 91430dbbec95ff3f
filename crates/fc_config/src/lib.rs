// crates/fc_config/src/lib.rs

//! Floodcast 配置层 (Layer 4)
//!
//! 所有资源路径和渲染参数都放在 [`PipelineConfig`] 中显式传递，
//! 不存在进程级的全局路径常量。
//!
//! ```text
//! Layer 5: fc_cli       ─> 读取配置文件，命令行参数覆盖
//! Layer 4: fc_config    ─> PipelineConfig (本层)
//! Layer 3: fc_render, fc_inference
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pipeline_config;

pub use error::ConfigError;
pub use pipeline_config::{ExportConfig, PipelineConfig, RenderConfig};
