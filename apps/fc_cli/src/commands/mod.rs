// apps/fc_cli/src/commands/mod.rs

//! 子命令

pub mod info;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use fc_config::PipelineConfig;

/// 读取配置文件，未指定时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(p) => Ok(PipelineConfig::from_file(p).map_err(fc_foundation::FcError::from)?),
        None => Ok(PipelineConfig::default()),
    }
}
