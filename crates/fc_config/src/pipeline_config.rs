// crates/fc_config/src/pipeline_config.rs

//! PipelineConfig - 推理与渲染配置
//!
//! JSON 文件中缺省的字段取默认值：
//!
//! ```json
//! {
//!   "model_source": "flood_model.json",
//!   "raster_source": "dem.tif",
//!   "nodata_threshold": -100.0,
//!   "render": { "output": "flood_map.png", "base_alpha": 0.8, "flood_alpha": 0.7,
//!               "vmin": 0.0, "vmax": 100.0, "world_file": true },
//!   "export": { "depth_grid": null }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use fc_terrain::NODATA_THRESHOLD;

use crate::error::ConfigError;

/// 推理流程配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 模型描述文件
    #[serde(default = "default_model_source")]
    pub model_source: PathBuf,

    /// 高程栅格
    #[serde(default = "default_raster_source")]
    pub raster_source: PathBuf,

    /// 无数据阈值 [m]
    #[serde(default = "default_nodata_threshold")]
    pub nodata_threshold: f64,

    /// 渲染配置
    #[serde(default)]
    pub render: RenderConfig,

    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_model_source() -> PathBuf { PathBuf::from("flood_model.json") }
fn default_raster_source() -> PathBuf { PathBuf::from("dem.tif") }
fn default_nodata_threshold() -> f64 { NODATA_THRESHOLD }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_source: default_model_source(),
            raster_source: default_raster_source(),
            nodata_threshold: default_nodata_threshold(),
            render: RenderConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// 渲染配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// PNG 输出路径
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// 底图透明度
    #[serde(default = "default_base_alpha")]
    pub base_alpha: f64,

    /// 淹没层透明度
    #[serde(default = "default_flood_alpha")]
    pub flood_alpha: f64,

    /// 深度色带下限 [cm]
    #[serde(default = "default_vmin")]
    pub vmin: f64,

    /// 深度色带上限 [cm]
    #[serde(default = "default_vmax")]
    pub vmax: f64,

    /// 是否写出 .pgw
    #[serde(default = "default_world_file")]
    pub world_file: bool,
}

fn default_output() -> PathBuf { PathBuf::from("flood_map.png") }
fn default_base_alpha() -> f64 { 0.8 }
fn default_flood_alpha() -> f64 { 0.7 }
fn default_vmin() -> f64 { 0.0 }
fn default_vmax() -> f64 { 100.0 }
fn default_world_file() -> bool { true }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            base_alpha: default_base_alpha(),
            flood_alpha: default_flood_alpha(),
            vmin: default_vmin(),
            vmax: default_vmax(),
            world_file: default_world_file(),
        }
    }
}

/// 导出配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 原始深度栅格导出路径 (.asc)
    #[serde(default)]
    pub depth_grid: Option<PathBuf>,
}

impl PipelineConfig {
    /// 从 JSON 文件加载并校验
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文本解析（不校验）
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存为 JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_source.as_os_str().is_empty() {
            return Err(ConfigError::invalid("model_source", "", "路径不能为空"));
        }
        if self.raster_source.as_os_str().is_empty() {
            return Err(ConfigError::invalid("raster_source", "", "路径不能为空"));
        }
        if !self.nodata_threshold.is_finite() {
            return Err(ConfigError::invalid(
                "nodata_threshold",
                self.nodata_threshold,
                "必须为有限值",
            ));
        }

        let render = &self.render;
        for (key, alpha) in [
            ("render.base_alpha", render.base_alpha),
            ("render.flood_alpha", render.flood_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ConfigError::invalid(key, alpha, "必须在 [0, 1] 范围内"));
            }
        }
        if !render.vmin.is_finite() || !render.vmax.is_finite() || render.vmax <= render.vmin {
            return Err(ConfigError::invalid(
                "render.vmax",
                render.vmax,
                "必须为有限值且大于 render.vmin",
            ));
        }
        if render.output.as_os_str().is_empty() {
            return Err(ConfigError::invalid("render.output", "", "路径不能为空"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model_source, PathBuf::from("flood_model.json"));
        assert_eq!(config.raster_source, PathBuf::from("dem.tif"));
        assert_eq!(config.nodata_threshold, -100.0);
        assert_eq!(config.render.base_alpha, 0.8);
        assert_eq!(config.render.flood_alpha, 0.7);
        assert!(config.render.world_file);
        assert!(config.export.depth_grid.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config = PipelineConfig::from_json_str(
            r#"{"raster_source": "jakarta.asc", "render": {"vmax": 250.0}}"#,
        )
        .unwrap();
        assert_eq!(config.raster_source, PathBuf::from("jakarta.asc"));
        assert_eq!(config.model_source, PathBuf::from("flood_model.json"));
        assert_eq!(config.render.vmax, 250.0);
        assert_eq!(config.render.vmin, 0.0);
    }

    #[test]
    fn test_invalid_alpha() {
        let mut config = PipelineConfig::default();
        config.render.flood_alpha = 1.2;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.flood_alpha"));
    }

    #[test]
    fn test_invalid_range() {
        let mut config = PipelineConfig::default();
        config.render.vmax = config.render.vmin;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = PipelineConfig {
            nodata_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floodcast.json");

        let mut config = PipelineConfig::default();
        config.export.depth_grid = Some(PathBuf::from("depth.asc"));
        config.save_to_file(&path).unwrap();

        let loaded = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PipelineConfig::from_file(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
