// apps/fc_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查配置、模型文件和高程栅格，不执行推理。

use anyhow::{bail, Result};
use clap::Args;
use fc_config::PipelineConfig;
use fc_inference::ModelSpec;
use fc_io::open_raster;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== Floodcast 配置验证 ===");

    let mut result = ValidationResult::default();

    let config = match &args.config {
        Some(path) => validate_config(path, &mut result),
        None => {
            println!("未指定配置文件，检查默认配置");
            Some(PipelineConfig::default())
        }
    };

    if let Some(config) = &config {
        validate_model(&config.model_source, &mut result);
        validate_raster(&config.raster_source, &mut result);
        validate_outputs(config, &mut result);
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) -> Option<PipelineConfig> {
    println!("\n检查配置文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return None;
    }

    match PipelineConfig::from_file(path) {
        Ok(config) => {
            println!("  ✓ 配置文件格式有效");
            Some(config)
        }
        Err(e) => {
            result.add_error(e.to_string());
            None
        }
    }
}

fn validate_model(path: &Path, result: &mut ValidationResult) {
    println!("\n检查模型: {}", path.display());

    if !path.exists() {
        result.add_error(format!("模型文件不存在: {}", path.display()));
        return;
    }

    match ModelSpec::from_file(path).and_then(|spec| spec.validate().map(|_| spec)) {
        Ok(spec) => println!("  ✓ 模型类型: {}", spec.kind()),
        Err(e) => result.add_error(e.to_string()),
    }
}

fn validate_raster(path: &Path, result: &mut ValidationResult) {
    println!("\n检查高程栅格: {}", path.display());

    if !path.exists() {
        result.add_error(format!("高程栅格不存在: {}", path.display()));
        return;
    }

    match open_raster(path) {
        Ok(driver) => {
            let meta = driver.metadata();
            println!(
                "  ✓ {} 驱动, {} 行 x {} 列",
                driver.driver_name(),
                meta.height,
                meta.width
            );
            if meta.band_count > 1 {
                result.add_warning(format!("栅格有 {} 个波段，只读取第 1 波段", meta.band_count));
            }
            if meta.projection.is_none() {
                result.add_warning("栅格未声明投影，叠加图仅保留仿射坐标");
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }
}

fn validate_outputs(config: &PipelineConfig, result: &mut ValidationResult) {
    let output = &config.render.output;
    let is_png = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !is_png {
        result.add_warning(format!("输出文件将以 PNG 格式写出: {}", output.display()));
    }

    if let Some(depth) = &config.export.depth_grid {
        let is_asc = depth
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("asc"))
            .unwrap_or(false);
        if !is_asc {
            result.add_warning(format!("深度导出为 ASCII Grid，建议使用 .asc: {}", depth.display()));
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    for e in &result.errors {
        error!("错误: {}", e);
    }
    for w in &result.warnings {
        warn!("警告: {}", w);
    }

    let passed = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if passed {
        println!("✓ 验证通过 ({} 个警告)", result.warnings.len());
        Ok(())
    } else {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
