// apps/fc_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示默认配置、情景分级表以及高程栅格信息。

use anyhow::Result;
use clap::Args;
use fc_config::PipelineConfig;
use fc_foundation::FcError;
use fc_inference::{RainfallClass, SubsidenceClass, TideClass, FEATURE_COUNT};
use fc_io::{load_elevation, open_raster, supported_extensions};
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_config;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 显示栅格信息
    #[arg(short, long)]
    pub raster: Option<PathBuf>,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,

    /// 显示情景分级表
    #[arg(long)]
    pub scenarios: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== Floodcast 信息 ===");

    let config = load_config(args.config.as_deref())?;

    if args.defaults {
        print_config(&PipelineConfig::default())?;
    }

    if args.scenarios {
        print_scenario_classes();
    }

    if let Some(raster) = &args.raster {
        print_raster_info(raster, config.nodata_threshold)?;
    }

    if args.raster.is_none() && !args.defaults && !args.scenarios {
        // 默认显示所有信息
        print_config(&config)?;
        println!();
        print_scenario_classes();
    }

    Ok(())
}

fn print_config(config: &PipelineConfig) -> Result<()> {
    println!("=== 配置 ===");
    println!("{}", serde_json::to_string_pretty(config)?);
    println!("\n特征列数: {}", FEATURE_COUNT);
    println!("支持的栅格格式: {}", supported_extensions().join(", "));
    Ok(())
}

fn print_scenario_classes() {
    println!("=== 情景分级 ===");

    println!("降雨强度 [mm/h]:");
    for c in RainfallClass::ALL {
        println!("  {:<8} {}", c.range(), c.label());
    }

    println!("\n潮位 [cm]:");
    for c in TideClass::ALL {
        println!("  {:<8} {}", c.range(), c.label());
    }

    println!("\n地面沉降 [cm/yr]:");
    for c in SubsidenceClass::ALL {
        println!("  {:<8} {}", c.range(), c.label());
    }
}

fn print_raster_info(path: &Path, nodata_threshold: f64) -> Result<()> {
    println!("=== 栅格信息 ===");

    let driver = open_raster(path).map_err(FcError::from)?;
    let meta = driver.metadata();
    let bounds = meta.bounds();
    let (dx, dy) = meta.resolution();

    println!("文件: {}", path.display());
    println!("驱动: {}", driver.driver_name());
    println!("尺寸: {} 行 x {} 列, {} 波段", meta.height, meta.width, meta.band_count);
    println!("分辨率: {} x {}", dx, dy);
    println!(
        "范围: left={} right={} bottom={} top={}",
        bounds.left, bounds.right, bounds.bottom, bounds.top
    );
    println!("投影: {}", meta.projection.as_deref().unwrap_or("(未声明)"));
    match meta.nodata {
        Some(v) => println!("NoData: {}", v),
        None => println!("NoData: (未声明)"),
    }

    let elevation = load_elevation(path, nodata_threshold).map_err(FcError::from)?;
    match elevation.statistics() {
        Some(s) => {
            println!("\n高程统计 (阈值 {} m):", nodata_threshold);
            println!("  最小: {:.3} m", s.min);
            println!("  最大: {:.3} m", s.max);
            println!("  平均: {:.3} m", s.mean);
            println!(
                "  有效: {} / {} ({:.1}%)",
                s.valid_count,
                s.total_count,
                s.valid_fraction() * 100.0
            );
        }
        None => println!("\n高程统计: 无有效像素"),
    }

    Ok(())
}
