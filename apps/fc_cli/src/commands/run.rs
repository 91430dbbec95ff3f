// apps/fc_cli/src/commands/run.rs

//! 运行情景命令
//!
//! 检查资源 → 加载模型和高程 → 批量推理 → 渲染叠加图 → 可选导出深度栅格。
//! 模型或高程缺失时在任何计算开始前退出。

use anyhow::{Context, Result};
use clap::Args;
use fc_config::{PipelineConfig, RenderConfig};
use fc_foundation::{ensure, FcError, FcResult};
use fc_inference::{load_model, FloodPipeline, ScenarioInputs};
use fc_io::{load_elevation, AsciiGridWriter};
use fc_render::{OverlayRenderer, OverlayStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use super::load_config;

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 模型描述文件（覆盖配置）
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// 高程栅格（覆盖配置）
    #[arg(short, long)]
    pub raster: Option<PathBuf>,

    /// 降雨强度 [mm/h]
    #[arg(long)]
    pub rainfall: f64,

    /// 潮位 [cm]
    #[arg(long)]
    pub tide: f64,

    /// 地面沉降速率 [cm/yr]
    #[arg(long)]
    pub subsidence: f64,

    /// 输出 PNG（覆盖配置）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 导出原始深度为 ASCII Grid
    #[arg(long)]
    pub export_depth: Option<PathBuf>,

    /// 不写出 .pgw
    #[arg(long)]
    pub no_world_file: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== Floodcast 淹没推理 ===");

    let config = resolve_config(&args)?;
    check_resources(&config)?;

    let scenario = ScenarioInputs::new(args.rainfall, args.tide, args.subsidence)?;
    info!("情景: {}", scenario);
    info!(
        "分级: 降雨 {} / 潮位 {} / 沉降 {}",
        scenario.rainfall_class().label(),
        scenario.tide_class().label(),
        scenario.subsidence_class().label()
    );

    let start = Instant::now();

    let model = load_model(&config.model_source)
        .map_err(FcError::from)
        .with_context(|| format!("加载模型失败: {}", config.model_source.display()))?;
    info!("模型: {} ({})", model.name(), config.model_source.display());

    let elevation = load_elevation(&config.raster_source, config.nodata_threshold)
        .map_err(FcError::from)
        .with_context(|| format!("读取高程失败: {}", config.raster_source.display()))?;
    let bounds = elevation.bounds();
    info!(
        "高程: {} x {}, 范围 [{:.3}, {:.3}] x [{:.3}, {:.3}]",
        elevation.rows(),
        elevation.cols(),
        bounds.left,
        bounds.right,
        bounds.bottom,
        bounds.top
    );
    match elevation.statistics() {
        Some(stats) => info!(
            "高程统计: min={:.2} m, max={:.2} m, mean={:.2} m, 有效 {:.1}%",
            stats.min,
            stats.max,
            stats.mean,
            stats.valid_fraction() * 100.0
        ),
        None => warn!("高程栅格没有任何有效像素"),
    }

    let prediction = FloodPipeline::new(model.as_ref())
        .run(&elevation, &scenario)
        .map_err(FcError::from)?;
    if !prediction.model_invoked {
        warn!("无有效像素，未调用模型，结果全部为未淹没");
    }

    let stats = prediction.depth.statistics();
    info!(
        "推理完成: 有效像素 {}, 淹没像素 {} ({:.1}%)",
        prediction.valid_pixels,
        stats.visible_count,
        stats.flooded_fraction() * 100.0
    );
    if let (Some(max), Some(mean)) = (stats.max_depth, stats.mean_depth) {
        info!("积水深度: max={:.1} cm, mean={:.1} cm", max, mean);
    }

    let renderer = OverlayRenderer::new(overlay_style(&config.render))
        .map_err(FcError::from)?
        .with_world_file(config.render.world_file);
    let summary = renderer
        .render_to_file(&config.render.output, &elevation, &prediction.depth)
        .map_err(FcError::from)?;
    if let Some(wf) = &summary.world_file {
        info!("坐标文件: {}", wf.display());
    }
    if let Some(lp) = &summary.legend_path {
        info!("色标: {} ({})", lp.display(), summary.legend.label);
    }

    if let Some(path) = &config.export.depth_grid {
        AsciiGridWriter::new()
            .write(
                path,
                prediction.depth.unknown_as_nan().view(),
                elevation.transform(),
            )
            .map_err(FcError::from)
            .with_context(|| format!("导出深度栅格失败: {}", path.display()))?;
    }

    info!("总耗时: {:.2?}", start.elapsed());
    info!("=== 完成 ===");
    Ok(())
}

/// 合并配置文件与命令行参数
fn resolve_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(model) = &args.model {
        config.model_source = model.clone();
    }
    if let Some(raster) = &args.raster {
        config.raster_source = raster.clone();
    }
    if let Some(output) = &args.output {
        config.render.output = output.clone();
    }
    if args.export_depth.is_some() {
        config.export.depth_grid = args.export_depth.clone();
    }
    if args.no_world_file {
        config.render.world_file = false;
    }

    config.validate().map_err(FcError::from)?;
    Ok(config)
}

/// 模型和高程必须都存在
fn check_resources(config: &PipelineConfig) -> FcResult<()> {
    ensure!(
        config.model_source.exists(),
        FcError::missing_resource("model", &config.model_source)
    );
    ensure!(
        config.raster_source.exists(),
        FcError::missing_resource("raster", &config.raster_source)
    );
    Ok(())
}

fn overlay_style(render: &RenderConfig) -> OverlayStyle {
    OverlayStyle {
        base_alpha: render.base_alpha,
        flood_alpha: render.flood_alpha,
        vmin: render.vmin,
        vmax: render.vmax,
        ..OverlayStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args() -> RunArgs {
        RunArgs {
            config: None,
            model: None,
            raster: None,
            rainfall: 50.0,
            tide: 150.0,
            subsidence: 5.0,
            output: None,
            export_depth: None,
            no_world_file: false,
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut a = args();
        a.raster = Some(PathBuf::from("city.asc"));
        a.export_depth = Some(PathBuf::from("depth.asc"));
        a.no_world_file = true;

        let config = resolve_config(&a).unwrap();
        assert_eq!(config.raster_source, PathBuf::from("city.asc"));
        assert_eq!(config.model_source, PathBuf::from("flood_model.json"));
        assert_eq!(config.export.depth_grid, Some(PathBuf::from("depth.asc")));
        assert!(!config.render.world_file);
    }

    #[test]
    fn test_missing_model_detected_first() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            model_source: dir.path().join("flood_model.json"),
            raster_source: dir.path().join("dem.asc"),
            ..Default::default()
        };
        let err = check_resources(&config).unwrap_err();
        assert!(matches!(err, FcError::MissingResource { kind: "model", .. }));
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("flood_model.json");
        let raster = dir.path().join("dem.asc");
        let output = dir.path().join("flood_map.png");
        let depth = dir.path().join("depth.asc");

        fs::write(&model, r#"{"kind": "water_balance"}"#).unwrap();
        fs::write(
            &raster,
            "ncols 3\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nNODATA_value -9999\n\
             0.5 1.0 3.0\n-9999 0.2 2.5\n",
        )
        .unwrap();

        let mut a = args();
        a.model = Some(model);
        a.raster = Some(raster);
        a.output = Some(output.clone());
        a.export_depth = Some(depth.clone());
        execute(a).unwrap();

        assert!(output.exists());
        assert!(output.with_extension("pgw").exists());
        assert!(dir.path().join("flood_map_legend.png").exists());
        let text = fs::read_to_string(depth).unwrap();
        assert!(text.contains("-9999"));
    }
}
