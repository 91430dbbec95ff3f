// crates/fc_inference/src/lib.rs

//! Floodcast 推理核心
//!
//! 将只接受标量特征的回归模型扩展为逐像素的栅格预测。
//!
//! # 数据流
//!
//! ```text
//! ElevationGrid ──┐
//!                 ├─> FeatureMatrix (N×4) ─> ValidityMask ─> BatchPredictor
//! ScenarioInputs ─┘                                              │
//!                                                                v
//!                    DepthGrid <─ GridReconstructor <─ PredictionVector (N)
//! ```
//!
//! # 模块概览
//!
//! - [`scenario`]: 情景输入（降雨、潮位、沉降）及分级
//! - [`layout`]: 行主序展平 / 还原，像素顺序的唯一定义
//! - [`features`]: 特征矩阵构建
//! - [`mask`]: 有效像素掩膜
//! - [`predictor`]: 单次批量推理与回填
//! - [`reconstruct`]: 还原二维深度栅格并生成显示掩膜
//! - [`model`]: 回归模型接口及内置实现
//! - [`pipeline`]: 端到端组合
//!
//! # 约定
//!
//! 本 crate 不输出日志，所有错误原样返回给调用方。

pub mod error;
pub mod features;
pub mod layout;
pub mod mask;
pub mod model;
pub mod pipeline;
pub mod predictor;
pub mod reconstruct;
pub mod scenario;

// 重导出常用类型
pub use error::{InferenceError, InferenceResult};
pub use features::{FeatureColumn, FeatureMatrix, FEATURE_COUNT};
pub use layout::{flatten_row_major, unflatten_row_major};
pub use mask::ValidityMask;
pub use model::{load_model, ModelError, ModelSpec, RegressionModel};
pub use pipeline::{FloodPipeline, FloodPrediction};
pub use predictor::{BatchPredictor, PredictionVector};
pub use reconstruct::{CellState, DepthGrid, DepthStatistics, GridReconstructor};
pub use scenario::{RainfallClass, ScenarioInputs, SubsidenceClass, TideClass};
