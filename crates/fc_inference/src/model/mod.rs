// crates/fc_inference/src/model/mod.rs

//! 回归模型接口
//!
//! 推理核心只依赖 [`RegressionModel::predict`]：输入 M×4 特征矩阵，
//! 输出长度为 M 的深度向量 [cm]。具体算法（线性、树集成、水量平衡规则）
//! 对核心透明，测试中可以用确定性的桩替换。
//!
//! # 内置实现
//!
//! | kind            | 类型                  | 说明                         |
//! |-----------------|-----------------------|------------------------------|
//! | `water_balance` | [`WaterBalanceModel`] | 合成训练数据所用的水量平衡规则 |
//! | `linear`        | [`LinearModel`]       | 线性回归                     |
//! | `tree_ensemble` | [`TreeEnsemble`]      | 回归树集成（随机森林导出）     |
//!
//! 模型以 JSON 描述，通过 [`load_model`] 加载。

pub mod ensemble;
pub mod linear;
pub mod spec;
pub mod water_balance;

use std::path::PathBuf;

use fc_foundation::FcError;
use ndarray::{Array1, ArrayView2};
use thiserror::Error;

use crate::features::FEATURE_COUNT;

pub use ensemble::{RegressionTree, TreeEnsemble, TreeNode};
pub use linear::LinearModel;
pub use spec::{load_model, ModelSpec};
pub use water_balance::WaterBalanceModel;

/// 模型错误
#[derive(Error, Debug)]
pub enum ModelError {
    /// 模型文件不存在
    #[error("模型文件不存在: {}", path.display())]
    NotFound {
        /// 模型路径
        path: PathBuf,
    },

    /// 模型文件读取失败
    #[error("模型文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    /// 模型描述解析失败
    #[error("模型描述解析失败: {0}")]
    Parse(String),

    /// 模型结构无效
    #[error("模型结构无效: {0}")]
    Invalid(String),

    /// 输入特征列数不符
    #[error("特征列数不匹配: 期望 {expected}, 实际 {actual}")]
    FeatureCount {
        /// 期望列数
        expected: usize,
        /// 实际列数
        actual: usize,
    },

    /// 推理过程失败
    #[error("模型推理失败: {0}")]
    Inference(String),
}

impl From<ModelError> for FcError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { path } => FcError::missing_resource("model", path),
            ModelError::Io(e) => FcError::io_with_source("模型文件读取失败", e),
            ModelError::Parse(msg) => FcError::serialization(msg),
            other => FcError::model_inference(other.to_string()),
        }
    }
}

/// 回归模型
///
/// 实现方必须对每一行独立给出预测，且返回长度等于输入行数。
pub trait RegressionModel {
    /// 模型名称
    fn name(&self) -> &str;

    /// 批量预测
    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError>;
}

/// 检查输入列数
#[inline]
pub(crate) fn check_feature_count(features: &ArrayView2<'_, f64>) -> Result<(), ModelError> {
    if features.ncols() != FEATURE_COUNT {
        return Err(ModelError::FeatureCount {
            expected: FEATURE_COUNT,
            actual: features.ncols(),
        });
    }
    Ok(())
}
