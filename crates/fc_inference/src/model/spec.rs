// crates/fc_inference/src/model/spec.rs

//! 模型描述文件
//!
//! JSON 以 `kind` 字段区分模型类型：
//!
//! ```json
//! { "kind": "water_balance", "clamp_dry": true }
//! { "kind": "linear", "intercept": 0.0, "coefficients": [0.5, 1.0, 2.0, -100.0] }
//! { "kind": "tree_ensemble", "trees": [ { "root": { "type": "leaf", "value": 0.0 } } ] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LinearModel, ModelError, RegressionModel, TreeEnsemble, WaterBalanceModel};

/// 模型描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    /// 水量平衡规则
    WaterBalance(WaterBalanceModel),
    /// 线性回归
    Linear(LinearModel),
    /// 回归树集成
    TreeEnsemble(TreeEnsemble),
}

impl ModelSpec {
    /// 从 JSON 文本解析
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        serde_json::from_str(text).map_err(|e| ModelError::Parse(e.to_string()))
    }

    /// 从文件读取
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// 序列化为 JSON
    pub fn to_json_string(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Parse(e.to_string()))
    }

    /// 类型名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WaterBalance(_) => "water_balance",
            Self::Linear(_) => "linear",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// 检查参数
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::WaterBalance(m) => m.validate(),
            Self::Linear(m) => m.validate(),
            Self::TreeEnsemble(m) => m.validate(),
        }
    }

    /// 校验后转换为可推理的模型
    pub fn into_model(self) -> Result<Box<dyn RegressionModel + Send + Sync>, ModelError> {
        self.validate()?;
        Ok(match self {
            Self::WaterBalance(m) => Box::new(m),
            Self::Linear(m) => Box::new(m),
            Self::TreeEnsemble(m) => Box::new(m),
        })
    }
}

/// 加载模型文件
///
/// 文件不存在时返回 [`ModelError::NotFound`]。
pub fn load_model(
    path: impl AsRef<Path>,
) -> Result<Box<dyn RegressionModel + Send + Sync>, ModelError> {
    ModelSpec::from_file(path)?.into_model()
}
