// crates/fc_inference/src/model/linear.rs

//! 线性回归模型

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{check_feature_count, ModelError, RegressionModel};
use crate::features::FEATURE_COUNT;

/// 线性回归：`intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// 截距
    #[serde(default)]
    pub intercept: f64,
    /// 系数，顺序为 [rainfall, tide, subsidence, elevation]
    pub coefficients: [f64; FEATURE_COUNT],
}

impl LinearModel {
    /// 创建
    pub fn new(intercept: f64, coefficients: [f64; FEATURE_COUNT]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// 检查参数
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("线性模型参数必须为有限值".into()));
        }
        Ok(())
    }
}

impl RegressionModel for LinearModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        check_feature_count(&features)?;
        let coef = Array1::from(self.coefficients.to_vec());
        Ok(features.dot(&coef) + self.intercept)
    }
}
