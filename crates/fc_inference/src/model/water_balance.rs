// crates/fc_inference/src/model/water_balance.rs

//! 水量平衡规则模型
//!
//! 合成训练样本时使用的确定性规则：
//!
//! ```text
//! 水位 [cm] = 潮位 × tide_factor + 降雨 × rainfall_factor + 沉降 × subsidence_factor
//! 积水 [cm] = 水位 − 高程 [m] × elevation_scale
//! ```
//!
//! `clamp_dry` 为 true 时负值截断为 0（地面高于水位即为干）。

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{check_feature_count, ModelError, RegressionModel};
use crate::features::FeatureColumn;

fn default_rainfall_factor() -> f64 {
    0.5
}
fn default_tide_factor() -> f64 {
    1.0
}
fn default_subsidence_factor() -> f64 {
    2.0
}
fn default_elevation_scale() -> f64 {
    100.0
}
fn default_clamp_dry() -> bool {
    true
}

/// 水量平衡规则模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceModel {
    /// 降雨 [mm/h] → 水位 [cm] 系数
    #[serde(default = "default_rainfall_factor")]
    pub rainfall_factor: f64,
    /// 潮位系数
    #[serde(default = "default_tide_factor")]
    pub tide_factor: f64,
    /// 沉降 [cm/yr] → 水位 [cm] 系数
    #[serde(default = "default_subsidence_factor")]
    pub subsidence_factor: f64,
    /// 高程单位换算 [m → cm]
    #[serde(default = "default_elevation_scale")]
    pub elevation_scale: f64,
    /// 负积水截断为 0
    #[serde(default = "default_clamp_dry")]
    pub clamp_dry: bool,
}

impl Default for WaterBalanceModel {
    fn default() -> Self {
        Self {
            rainfall_factor: default_rainfall_factor(),
            tide_factor: default_tide_factor(),
            subsidence_factor: default_subsidence_factor(),
            elevation_scale: default_elevation_scale(),
            clamp_dry: default_clamp_dry(),
        }
    }
}

impl WaterBalanceModel {
    /// 不截断负值，输出带符号的水位差
    pub fn signed() -> Self {
        Self {
            clamp_dry: false,
            ..Default::default()
        }
    }

    /// 单行计算
    #[inline]
    pub fn depth(&self, rainfall: f64, tide: f64, subsidence: f64, elevation: f64) -> f64 {
        let level = tide * self.tide_factor
            + rainfall * self.rainfall_factor
            + subsidence * self.subsidence_factor;
        let depth = level - elevation * self.elevation_scale;
        if self.clamp_dry {
            depth.max(0.0)
        } else {
            depth
        }
    }

    /// 检查系数
    pub fn validate(&self) -> Result<(), ModelError> {
        let coeffs = [
            ("rainfall_factor", self.rainfall_factor),
            ("tide_factor", self.tide_factor),
            ("subsidence_factor", self.subsidence_factor),
            ("elevation_scale", self.elevation_scale),
        ];
        for (name, v) in coeffs {
            if !v.is_finite() {
                return Err(ModelError::Invalid(format!("{name} 必须为有限值: {v}")));
            }
        }
        Ok(())
    }
}

impl RegressionModel for WaterBalanceModel {
    fn name(&self) -> &str {
        "water_balance"
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        check_feature_count(&features)?;
        Ok(features
            .rows()
            .into_iter()
            .map(|row| {
                self.depth(
                    row[FeatureColumn::Rainfall.index()],
                    row[FeatureColumn::Tide.index()],
                    row[FeatureColumn::Subsidence.index()],
                    row[FeatureColumn::Elevation.index()],
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_default_rule() {
        let m = WaterBalanceModel::default();
        // 150 + 25 + 10 - 100 = 85
        assert!((m.depth(50.0, 150.0, 5.0, 1.0) - 85.0).abs() < 1e-10);
        // 高地为干
        assert_eq!(m.depth(50.0, 150.0, 5.0, 3.0), 0.0);
    }

    #[test]
    fn test_signed_rule() {
        let m = WaterBalanceModel::signed();
        assert!((m.depth(50.0, 150.0, 5.0, 3.0) - (-115.0)).abs() < 1e-10);
    }

    #[test]
    fn test_batch_predict() {
        let m = WaterBalanceModel::default();
        let x = array![[0.0, 200.0, 0.0, 0.5], [100.0, 100.0, 10.0, -1.0]];
        let y = m.predict(x.view()).unwrap();
        assert!((y[0] - 150.0).abs() < 1e-10);
        assert!((y[1] - 370.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_wrong_columns() {
        let m = WaterBalanceModel::default();
        let x = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            m.predict(x.view()),
            Err(ModelError::FeatureCount { .. })
        ));
    }

    #[test]
    fn test_validate() {
        let mut m = WaterBalanceModel::default();
        assert!(m.validate().is_ok());
        m.tide_factor = f64::NAN;
        assert!(m.validate().is_err());
    }
}
