// crates/fc_inference/src/reconstruct.rs

//! 深度栅格还原与显示掩膜
//!
//! 把长度 N 的预测向量按行主序还原为 (rows, cols)，并标记显示时需要隐藏的格子：
//! 值 `<= 0` 或 NaN 的格子视为未淹没。原始数值保留不动，只在显示层过滤，
//! 负值在掩膜前不做截断。

use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

use crate::error::{InferenceError, InferenceResult};
use crate::layout::unflatten_row_major;
use crate::predictor::PredictionVector;

/// 计算显示掩膜，true 表示隐藏
pub fn display_mask(values: ArrayView2<'_, f64>) -> Array2<bool> {
    values.mapv(|v| v.is_nan() || v <= 0.0)
}

/// 单元格状态
///
/// 预测向量中缺测像素与“确认未淹没”像素同为 0，
/// 这里借助有效掩膜把两者区分开。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellState {
    /// 地形缺测，未做预测
    Unknown,
    /// 预测为未淹没（值 <= 0）
    Dry,
    /// 预测积水深度 [cm]
    Flooded(f64),
}

/// 深度统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStatistics {
    /// 可见（淹没）格子数
    pub visible_count: usize,
    /// 有效格子数
    pub valid_count: usize,
    /// 格子总数
    pub total_count: usize,
    /// 最大积水深度，无淹没时为 None
    pub max_depth: Option<f64>,
    /// 淹没格子平均深度，无淹没时为 None
    pub mean_depth: Option<f64>,
}

impl DepthStatistics {
    /// 淹没格子占有效格子的比例
    pub fn flooded_fraction(&self) -> f64 {
        if self.valid_count == 0 {
            0.0
        } else {
            self.visible_count as f64 / self.valid_count as f64
        }
    }
}

/// 带显示掩膜的积水深度栅格
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    values: Array2<f64>,
    suppressed: Array2<bool>,
    valid: Array2<bool>,
}

impl DepthGrid {
    /// 由原始深度构建，NaN 视为无效格子
    pub fn from_values(values: Array2<f64>) -> Self {
        let valid = values.mapv(|v| !v.is_nan());
        let suppressed = display_mask(values.view());
        Self {
            values,
            suppressed,
            valid,
        }
    }

    fn with_validity(values: Array2<f64>, valid: Array2<bool>) -> Self {
        let suppressed = display_mask(values.view());
        Self {
            values,
            suppressed,
            valid,
        }
    }

    /// 按当前数值重新计算显示掩膜
    ///
    /// 多次调用结果相同。
    pub fn remask(&mut self) {
        self.suppressed = display_mask(self.values.view());
    }

    /// 原始数值（未掩膜）
    pub fn raw(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// 形状 (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// 显示掩膜，true 表示隐藏
    pub fn suppressed_mask(&self) -> ArrayView2<'_, bool> {
        self.suppressed.view()
    }

    /// 有效格子掩膜
    pub fn validity_mask(&self) -> ArrayView2<'_, bool> {
        self.valid.view()
    }

    /// 是否隐藏，越界视为隐藏
    pub fn is_suppressed(&self, row: usize, col: usize) -> bool {
        self.suppressed.get((row, col)).copied().unwrap_or(true)
    }

    /// 可见深度，隐藏格子返回 None
    pub fn visible_value(&self, row: usize, col: usize) -> Option<f64> {
        if self.is_suppressed(row, col) {
            None
        } else {
            self.values.get((row, col)).copied()
        }
    }

    /// 隐藏格子置为 NaN 的副本，供渲染使用
    pub fn masked_values(&self) -> Array2<f64> {
        let mut out = self.values.clone();
        Zip::from(&mut out)
            .and(&self.suppressed)
            .for_each(|v, &hide| {
                if hide {
                    *v = f64::NAN;
                }
            });
        out
    }

    /// 原始数值，但无效格子置为 NaN，供导出使用
    pub fn unknown_as_nan(&self) -> Array2<f64> {
        let mut out = self.values.clone();
        Zip::from(&mut out).and(&self.valid).for_each(|v, &ok| {
            if !ok {
                *v = f64::NAN;
            }
        });
        out
    }

    /// 可见格子数
    pub fn visible_count(&self) -> usize {
        self.suppressed.iter().filter(|&&s| !s).count()
    }

    /// 单元格状态，越界返回 None
    pub fn cell_state(&self, row: usize, col: usize) -> Option<CellState> {
        let valid = *self.valid.get((row, col))?;
        if !valid {
            return Some(CellState::Unknown);
        }
        Some(match self.visible_value(row, col) {
            Some(depth) => CellState::Flooded(depth),
            None => CellState::Dry,
        })
    }

    /// 统计
    pub fn statistics(&self) -> DepthStatistics {
        let mut visible_count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        Zip::from(&self.values)
            .and(&self.suppressed)
            .for_each(|&v, &hide| {
                if !hide {
                    visible_count += 1;
                    sum += v;
                    max = max.max(v);
                }
            });

        let (max_depth, mean_depth) = if visible_count > 0 {
            (Some(max), Some(sum / visible_count as f64))
        } else {
            (None, None)
        };

        DepthStatistics {
            visible_count,
            valid_count: self.valid.iter().filter(|&&v| v).count(),
            total_count: self.values.len(),
            max_depth,
            mean_depth,
        }
    }
}

/// 深度栅格还原器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridReconstructor {
    shape: (usize, usize),
}

impl GridReconstructor {
    /// 目标形状 (rows, cols)，须与输入高程栅格一致
    pub fn new(shape: (usize, usize)) -> Self {
        Self { shape }
    }

    /// 目标形状
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// 还原预测向量，并携带有效掩膜
    pub fn reconstruct(&self, prediction: &PredictionVector) -> InferenceResult<DepthGrid> {
        let values = unflatten_row_major(prediction.values().view(), self.shape)?;
        let flags: Vec<bool> = prediction.validity().flags().to_vec();
        let valid = Array2::from_shape_vec(self.shape, flags).map_err(|_| {
            InferenceError::shape_mismatch(
                "validity mask",
                self.shape.0 * self.shape.1,
                prediction.validity().len(),
            )
        })?;
        Ok(DepthGrid::with_validity(values, valid))
    }

    /// 还原任意一维数值
    pub fn reconstruct_values(&self, values: ArrayView1<'_, f64>) -> InferenceResult<DepthGrid> {
        Ok(DepthGrid::from_values(unflatten_row_major(values, self.shape)?))
    }
}
