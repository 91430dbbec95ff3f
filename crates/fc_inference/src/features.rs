// crates/fc_inference/src/features.rs

//! 特征矩阵构建
//!
//! 把三个情景标量广播到每个像素，并与展平后的高程拼成 N×4 矩阵。
//! 列顺序必须与模型训练时一致，否则预测没有意义。

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{InferenceError, InferenceResult};
use crate::layout::flatten_row_major;
use crate::scenario::ScenarioInputs;

/// 特征列数
pub const FEATURE_COUNT: usize = 4;

/// 特征列（顺序即列下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    /// 降雨强度 [mm/h]
    Rainfall = 0,
    /// 潮位 [cm]
    Tide = 1,
    /// 地面沉降 [cm/yr]
    Subsidence = 2,
    /// 地面高程 [m]
    Elevation = 3,
}

impl FeatureColumn {
    /// 训练时的列顺序
    pub const ORDER: [Self; FEATURE_COUNT] =
        [Self::Rainfall, Self::Tide, Self::Subsidence, Self::Elevation];

    /// 列下标
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 列名
    pub fn name(self) -> &'static str {
        match self {
            Self::Rainfall => "rainfall",
            Self::Tide => "tide",
            Self::Subsidence => "subsidence",
            Self::Elevation => "elevation",
        }
    }
}

/// 特征矩阵 (N×4)
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// 由高程栅格和情景构建
    ///
    /// 第 3 列为按行主序展平的高程，NaN 原样保留。
    pub fn vectorize(elevation: ArrayView2<'_, f64>, scenario: &ScenarioInputs) -> Self {
        let flat = flatten_row_major(elevation);
        let mut data = Array2::zeros((flat.len(), FEATURE_COUNT));

        let [rainfall, tide, subsidence] = scenario.scalars();
        data.column_mut(FeatureColumn::Rainfall.index()).fill(rainfall);
        data.column_mut(FeatureColumn::Tide.index()).fill(tide);
        data.column_mut(FeatureColumn::Subsidence.index()).fill(subsidence);
        data.column_mut(FeatureColumn::Elevation.index()).assign(&flat);

        Self { data }
    }

    /// 包装已有矩阵，列数必须为 4
    pub fn from_array(data: Array2<f64>) -> InferenceResult<Self> {
        InferenceError::check_len("feature columns", FEATURE_COUNT, data.ncols())?;
        Ok(Self { data })
    }

    /// 行数（像素数）
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// 列数
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// 矩阵视图
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// 指定列
    pub fn column(&self, column: FeatureColumn) -> ArrayView1<'_, f64> {
        self.data.column(column.index())
    }

    /// 高程列
    pub fn elevation_column(&self) -> ArrayView1<'_, f64> {
        self.column(FeatureColumn::Elevation)
    }

    /// 按给定下标取行，保持下标顺序
    pub fn select_rows(&self, indices: &[usize]) -> Array2<f64> {
        self.data.select(Axis(0), indices)
    }
}
