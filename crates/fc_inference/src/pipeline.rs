// crates/fc_inference/src/pipeline.rs

//! 端到端推理流程
//!
//! 高程栅格 + 情景 → 特征矩阵 → 有效掩膜 → 单次批量推理 → 深度栅格。
//! 每次运行独立，不缓存任何中间结果。

use fc_terrain::ElevationGrid;

use crate::error::InferenceResult;
use crate::features::FeatureMatrix;
use crate::mask::ValidityMask;
use crate::model::RegressionModel;
use crate::predictor::BatchPredictor;
use crate::reconstruct::{DepthGrid, GridReconstructor};
use crate::scenario::ScenarioInputs;

/// 一次情景推理的结果
#[derive(Debug, Clone, PartialEq)]
pub struct FloodPrediction {
    /// 积水深度栅格，形状与输入高程一致
    pub depth: DepthGrid,
    /// 有效像素数
    pub valid_pixels: usize,
    /// 是否调用了模型
    pub model_invoked: bool,
}

/// 推理流程
pub struct FloodPipeline<'m, M: RegressionModel + ?Sized> {
    predictor: BatchPredictor<'m, M>,
}

impl<'m, M: RegressionModel + ?Sized> FloodPipeline<'m, M> {
    /// 绑定模型
    pub fn new(model: &'m M) -> Self {
        Self {
            predictor: BatchPredictor::new(model),
        }
    }

    /// 模型名称
    pub fn model_name(&self) -> &str {
        self.predictor.model_name()
    }

    /// 对一个情景运行完整推理
    pub fn run(
        &self,
        elevation: &ElevationGrid,
        scenario: &ScenarioInputs,
    ) -> InferenceResult<FloodPrediction> {
        let features = FeatureMatrix::vectorize(elevation.values(), scenario);
        let mask = ValidityMask::from_elevations(features.elevation_column());
        let prediction = self.predictor.predict(&features, &mask)?;
        let depth = GridReconstructor::new(elevation.shape()).reconstruct(&prediction)?;

        Ok(FloodPrediction {
            depth,
            valid_pixels: mask.count_valid(),
            model_invoked: prediction.model_invoked(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaterBalanceModel;
    use crate::reconstruct::CellState;
    use fc_terrain::GeoTransform;
    use ndarray::array;

    #[test]
    fn test_run_water_balance() {
        let grid = ElevationGrid::from_raw(
            array![[0.5, -9999.0], [1.0, 3.0]],
            GeoTransform::default(),
            None,
        );
        let scenario = ScenarioInputs::new(50.0, 150.0, 5.0).unwrap();
        let model = WaterBalanceModel::default();

        let out = FloodPipeline::new(&model).run(&grid, &scenario).unwrap();
        assert!(out.model_invoked);
        assert_eq!(out.valid_pixels, 3);
        assert_eq!(out.depth.shape(), (2, 2));
        // 185 - 50 = 135
        assert_eq!(out.depth.cell_state(0, 0), Some(CellState::Flooded(135.0)));
        assert_eq!(out.depth.cell_state(0, 1), Some(CellState::Unknown));
        assert_eq!(out.depth.cell_state(1, 1), Some(CellState::Dry));
    }
}
