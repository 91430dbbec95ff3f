// crates/fc_inference/src/predictor.rs

//! 批量推理
//!
//! 只把有效行交给模型，且每次预测最多调用模型一次。
//! 结果按原像素顺序回填为长度 N 的向量，无效像素位置为 0。
//! 没有有效像素时不调用模型，直接返回全 0 向量。

use ndarray::Array1;

use crate::error::{InferenceError, InferenceResult};
use crate::features::{FeatureMatrix, FEATURE_COUNT};
use crate::mask::ValidityMask;
use crate::model::RegressionModel;

/// 回填后的预测向量
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionVector {
    values: Array1<f64>,
    validity: ValidityMask,
    model_invoked: bool,
}

impl PredictionVector {
    /// 预测值（长度 N，无效位置为 0）
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// 对应的有效掩膜
    pub fn validity(&self) -> &ValidityMask {
        &self.validity
    }

    /// 本次是否调用了模型
    pub fn model_invoked(&self) -> bool {
        self.model_invoked
    }

    /// 长度
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 拆分
    pub fn into_parts(self) -> (Array1<f64>, ValidityMask) {
        (self.values, self.validity)
    }
}

/// 批量预测器
pub struct BatchPredictor<'m, M: RegressionModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: RegressionModel + ?Sized> BatchPredictor<'m, M> {
    /// 包装模型
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// 模型名称
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// 执行预测
    ///
    /// # 错误
    ///
    /// - 掩膜长度与矩阵行数不一致，或矩阵列数不为 4：`ShapeMismatch`
    /// - 模型返回长度不等于有效行数：`ShapeMismatch`
    /// - 模型自身失败：`Model`，原样传递
    pub fn predict(
        &self,
        features: &FeatureMatrix,
        mask: &ValidityMask,
    ) -> InferenceResult<PredictionVector> {
        InferenceError::check_len("validity mask", features.n_rows(), mask.len())?;
        InferenceError::check_len("feature columns", FEATURE_COUNT, features.n_features())?;

        let n = features.n_rows();
        let mut values = Array1::zeros(n);

        if mask.all_invalid() {
            return Ok(PredictionVector {
                values,
                validity: mask.clone(),
                model_invoked: false,
            });
        }

        let indices = mask.valid_indices();
        let batch = features.select_rows(&indices);
        let predicted = self.model.predict(batch.view())?;
        InferenceError::check_len("model output", indices.len(), predicted.len())?;

        for (&i, &v) in indices.iter().zip(predicted.iter()) {
            values[i] = v;
        }

        Ok(PredictionVector {
            values,
            validity: mask.clone(),
            model_invoked: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use crate::scenario::ScenarioInputs;
    use ndarray::{array, ArrayView2};
    use std::cell::{Cell, RefCell};

    /// 返回 elevation * 10，并记录每次收到的行数
    struct Recording {
        batches: RefCell<Vec<usize>>,
    }

    impl Recording {
        fn new() -> Self {
            Self {
                batches: RefCell::new(Vec::new()),
            }
        }
    }

    impl RegressionModel for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
            self.batches.borrow_mut().push(features.nrows());
            Ok(features.column(3).mapv(|e| e * 10.0))
        }
    }

    struct Truncating {
        calls: Cell<usize>,
    }

    impl RegressionModel for Truncating {
        fn name(&self) -> &str {
            "truncating"
        }

        fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Array1::zeros(features.nrows().saturating_sub(1)))
        }
    }

    fn inputs(grid: ndarray::Array2<f64>) -> (FeatureMatrix, ValidityMask) {
        let scenario = ScenarioInputs::new(10.0, 100.0, 1.0).unwrap();
        let features = FeatureMatrix::vectorize(grid.view(), &scenario);
        let mask = ValidityMask::from_elevations(features.elevation_column());
        (features, mask)
    }

    #[test]
    fn test_single_batched_call_and_scatter() {
        let (features, mask) = inputs(array![[1.0, f64::NAN], [3.0, 4.0]]);
        let model = Recording::new();
        let out = BatchPredictor::new(&model).predict(&features, &mask).unwrap();

        assert_eq!(*model.batches.borrow(), vec![3]);
        assert!(out.model_invoked());
        assert_eq!(out.values().to_vec(), vec![10.0, 0.0, 30.0, 40.0]);
    }

    #[test]
    fn test_all_invalid_skips_model() {
        let (features, mask) = inputs(array![[f64::NAN, f64::NAN]]);
        let model = Recording::new();
        let out = BatchPredictor::new(&model).predict(&features, &mask).unwrap();

        assert!(model.batches.borrow().is_empty());
        assert!(!out.model_invoked());
        assert_eq!(out.values().to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_mask_length_mismatch() {
        let (features, _) = inputs(array![[1.0, 2.0]]);
        let mask = ValidityMask::from_flags(vec![true]);
        let model = Recording::new();
        let err = BatchPredictor::new(&model).predict(&features, &mask).unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch { .. }));
        assert!(model.batches.borrow().is_empty());
    }

    #[test]
    fn test_short_model_output_is_rejected() {
        let (features, mask) = inputs(array![[1.0, 2.0, 3.0]]);
        let model = Truncating { calls: Cell::new(0) };
        let err = BatchPredictor::new(&model).predict(&features, &mask).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::ShapeMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_works_with_trait_object() {
        let (features, mask) = inputs(array![[0.5]]);
        let model: Box<dyn RegressionModel> = Box::new(Recording::new());
        let out = BatchPredictor::new(model.as_ref()).predict(&features, &mask).unwrap();
        assert_eq!(out.values()[0], 5.0);
    }
}
