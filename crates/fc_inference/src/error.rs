// crates/fc_inference/src/error.rs

//! 推理层错误类型

use fc_foundation::FcError;
use thiserror::Error;

use crate::model::ModelError;

/// 推理层结果类型
pub type InferenceResult<T> = Result<T, InferenceError>;

/// 推理层错误
#[derive(Error, Debug)]
pub enum InferenceError {
    /// 长度或列数不一致（调用方违反前置条件）
    #[error("形状不匹配: {what} 期望 {expected}, 实际 {actual}")]
    ShapeMismatch {
        /// 出错的数据
        what: &'static str,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 模型推理失败，保留模型给出的原始错误
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl InferenceError {
    /// 长度不匹配
    pub fn shape_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }

    /// 检查长度
    #[inline]
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> InferenceResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::shape_mismatch(what, expected, actual))
        }
    }
}

impl From<InferenceError> for FcError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ShapeMismatch {
                what,
                expected,
                actual,
            } => FcError::size_mismatch(what, expected, actual),
            InferenceError::Model(e) => e.into(),
        }
    }
}
