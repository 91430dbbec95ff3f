// crates/fc_inference/src/mask.rs

//! 有效像素掩膜
//!
//! 高程不为 NaN 的像素为有效像素。全部缺测时得到全 false 的掩膜，
//! 这不是错误，下游按“零个有效像素”处理。

use ndarray::ArrayView1;

/// 有效像素掩膜
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    flags: Vec<bool>,
    n_valid: usize,
}

impl ValidityMask {
    /// 由高程列构建
    pub fn from_elevations(elevations: ArrayView1<'_, f64>) -> Self {
        Self::from_flags(elevations.iter().map(|v| !v.is_nan()).collect())
    }

    /// 由布尔向量构建
    pub fn from_flags(flags: Vec<bool>) -> Self {
        let n_valid = flags.iter().filter(|&&f| f).count();
        Self { flags, n_valid }
    }

    /// 像素总数
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// 有效像素数
    pub fn count_valid(&self) -> usize {
        self.n_valid
    }

    /// 是否没有任何有效像素
    pub fn all_invalid(&self) -> bool {
        self.n_valid == 0
    }

    /// 第 `i` 个像素是否有效
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.flags.get(i).copied().unwrap_or(false)
    }

    /// 有效像素下标（升序）
    pub fn valid_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }

    /// 原始标志
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }
}
