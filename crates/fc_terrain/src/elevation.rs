// crates/fc_terrain/src/elevation.rs

//! 高程栅格
//!
//! 保存单波段高程数据及其仿射变换。构造时统一处理无数据：
//! 低于等于 [`NODATA_THRESHOLD`] 的值、栅格声明的 NoData 值以及非有限值
//! 一律替换为 NaN，下游只需判断 `is_nan()`。

use fc_foundation::error::{FcError, FcResult};
use ndarray::{Array2, ArrayView2};

use crate::transform::{Bounds, GeoTransform};

/// 无数据判定阈值 [m]，不高于该值的高程视为缺测
pub const NODATA_THRESHOLD: f64 = -100.0;

/// NoData 值比较容差
const NODATA_EPS: f64 = 1e-10;

/// 高程栅格
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    /// 高程 [m]，形状 (rows, cols)，缺测为 NaN
    data: Array2<f64>,
    /// 仿射变换
    transform: GeoTransform,
}

/// 高程统计（仅统计有效像素）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStatistics {
    /// 最小高程
    pub min: f64,
    /// 最大高程
    pub max: f64,
    /// 平均高程
    pub mean: f64,
    /// 有效像素数
    pub valid_count: usize,
    /// 总像素数
    pub total_count: usize,
}

impl ElevationStatistics {
    /// 有效像素比例
    pub fn valid_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.valid_count as f64 / self.total_count as f64
        }
    }
}

impl ElevationGrid {
    /// 从原始波段数据创建，使用默认阈值
    pub fn from_raw(data: Array2<f64>, transform: GeoTransform, nodata: Option<f64>) -> Self {
        Self::from_raw_with_threshold(data, transform, nodata, NODATA_THRESHOLD)
    }

    /// 从原始波段数据创建，指定无数据阈值
    pub fn from_raw_with_threshold(
        mut data: Array2<f64>,
        transform: GeoTransform,
        nodata: Option<f64>,
        threshold: f64,
    ) -> Self {
        let declared = nodata.filter(|v| v.is_finite());
        data.mapv_inplace(|v| {
            let is_declared = declared.is_some_and(|nd| (v - nd).abs() < NODATA_EPS);
            if !v.is_finite() || v <= threshold || is_declared {
                f64::NAN
            } else {
                v
            }
        });
        Self { data, transform }
    }

    /// 从按行主序排列的一维数据创建
    pub fn from_vec(
        data: Vec<f64>,
        rows: usize,
        cols: usize,
        transform: GeoTransform,
        nodata: Option<f64>,
    ) -> FcResult<Self> {
        FcError::check_size("elevation data", rows * cols, data.len())?;
        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| FcError::internal(format!("无法构造高程数组: {e}")))?;
        Ok(Self::from_raw(array, transform, nodata))
    }

    /// 高程数组视图（缺测为 NaN）
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// 形状 (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// 行数
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// 列数
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// 像素总数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空栅格
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 仿射变换
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// 地理范围
    pub fn bounds(&self) -> Bounds {
        let (rows, cols) = self.shape();
        self.transform.bounds(rows, cols)
    }

    /// 获取像素高程，越界或缺测时返回 `None`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied().filter(|v| !v.is_nan())
    }

    /// 像素是否有效
    #[inline]
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// 有效像素数
    pub fn count_valid(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }

    /// 统计有效像素，全部缺测时返回 `None`
    pub fn statistics(&self) -> Option<ElevationStatistics> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &v in self.data.iter().filter(|v| !v.is_nan()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(ElevationStatistics {
            min,
            max,
            mean: sum / count as f64,
            valid_count: count,
            total_count: self.data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sentinel_becomes_nan() {
        let raw = array![[5.0, -9999.0], [3.0, -100.0]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), None);
        assert_eq!(grid.get(0, 0), Some(5.0));
        assert!(grid.get(0, 1).is_none());
        // 阈值本身也视为缺测
        assert!(grid.get(1, 1).is_none());
        assert_eq!(grid.count_valid(), 2);
    }

    #[test]
    fn test_just_above_threshold_is_kept() {
        let raw = array![[-99.5]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), None);
        assert_eq!(grid.get(0, 0), Some(-99.5));
    }

    #[test]
    fn test_declared_nodata() {
        let raw = array![[0.0, 1.0], [2.0, 3.0]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), Some(0.0));
        assert!(!grid.is_valid(0, 0));
        assert!(grid.is_valid(0, 1));
    }

    #[test]
    fn test_non_finite_is_missing() {
        let raw = array![[f64::INFINITY, f64::NAN, 1.0]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), None);
        assert_eq!(grid.count_valid(), 1);
    }

    #[test]
    fn test_from_vec_size_check() {
        let err = ElevationGrid::from_vec(vec![1.0; 5], 2, 3, GeoTransform::default(), None);
        assert!(matches!(err, Err(FcError::SizeMismatch { .. })));

        let grid =
            ElevationGrid::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3, GeoTransform::default(), None)
                .unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 0), Some(4.0));
    }

    #[test]
    fn test_statistics() {
        let raw = array![[1.0, -9999.0], [3.0, 5.0]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), None);
        let stats = grid.statistics().unwrap();
        assert!((stats.min - 1.0).abs() < 1e-10);
        assert!((stats.max - 5.0).abs() < 1e-10);
        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert_eq!(stats.valid_count, 3);
        assert!((stats.valid_fraction() - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_statistics_all_missing() {
        let raw = array![[-9999.0, -9999.0]];
        let grid = ElevationGrid::from_raw(raw, GeoTransform::default(), None);
        assert!(grid.statistics().is_none());
        assert_eq!(grid.count_valid(), 0);
    }

    #[test]
    fn test_bounds_follow_transform() {
        let raw = Array2::zeros((4, 8));
        let grid = ElevationGrid::from_raw(raw, GeoTransform::new(10.0, 20.0, 0.5, -0.5), None);
        let b = grid.bounds();
        assert!((b.left - 10.0).abs() < 1e-10);
        assert!((b.right - 14.0).abs() < 1e-10);
        assert!((b.bottom - 18.0).abs() < 1e-10);
        assert!((b.top - 20.0).abs() < 1e-10);
    }
}
