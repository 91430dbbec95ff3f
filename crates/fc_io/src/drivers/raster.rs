// crates/fc_io/src/drivers/raster.rs

//! 栅格驱动抽象接口

use fc_terrain::{Bounds, GeoTransform};
use ndarray::Array2;

use crate::error::{IoError, IoResult};

/// 栅格元数据
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// 宽度 (像素)
    pub width: usize,
    /// 高度 (像素)
    pub height: usize,
    /// 波段数
    pub band_count: usize,
    /// 地理变换
    pub geo_transform: GeoTransform,
    /// 投影 WKT
    pub projection: Option<String>,
    /// NoData 值
    pub nodata: Option<f64>,
}

impl RasterMetadata {
    /// 形状 (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// 获取像素分辨率
    pub fn resolution(&self) -> (f64, f64) {
        self.geo_transform.resolution()
    }

    /// 地理范围
    pub fn bounds(&self) -> Bounds {
        self.geo_transform.bounds(self.height, self.width)
    }
}

/// 栅格波段数据（行主序，首行为北侧）
#[derive(Debug, Clone)]
pub struct RasterBand {
    /// 数据
    pub data: Vec<f64>,
    /// 宽度
    pub width: usize,
    /// 高度
    pub height: usize,
    /// NoData 值
    pub nodata: Option<f64>,
}

impl RasterBand {
    /// 获取指定位置的原始值
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// 转为 (height, width) 的二维数组
    pub fn into_array(self) -> IoResult<Array2<f64>> {
        let (h, w) = (self.height, self.width);
        let len = self.data.len();
        Array2::from_shape_vec((h, w), self.data).map_err(|_| IoError::DataSizeMismatch {
            expected: h * w,
            actual: len,
        })
    }
}

/// 栅格驱动 trait
pub trait RasterDriver {
    /// 驱动名称
    fn driver_name(&self) -> &'static str;

    /// 获取栅格元数据
    fn metadata(&self) -> &RasterMetadata;

    /// 读取波段数据（波段编号从 1 开始）
    fn read_band(&self, band: usize) -> IoResult<RasterBand>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_metadata_bounds() {
        let meta = RasterMetadata {
            width: 100,
            height: 50,
            band_count: 1,
            geo_transform: GeoTransform::new(0.0, 100.0, 1.0, -1.0),
            projection: None,
            nodata: None,
        };

        let b = meta.bounds();
        assert!((b.left - 0.0).abs() < 1e-10);
        assert!((b.right - 100.0).abs() < 1e-10);
        assert!((b.bottom - 50.0).abs() < 1e-10);
        assert!((b.top - 100.0).abs() < 1e-10);
        assert_eq!(meta.shape(), (50, 100));
    }

    #[test]
    fn test_band_into_array_is_row_major() {
        let band = RasterBand {
            data: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            width: 3,
            height: 2,
            nodata: None,
        };
        assert_eq!(band.get(2, 0), Some(2.0));
        assert_eq!(band.get(0, 1), Some(3.0));
        assert_eq!(band.get(3, 0), None);

        let arr = band.into_array().unwrap();
        assert_eq!(arr.dim(), (2, 3));
        assert_eq!(arr[[1, 0]], 3.0);
    }

    #[test]
    fn test_band_into_array_size_mismatch() {
        let band = RasterBand {
            data: vec![0.0; 5],
            width: 3,
            height: 2,
            nodata: None,
        };
        assert!(matches!(
            band.into_array(),
            Err(IoError::DataSizeMismatch { expected: 6, actual: 5 })
        ));
    }
}
