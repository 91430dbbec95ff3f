// crates/fc_io/src/drivers/gdal/error.rs

//! GDAL 错误类型

use thiserror::Error;

/// GDAL 错误
#[derive(Error, Debug)]
pub enum GdalError {
    /// 文件不存在
    #[error("文件不存在: {0}")]
    FileNotFound(String),
    /// 打开失败
    #[error("打开数据集失败: {0}")]
    OpenFailed(String),
    /// 波段不存在
    #[error("波段 {0} 不存在")]
    BandNotFound(usize),
    /// 读取失败
    #[error("读取数据失败: {0}")]
    ReadFailed(String),
    /// GDAL 不可用
    #[error("GDAL 不可用（需以 `gdal` 特性重新编译）")]
    NotAvailable,
    /// 其他错误
    #[error("GDAL 错误: {0}")]
    Other(String),
}

#[cfg(feature = "gdal")]
impl From<::gdal::errors::GdalError> for GdalError {
    fn from(e: ::gdal::errors::GdalError) -> Self {
        GdalError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(GdalError::BandNotFound(3).to_string(), "波段 3 不存在");
        assert!(GdalError::NotAvailable.to_string().contains("`gdal`"));
        assert!(GdalError::FileNotFound("dem.tif".into())
            .to_string()
            .contains("dem.tif"));
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(GdalError::Other("x".into()));
        assert_eq!(err.to_string(), "GDAL 错误: x");
    }
}
