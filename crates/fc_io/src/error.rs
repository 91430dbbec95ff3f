// crates/fc_io/src/error.rs
//! IO 错误类型定义
//!
//! 提供 IO 模块的统一错误枚举，通过 thiserror 自动转换底层错误。
//! 所有错误最终可转换为 FcError 以实现跨层错误传递。

use fc_foundation::FcError;
use std::path::PathBuf;
use thiserror::Error;

use crate::drivers::GdalError;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// 文件格式识别失败
    #[error("无法识别文件格式: {} (扩展名: {extension})", path.display())]
    UnknownFormat { path: PathBuf, extension: String },

    /// 波段不存在
    #[error("波段 {band} 不存在 (共 {count} 个波段)")]
    BandNotFound { band: usize, count: usize },

    /// 数据长度与栅格尺寸不符
    #[error("栅格数据长度不匹配: 期望 {expected}, 实际 {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// 解析错误
    #[error("文件解析错误: {}:{line} - {message}", file.display())]
    ParseError {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// 导出格式不支持该仿射变换
    #[error("不支持的仿射变换: {reason}")]
    UnsupportedTransform { reason: String },

    /// GDAL 驱动错误
    #[error("GDAL 驱动错误: {0}")]
    Gdal(#[from] GdalError),

    /// 底层 IO 错误
    #[error("IO 错误: {0}")]
    Std(#[from] std::io::Error),
}

impl From<IoError> for FcError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => FcError::file_not_found(path),
            IoError::UnknownFormat { path, extension } => FcError::unsupported_format(
                format!("{} ({extension})", path.display()),
                crate::loader::supported_extensions()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            IoError::BandNotFound { band, count } => {
                FcError::invalid_input(format!("波段 {band} 不存在 (共 {count} 个波段)"))
            }
            IoError::DataSizeMismatch { expected, actual } => {
                FcError::size_mismatch("raster band", expected, actual)
            }
            IoError::ParseError { file, line, message } => FcError::parse(file, line, message),
            IoError::UnsupportedTransform { reason } => FcError::invalid_input(reason),
            IoError::Gdal(GdalError::FileNotFound(path)) => FcError::file_not_found(path),
            IoError::Gdal(e) => FcError::io(e.to_string()),
            IoError::Std(e) => FcError::from(e),
        }
    }
}
