// crates/fc_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `FcError` 枚举和 `FcResult` 类型别名。各上层 crate 定义自己的
//! 错误枚举（`IoError`、`InferenceError` 等），并实现 `From<_> for FcError`，
//! 使错误可以一路传递到命令行入口。
//!
//! # 示例
//!
//! ```
//! use fc_foundation::error::{FcError, FcResult};
//!
//! fn read_config() -> FcResult<()> {
//!     Err(FcError::config("配置文件格式错误"))
//! }
//! assert!(read_config().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type FcResult<T> = Result<T, FcError>;

/// Floodcast 错误类型
#[derive(Error, Debug)]
pub enum FcError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 运行所需资源缺失（模型或栅格）
    #[error("缺少必需资源 [{kind}]: {path}")]
    MissingResource {
        /// 资源类别，例如 "model" / "raster"
        kind: &'static str,
        /// 资源路径
        path: PathBuf,
    },

    /// 不支持的文件格式
    #[error("不支持的文件格式: {format} (支持的格式: {supported:?})")]
    UnsupportedFormat {
        /// 输入文件格式
        format: String,
        /// 支持的格式列表
        supported: Vec<String>,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 数据相关错误
    // ========================================================================
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 二维形状不匹配
    #[error("形状不匹配: {name} 期望{expected:?}, 实际{actual:?}")]
    ShapeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望形状 (rows, cols)
        expected: (usize, usize),
        /// 实际形状 (rows, cols)
        actual: (usize, usize),
    },

    // ========================================================================
    // 配置相关错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 计算相关错误
    // ========================================================================
    /// 模型推理失败
    #[error("模型推理失败: {message}")]
    ModelInference {
        /// 模型给出的错误信息
        message: String,
    },

    /// 渲染失败
    #[error("渲染失败: {message}")]
    Render {
        /// 失败原因
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl FcError {
    /// 从消息创建 IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 资源缺失
    pub fn missing_resource(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::MissingResource {
            kind,
            path: path.into(),
        }
    }

    /// 不支持的格式
    pub fn unsupported_format(format: impl Into<String>, supported: Vec<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            supported,
        }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 二维形状不匹配
    pub fn shape_mismatch(
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 模型推理失败
    pub fn model_inference(message: impl Into<String>) -> Self {
        Self::ModelInference {
            message: message.into(),
        }
    }

    /// 渲染失败
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为资源缺失类错误
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, Self::MissingResource { .. } | Self::FileNotFound { .. })
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl FcError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> FcResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> FcResult<()> {
        if value.is_nan() || value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for FcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
