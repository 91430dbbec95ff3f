// crates/fc_render/src/error.rs

//! 渲染错误

use fc_foundation::FcError;
use thiserror::Error;

/// 渲染结果类型
pub type RenderResult<T> = Result<T, RenderError>;

/// 渲染错误
#[derive(Error, Debug)]
pub enum RenderError {
    /// 高程与深度形状不一致
    #[error("图层形状不一致: 高程 {expected:?}, 深度 {actual:?}")]
    ShapeMismatch {
        /// 高程形状
        expected: (usize, usize),
        /// 深度形状
        actual: (usize, usize),
    },

    /// 栅格为空或尺寸超出图像范围
    #[error("无法渲染尺寸为 {rows}x{cols} 的栅格")]
    InvalidSize {
        /// 行数
        rows: usize,
        /// 列数
        cols: usize,
    },

    /// 样式参数无效
    #[error("样式参数无效: {0}")]
    InvalidStyle(String),

    /// 图像编码失败
    #[error("图像编码失败: {0}")]
    Image(#[from] image::ImageError),

    /// 文件写入失败
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for FcError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::ShapeMismatch { expected, actual } => {
                FcError::shape_mismatch("overlay layers", expected, actual)
            }
            RenderError::Io(e) => FcError::io_with_source("渲染输出写入失败", e),
            other => FcError::render(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_mapping() {
        let err: FcError = RenderError::ShapeMismatch {
            expected: (2, 2),
            actual: (2, 3),
        }
        .into();
        assert!(matches!(err, FcError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_style_mapping() {
        let err: FcError = RenderError::InvalidStyle("alpha".into()).into();
        assert!(matches!(err, FcError::Render { .. }));
    }
}
