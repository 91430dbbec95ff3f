// crates/fc_config/src/error.rs

//! 配置层错误类型

use fc_foundation::FcError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<ConfigError> for FcError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => FcError::io_with_source("配置文件读写失败", e),
            ConfigError::Parse(msg) => FcError::config(msg),
            ConfigError::InvalidValue { key, value, reason } => {
                FcError::invalid_config(key, value, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("render.flood_alpha", 1.5, "必须在 [0, 1] 内");
        assert!(err.to_string().contains("render.flood_alpha"));
    }

    #[test]
    fn test_into_foundation() {
        let err: FcError = ConfigError::invalid("render.vmax", -1, "过小").into();
        assert!(matches!(err, FcError::InvalidConfig { .. }));
    }
}
