// crates/fc_foundation/src/lib.rs

//! Floodcast Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型和校验宏。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `FcError` / `FcResult`
//!
//! # 示例
//!
//! ```
//! use fc_foundation::{ensure, FcError, FcResult};
//!
//! fn check_rows(rows: usize) -> FcResult<()> {
//!     ensure!(rows > 0, FcError::invalid_input("栅格行数必须为正"));
//!     Ok(())
//! }
//!
//! assert!(check_rows(3).is_ok());
//! assert!(check_rows(0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

// 重导出常用类型
pub use error::{FcError, FcResult};

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err(($err).into());
        }
    };
}
