// crates/fc_io/src/exporters/mod.rs

//! 数据导出模块

pub mod ascii_grid;

pub use ascii_grid::AsciiGridWriter;
