// crates/fc_inference/src/layout.rs

//! 像素排列顺序
//!
//! 全流程唯一的展平约定：行主序，行号变化最慢，
//! 第 `i` 个元素对应 `(i / cols, i % cols)`。
//! 特征构建和深度还原都必须经过这里，不依赖数组库的内存布局。

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{InferenceError, InferenceResult};

/// 二维坐标 → 一维下标
#[inline]
pub fn pixel_index(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// 一维下标 → 二维坐标
#[inline]
pub fn pixel_coords(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// 按行主序展平
///
/// 对任意内存布局（包括转置视图）都按逻辑行主序输出。
pub fn flatten_row_major(grid: ArrayView2<'_, f64>) -> Array1<f64> {
    grid.iter().copied().collect()
}

/// 按行主序还原为 (rows, cols)
///
/// `out[r][c] = values[r * cols + c]`，长度不等于 `rows * cols` 时报错。
pub fn unflatten_row_major(
    values: ArrayView1<'_, f64>,
    shape: (usize, usize),
) -> InferenceResult<Array2<f64>> {
    let (rows, cols) = shape;
    InferenceError::check_len("flat grid", rows * cols, values.len())?;
    Ok(Array2::from_shape_fn(shape, |(r, c)| {
        values[pixel_index(r, c, cols)]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_flatten_order() {
        let grid = array![[5.0, f64::NAN], [3.0, 2.0]];
        let flat = flatten_row_major(grid.view());
        assert_eq!(flat[0], 5.0);
        assert!(flat[1].is_nan());
        assert_eq!(flat[2], 3.0);
        assert_eq!(flat[3], 2.0);
    }

    #[test]
    fn test_flatten_ignores_memory_layout() {
        let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let transposed = grid.t().to_owned();
        // 转置后的视图按逻辑行输出
        let flat = flatten_row_major(transposed.t());
        assert_eq!(flat.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_roundtrip() {
        let grid = Array2::from_shape_fn((3, 5), |(r, c)| (r * 10 + c) as f64);
        let flat = flatten_row_major(grid.view());
        let back = unflatten_row_major(flat.view(), (3, 5)).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_unflatten_length_mismatch() {
        let flat = Array1::from(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            unflatten_row_major(flat.view(), (2, 2)),
            Err(InferenceError::ShapeMismatch {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_index_coords_inverse() {
        for i in 0..12 {
            let (r, c) = pixel_coords(i, 4);
            assert_eq!(pixel_index(r, c, 4), i);
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = Array2::<f64>::zeros((0, 3));
        let flat = flatten_row_major(grid.view());
        assert!(flat.is_empty());
        let back = unflatten_row_major(flat.view(), (0, 3)).unwrap();
        assert_eq!(back.dim(), (0, 3));
    }
}
