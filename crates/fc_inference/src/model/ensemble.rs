// crates/fc_inference/src/model/ensemble.rs

//! 回归树集成
//!
//! 随机森林导出为 JSON 后的推理实现。每棵树是二叉决策树，
//! 特征值 `<= threshold` 走左子树，否则走右子树；集成输出为各树叶值的均值。
//!
//! 行数超过 `parallel_threshold` 时用 rayon 按行并行。

use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_feature_count, ModelError, RegressionModel};
use crate::features::FEATURE_COUNT;

/// 树深度上限，防止畸形输入导致栈溢出
const MAX_TREE_DEPTH: usize = 512;

fn default_parallel_threshold() -> usize {
    4096
}

/// 决策树节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// 分裂节点
    Split {
        /// 特征列下标
        feature: usize,
        /// 分裂阈值
        threshold: f64,
        /// `<= threshold` 分支
        left: Box<TreeNode>,
        /// `> threshold` 分支
        right: Box<TreeNode>,
    },
    /// 叶节点
    Leaf {
        /// 预测值 [cm]
        value: f64,
    },
}

impl TreeNode {
    /// 叶节点
    pub fn leaf(value: f64) -> Self {
        Self::Leaf { value }
    }

    /// 分裂节点
    pub fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        Self::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn validate(&self, depth: usize) -> Result<(), ModelError> {
        if depth > MAX_TREE_DEPTH {
            return Err(ModelError::Invalid(format!("树深度超过上限 {MAX_TREE_DEPTH}")));
        }
        match self {
            Self::Leaf { value } => {
                if !value.is_finite() {
                    return Err(ModelError::Invalid(format!("叶值必须为有限值: {value}")));
                }
                Ok(())
            }
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(ModelError::Invalid(format!(
                        "特征下标越界: {feature} (共 {FEATURE_COUNT} 列)"
                    )));
                }
                if threshold.is_nan() {
                    return Err(ModelError::Invalid("分裂阈值为 NaN".into()));
                }
                left.validate(depth + 1)?;
                right.validate(depth + 1)
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// 单棵回归树
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// 根节点
    pub root: TreeNode,
}

impl RegressionTree {
    /// 创建
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// 对单行求值
    pub fn evaluate(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    /// 树深度
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

/// 回归树集成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// 树列表
    pub trees: Vec<RegressionTree>,
    /// 并行阈值（行数）
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl TreeEnsemble {
    /// 创建
    pub fn new(trees: Vec<RegressionTree>) -> Self {
        Self {
            trees,
            parallel_threshold: default_parallel_threshold(),
        }
    }

    /// 设置并行阈值
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// 树数量
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// 检查结构
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("集成中没有任何树".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.root
                .validate(1)
                .map_err(|e| ModelError::Invalid(format!("第 {i} 棵树: {e}")))?;
        }
        Ok(())
    }

    #[inline]
    fn evaluate_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(row)).sum();
        sum / self.trees.len() as f64
    }
}

impl RegressionModel for TreeEnsemble {
    fn name(&self) -> &str {
        "tree_ensemble"
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        check_feature_count(&features)?;
        self.validate()?;

        let n = features.nrows();
        let values: Vec<f64> = if n >= self.parallel_threshold {
            (0..n)
                .into_par_iter()
                .map(|i| self.evaluate_row(features.row(i)))
                .collect()
        } else {
            features
                .rows()
                .into_iter()
                .map(|row| self.evaluate_row(row))
                .collect()
        };
        Ok(Array1::from(values))
    }
}
