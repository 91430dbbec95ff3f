// crates/fc_render/src/colormap.rs

//! 分段线性色带
//!
//! 色带由若干 `(位置, RGB)` 锚点组成，位置在 [0, 1] 内单调递增，
//! 锚点之间线性插值。

/// 色带
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colormap {
    name: &'static str,
    anchors: &'static [(f64, [f64; 3])],
}

/// 地形色带：深蓝 → 浅蓝 → 绿 → 黄 → 棕 → 白
pub const TERRAIN: Colormap = Colormap {
    name: "terrain",
    anchors: &[
        (0.00, [0.2, 0.2, 0.6]),
        (0.15, [0.0, 0.6, 1.0]),
        (0.25, [0.0, 0.8, 0.4]),
        (0.50, [1.0, 1.0, 0.6]),
        (0.75, [0.5, 0.36, 0.33]),
        (1.00, [1.0, 1.0, 1.0]),
    ],
};

/// 反向蓝白红色带：浅水偏红，深水偏蓝
pub const BWR_R: Colormap = Colormap {
    name: "bwr_r",
    anchors: &[
        (0.0, [1.0, 0.0, 0.0]),
        (0.5, [1.0, 1.0, 1.0]),
        (1.0, [0.0, 0.0, 1.0]),
    ],
};

impl Colormap {
    /// 色带名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 按名称查找内置色带
    pub fn by_name(name: &str) -> Option<Self> {
        [TERRAIN, BWR_R].into_iter().find(|c| c.name == name)
    }

    /// 取 `t ∈ [0, 1]` 处的颜色，越界截断，NaN 取起点
    pub fn sample(&self, t: f64) -> [f64; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let anchors = self.anchors;

        for pair in anchors.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if t <= p1 {
                let span = p1 - p0;
                let w = if span > 0.0 { (t - p0) / span } else { 0.0 };
                return [
                    c0[0] + (c1[0] - c0[0]) * w,
                    c0[1] + (c1[1] - c0[1]) * w,
                    c0[2] + (c1[2] - c0[2]) * w,
                ];
            }
        }
        anchors.last().map(|&(_, c)| c).unwrap_or([0.0; 3])
    }
}

/// 线性归一化到 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// 下限
    pub vmin: f64,
    /// 上限
    pub vmax: f64,
}

impl Normalize {
    /// 创建
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// 归一化并截断；上下限相等时返回 0.5
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }
}
