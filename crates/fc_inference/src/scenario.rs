// crates/fc_inference/src/scenario.rs

//! 情景输入
//!
//! 一次推理使用的三个标量：降雨强度、潮位、地面沉降速率。
//! 构造时校验为非负有限值，之后不可变。

use std::fmt;

use fc_foundation::error::{FcError, FcResult};

/// 情景输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInputs {
    /// 降雨强度 [mm/h]
    rainfall: f64,
    /// 潮位 [cm]
    tide: f64,
    /// 地面沉降速率 [cm/yr]
    subsidence: f64,
}

impl ScenarioInputs {
    /// 创建情景，任一输入为负、NaN 或无穷时报错
    pub fn new(rainfall: f64, tide: f64, subsidence: f64) -> FcResult<Self> {
        FcError::check_range("rainfall", rainfall, 0.0, f64::MAX)?;
        FcError::check_range("tide", tide, 0.0, f64::MAX)?;
        FcError::check_range("subsidence", subsidence, 0.0, f64::MAX)?;
        Ok(Self {
            rainfall,
            tide,
            subsidence,
        })
    }

    /// 降雨强度 [mm/h]
    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }

    /// 潮位 [cm]
    pub fn tide(&self) -> f64 {
        self.tide
    }

    /// 地面沉降速率 [cm/yr]
    pub fn subsidence(&self) -> f64 {
        self.subsidence
    }

    /// 按特征列顺序返回 `[rainfall, tide, subsidence]`
    pub fn scalars(&self) -> [f64; 3] {
        [self.rainfall, self.tide, self.subsidence]
    }

    /// 降雨分级
    pub fn rainfall_class(&self) -> RainfallClass {
        RainfallClass::classify(self.rainfall)
    }

    /// 潮位分级
    pub fn tide_class(&self) -> TideClass {
        TideClass::classify(self.tide)
    }

    /// 沉降分级
    pub fn subsidence_class(&self) -> SubsidenceClass {
        SubsidenceClass::classify(self.subsidence)
    }
}

impl fmt::Display for ScenarioInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "降雨 {} mm/h | 潮位 {} cm | 沉降 {} cm/yr",
            self.rainfall, self.tide, self.subsidence
        )
    }
}

/// 降雨强度分级 [mm/h]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainfallClass {
    /// 0 - 20，毛毛雨 / 小雨
    Light,
    /// 20 - 50，中雨
    Moderate,
    /// 50 - 100，大雨
    Heavy,
    /// > 100，暴雨
    Extreme,
}

impl RainfallClass {
    /// 全部分级
    pub const ALL: [Self; 4] = [Self::Light, Self::Moderate, Self::Heavy, Self::Extreme];

    /// 分级
    pub fn classify(rainfall: f64) -> Self {
        if rainfall < 20.0 {
            Self::Light
        } else if rainfall < 50.0 {
            Self::Moderate
        } else if rainfall <= 100.0 {
            Self::Heavy
        } else {
            Self::Extreme
        }
    }

    /// 名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "小雨",
            Self::Moderate => "中雨",
            Self::Heavy => "大雨",
            Self::Extreme => "暴雨",
        }
    }

    /// 取值范围说明
    pub fn range(&self) -> &'static str {
        match self {
            Self::Light => "0 - 20",
            Self::Moderate => "20 - 50",
            Self::Heavy => "50 - 100",
            Self::Extreme => "> 100",
        }
    }
}

/// 潮位分级 [cm]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TideClass {
    /// < 120，低潮
    Low,
    /// 120 - 180，正常
    Normal,
    /// 180 - 250，高潮（潮汐洪水）
    HighTide,
    /// > 250，极端高潮
    Extreme,
}

impl TideClass {
    /// 全部分级
    pub const ALL: [Self; 4] = [Self::Low, Self::Normal, Self::HighTide, Self::Extreme];

    /// 分级
    pub fn classify(tide: f64) -> Self {
        if tide < 120.0 {
            Self::Low
        } else if tide < 180.0 {
            Self::Normal
        } else if tide <= 250.0 {
            Self::HighTide
        } else {
            Self::Extreme
        }
    }

    /// 名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "低潮",
            Self::Normal => "正常",
            Self::HighTide => "高潮",
            Self::Extreme => "极端高潮",
        }
    }

    /// 取值范围说明
    pub fn range(&self) -> &'static str {
        match self {
            Self::Low => "< 120",
            Self::Normal => "120 - 180",
            Self::HighTide => "180 - 250",
            Self::Extreme => "> 250",
        }
    }
}

/// 地面沉降分级 [cm/yr]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsidenceClass {
    /// <= 2，稳定区
    Stable,
    /// 2 - 7
    Moderate,
    /// 7 - 13，易沉降区
    Vulnerable,
    /// > 13
    Severe,
}

impl SubsidenceClass {
    /// 全部分级
    pub const ALL: [Self; 4] = [Self::Stable, Self::Moderate, Self::Vulnerable, Self::Severe];

    /// 分级
    pub fn classify(subsidence: f64) -> Self {
        if subsidence <= 2.0 {
            Self::Stable
        } else if subsidence < 7.0 {
            Self::Moderate
        } else if subsidence <= 13.0 {
            Self::Vulnerable
        } else {
            Self::Severe
        }
    }

    /// 名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "稳定",
            Self::Moderate => "中等",
            Self::Vulnerable => "易沉降",
            Self::Severe => "严重",
        }
    }

    /// 取值范围说明
    pub fn range(&self) -> &'static str {
        match self {
            Self::Stable => "0 - 2",
            Self::Moderate => "2 - 7",
            Self::Vulnerable => "7 - 13",
            Self::Severe => "> 13",
        }
    }
}
