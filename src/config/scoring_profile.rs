// ==========================================
// 五运六气 AHI 推演引擎 - 评分参数集
// ==========================================
// 格式: JSON, 缺省字段取经典参数集
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 评分参数集
///
/// 先天基准分与生命周期漂移属于可调参数; 流年碰撞的分值与权重是领域常量,
/// 不在此处配置（见 `engine::collision`）。
///
/// JSON 中缺省的字段取经典参数集的值, 便于只覆盖个别参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// 参数集名称（用于日志与结果追溯）
    #[serde(default = "default_name")]
    pub name: String,

    /// 先天基准分参数
    #[serde(default)]
    pub base_score: BaseScoreParameters,

    /// 生命周期漂移分段（"生长壮老已"）
    #[serde(default = "default_drift_bands")]
    pub drift_bands: Vec<DriftBand>,
}

/// 先天基准分参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScoreParameters {
    /// 起始分
    #[serde(default = "default_start")]
    pub start: f64,

    /// 顺境: 主客气相生或同气（加分）
    #[serde(default = "default_harmony_bonus")]
    pub harmony_bonus: f64,

    /// 逆境: 主气克客气（扣分, 取正值）
    #[serde(default = "default_host_over_guest_penalty")]
    pub host_over_guest_penalty: f64,

    /// 客气克主气（扣分, 取正值）
    #[serde(default = "default_guest_over_host_penalty")]
    pub guest_over_host_penalty: f64,

    /// 二火加临: 少阴君火加临少阳相火加分, 反之扣同值
    #[serde(default = "default_twin_fire_adjustment")]
    pub twin_fire_adjustment: f64,
}

/// 年龄分段漂移值, 年龄区间含两端
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftBand {
    pub from_age: u32,
    pub to_age: u32,
    pub drift: f64,
}

/// 参数集校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("参数集解析失败: {0}")]
    Parse(String),

    #[error("漂移分段为空")]
    EmptyDriftBands,

    #[error("漂移分段不连续: 期望从 {expected} 岁开始, 实际 {actual} 岁")]
    DriftBandGap { expected: u32, actual: u32 },

    #[error("漂移分段区间无效: {from_age}..={to_age}")]
    InvalidDriftBand { from_age: u32, to_age: u32 },

    #[error("漂移分段未覆盖 {max_age} 岁（止于 {covered} 岁）")]
    DriftBandsTooShort { covered: u32, max_age: u32 },

    #[error("参数值无效: {field}={value}")]
    NonFiniteValue { field: &'static str, value: f64 },
}

impl ScoringProfile {
    /// 经典参数集: +10 / -15 / -10 / ±8
    pub fn canonical() -> Self {
        Self {
            name: default_name(),
            base_score: BaseScoreParameters::default(),
            drift_bands: default_drift_bands(),
        }
    }

    /// 增强参数集: +20 / -20 / -10 / ±15
    pub fn amplified() -> Self {
        Self {
            name: "amplified".to_string(),
            base_score: BaseScoreParameters {
                start: 50.0,
                harmony_bonus: 20.0,
                host_over_guest_penalty: 20.0,
                guest_over_host_penalty: 10.0,
                twin_fire_adjustment: 15.0,
            },
            drift_bands: default_drift_bands(),
        }
    }

    /// 从 JSON 解析并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ProfileError> {
        let profile: ScoringProfile =
            serde_json::from_str(raw).map_err(|e| ProfileError::Parse(e.to_string()))?;
        profile.validate(crate::engine::lifecycle::MAX_AGE)?;
        Ok(profile)
    }

    /// 校验: 漂移分段须从 1 岁起连续覆盖至 max_age, 数值须为有限数
    pub fn validate(&self, max_age: u32) -> Result<(), ProfileError> {
        let b = &self.base_score;
        for (field, value) in [
            ("start", b.start),
            ("harmony_bonus", b.harmony_bonus),
            ("host_over_guest_penalty", b.host_over_guest_penalty),
            ("guest_over_host_penalty", b.guest_over_host_penalty),
            ("twin_fire_adjustment", b.twin_fire_adjustment),
        ] {
            if !value.is_finite() {
                return Err(ProfileError::NonFiniteValue { field, value });
            }
        }

        if self.drift_bands.is_empty() {
            return Err(ProfileError::EmptyDriftBands);
        }

        let mut expected = 1;
        for band in &self.drift_bands {
            if band.from_age > band.to_age {
                return Err(ProfileError::InvalidDriftBand {
                    from_age: band.from_age,
                    to_age: band.to_age,
                });
            }
            if band.from_age != expected {
                return Err(ProfileError::DriftBandGap {
                    expected,
                    actual: band.from_age,
                });
            }
            if !band.drift.is_finite() {
                return Err(ProfileError::NonFiniteValue {
                    field: "drift",
                    value: band.drift,
                });
            }
            expected = band
                .to_age
                .checked_add(1)
                .ok_or(ProfileError::InvalidDriftBand {
                    from_age: band.from_age,
                    to_age: band.to_age,
                })?;
        }

        let covered = expected - 1;
        if covered < max_age {
            return Err(ProfileError::DriftBandsTooShort { covered, max_age });
        }
        Ok(())
    }

    /// 查询某年龄的漂移值; 未覆盖的年龄取 0
    pub fn drift_for_age(&self, age: u32) -> f64 {
        self.drift_bands
            .iter()
            .find(|b| b.from_age <= age && age <= b.to_age)
            .map(|b| b.drift)
            .unwrap_or(0.0)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Default for BaseScoreParameters {
    fn default() -> Self {
        Self {
            start: default_start(),
            harmony_bonus: default_harmony_bonus(),
            host_over_guest_penalty: default_host_over_guest_penalty(),
            guest_over_host_penalty: default_guest_over_host_penalty(),
            twin_fire_adjustment: default_twin_fire_adjustment(),
        }
    }
}

fn default_name() -> String {
    "canonical".to_string()
}

fn default_start() -> f64 {
    50.0
}

fn default_harmony_bonus() -> f64 {
    10.0
}

fn default_host_over_guest_penalty() -> f64 {
    15.0
}

fn default_guest_over_host_penalty() -> f64 {
    10.0
}

fn default_twin_fire_adjustment() -> f64 {
    8.0
}

/// 1-20 生长 +0.8, 21-40 壮 0.0, 41-50 老 -0.8, 51-60 已 -1.5
fn default_drift_bands() -> Vec<DriftBand> {
    vec![
        DriftBand {
            from_age: 1,
            to_age: 20,
            drift: 0.8,
        },
        DriftBand {
            from_age: 21,
            to_age: 40,
            drift: 0.0,
        },
        DriftBand {
            from_age: 41,
            to_age: 50,
            drift: -0.8,
        },
        DriftBand {
            from_age: 51,
            to_age: 60,
            drift: -1.5,
        },
    ]
}
