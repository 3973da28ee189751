// ==========================================
// 五运六气 AHI 推演引擎 - 先天禀赋与推演结果实体
// ==========================================

use crate::domain::types::{Adequacy, Phase, QiPhase};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// NatalProfile - 先天禀赋
// ==========================================
// 每个出生日期推算一次, 推演过程中不变
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatalProfile {
    /// 出生年岁运五行
    pub natal_phase: Phase,
    /// 出生年岁运太过/不及
    pub natal_adequacy: Adequacy,
    /// 先天偏强脏腑五行
    pub strong_element: Phase,
    /// 先天偏弱脏腑五行
    pub weak_element: Phase,
    /// 出生时刻所在步位的主运
    pub birth_host_fortune_phase: Phase,
    /// 出生时刻所在步位的主气
    pub birth_host_qi: QiPhase,
    /// 出生时刻所在步位的客气
    pub birth_guest_qi: QiPhase,
    /// 先天基准分
    pub base_score: f64,
}

// ==========================================
// 司天格局 (Governance Pattern)
// ==========================================
// 司天之气与先天岁运的格局判定, 按声明顺序命中即止
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernancePattern {
    BalancedQi,          // 平气: 司天生岁运
    YearCorrespondence,  // 岁会: 岁运与流年地支同气
    RebelliousQi,        // 逆气: 岁运生司天
    Discord,             // 不和: 岁运克司天
    HeavenlyPunishment,  // 天刑: 司天克岁运
    Assimilation,        // 同化: 岁运与司天同气
}

impl GovernancePattern {
    pub fn label(self) -> &'static str {
        match self {
            GovernancePattern::BalancedQi => "平气",
            GovernancePattern::YearCorrespondence => "岁会",
            GovernancePattern::RebelliousQi => "逆气",
            GovernancePattern::Discord => "不和",
            GovernancePattern::HeavenlyPunishment => "天刑",
            GovernancePattern::Assimilation => "同化",
        }
    }
}

impl fmt::Display for GovernancePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// CollisionBreakdown - 流年碰撞分明细
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBreakdown {
    /// A1 岁运碰撞分
    pub yun: f64,
    /// A2 五步客运平均分
    pub guest_fortune_avg: f64,
    /// B1 司天在泉碰撞分
    pub governance_tier1: f64,
    /// B2 司天格局分
    pub governance_tier2: f64,
    pub weighted_yun: f64,
    pub weighted_qi: f64,
    /// 加权总碰撞分
    pub total: f64,
    /// B2 命中的格局（无命中为 None）
    pub pattern: Option<GovernancePattern>,
}

// ==========================================
// KLinePoint - 年度健康指数 K 线
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KLinePoint {
    /// 虚岁 1..=60
    pub age: u32,
    /// 对应的流年（公历年份）
    pub calendar_year: i32,
    /// 开盘 = 上一年收盘
    pub open: f64,
    /// 收盘, 0..=100
    pub close: f64,
    /// 流年碰撞分
    pub impact: f64,
    /// 生命周期漂移值
    pub drift: f64,
}
