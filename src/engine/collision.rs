// ==========================================
// 五运六气 AHI 推演引擎 - 流年碰撞评分引擎
// ==========================================
// 职责: 先天禀赋 × 流年运气盘 → 单一加权碰撞分
// 输入: NatalProfile + 流年大寒时刻的运气盘
// 输出: CollisionBreakdown（含四项子分与命中格局）
// 红线: 分值与权重为领域常量, 不可配置
// ==========================================

use crate::domain::calendar::Fortune;
use crate::domain::climate::ClimaticEffect;
use crate::domain::profile::{CollisionBreakdown, GovernancePattern, NatalProfile};
use crate::domain::types::{Adequacy, Phase};
use crate::engine::calendar::CalendricalChart;
use crate::engine::error::EngineResult;
use crate::engine::solar_term::SolarTermProvider;
use tracing::trace;

// ===== A1 岁运碰撞 =====
const YUN_SAME: f64 = 25.0;
const YUN_MUTUAL_GENERATION: f64 = 18.0;
const YUN_MUTUAL_OVERCOMING: f64 = -22.0;
const YUN_EXCESS_HITS_WEAK: f64 = -15.0;
const YUN_DEFICIENCY_FEEDS_STRONG: f64 = 10.0;

// ===== A2 五步客运 =====
const STEP_SAME_AS_HOST: f64 = 20.0;
const STEP_GENERATES: f64 = 15.0;
const STEP_OVERCOMES: f64 = -25.0;

// ===== B1 司天在泉 =====
const GOV_PREFIX_MATCH: f64 = 22.0;
const GOV_CELESTIAL_GENERATES_HOST: f64 = 16.0;
const GOV_CELESTIAL_OVERCOMES: f64 = -28.0;
const GOV_TERRESTRIAL_OVERCOMES: f64 = -28.0;

// ===== B2 司天格局 =====
const PATTERN_BALANCED_QI: f64 = 22.0;
const PATTERN_YEAR_CORRESPONDENCE: f64 = 20.0;
const PATTERN_REBELLIOUS_QI: f64 = -15.0;
const PATTERN_DISCORD: f64 = -20.0;
const PATTERN_HEAVENLY_PUNISHMENT: f64 = -28.0;
const PATTERN_ASSIMILATION: f64 = -12.0;

// ===== 加权 =====
const WEIGHT_YUN_A1: f64 = 0.90;
const WEIGHT_YUN_A2: f64 = 0.10;
const WEIGHT_QI_B1: f64 = 0.25;
const WEIGHT_QI_B2: f64 = 0.75;
const WEIGHT_YUN: f64 = 0.30;
const WEIGHT_QI: f64 = 0.70;

// ==========================================
// YearlyCollisionScorer - 流年碰撞评分器
// ==========================================
pub struct YearlyCollisionScorer<'a> {
    natal: &'a NatalProfile,
}

impl<'a> YearlyCollisionScorer<'a> {
    pub fn new(natal: &'a NatalProfile) -> Self {
        Self { natal }
    }

    /// 流年总碰撞分
    pub fn score<P: SolarTermProvider>(&self, flow: &CalendricalChart<'_, P>) -> EngineResult<f64> {
        Ok(self.score_breakdown(flow)?.total)
    }

    /// 流年碰撞分明细
    pub fn score_breakdown<P: SolarTermProvider>(
        &self,
        flow: &CalendricalChart<'_, P>,
    ) -> EngineResult<CollisionBreakdown> {
        let effect = flow.climatic_effect()?;
        let yun = self.yun_collision(flow.year_fortune());
        let guest_fortune_avg = self.guest_fortune_average(&flow.guest_fortunes());
        let governance_tier1 = self.governance_tier1(effect);
        let (governance_tier2, pattern) =
            self.governance_tier2(effect, flow.year().branch.phase());

        let breakdown = combine(
            yun,
            guest_fortune_avg,
            governance_tier1,
            governance_tier2,
            pattern,
        );

        trace!(
            year = flow.year().year_used,
            yun,
            guest_fortune_avg,
            governance_tier1,
            governance_tier2,
            pattern = ?pattern,
            total = breakdown.total,
            "流年碰撞分"
        );

        Ok(breakdown)
    }

    // ==========================================
    // A1 岁运碰撞
    // ==========================================

    /// 规则（前三条顺序执行, 命中即止）:
    /// 1) 流年岁运与先天岁运同气 → +25
    /// 2) 互相生助 → +18
    /// 3) 互相克制 → -22
    ///
    /// 独立判定:
    /// - 流年太过且克先天弱脏 → -15
    /// - 流年不及且生先天强脏 → +10
    pub fn yun_collision(&self, flow: Fortune) -> f64 {
        let natal = self.natal.natal_phase;
        let cy = flow.phase;
        let mut pts = 0.0;

        if cy == natal {
            pts += YUN_SAME;
        } else if cy.generate() == natal || natal.generate() == cy {
            pts += YUN_MUTUAL_GENERATION;
        } else if cy.overcomes() == natal || natal.overcomes() == cy {
            pts += YUN_MUTUAL_OVERCOMING;
        }

        if flow.adequacy == Adequacy::Excess && cy.overcomes() == self.natal.weak_element {
            pts += YUN_EXCESS_HITS_WEAK;
        }
        if flow.adequacy == Adequacy::Deficiency && cy.generate() == self.natal.strong_element {
            pts += YUN_DEFICIENCY_FEEDS_STRONG;
        }

        pts
    }

    // ==========================================
    // A2 五步客运平均分
    // ==========================================

    /// 每步客运: 同出生主运 +20; 生出生主运或生弱脏 +15; 克出生主运或克弱脏 -25; 否则 0
    pub fn guest_fortune_average(&self, guests: &[Fortune; 5]) -> f64 {
        let host = self.natal.birth_host_fortune_phase;
        let weak = self.natal.weak_element;

        let total: f64 = guests
            .iter()
            .map(|g| {
                let gy = g.phase;
                if gy == host {
                    STEP_SAME_AS_HOST
                } else if gy.generate() == host || gy.generate() == weak {
                    STEP_GENERATES
                } else if gy.overcomes() == host || gy.overcomes() == weak {
                    STEP_OVERCOMES
                } else {
                    0.0
                }
            })
            .sum();

        total / guests.len() as f64
    }

    // ==========================================
    // B1 司天在泉碰撞
    // ==========================================

    /// 四项独立累加:
    /// - 出生主气与司天或在泉同名（前两字） → +22
    /// - 司天生出生主气 → +16
    /// - 司天克出生主气或克弱脏 → -28
    /// - 在泉克出生主气或克弱脏 → -28
    pub fn governance_tier1(&self, effect: ClimaticEffect) -> f64 {
        let birth_host = self.natal.birth_host_qi;
        let host_el = birth_host.phase();
        let weak = self.natal.weak_element;
        let st = effect.celestial.phase();
        let zq = effect.terrestrial.phase();
        let mut pts = 0.0;

        if effect.celestial.name_prefix() == birth_host.name_prefix()
            || effect.terrestrial.name_prefix() == birth_host.name_prefix()
        {
            pts += GOV_PREFIX_MATCH;
        }
        if st.generate() == host_el {
            pts += GOV_CELESTIAL_GENERATES_HOST;
        }
        if st.overcomes() == host_el || st.overcomes() == weak {
            pts += GOV_CELESTIAL_OVERCOMES;
        }
        if zq.overcomes() == host_el || zq.overcomes() == weak {
            pts += GOV_TERRESTRIAL_OVERCOMES;
        }

        pts
    }

    // ==========================================
    // B2 司天格局
    // ==========================================

    /// 顺序执行, 命中即止: 平气 → 岁会 → 逆气 → 不和 → 天刑 → 同化
    pub fn governance_tier2(
        &self,
        effect: ClimaticEffect,
        flow_branch_phase: Phase,
    ) -> (f64, Option<GovernancePattern>) {
        let natal = self.natal.natal_phase;
        let st = effect.celestial.phase();

        let pattern = if st.generate() == natal {
            Some(GovernancePattern::BalancedQi)
        } else if natal == flow_branch_phase {
            Some(GovernancePattern::YearCorrespondence)
        } else if natal.generate() == st {
            Some(GovernancePattern::RebelliousQi)
        } else if natal.overcomes() == st {
            Some(GovernancePattern::Discord)
        } else if st.overcomes() == natal {
            Some(GovernancePattern::HeavenlyPunishment)
        } else if natal == st {
            Some(GovernancePattern::Assimilation)
        } else {
            None
        };

        (pattern.map(pattern_points).unwrap_or(0.0), pattern)
    }
}

fn pattern_points(pattern: GovernancePattern) -> f64 {
    match pattern {
        GovernancePattern::BalancedQi => PATTERN_BALANCED_QI,
        GovernancePattern::YearCorrespondence => PATTERN_YEAR_CORRESPONDENCE,
        GovernancePattern::RebelliousQi => PATTERN_REBELLIOUS_QI,
        GovernancePattern::Discord => PATTERN_DISCORD,
        GovernancePattern::HeavenlyPunishment => PATTERN_HEAVENLY_PUNISHMENT,
        GovernancePattern::Assimilation => PATTERN_ASSIMILATION,
    }
}

/// 加权合并: 五运占 30%, 六气占 70%
pub fn combine(
    yun: f64,
    guest_fortune_avg: f64,
    governance_tier1: f64,
    governance_tier2: f64,
    pattern: Option<GovernancePattern>,
) -> CollisionBreakdown {
    let weighted_yun = yun * WEIGHT_YUN_A1 + guest_fortune_avg * WEIGHT_YUN_A2;
    let weighted_qi = governance_tier1 * WEIGHT_QI_B1 + governance_tier2 * WEIGHT_QI_B2;
    let total = weighted_yun * WEIGHT_YUN + weighted_qi * WEIGHT_QI;

    CollisionBreakdown {
        yun,
        guest_fortune_avg,
        governance_tier1,
        governance_tier2,
        weighted_yun,
        weighted_qi,
        total,
        pattern,
    }
}
