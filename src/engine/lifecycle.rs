// ==========================================
// 五运六气 AHI 推演引擎 - 生命周期推演引擎
// ==========================================
// 职责: 1..=60 岁逐年碰撞 → 带惯性与年龄漂移的健康指数 K 线
// 红线: 严格顺序执行, 当年开盘 = 上年收盘, 不可并行或重排
// ==========================================

use crate::config::ScoringProfile;
use crate::domain::profile::{KLinePoint, NatalProfile};
use crate::domain::types::SolarTerm;
use crate::engine::calendar::CalendricalResolver;
use crate::engine::collision::YearlyCollisionScorer;
use crate::engine::error::EngineResult;
use crate::engine::solar_term::SolarTermProvider;
use tracing::{debug, instrument};

/// 推演年龄上限（虚岁）
pub const MAX_AGE: u32 = 60;

/// 健康惯性: 60% 延续上年状态, 40% 回归先天基底
const INERTIA_CARRY: f64 = 0.6;
const INERTIA_REVERT: f64 = 0.4;

const HEALTH_MIN: f64 = 0.0;
const HEALTH_MAX: f64 = 100.0;

// ==========================================
// LifecycleSimulator - 生命周期推演器
// ==========================================
pub struct LifecycleSimulator<'a, P> {
    resolver: &'a CalendricalResolver<P>,
    profile: &'a ScoringProfile,
}

impl<'a, P: SolarTermProvider> LifecycleSimulator<'a, P> {
    pub fn new(resolver: &'a CalendricalResolver<P>, profile: &'a ScoringProfile) -> Self {
        Self { resolver, profile }
    }

    /// 推演 1..=60 岁的健康指数
    ///
    /// 任一年份节气查询失败即整体失败, 不输出部分结果
    #[instrument(skip(self, natal), fields(base_score = natal.base_score))]
    pub fn simulate(&self, birth_year: i32, natal: &NatalProfile) -> EngineResult<Vec<KLinePoint>> {
        let scorer = YearlyCollisionScorer::new(natal);
        let mut series = Vec::with_capacity(MAX_AGE as usize);
        let mut current_health = natal.base_score;

        for age in 1..=MAX_AGE {
            let calendar_year = birth_year + age as i32 - 1;
            let impact = self.year_impact(&scorer, calendar_year)?;
            let drift = self.profile.drift_for_age(age);
            let close = step(current_health, natal.base_score, impact, drift);

            debug!(age, calendar_year, open = current_health, close, impact, drift, "流年推演");

            series.push(KLinePoint {
                age,
                calendar_year,
                open: current_health,
                close,
                impact,
                drift,
            });
            current_health = close;
        }

        Ok(series)
    }

    /// 流年以当年大寒交节时刻起盘
    fn year_impact(
        &self,
        scorer: &YearlyCollisionScorer<'_>,
        calendar_year: i32,
    ) -> EngineResult<f64> {
        let major_cold = self
            .resolver
            .provider()
            .exact_moment(calendar_year, SolarTerm::MajorCold)?;
        let flow = self.resolver.resolve(major_cold)?;
        scorer.score(&flow)
    }
}

/// 单年收盘: clamp(0.6 × 上年 + 0.4 × 基准 + 碰撞分 + 漂移, 0, 100)
pub fn step(current_health: f64, base_score: f64, impact: f64, drift: f64) -> f64 {
    let dynamic_base = current_health * INERTIA_CARRY + base_score * INERTIA_REVERT;
    (dynamic_base + impact + drift).clamp(HEALTH_MIN, HEALTH_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_exact_arithmetic() {
        assert_eq!(step(50.0, 50.0, 0.0, 0.8), 50.8);
    }

    #[test]
    fn test_step_inertia_reverts_to_base() {
        // 0.6 × 80 + 0.4 × 50 = 68
        assert_eq!(step(80.0, 50.0, 0.0, 0.0), 68.0);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(99.0, 90.0, 40.0, 0.8), 100.0);
        assert_eq!(step(5.0, 10.0, -40.0, -1.5), 0.0);
    }
}
