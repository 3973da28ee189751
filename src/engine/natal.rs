// ==========================================
// 五运六气 AHI 推演引擎 - 先天禀赋引擎
// ==========================================
// 职责: 出生时刻 → 岁运强弱脏腑 + 出生步位主客 → 先天基准分
// 输入: 出生时刻的运气盘 + 评分参数集
// 输出: NatalProfile（推演期间不变）
// ==========================================

use crate::config::BaseScoreParameters;
use crate::domain::profile::NatalProfile;
use crate::domain::types::{Adequacy, Phase, QiPhase};
use crate::engine::calendar::CalendricalChart;
use crate::engine::error::EngineResult;
use crate::engine::solar_term::SolarTermProvider;
use tracing::{debug, instrument};

// ==========================================
// NatalProfileBuilder - 先天禀赋构建器
// ==========================================
pub struct NatalProfileBuilder {
    params: BaseScoreParameters,
}

impl NatalProfileBuilder {
    pub fn new(params: BaseScoreParameters) -> Self {
        Self { params }
    }

    /// 由出生时刻的运气盘构建先天禀赋
    #[instrument(skip(self, chart), fields(year_used = chart.year().year_used))]
    pub fn build<P: SolarTermProvider>(
        &self,
        chart: &CalendricalChart<'_, P>,
    ) -> EngineResult<NatalProfile> {
        let fortune = chart.year_fortune();
        let (strong_element, weak_element) = strong_weak_pair(fortune.phase, fortune.adequacy);

        let fortune_stage = chart.current_fortune_stage()?;
        let qi_stage = chart.current_qi_stage()?;

        let base_score = self.base_score(qi_stage.host, qi_stage.guest);

        debug!(
            natal = %fortune.description(),
            strong = %strong_element,
            weak = %weak_element,
            host_qi = %qi_stage.host,
            guest_qi = %qi_stage.guest,
            base_score,
            "先天禀赋构建完成"
        );

        Ok(NatalProfile {
            natal_phase: fortune.phase,
            natal_adequacy: fortune.adequacy,
            strong_element,
            weak_element,
            birth_host_fortune_phase: fortune_stage.host,
            birth_host_qi: qi_stage.host,
            birth_guest_qi: qi_stage.guest,
            base_score,
        })
    }

    /// 先天基准分
    ///
    /// 规则（前三条顺序执行, 命中即止）:
    /// 1) 主客气相生或同气 → +harmony_bonus
    /// 2) 主气克客气 → -host_over_guest_penalty
    /// 3) 客气克主气 → -guest_over_host_penalty
    ///
    /// 二火加临独立判定, 可与上述叠加:
    /// - 客气少阴君火, 主气少阳相火 → +twin_fire_adjustment
    /// - 客气少阳相火, 主气少阴君火 → -twin_fire_adjustment
    pub fn base_score(&self, host_qi: QiPhase, guest_qi: QiPhase) -> f64 {
        let p = &self.params;
        let h = host_qi.phase();
        let g = guest_qi.phase();
        let mut score = p.start;

        if g.generate() == h || h.generate() == g || g == h {
            score += p.harmony_bonus;
        } else if h.overcomes() == g {
            score -= p.host_over_guest_penalty;
        } else if g.overcomes() == h {
            score -= p.guest_over_host_penalty;
        }

        match (guest_qi, host_qi) {
            (QiPhase::MildYinFire, QiPhase::WeakYangFire) => score += p.twin_fire_adjustment,
            (QiPhase::WeakYangFire, QiPhase::MildYinFire) => score -= p.twin_fire_adjustment,
            _ => {}
        }

        score
    }
}

impl Default for NatalProfileBuilder {
    fn default() -> Self {
        Self::new(BaseScoreParameters::default())
    }
}

/// 强弱脏腑: 太过者己强而克其所胜; 不及者己弱而受克我者制
pub fn strong_weak_pair(natal_phase: Phase, adequacy: Adequacy) -> (Phase, Phase) {
    match adequacy {
        Adequacy::Excess => (natal_phase, natal_phase.overcomes()),
        Adequacy::Deficiency => (natal_phase.overcomer(), natal_phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_weak_for_excess() {
        // 土运太过: 土强, 土克水 → 水弱
        assert_eq!(
            strong_weak_pair(Phase::Earth, Adequacy::Excess),
            (Phase::Earth, Phase::Water)
        );
    }

    #[test]
    fn test_strong_weak_for_deficiency() {
        // 金运不及: 金弱, 火克金 → 火强
        assert_eq!(
            strong_weak_pair(Phase::Metal, Adequacy::Deficiency),
            (Phase::Fire, Phase::Metal)
        );
    }

    #[test]
    fn test_base_score_harmony() {
        let builder = NatalProfileBuilder::default();
        // 木生火
        assert_eq!(
            builder.base_score(QiPhase::WeakYinWood, QiPhase::MildYinFire),
            60.0
        );
        // 同气
        assert_eq!(
            builder.base_score(QiPhase::DominantYinEarth, QiPhase::DominantYinEarth),
            60.0
        );
    }

    #[test]
    fn test_base_score_host_overcomes_guest() {
        let builder = NatalProfileBuilder::default();
        // 主气木克客气土
        assert_eq!(
            builder.base_score(QiPhase::WeakYinWood, QiPhase::DominantYinEarth),
            35.0
        );
    }

    #[test]
    fn test_base_score_guest_overcomes_host() {
        let builder = NatalProfileBuilder::default();
        // 客气金克主气木
        assert_eq!(
            builder.base_score(QiPhase::WeakYinWood, QiPhase::MildYangMetal),
            40.0
        );
    }

    #[test]
    fn test_twin_fire_stacks_with_harmony() {
        let builder = NatalProfileBuilder::default();
        // 同属火 → +10, 君火加临相火 → +8
        assert_eq!(
            builder.base_score(QiPhase::WeakYangFire, QiPhase::MildYinFire),
            68.0
        );
        // 相火加临君火 → +10 -8
        assert_eq!(
            builder.base_score(QiPhase::MildYinFire, QiPhase::WeakYangFire),
            52.0
        );
    }

    #[test]
    fn test_amplified_parameters() {
        let params = crate::config::ScoringProfile::amplified().base_score;
        let builder = NatalProfileBuilder::new(params);
        assert_eq!(
            builder.base_score(QiPhase::WeakYangFire, QiPhase::MildYinFire),
            85.0
        );
        assert_eq!(
            builder.base_score(QiPhase::WeakYinWood, QiPhase::DominantYinEarth),
            30.0
        );
    }
}
