// ==========================================
// 五运六气 AHI 推演引擎 - 引擎编排器
// ==========================================
// 用途: 协调 出生盘解析 → 先天禀赋 → 生命周期推演 的执行顺序
// ==========================================

use crate::config::ScoringProfile;
use crate::domain::calendar::{CalendricalYear, Fortune, FortuneStage, QiStage};
use crate::domain::climate::ClimaticEffect;
use crate::domain::profile::{KLinePoint, NatalProfile};
use crate::engine::calendar::CalendricalResolver;
use crate::engine::error::EngineResult;
use crate::engine::lifecycle::LifecycleSimulator;
use crate::engine::natal::NatalProfileBuilder;
use crate::engine::solar_term::SolarTermProvider;
use chrono::{Datelike, NaiveDateTime};
use tracing::{info, info_span};
use uuid::Uuid;

// ==========================================
// AhiRun - 单次推演结果
// ==========================================
#[derive(Debug, Clone)]
pub struct AhiRun {
    pub run_id: Uuid,
    pub birth: NaiveDateTime,
    /// 出生运气年
    pub natal_year: CalendricalYear,
    pub year_fortune: Fortune,
    pub climatic_effect: ClimaticEffect,
    /// 出生时刻所在五运步位
    pub fortune_stage: FortuneStage,
    /// 出生时刻所在六气步位
    pub qi_stage: QiStage,
    pub natal: NatalProfile,
    pub series: Vec<KLinePoint>,
    /// 本次使用的参数集名称
    pub profile_name: String,
}

// ==========================================
// AhiOrchestrator - 引擎编排器
// ==========================================
pub struct AhiOrchestrator<P> {
    resolver: CalendricalResolver<P>,
    profile: ScoringProfile,
}

impl<P: SolarTermProvider> AhiOrchestrator<P> {
    pub fn new(provider: P, profile: ScoringProfile) -> Self {
        Self {
            resolver: CalendricalResolver::new(provider),
            profile,
        }
    }

    pub fn resolver(&self) -> &CalendricalResolver<P> {
        &self.resolver
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// 执行完整推演流程
    ///
    /// # 参数
    /// - birth: 出生时刻
    ///
    /// # 返回
    /// 出生盘 + 先天禀赋 + 60 年 K 线; 任一步失败则整体失败
    pub fn run(&self, birth: NaiveDateTime) -> EngineResult<AhiRun> {
        let run_id = Uuid::new_v4();
        let span = info_span!("ahi_run", %run_id, %birth, profile = %self.profile.name);
        let _guard = span.enter();

        info!("开始执行 AHI 推演");

        // ==========================================
        // 步骤1: 出生盘解析
        // ==========================================
        let chart = self.resolver.resolve(birth)?;
        let year_fortune = chart.year_fortune();
        let climatic_effect = chart.climatic_effect()?;
        let fortune_stage = chart.current_fortune_stage()?;
        let qi_stage = chart.current_qi_stage()?;

        // ==========================================
        // 步骤2: 先天禀赋
        // ==========================================
        let natal = NatalProfileBuilder::new(self.profile.base_score).build(&chart)?;

        // ==========================================
        // 步骤3: 生命周期推演
        // ==========================================
        // 流年从出生的公历年份起算
        let series = LifecycleSimulator::new(&self.resolver, &self.profile)
            .simulate(birth.year(), &natal)?;

        info!(
            ganzhi = %chart.year().ganzhi(),
            base_score = natal.base_score,
            years = series.len(),
            final_close = series.last().map(|p| p.close),
            "AHI 推演完成"
        );

        Ok(AhiRun {
            run_id,
            birth,
            natal_year: chart.year(),
            year_fortune,
            climatic_effect,
            fortune_stage,
            qi_stage,
            natal,
            series,
            profile_name: self.profile.name.clone(),
        })
    }
}
