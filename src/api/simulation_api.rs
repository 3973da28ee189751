// ==========================================
// 五运六气 AHI 推演引擎 - 推演 API
// ==========================================
// 职责: 公历出生日期 → 出生盘摘要 + 60 年健康指数 K 线
// 约定: 出生时刻取当日 12:00（本地民用时间）
// ==========================================

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, instrument, warn};

use crate::api::dto::{round2, KLineDto, NatalSummaryDto, SimulationResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ScoringProfile;
use crate::domain::calendar::{FortuneStage, QiStage};
use crate::engine::orchestrator::{AhiOrchestrator, AhiRun};
use crate::engine::solar_term::{SolarTermProvider, SolarTermTable};
use crate::i18n::{t_in, DEFAULT_LOCALE};
use crate::importer::SolarTermCsvImporter;

/// 出生时刻: 正午
const BIRTH_HOUR: u32 = 12;

// ==========================================
// SimulationApi - 推演 API
// ==========================================
pub struct SimulationApi<P> {
    orchestrator: AhiOrchestrator<P>,
    locale: String,
}

impl<P: SolarTermProvider> SimulationApi<P> {
    /// 使用默认参数集（canonical）创建
    pub fn new(provider: P) -> Self {
        Self::with_profile(provider, ScoringProfile::canonical())
    }

    pub fn with_profile(provider: P, profile: ScoringProfile) -> Self {
        Self {
            orchestrator: AhiOrchestrator::new(provider, profile),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// 从 JSON 参数集创建（缺省字段取 canonical 值）
    pub fn with_profile_json(provider: P, raw: &str) -> ApiResult<Self> {
        let profile = ScoringProfile::from_json_str(raw)?;
        Ok(Self::with_profile(provider, profile))
    }

    /// 设置描述文案语言（"zh-CN" / "en"）
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    pub fn profile(&self) -> &ScoringProfile {
        self.orchestrator.profile()
    }

    /// 推演
    ///
    /// # 参数
    /// - year / month / day: 公历出生日期
    ///
    /// # 返回
    /// - Ok(SimulationResponse): 出生盘摘要 + 60 年 K 线
    /// - Err(ApiError::InvalidDate): 日期不存在
    /// - Err(ApiError::TermLookupFailure): 节气数据缺失（不输出部分结果）
    #[instrument(skip(self))]
    pub fn simulate(&self, year: i32, month: u32, day: u32) -> ApiResult<SimulationResponse> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ApiError::InvalidDate { year, month, day })?;
        let noon = NaiveTime::from_hms_opt(BIRTH_HOUR, 0, 0)
            .ok_or_else(|| ApiError::InternalError("出生时刻构造失败".to_string()))?;
        let birth = date.and_time(noon);

        let run = self.orchestrator.run(birth).map_err(|e| {
            warn!(error = %e, "推演失败");
            ApiError::from(e)
        })?;

        info!(run_id = %run.run_id, "推演完成");
        Ok(self.to_response(&run))
    }

    fn to_response(&self, run: &AhiRun) -> SimulationResponse {
        let fortune = run.year_fortune;
        let ganzhi = run.natal_year.ganzhi();
        let description = fortune.description();
        let natal_summary = NatalSummaryDto {
            stem_char: run.natal_year.stem.as_char().to_string(),
            branch_char: run.natal_year.branch.as_char().to_string(),
            ganzhi: t_in(
                &self.locale,
                "summary.ganzhi",
                &[("ganzhi", ganzhi.as_str())],
            ),
            phase: fortune.phase.as_char().to_string(),
            adequacy: fortune.adequacy.as_text().to_string(),
            year_fortune: t_in(
                &self.locale,
                "summary.year_fortune",
                &[
                    ("description", description.as_str()),
                    ("phase", fortune.phase.as_char()),
                ],
            ),
            celestial_governance_name: run.climatic_effect.celestial.display_name().to_string(),
            terrestrial_governance_name: run.climatic_effect.terrestrial.display_name().to_string(),
            current_fortune_stage_text: self.fortune_stage_text(&run.fortune_stage),
            current_qi_stage_text: self.qi_stage_text(&run.qi_stage),
            qi_term_range: run.qi_stage.term_range(),
            strong_element: run.natal.strong_element.as_char().to_string(),
            weak_element: run.natal.weak_element.as_char().to_string(),
        };

        SimulationResponse {
            run_id: run.run_id.to_string(),
            natal_summary,
            series: run.series.iter().map(KLineDto::from).collect(),
            base_score: round2(run.natal.base_score),
            profile: run.profile_name.clone(),
        }
    }

    fn fortune_stage_text(&self, stage: &FortuneStage) -> String {
        let n = stage.step_number().to_string();
        t_in(
            &self.locale,
            "stage.fortune",
            &[
                ("n", n.as_str()),
                ("host", stage.host.as_char()),
                ("guest", stage.guest.phase.as_char()),
                ("adequacy", stage.guest.adequacy.as_text()),
            ],
        )
    }

    fn qi_stage_text(&self, stage: &QiStage) -> String {
        let n = stage.step_number().to_string();
        t_in(
            &self.locale,
            "stage.qi",
            &[
                ("n", n.as_str()),
                ("host", stage.host.display_name()),
                ("host_factor", stage.host.factor()),
                ("guest", stage.guest.display_name()),
                ("guest_factor", stage.guest.factor()),
            ],
        )
    }
}

impl SimulationApi<SolarTermTable> {
    /// 从节气表 CSV 创建
    pub fn from_term_csv(path: &Path, profile: ScoringProfile) -> ApiResult<Self> {
        let table = SolarTermCsvImporter::import_file(path)?;
        Ok(Self::with_profile(table, profile))
    }
}
