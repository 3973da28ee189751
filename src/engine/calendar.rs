// ==========================================
// 五运六气 AHI 推演引擎 - 运气历法解析器
// ==========================================
// 职责: 日期 → 运气年(干支) → 岁运/客运/主运/司天在泉/客气 → 当前步位
// 输入: 目标时刻 + 节气时刻提供者
// 红线: 大寒为运气年分界, 区间左闭右开; 步位未命中时落入末步（非错误）
// ==========================================

use crate::domain::calendar::{CalendricalYear, Fortune, FortuneStage, QiStage};
use crate::domain::climate::{lookup_pairing, ClimaticEffect};
use crate::domain::types::{Phase, QiPhase, SolarTerm};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::solar_term::SolarTermProvider;
use chrono::{Datelike, Duration, NaiveDateTime};
use tracing::{debug, instrument};

/// 主运: 年年固定 木 → 火 → 土 → 金 → 水
pub const HOST_FORTUNES: [Phase; 5] = [
    Phase::Wood,
    Phase::Fire,
    Phase::Earth,
    Phase::Metal,
    Phase::Water,
];

/// 主气: 年年固定, 与六气声明顺序一致
pub const HOST_QI: [QiPhase; 6] = QiPhase::ALL;

/// 五运交运节气及偏移天数: 大寒日, 春分后13日, 芒种后10日, 处暑后7日, 立冬后4日
const FORTUNE_STAGE_TERMS: [(SolarTerm, i64); 5] = [
    (SolarTerm::MajorCold, 0),
    (SolarTerm::SpringEquinox, 13),
    (SolarTerm::GrainInEar, 10),
    (SolarTerm::EndOfHeat, 7),
    (SolarTerm::WinterBegins, 4),
];

/// 六气交气节气: 大寒, 春分, 小满, 大暑, 秋分, 小雪
const QI_STAGE_TERMS: [SolarTerm; 6] = [
    SolarTerm::MajorCold,
    SolarTerm::SpringEquinox,
    SolarTerm::GrainFull,
    SolarTerm::GreatHeat,
    SolarTerm::AutumnEquinox,
    SolarTerm::LightSnow,
];

// ==========================================
// CalendricalResolver - 运气历法解析器
// ==========================================
pub struct CalendricalResolver<P> {
    provider: P,
}

impl<P: SolarTermProvider> CalendricalResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 解析目标时刻所属运气年
    ///
    /// 目标时刻早于当年大寒交节时刻 → 归上一年; 恰好等于大寒时刻 → 归新年
    #[instrument(skip(self))]
    pub fn resolve(&self, date: NaiveDateTime) -> EngineResult<CalendricalChart<'_, P>> {
        let civil_year = date.year();
        let major_cold = self
            .provider
            .exact_moment(civil_year, SolarTerm::MajorCold)?;

        let year_used = if date < major_cold {
            civil_year - 1
        } else {
            civil_year
        };
        let year = CalendricalYear::new(year_used);

        debug!(
            year_used,
            ganzhi = %year.ganzhi(),
            major_cold = %major_cold,
            "运气年解析完成"
        );

        Ok(CalendricalChart {
            provider: &self.provider,
            target: date,
            year,
        })
    }
}

// ==========================================
// CalendricalChart - 单个日期的运气盘
// ==========================================
// 年份级查询（岁运/客运/司天在泉）不访问节气表; 步位查询按需访问
pub struct CalendricalChart<'a, P> {
    provider: &'a P,
    target: NaiveDateTime,
    year: CalendricalYear,
}

impl<'a, P: SolarTermProvider> CalendricalChart<'a, P> {
    pub fn year(&self) -> CalendricalYear {
        self.year
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    /// 岁运（全年大运）及其太过/不及
    pub fn year_fortune(&self) -> Fortune {
        Fortune::new(self.year.stem.phase(), self.year.stem.adequacy())
    }

    /// 五步客运: 以岁运起初运, 五行相生推进, 太过/不及交替
    pub fn guest_fortunes(&self) -> [Fortune; 5] {
        let mut current = self.year_fortune();
        let mut fortunes = [current; 5];
        for slot in fortunes.iter_mut() {
            *slot = current;
            current = Fortune::new(current.phase.generate(), current.adequacy.opposite());
        }
        fortunes
    }

    pub fn host_fortunes(&self) -> [Phase; 5] {
        HOST_FORTUNES
    }

    /// 司天 / 在泉
    pub fn climatic_effect(&self) -> EngineResult<ClimaticEffect> {
        lookup_pairing(self.year.branch).ok_or(EngineError::UnmappedBranch(self.year.branch))
    }

    /// 六步客气: 司天居三之气, 在泉居终之气, 之前各步依次退一气
    pub fn guest_qi_sequence(&self) -> EngineResult<[QiPhase; 6]> {
        let ClimaticEffect {
            celestial: st,
            terrestrial: zq,
        } = self.climatic_effect()?;
        Ok([
            st.previous().previous(),
            st.previous(),
            st,
            zq.previous().previous(),
            zq.previous(),
            zq,
        ])
    }

    /// 五运交运时刻（5 个起点 + 次年大寒作为闭合边界）
    pub fn fortune_boundaries(&self) -> EngineResult<[NaiveDateTime; 6]> {
        let y = self.year.year_used;
        let mut bounds = [self.target; 6];
        for (slot, (term, offset)) in bounds.iter_mut().zip(FORTUNE_STAGE_TERMS.iter()) {
            *slot = self.provider.exact_moment(y, *term)? + Duration::days(*offset);
        }
        bounds[5] = self.provider.exact_moment(y + 1, SolarTerm::MajorCold)?;
        Ok(bounds)
    }

    /// 六气交气时刻（6 个起点 + 次年大寒作为闭合边界）
    pub fn qi_boundaries(&self) -> EngineResult<[NaiveDateTime; 7]> {
        let y = self.year.year_used;
        let mut bounds = [self.target; 7];
        for (slot, term) in bounds.iter_mut().zip(QI_STAGE_TERMS.iter()) {
            *slot = self.provider.exact_moment(y, *term)?;
        }
        bounds[6] = self.provider.exact_moment(y + 1, SolarTerm::MajorCold)?;
        Ok(bounds)
    }

    /// 目标时刻所在五运步位
    pub fn current_fortune_stage(&self) -> EngineResult<FortuneStage> {
        self.fortune_stage_at(self.target)
    }

    /// 任一时刻在本运气年中的五运步位; 未命中任何区间时落入终运
    pub fn fortune_stage_at(&self, date: NaiveDateTime) -> EngineResult<FortuneStage> {
        let bounds = self.fortune_boundaries()?;
        let index = locate_stage(&bounds, date);
        let guest = self.guest_fortunes()[index];

        Ok(FortuneStage {
            index,
            start: bounds[index],
            host: HOST_FORTUNES[index],
            guest,
        })
    }

    /// 目标时刻所在六气步位
    pub fn current_qi_stage(&self) -> EngineResult<QiStage> {
        self.qi_stage_at(self.target)
    }

    /// 任一时刻在本运气年中的六气步位; 未命中任何区间时落入终之气
    pub fn qi_stage_at(&self, date: NaiveDateTime) -> EngineResult<QiStage> {
        let bounds = self.qi_boundaries()?;
        let index = locate_stage(&bounds, date);
        let guest = self.guest_qi_sequence()?[index];

        Ok(QiStage {
            index,
            start: bounds[index],
            end: bounds[index + 1],
            host: HOST_QI[index],
            guest,
        })
    }
}

/// 在 N+1 个边界中查找 `bounds[i] <= date < bounds[i+1]` 的 i, 未命中返回末步 N-1
fn locate_stage(bounds: &[NaiveDateTime], date: NaiveDateTime) -> usize {
    let last = bounds.len().saturating_sub(2);
    bounds
        .windows(2)
        .position(|w| w[0] <= date && date < w[1])
        .unwrap_or(last)
}
