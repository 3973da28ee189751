// ==========================================
// 五运六气 AHI 推演引擎 - 运气年与步位实体
// ==========================================
// 运气年以"大寒"为界, 不以元旦为界
// ==========================================

use crate::domain::types::{Adequacy, Branch, Phase, QiPhase, Stem};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 运气年（按日期即时推算, 构造后不可变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendricalYear {
    /// 实际采用的运气年份（大寒前归上一年）
    pub year_used: i32,
    pub stem: Stem,
    pub branch: Branch,
}

impl CalendricalYear {
    pub fn new(year_used: i32) -> Self {
        Self {
            year_used,
            stem: Stem::from_year(year_used),
            branch: Branch::from_year(year_used),
        }
    }

    /// 干支年名, 如 "甲子"
    pub fn ganzhi(&self) -> String {
        format!("{}{}", self.stem.as_char(), self.branch.as_char())
    }
}

/// 一步运: 五行 + 太过/不及
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortune {
    pub phase: Phase,
    pub adequacy: Adequacy,
}

impl Fortune {
    pub fn new(phase: Phase, adequacy: Adequacy) -> Self {
        Self { phase, adequacy }
    }

    /// 岁运描述, 如 "土运太过"
    pub fn description(&self) -> String {
        format!("{}运{}", self.phase.as_char(), self.adequacy.as_text())
    }
}

/// 目标日期所处的五运步位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneStage {
    /// 0-based, 0..=4
    pub index: usize,
    /// 本步交运时刻
    pub start: NaiveDateTime,
    /// 主运
    pub host: Phase,
    /// 客运
    pub guest: Fortune,
}

impl FortuneStage {
    /// 面向用户的步序号（第 1 ~ 5 运）
    pub fn step_number(&self) -> usize {
        self.index + 1
    }
}

/// 目标日期所处的六气步位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QiStage {
    /// 0-based, 0..=5
    pub index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// 主气
    pub host: QiPhase,
    /// 客气
    pub guest: QiPhase,
}

impl QiStage {
    /// 面向用户的步序号（第 1 ~ 6 气）
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    /// 节气区间, 如 "01-20 至 03-20"
    pub fn term_range(&self) -> String {
        format!(
            "{} 至 {}",
            self.start.format("%m-%d"),
            self.end.format("%m-%d")
        )
    }
}
