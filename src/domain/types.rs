// ==========================================
// 五运六气 AHI 推演引擎 - 领域类型定义
// ==========================================
// 五行 / 太过不及 / 天干 / 地支 / 六气 / 二十四节气
// 红线: 生克关系一律用显式 match 表, 不按索引推算
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 五行 (Phase)
// ==========================================
// 顺序: 木 → 火 → 土 → 金 → 水 (相生环)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Wood,  // 木
    Fire,  // 火
    Earth, // 土
    Metal, // 金
    Water, // 水
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Wood,
        Phase::Fire,
        Phase::Earth,
        Phase::Metal,
        Phase::Water,
    ];

    /// 相生: 木生火, 火生土, 土生金, 金生水, 水生木
    pub fn generate(self) -> Phase {
        match self {
            Phase::Wood => Phase::Fire,
            Phase::Fire => Phase::Earth,
            Phase::Earth => Phase::Metal,
            Phase::Metal => Phase::Water,
            Phase::Water => Phase::Wood,
        }
    }

    /// 相克（我克者）: 木克土, 土克水, 水克火, 火克金, 金克木
    pub fn overcomes(self) -> Phase {
        match self {
            Phase::Wood => Phase::Earth,
            Phase::Earth => Phase::Water,
            Phase::Water => Phase::Fire,
            Phase::Fire => Phase::Metal,
            Phase::Metal => Phase::Wood,
        }
    }

    /// 受克（克我者）: 金克木, 水克火, 木克土, 火克金, 土克水
    pub fn overcomer(self) -> Phase {
        match self {
            Phase::Wood => Phase::Metal,
            Phase::Fire => Phase::Water,
            Phase::Earth => Phase::Wood,
            Phase::Metal => Phase::Fire,
            Phase::Water => Phase::Earth,
        }
    }

    pub fn as_char(self) -> &'static str {
        match self {
            Phase::Wood => "木",
            Phase::Fire => "火",
            Phase::Earth => "土",
            Phase::Metal => "金",
            Phase::Water => "水",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_char())
    }
}

// ==========================================
// 太过 / 不及 (Adequacy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Adequacy {
    Excess,     // 太过
    Deficiency, // 不及
}

impl Adequacy {
    pub fn opposite(self) -> Adequacy {
        match self {
            Adequacy::Excess => Adequacy::Deficiency,
            Adequacy::Deficiency => Adequacy::Excess,
        }
    }

    pub fn as_text(self) -> &'static str {
        match self {
            Adequacy::Excess => "太过",
            Adequacy::Deficiency => "不及",
        }
    }
}

impl fmt::Display for Adequacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

// ==========================================
// 十天干 (Heavenly Stem)
// ==========================================
// 每个天干绑定岁运五行与太过/不及（甲己化土, 乙庚化金, 丙辛化水, 丁壬化木, 戊癸化火）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// 公历年份减 4 对 10 取余
    pub fn from_year(year: i32) -> Stem {
        Self::ALL[(year - 4).rem_euclid(10) as usize]
    }

    pub fn phase(self) -> Phase {
        match self {
            Stem::Jia | Stem::Ji => Phase::Earth,
            Stem::Yi | Stem::Geng => Phase::Metal,
            Stem::Bing | Stem::Xin => Phase::Water,
            Stem::Ding | Stem::Ren => Phase::Wood,
            Stem::Wu | Stem::Gui => Phase::Fire,
        }
    }

    /// 阳干太过, 阴干不及
    pub fn adequacy(self) -> Adequacy {
        match self {
            Stem::Jia | Stem::Bing | Stem::Wu | Stem::Geng | Stem::Ren => Adequacy::Excess,
            Stem::Yi | Stem::Ding | Stem::Ji | Stem::Xin | Stem::Gui => Adequacy::Deficiency,
        }
    }

    pub fn as_char(self) -> &'static str {
        match self {
            Stem::Jia => "甲",
            Stem::Yi => "乙",
            Stem::Bing => "丙",
            Stem::Ding => "丁",
            Stem::Wu => "戊",
            Stem::Ji => "己",
            Stem::Geng => "庚",
            Stem::Xin => "辛",
            Stem::Ren => "壬",
            Stem::Gui => "癸",
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_char())
    }
}

// ==========================================
// 十二地支 (Earthly Branch)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// 公历年份减 4 对 12 取余
    pub fn from_year(year: i32) -> Branch {
        Self::ALL[(year - 4).rem_euclid(12) as usize]
    }

    pub fn phase(self) -> Phase {
        match self {
            Branch::Zi | Branch::Hai => Phase::Water,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Phase::Earth,
            Branch::Yin | Branch::Mao => Phase::Wood,
            Branch::Si | Branch::Wu => Phase::Fire,
            Branch::Shen | Branch::You => Phase::Metal,
        }
    }

    pub fn as_char(self) -> &'static str {
        match self {
            Branch::Zi => "子",
            Branch::Chou => "丑",
            Branch::Yin => "寅",
            Branch::Mao => "卯",
            Branch::Chen => "辰",
            Branch::Si => "巳",
            Branch::Wu => "午",
            Branch::Wei => "未",
            Branch::Shen => "申",
            Branch::You => "酉",
            Branch::Xu => "戌",
            Branch::Hai => "亥",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_char())
    }
}

// ==========================================
// 六气 (Qi Phase)
// ==========================================
// 声明顺序即主气顺序: 厥阴风木 → 少阴君火 → 少阳相火 → 太阴湿土 → 阳明燥金 → 太阳寒水
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QiPhase {
    WeakYinWood,
    MildYinFire,
    WeakYangFire,
    DominantYinEarth,
    MildYangMetal,
    DominantYangWater,
}

impl QiPhase {
    pub const ALL: [QiPhase; 6] = [
        QiPhase::WeakYinWood,
        QiPhase::MildYinFire,
        QiPhase::WeakYangFire,
        QiPhase::DominantYinEarth,
        QiPhase::MildYangMetal,
        QiPhase::DominantYangWater,
    ];

    /// 三阴三阳名称
    pub fn display_name(self) -> &'static str {
        match self {
            QiPhase::WeakYinWood => "厥阴风木",
            QiPhase::MildYinFire => "少阴君火",
            QiPhase::WeakYangFire => "少阳相火",
            QiPhase::DominantYinEarth => "太阴湿土",
            QiPhase::MildYangMetal => "阳明燥金",
            QiPhase::DominantYangWater => "太阳寒水",
        }
    }

    /// 名称前两字（"厥阴" / "少阴" ...）
    pub fn name_prefix(self) -> &'static str {
        match self {
            QiPhase::WeakYinWood => "厥阴",
            QiPhase::MildYinFire => "少阴",
            QiPhase::WeakYangFire => "少阳",
            QiPhase::DominantYinEarth => "太阴",
            QiPhase::MildYangMetal => "阳明",
            QiPhase::DominantYangWater => "太阳",
        }
    }

    /// 气候特征
    pub fn factor(self) -> &'static str {
        match self {
            QiPhase::WeakYinWood => "风",
            QiPhase::MildYinFire => "热",
            QiPhase::WeakYangFire => "火",
            QiPhase::DominantYinEarth => "湿",
            QiPhase::MildYangMetal => "燥",
            QiPhase::DominantYangWater => "寒",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            QiPhase::WeakYinWood => Phase::Wood,
            QiPhase::MildYinFire | QiPhase::WeakYangFire => Phase::Fire,
            QiPhase::DominantYinEarth => Phase::Earth,
            QiPhase::MildYangMetal => Phase::Metal,
            QiPhase::DominantYangWater => Phase::Water,
        }
    }

    /// 前一气（退一步, 首位回绕到末位）
    pub fn previous(self) -> QiPhase {
        match self {
            QiPhase::WeakYinWood => QiPhase::DominantYangWater,
            QiPhase::MildYinFire => QiPhase::WeakYinWood,
            QiPhase::WeakYangFire => QiPhase::MildYinFire,
            QiPhase::DominantYinEarth => QiPhase::WeakYangFire,
            QiPhase::MildYangMetal => QiPhase::DominantYinEarth,
            QiPhase::DominantYangWater => QiPhase::MildYangMetal,
        }
    }
}

impl fmt::Display for QiPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ==========================================
// 二十四节气 (Solar Term)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolarTerm {
    MinorCold,        // 小寒
    MajorCold,        // 大寒
    SpringBegins,     // 立春
    RainWater,        // 雨水
    InsectsAwaken,    // 惊蛰
    SpringEquinox,    // 春分
    ClearAndBright,   // 清明
    GrainRain,        // 谷雨
    SummerBegins,     // 立夏
    GrainFull,        // 小满
    GrainInEar,       // 芒种
    SummerSolstice,   // 夏至
    MinorHeat,        // 小暑
    GreatHeat,        // 大暑
    AutumnBegins,     // 立秋
    EndOfHeat,        // 处暑
    WhiteDew,         // 白露
    AutumnEquinox,    // 秋分
    ColdDew,          // 寒露
    FrostDescent,     // 霜降
    WinterBegins,     // 立冬
    LightSnow,        // 小雪
    HeavySnow,        // 大雪
    WinterSolstice,   // 冬至
}

impl SolarTerm {
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::MinorCold,
        SolarTerm::MajorCold,
        SolarTerm::SpringBegins,
        SolarTerm::RainWater,
        SolarTerm::InsectsAwaken,
        SolarTerm::SpringEquinox,
        SolarTerm::ClearAndBright,
        SolarTerm::GrainRain,
        SolarTerm::SummerBegins,
        SolarTerm::GrainFull,
        SolarTerm::GrainInEar,
        SolarTerm::SummerSolstice,
        SolarTerm::MinorHeat,
        SolarTerm::GreatHeat,
        SolarTerm::AutumnBegins,
        SolarTerm::EndOfHeat,
        SolarTerm::WhiteDew,
        SolarTerm::AutumnEquinox,
        SolarTerm::ColdDew,
        SolarTerm::FrostDescent,
        SolarTerm::WinterBegins,
        SolarTerm::LightSnow,
        SolarTerm::HeavySnow,
        SolarTerm::WinterSolstice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolarTerm::MinorCold => "小寒",
            SolarTerm::MajorCold => "大寒",
            SolarTerm::SpringBegins => "立春",
            SolarTerm::RainWater => "雨水",
            SolarTerm::InsectsAwaken => "惊蛰",
            SolarTerm::SpringEquinox => "春分",
            SolarTerm::ClearAndBright => "清明",
            SolarTerm::GrainRain => "谷雨",
            SolarTerm::SummerBegins => "立夏",
            SolarTerm::GrainFull => "小满",
            SolarTerm::GrainInEar => "芒种",
            SolarTerm::SummerSolstice => "夏至",
            SolarTerm::MinorHeat => "小暑",
            SolarTerm::GreatHeat => "大暑",
            SolarTerm::AutumnBegins => "立秋",
            SolarTerm::EndOfHeat => "处暑",
            SolarTerm::WhiteDew => "白露",
            SolarTerm::AutumnEquinox => "秋分",
            SolarTerm::ColdDew => "寒露",
            SolarTerm::FrostDescent => "霜降",
            SolarTerm::WinterBegins => "立冬",
            SolarTerm::LightSnow => "小雪",
            SolarTerm::HeavySnow => "大雪",
            SolarTerm::WinterSolstice => "冬至",
        }
    }

    /// 节气所在的公历月份（每月两个节气, 小寒/大寒在一月）
    pub fn civil_month(self) -> u32 {
        let idx = Self::ALL
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default();
        (idx / 2 + 1) as u32
    }

    /// 按中文名称解析
    pub fn from_name(name: &str) -> Option<SolarTerm> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolarTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolarTerm::from_name(s).ok_or_else(|| format!("未知的节气名称: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_closes_five_cycle() {
        for p in Phase::ALL {
            assert_eq!(p.generate().generate().generate().generate().generate(), p);
            assert_eq!(p.overcomes(), p.generate().generate());
        }
    }

    #[test]
    fn test_overcomer_is_inverse_of_overcomes() {
        for x in Phase::ALL {
            let dominators: Vec<Phase> = Phase::ALL
                .iter()
                .copied()
                .filter(|y| y.overcomes() == x)
                .collect();
            assert_eq!(dominators, vec![x.overcomer()]);
        }
    }

    #[test]
    fn test_stem_and_branch_from_year() {
        assert_eq!(Stem::from_year(1984), Stem::Jia);
        assert_eq!(Branch::from_year(1984), Branch::Zi);
        assert_eq!(Stem::from_year(2024), Stem::Jia);
        assert_eq!(Branch::from_year(2024), Branch::Chen);
        assert_eq!(Stem::from_year(2023), Stem::Gui);
        assert_eq!(Branch::from_year(2023), Branch::Mao);
        // 公元前后年份同样按欧氏取余
        assert_eq!(Stem::from_year(3), Stem::Gui);
        assert_eq!(Branch::from_year(3), Branch::Hai);
    }

    #[test]
    fn test_stem_binding_table() {
        assert_eq!(Stem::Jia.phase(), Phase::Earth);
        assert_eq!(Stem::Jia.adequacy(), Adequacy::Excess);
        assert_eq!(Stem::Xin.phase(), Phase::Water);
        assert_eq!(Stem::Xin.adequacy(), Adequacy::Deficiency);
        assert_eq!(Stem::Gui.phase(), Phase::Fire);
    }

    #[test]
    fn test_qi_previous_wraps() {
        assert_eq!(QiPhase::WeakYinWood.previous(), QiPhase::DominantYangWater);
        for (i, q) in QiPhase::ALL.iter().enumerate().skip(1) {
            assert_eq!(q.previous(), QiPhase::ALL[i - 1]);
        }
    }

    #[test]
    fn test_qi_prefix_matches_display_name() {
        for q in QiPhase::ALL {
            assert!(q.display_name().starts_with(q.name_prefix()));
            assert_eq!(q.name_prefix().chars().count(), 2);
        }
    }

    #[test]
    fn test_solar_term_names_round_trip_and_months() {
        assert_eq!("大寒".parse::<SolarTerm>(), Ok(SolarTerm::MajorCold));
        assert_eq!(SolarTerm::from_name(" 芒种 "), Some(SolarTerm::GrainInEar));
        assert!("大热".parse::<SolarTerm>().is_err());
        assert_eq!(SolarTerm::MajorCold.civil_month(), 1);
        assert_eq!(SolarTerm::SpringEquinox.civil_month(), 3);
        assert_eq!(SolarTerm::LightSnow.civil_month(), 11);
        assert_eq!(SolarTerm::WinterSolstice.civil_month(), 12);
    }
}
