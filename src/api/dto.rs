// ==========================================
// 五运六气 AHI 推演引擎 - 推演接口 DTO 定义
// ==========================================
// 职责: 定义 simulate 的响应结构
// 约定: 引擎保留全精度, 仅在此处将 open/close 保留两位小数
// ==========================================

use crate::domain::profile::KLinePoint;
use serde::{Deserialize, Serialize};

// ==========================================
// 先天禀赋摘要
// ==========================================

/// 出生盘摘要 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalSummaryDto {
    /// 年干, 如 "甲"
    pub stem_char: String,

    /// 年支, 如 "子"
    pub branch_char: String,

    /// 干支年名, 如 "甲子年"
    pub ganzhi: String,

    /// 岁运五行, 如 "土"
    pub phase: String,

    /// "太过" | "不及"
    pub adequacy: String,

    /// 岁运描述, 如 "土运太过 (土)"
    pub year_fortune: String,

    /// 司天之气, 如 "少阴君火"
    pub celestial_governance_name: String,

    /// 在泉之气, 如 "阳明燥金"
    pub terrestrial_governance_name: String,

    /// 出生所在五运步位描述
    pub current_fortune_stage_text: String,

    /// 出生所在六气步位描述
    pub current_qi_stage_text: String,

    /// 出生所在六气步位的节气区间, 如 "01-20 至 03-20"
    pub qi_term_range: String,

    /// 先天偏强五行
    pub strong_element: String,

    /// 先天偏弱五行
    pub weak_element: String,
}

// ==========================================
// K 线
// ==========================================

/// 年度 K 线点 DTO
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KLineDto {
    pub age: u32,
    pub open: f64,
    pub close: f64,
}

impl From<&KLinePoint> for KLineDto {
    fn from(point: &KLinePoint) -> Self {
        Self {
            age: point.age,
            open: round2(point.open),
            close: round2(point.close),
        }
    }
}

// ==========================================
// 推演响应
// ==========================================

/// simulate 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// 本次推演 ID
    pub run_id: String,

    pub natal_summary: NatalSummaryDto,

    /// 1..=60 岁 K 线
    pub series: Vec<KLineDto>,

    /// 先天基准分（两位小数）
    pub base_score: f64,

    /// 使用的评分参数集名称
    pub profile: String,
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(50.8), 50.8);
        assert_eq!(round2(61.23456), 61.23);
        assert_eq!(round2(61.235001), 61.24);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_kline_dto_rounds_prices() {
        let point = KLinePoint {
            age: 3,
            calendar_year: 2026,
            open: 49.876,
            close: 52.3333,
            impact: 2.1,
            drift: 0.8,
        };
        let dto = KLineDto::from(&point);
        assert_eq!(dto.age, 3);
        assert_eq!(dto.open, 49.88);
        assert_eq!(dto.close, 52.33);
    }

    #[test]
    fn test_response_serializes_snake_case() {
        let response = SimulationResponse {
            run_id: "r".to_string(),
            natal_summary: NatalSummaryDto {
                stem_char: "甲".to_string(),
                branch_char: "子".to_string(),
                ganzhi: "甲子年".to_string(),
                phase: "土".to_string(),
                adequacy: "太过".to_string(),
                year_fortune: "土运太过 (土)".to_string(),
                celestial_governance_name: "少阴君火".to_string(),
                terrestrial_governance_name: "阳明燥金".to_string(),
                current_fortune_stage_text: String::new(),
                current_qi_stage_text: String::new(),
                qi_term_range: String::new(),
                strong_element: "土".to_string(),
                weak_element: "水".to_string(),
            },
            series: vec![],
            base_score: 50.0,
            profile: "canonical".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["natal_summary"]["stem_char"], "甲");
        assert_eq!(json["natal_summary"]["celestial_governance_name"], "少阴君火");
        assert_eq!(json["base_score"], 50.0);
    }
}
