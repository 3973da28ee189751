// ==========================================
// 推演 API 端到端测试
// ==========================================
// 场景: 节气表 CSV 导入 → SimulationApi → 响应 DTO
// ==========================================


use std::path::Path;

use test_helpers::{fixed_table, write_term_csv, FixedTermProvider};
use wuyun_ahi::api::{ApiError, SimulationApi};
use wuyun_ahi::ScoringProfile;

#[test]
fn test_simulate_from_csv_table() {
    wuyun_ahi::logging::init_test();

    let csv = write_term_csv(1983..=2045);
    let api = SimulationApi::from_term_csv(csv.path(), ScoringProfile::canonical()).unwrap();
    let response = api.simulate(1984, 6, 15).unwrap();

    let summary = &response.natal_summary;
    assert_eq!(summary.stem_char, "甲");
    assert_eq!(summary.branch_char, "子");
    assert_eq!(summary.phase, "土");
    assert_eq!(summary.adequacy, "太过");
    assert_eq!(summary.celestial_governance_name, "少阴君火");
    assert_eq!(summary.terrestrial_governance_name, "阳明燥金");
    assert_eq!(summary.current_fortune_stage_text, "第 3 运, 主: 土, 客: 水太过");
    assert_eq!(
        summary.current_qi_stage_text,
        "第 3 气, 主: 少阳相火 (火), 客: 少阴君火 (热)"
    );
    assert_eq!(summary.qi_term_range, "05-20 至 07-20");
    assert_eq!(summary.strong_element, "土");
    assert_eq!(summary.weak_element, "水");

    assert_eq!(response.base_score, 68.0);
    assert_eq!(response.series.len(), 60);
    assert_eq!(response.series[0].open, 68.0);
    for (i, point) in response.series.iter().enumerate() {
        assert_eq!(point.age, i as u32 + 1);
        assert!((0.0..=100.0).contains(&point.close));
    }
    // 两位小数后仍首尾相接
    for pair in response.series.windows(2) {
        assert_eq!(pair[1].open, pair[0].close);
    }
}

#[test]
fn test_table_and_provider_agree() {
    let from_table = SimulationApi::new(fixed_table(1990..=2060))
        .simulate(1995, 11, 30)
        .unwrap();
    let from_provider = SimulationApi::new(FixedTermProvider::new(1990..=2060))
        .simulate(1995, 11, 30)
        .unwrap();

    assert_ne!(from_table.run_id, from_provider.run_id);
    assert_eq!(from_table.natal_summary, from_provider.natal_summary);
    assert_eq!(from_table.series, from_provider.series);
}

#[test]
fn test_birth_before_major_cold_uses_previous_year() {
    let api = SimulationApi::new(FixedTermProvider::new(1983..=2045));
    let response = api.simulate(1984, 1, 10).unwrap();

    // 1984-01-10 在大寒之前 → 癸亥年, 火运不及
    let summary = &response.natal_summary;
    assert_eq!(summary.ganzhi, "癸亥年");
    assert_eq!(summary.year_fortune, "火运不及 (火)");
    assert_eq!(summary.celestial_governance_name, "厥阴风木");
    assert_eq!(summary.terrestrial_governance_name, "少阳相火");
    assert!(summary.current_fortune_stage_text.starts_with("第 5 运"));
    assert!(summary.current_qi_stage_text.starts_with("第 6 气"));
}

#[test]
fn test_invalid_dates() {
    let api = SimulationApi::new(FixedTermProvider::new(1990..=2060));
    for (y, m, d) in [(2023, 2, 29), (1990, 4, 31), (1990, 0, 1), (1990, 1, 0)] {
        let err = api.simulate(y, m, d).unwrap_err();
        let rejected = matches!(
            err,
            ApiError::InvalidDate { year, month, day } if (year, month, day) == (y, m, d)
        );
        assert!(rejected, "{y}-{m}-{d} 应判为无效日期");
    }
    // 闰年 2 月 29 日有效
    assert!(api.simulate(1996, 2, 29).is_ok());
}

#[test]
fn test_missing_coverage_is_reported() {
    let api = SimulationApi::new(FixedTermProvider::new(1983..=2000));
    let err = api.simulate(1984, 6, 15).unwrap_err();
    match err {
        ApiError::TermLookupFailure { year, term, .. } => {
            assert_eq!(year, 2001);
            assert_eq!(term, "大寒");
        }
        other => panic!("期望 TermLookupFailure, 实际 {other:?}"),
    }
}

#[test]
fn test_amplified_profile() {
    let api = SimulationApi::with_profile(
        FixedTermProvider::new(1983..=2045),
        ScoringProfile::amplified(),
    );
    let response = api.simulate(1984, 6, 15).unwrap();
    // 同气 +20, 君火加临相火 +15
    assert_eq!(response.base_score, 85.0);
    assert_eq!(response.profile, "amplified");
}

#[test]
fn test_partial_profile_json_keeps_canonical_defaults() {
    let api = SimulationApi::with_profile_json(
        FixedTermProvider::new(1983..=2045),
        r#"{"name":"custom","base_score":{"harmony_bonus":5.0}}"#,
    )
    .unwrap();
    assert_eq!(api.profile().base_score.twin_fire_adjustment, 8.0);

    let response = api.simulate(1984, 6, 15).unwrap();
    assert_eq!(response.base_score, 63.0);
    assert_eq!(response.profile, "custom");
}

#[test]
fn test_invalid_profile_rejected() {
    let result = SimulationApi::with_profile_json(
        FixedTermProvider::new(1983..=2045),
        r#"{"drift_bands":[{"from_age":1,"to_age":30,"drift":0.0}]}"#,
    );
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn test_missing_csv_file() {
    let result = SimulationApi::from_term_csv(
        Path::new("/nonexistent/terms.csv"),
        ScoringProfile::canonical(),
    );
    assert!(matches!(result, Err(ApiError::TermTableImport(_))));
}

#[test]
fn test_response_json_shape() {
    let api = SimulationApi::new(FixedTermProvider::new(1983..=2045));
    let response = api.simulate(1984, 6, 15).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["series"].as_array().unwrap().len(), 60);
    assert_eq!(json["series"][0]["age"], 1);
    assert!(json["natal_summary"]["ganzhi"].is_string());
    assert!(json["run_id"].as_str().unwrap().len() == 36);
}
