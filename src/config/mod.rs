// ==========================================
// 五运六气 AHI 推演引擎 - 配置层
// ==========================================
// 职责: 评分参数集（经典 / 增强）的定义、解析与校验
// 说明: 环境变量加载属于外层, 由调用方传入参数集
// ==========================================

pub mod scoring_profile;

// 重导出核心配置类型
pub use scoring_profile::{BaseScoreParameters, DriftBand, ProfileError, ScoringProfile};
