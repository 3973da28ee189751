// ==========================================
// 五运六气 AHI 推演引擎 - 领域模型层
// ==========================================
// 职责: 五行/干支/六气/节气等闭合枚举, 运气年与步位实体, 推演结果实体
// 红线: 不含节气数据访问, 不含评分逻辑
// ==========================================

pub mod calendar;
pub mod climate;
pub mod profile;
pub mod types;

// 重导出核心类型
pub use calendar::{CalendricalYear, Fortune, FortuneStage, QiStage};
pub use climate::{lookup_pairing, ClimaticEffect, CLIMATIC_PAIRINGS};
pub use profile::{CollisionBreakdown, GovernancePattern, KLinePoint, NatalProfile};
pub use types::{Adequacy, Branch, Phase, QiPhase, SolarTerm, Stem};
