// ==========================================
// 五运六气 AHI 推演引擎 - 引擎层
// ==========================================
// 职责: 运气历法解析、先天禀赋、流年碰撞、生命周期推演
// 红线: 引擎不做天文计算, 节气时刻一律经 SolarTermProvider 获取
// ==========================================

pub mod calendar;
pub mod collision;
pub mod error;
pub mod lifecycle;
pub mod natal;
pub mod orchestrator;
pub mod solar_term;

// 重导出核心引擎
pub use calendar::{CalendricalChart, CalendricalResolver, HOST_FORTUNES, HOST_QI};
pub use collision::YearlyCollisionScorer;
pub use error::{EngineError, EngineResult};
pub use lifecycle::{LifecycleSimulator, MAX_AGE};
pub use natal::NatalProfileBuilder;
pub use orchestrator::{AhiOrchestrator, AhiRun};
pub use solar_term::{CacheStats, CachedSolarTermProvider, SolarTermProvider, SolarTermTable};
