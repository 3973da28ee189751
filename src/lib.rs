// ==========================================
// 五运六气 AHI 推演引擎 - 核心库
// ==========================================
// 输入: 公历出生日期 + 节气时刻数据源
// 输出: 出生盘摘要 + 1..=60 岁健康指数 (AHI) K 线
// 红线: 不做天文计算, 不做持久化; 单线程顺序推演
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 枚举与实体
pub mod domain;

// 引擎层 - 历法解析与评分规则
pub mod engine;

// 导入层 - 节气表
pub mod importer;

// 配置层 - 评分参数集
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 推演入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Adequacy, Branch, Phase, QiPhase, SolarTerm, Stem};

// 领域实体
pub use domain::{
    CalendricalYear, ClimaticEffect, CollisionBreakdown, Fortune, FortuneStage, GovernancePattern,
    KLinePoint, NatalProfile, QiStage,
};

// 引擎
pub use engine::{
    AhiOrchestrator, AhiRun, CachedSolarTermProvider, CalendricalChart, CalendricalResolver,
    EngineError, EngineResult, LifecycleSimulator, NatalProfileBuilder, SolarTermProvider,
    SolarTermTable, YearlyCollisionScorer,
};

// 配置
pub use config::ScoringProfile;

// API
pub use api::{ApiError, ApiResult, SimulationApi, SimulationResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "五运六气 AHI 推演引擎";
