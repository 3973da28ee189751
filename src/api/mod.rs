// ==========================================
// 五运六气 AHI 推演引擎 - API 层
// ==========================================
// 职责: 对外推演入口, 参数校验, 引擎错误 → 用户可读错误
// ==========================================

pub mod dto;
pub mod error;
pub mod simulation_api;

pub use dto::{KLineDto, NatalSummaryDto, SimulationResponse};
pub use error::{ApiError, ApiResult};
pub use simulation_api::SimulationApi;
