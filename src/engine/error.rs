// ==========================================
// 五运六气 AHI 推演引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 节气查询失败必须向上传播, 不得用默认日期替代
// ==========================================

use crate::domain::types::{Branch, SolarTerm};
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 节气表缺少该年份该节气（数据覆盖缺口, 不重试）
    #[error("无法定位 {year}年 的 {term} 节气时间: {reason}")]
    TermLookupFailure {
        year: i32,
        term: SolarTerm,
        reason: String,
    },

    /// 地支未命中司天在泉配对表（内部不变量被破坏）
    #[error("地支 {0} 未匹配任何司天在泉配对")]
    UnmappedBranch(Branch),
}

impl EngineError {
    pub fn term_lookup(year: i32, term: SolarTerm, reason: impl Into<String>) -> Self {
        EngineError::TermLookupFailure {
            year,
            term,
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
