// ==========================================
// 五运六气 AHI 推演引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎错误为用户可读的错误消息
// 红线: 不输出部分结果, 任一年份失败即整体失败
// ==========================================

use crate::config::ProfileError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（解析之前即拒绝）
    // ==========================================
    #[error("无效日期: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    // ==========================================
    // 节气数据错误
    // ==========================================
    /// 节气表覆盖缺口, 不重试
    #[error("节气查询失败: {year}年 {term}: {reason}")]
    TermLookupFailure {
        year: i32,
        term: String,
        reason: String,
    },

    #[error("节气表导入失败: {0}")]
    TermTableImport(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("评分参数集无效: {0}")]
    ConfigError(String),

    // ==========================================
    // 内部不变量错误
    // ==========================================
    #[error("内部错误: 地支 {0} 未匹配司天在泉配对")]
    UnmappedBranch(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TermLookupFailure { year, term, reason } => {
                ApiError::TermLookupFailure {
                    year,
                    term: term.name().to_string(),
                    reason,
                }
            }
            EngineError::UnmappedBranch(branch) => {
                ApiError::UnmappedBranch(branch.as_char().to_string())
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::TermTableImport(other.to_string()),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Branch, SolarTerm};

    #[test]
    fn test_engine_error_mapping() {
        let err: ApiError =
            EngineError::term_lookup(2099, SolarTerm::MajorCold, "节气表未收录").into();
        assert!(matches!(
            &err,
            ApiError::TermLookupFailure { year: 2099, term, .. } if term == "大寒"
        ));
        assert_eq!(err.to_string(), "节气查询失败: 2099年 大寒: 节气表未收录");

        let err: ApiError = EngineError::UnmappedBranch(Branch::Zi).into();
        assert!(matches!(err, ApiError::UnmappedBranch(b) if b == "子"));
    }

    #[test]
    fn test_invalid_date_message() {
        let err = ApiError::InvalidDate {
            year: 2023,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "无效日期: 2023-2-30");
    }
}
