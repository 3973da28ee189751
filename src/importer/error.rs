// ==========================================
// 五运六气 AHI 推演引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    #[error("年份格式错误 (行 {row}): {value}")]
    YearFormatError { row: usize, value: String },

    #[error("未知节气名称 (行 {row}): {value}")]
    UnknownTerm { row: usize, value: String },

    #[error("时刻格式错误 (行 {row}): 期望 YYYY-MM-DD HH:MM:SS，实际 {value}")]
    DateFormatError { row: usize, value: String },

    // ===== 数据质量错误 =====
    #[error("节气时刻与年份/月份不符 (行 {row}): {year}年 {term} @ {moment}")]
    MomentOutOfPlace {
        row: usize,
        year: i32,
        term: String,
        moment: String,
    },

    #[error("重复的节气记录 (行 {row}): {year}年 {term}")]
    DuplicateTerm { row: usize, year: i32, term: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
