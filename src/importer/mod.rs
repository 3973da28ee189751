// ==========================================
// 五运六气 AHI 推演引擎 - 导入层
// ==========================================
// 职责: 外部节气数据（CSV）→ 内存节气表
// ==========================================

pub mod error;
pub mod solar_term_importer;

pub use error::{ImportError, ImportResult};
pub use solar_term_importer::{SolarTermCsvImporter, MOMENT_FORMAT};
