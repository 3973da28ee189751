// ==========================================
// 五运六气 AHI 推演引擎 - 节气表导入器
// ==========================================
// 输入: CSV, 表头 year,term,moment
//   例: 2024,大寒,2024-01-20 16:07:31
// 输出: SolarTermTable
// 校验: 年份/节气名/时刻格式; 时刻须落在该年该节气所属月份; (year, term) 不得重复
// ==========================================

use crate::domain::types::SolarTerm;
use crate::engine::solar_term::SolarTermTable;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{Datelike, NaiveDateTime};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

/// 时刻格式
pub const MOMENT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const COL_YEAR: &str = "year";
const COL_TERM: &str = "term";
const COL_MOMENT: &str = "moment";

// ==========================================
// SolarTermCsvImporter - 节气表 CSV 导入器
// ==========================================
pub struct SolarTermCsvImporter;

impl SolarTermCsvImporter {
    /// 从文件导入
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn import_file(path: &Path) -> ImportResult<SolarTermTable> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("csv") {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let file = File::open(path)?;
        Self::import_reader(file)
    }

    /// 从任意 reader 导入
    pub fn import_reader<R: Read>(reader: R) -> ImportResult<SolarTermTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| -> ImportResult<usize> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
        };
        let year_idx = column(COL_YEAR)?;
        let term_idx = column(COL_TERM)?;
        let moment_idx = column(COL_MOMENT)?;

        let mut table = SolarTermTable::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            // 行号按文件行计（表头为第 1 行）
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 2);

            // 跳过完全空白的行
            if record.iter().all(|v| v.is_empty()) {
                continue;
            }

            let raw_year = record.get(year_idx).unwrap_or("");
            let year: i32 = raw_year.parse().map_err(|_| ImportError::YearFormatError {
                row,
                value: raw_year.to_string(),
            })?;

            let raw_term = record.get(term_idx).unwrap_or("");
            let term = SolarTerm::from_name(raw_term).ok_or_else(|| ImportError::UnknownTerm {
                row,
                value: raw_term.to_string(),
            })?;

            let raw_moment = record.get(moment_idx).unwrap_or("");
            let moment = NaiveDateTime::parse_from_str(raw_moment, MOMENT_FORMAT).map_err(|_| {
                ImportError::DateFormatError {
                    row,
                    value: raw_moment.to_string(),
                }
            })?;

            if moment.year() != year || moment.month() != term.civil_month() {
                return Err(ImportError::MomentOutOfPlace {
                    row,
                    year,
                    term: term.name().to_string(),
                    moment: raw_moment.to_string(),
                });
            }

            if table.insert(year, term, moment).is_some() {
                return Err(ImportError::DuplicateTerm {
                    row,
                    year,
                    term: term.name().to_string(),
                });
            }
        }

        info!(
            records = table.len(),
            year_range = ?table.year_range(),
            "节气表导入完成"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::solar_term::SolarTermProvider;

    #[test]
    fn test_import_valid_rows() {
        let csv = "year,term,moment\n\
                   2024,大寒,2024-01-20 16:07:31\n\
                   \n\
                   2024, 春分 ,2024-03-20 11:06:20\n";
        let table = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let moment = table.exact_moment(2024, SolarTerm::SpringEquinox).unwrap();
        assert_eq!(moment.to_string(), "2024-03-20 11:06:20");
    }

    #[test]
    fn test_header_order_is_free() {
        let csv = "moment,year,term\n2024-01-20 16:07:31,2024,大寒\n";
        let table = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap();
        assert!(table.contains(2024, SolarTerm::MajorCold));
    }

    #[test]
    fn test_missing_column() {
        let csv = "year,name,moment\n2024,大寒,2024-01-20 16:07:31\n";
        let err = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(c) if c == "term"));
    }

    #[test]
    fn test_unknown_term_reports_row() {
        let csv = "year,term,moment\n\
                   2024,大寒,2024-01-20 16:07:31\n\
                   2024,大热,2024-07-22 09:44:00\n";
        let err = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::UnknownTerm { row: 3, .. }));
    }

    #[test]
    fn test_moment_in_wrong_month() {
        let csv = "year,term,moment\n2024,大寒,2024-02-20 16:07:31\n";
        let err = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MomentOutOfPlace { row: 2, .. }));
    }

    #[test]
    fn test_duplicate_row() {
        let csv = "year,term,moment\n\
                   2024,大寒,2024-01-20 16:07:31\n\
                   2024,大寒,2024-01-20 16:07:32\n";
        let err = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateTerm { row: 3, year: 2024, .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let csv = "year,term,moment\n2024,大寒,2024/01/20\n";
        let err = SolarTermCsvImporter::import_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::DateFormatError { row: 2, .. }));
    }
}
