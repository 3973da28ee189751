// ==========================================
// 五运六气 AHI 推演引擎 - 节气时刻提供者
// ==========================================
// 职责: 给定年份与节气名, 返回精确到秒的交节时刻
// 说明: 天文计算不在本库范围内, 由外部数据源提供
// ==========================================

use crate::domain::types::SolarTerm;
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{trace, warn};

// ==========================================
// SolarTermProvider - 节气时刻查询接口
// ==========================================
pub trait SolarTermProvider {
    /// 查询 year 年 term 节气的交节时刻
    ///
    /// 查不到时返回 `EngineError::TermLookupFailure`
    fn exact_moment(&self, year: i32, term: SolarTerm) -> EngineResult<NaiveDateTime>;
}

impl<P: SolarTermProvider + ?Sized> SolarTermProvider for &P {
    fn exact_moment(&self, year: i32, term: SolarTerm) -> EngineResult<NaiveDateTime> {
        (**self).exact_moment(year, term)
    }
}

impl<P: SolarTermProvider + ?Sized> SolarTermProvider for Box<P> {
    fn exact_moment(&self, year: i32, term: SolarTerm) -> EngineResult<NaiveDateTime> {
        (**self).exact_moment(year, term)
    }
}

// ==========================================
// SolarTermTable - 内存节气表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SolarTermTable {
    moments: HashMap<(i32, SolarTerm), NaiveDateTime>,
}

impl SolarTermTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条节气时刻, 返回被覆盖的旧值
    pub fn insert(
        &mut self,
        year: i32,
        term: SolarTerm,
        moment: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        self.moments.insert((year, term), moment)
    }

    pub fn contains(&self, year: i32, term: SolarTerm) -> bool {
        self.moments.contains_key(&(year, term))
    }

    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// 表中覆盖的年份范围（含两端）
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.moments.keys().map(|(y, _)| *y).min()?;
        let max = self.moments.keys().map(|(y, _)| *y).max()?;
        Some((min, max))
    }
}

impl SolarTermProvider for SolarTermTable {
    fn exact_moment(&self, year: i32, term: SolarTerm) -> EngineResult<NaiveDateTime> {
        match self.moments.get(&(year, term)) {
            Some(moment) => Ok(*moment),
            None => Err(EngineError::term_lookup(year, term, "节气表未收录")),
        }
    }
}

// ==========================================
// CachedSolarTermProvider - 节气查询缓存
// ==========================================
// (year, term) 的结果是纯函数, 成功结果按键缓存; 失败不缓存
pub struct CachedSolarTermProvider<P> {
    inner: P,
    cache: Mutex<HashMap<(i32, SolarTerm), NaiveDateTime>>,
    stats: Mutex<CacheStats>,
}

/// 缓存命中统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl<P: SolarTermProvider> CachedSolarTermProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().map(|s| *s).unwrap_or_default()
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn record(&self, hit: bool) {
        if let Ok(mut stats) = self.stats.lock() {
            if hit {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        }
    }
}

impl<P: SolarTermProvider> SolarTermProvider for CachedSolarTermProvider<P> {
    fn exact_moment(&self, year: i32, term: SolarTerm) -> EngineResult<NaiveDateTime> {
        let key = (year, term);

        if let Ok(cache) = self.cache.lock() {
            if let Some(moment) = cache.get(&key) {
                self.record(true);
                trace!(year, term = %term, "节气缓存命中");
                return Ok(*moment);
            }
        }

        self.record(false);
        let moment = self.inner.exact_moment(year, term).map_err(|e| {
            warn!(year, term = %term, error = %e, "节气查询失败");
            e
        })?;

        // 锁中毒时放弃写缓存, 结果仍然正确
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, moment);
        }
        Ok(moment)
    }
}
