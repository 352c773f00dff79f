//! Translation metrics and observability module.
//!
//! This module provides metrics tracking for translation loading, including
//! cache hit rates, resource fetches, and failures.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Number of times a translation map was served from the session cache
    cache_hits: AtomicUsize,

    /// Number of times a translation map was not found in the session cache
    cache_misses: AtomicUsize,

    /// Number of translation resource fetches issued
    fetch_calls: AtomicUsize,

    /// Number of translation resource fetches that failed
    fetch_failures: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global translation metrics instance.
    ///
    /// This method initializes the metrics on first call and returns a reference
    /// to the singleton instance on subsequent calls.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(|| TranslationMetrics {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
        })
    }

    /// Record a cache hit (fresh translation map found in the session cache).
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss (no fresh translation map in the session cache).
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a translation resource fetch.
    pub fn record_fetch_call(&self) {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a translation resource fetch failure.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Get the current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Get the current fetch count.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    /// Get the current fetch failure count.
    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.fetch_calls();
        let failures = self.fetch_failures();
        let fetch_success_rate = if calls > 0 {
            ((calls - failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            fetch_calls: calls,
            fetch_failures: failures,
            fetch_success_rate,
        }
    }

    /// Reset all metrics to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.fetch_calls.store(0, Ordering::Relaxed);
        self.fetch_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time snapshot of the translation metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_hit_rate: f64,
    pub fetch_calls: usize,
    pub fetch_failures: usize,
    pub fetch_success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // The singleton is shared across the whole test binary; every test here
    // resets it and runs serially.

    #[test]
    #[serial]
    fn test_counters_increment() {
        let metrics = TranslationMetrics::global();
        metrics.reset();

        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_fetch_call();
        metrics.record_fetch_failure();

        assert_eq!(metrics.cache_hits(), 2);
        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.fetch_calls(), 1);
        assert_eq!(metrics.fetch_failures(), 1);
    }

    #[test]
    #[serial]
    fn test_report_rates() {
        let metrics = TranslationMetrics::global();
        metrics.reset();

        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_fetch_call();
        metrics.record_fetch_call();
        metrics.record_fetch_failure();

        let report = metrics.report();
        assert!((report.cache_hit_rate - 50.0).abs() < f64::EPSILON);
        assert!((report.fetch_success_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    #[serial]
    fn test_report_with_no_activity() {
        let metrics = TranslationMetrics::global();
        metrics.reset();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.fetch_success_rate, 0.0);
    }

    #[test]
    #[serial]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::global();
        metrics.reset();
        metrics.record_fetch_call();

        let json = serde_json::to_string(&metrics.report()).expect("Should serialize");
        assert!(json.contains("fetch_calls"));
        assert!(json.contains("cache_hit_rate"));
    }
}
