use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Metrics は問題バンクサーバーの Prometheus メトリクス。
/// HTTP の RED メトリクス、CSV 取り込みの行数、DB クエリのレイテンシを提供する。
pub struct Metrics {
    pub http_requests_total: CounterVec,
    pub http_request_duration: HistogramVec,
    pub question_import_rows_total: IntCounterVec,
    pub db_query_duration: HistogramVec,
    registry: Registry,
}

const DEFAULT_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

impl Metrics {
    /// new は Prometheus メトリクスを初期化して返す。
    /// service_name はメトリクスの service ラベルに使用される。
    pub fn new(service_name: &str) -> Self {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests")
                .const_label("service", service_name),
            &["method", "path", "status"],
        )
        .expect("failed to create http_requests_total counter");

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Histogram of HTTP request latency",
            )
            .const_label("service", service_name)
            .buckets(DEFAULT_BUCKETS.to_vec()),
            &["method", "path"],
        )
        .expect("failed to create http_request_duration histogram");

        let question_import_rows_total = IntCounterVec::new(
            Opts::new(
                "question_import_rows_total",
                "Total number of CSV rows handled by question imports",
            )
            .const_label("service", service_name),
            &["outcome"],
        )
        .expect("failed to create question_import_rows_total counter");

        let db_query_duration = HistogramVec::new(
            HistogramOpts::new(
                "db_query_duration_seconds",
                "Histogram of database query latency",
            )
            .const_label("service", service_name)
            .buckets(DEFAULT_BUCKETS.to_vec()),
            &["query_name", "table"],
        )
        .expect("failed to create db_query_duration histogram");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("failed to register http_requests_total");
        registry
            .register(Box::new(http_request_duration.clone()))
            .expect("failed to register http_request_duration");
        registry
            .register(Box::new(question_import_rows_total.clone()))
            .expect("failed to register question_import_rows_total");
        registry
            .register(Box::new(db_query_duration.clone()))
            .expect("failed to register db_query_duration");

        Self {
            http_requests_total,
            http_request_duration,
            question_import_rows_total,
            db_query_duration,
            registry,
        }
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, path, status])
            .inc();
    }

    pub fn record_http_duration(&self, method: &str, path: &str, duration_secs: f64) {
        self.http_request_duration
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// record_import_rows は取り込み結果の行数を outcome（parsed/failed/inserted/not_inserted）別に加算する。
    pub fn record_import_rows(&self, outcome: &str, count: usize) {
        self.question_import_rows_total
            .with_label_values(&[outcome])
            .inc_by(count as u64);
    }

    pub fn record_db_query_duration(&self, query_name: &str, table: &str, duration_secs: f64) {
        self.db_query_duration
            .with_label_values(&[query_name, table])
            .observe(duration_secs);
    }

    /// gather_metrics は Prometheus テキスト形式でメトリクスを出力する。
    pub fn gather_metrics(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %e, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_contains_recorded_metrics() {
        let metrics = Metrics::new("question-bank-test");
        metrics.record_http_request("GET", "/api/v1/jobs", "200");
        metrics.record_import_rows("parsed", 3);
        metrics.record_import_rows("failed", 1);

        let text = metrics.gather_metrics();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("question_import_rows_total"));
        assert!(text.contains(r#"outcome="parsed""#));
        assert!(text.contains(r#"service="question-bank-test""#));
    }

    #[test]
    fn test_independent_registries() {
        let a = Metrics::new("a");
        let b = Metrics::new("b");
        a.record_import_rows("inserted", 2);
        assert!(!b.gather_metrics().contains(r#"outcome="inserted""#));
    }
}
