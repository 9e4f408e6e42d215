//! Request metrics with Prometheus exposition.

use std::time::Duration;

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

/// Process-wide request counters and duration histogram.
///
/// One instance is created at startup and shared by all handlers. Counters
/// are monotonic and never reset.
pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("api_requests_total", "Total API requests"),
            &["endpoint"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let duration = Histogram::with_opts(HistogramOpts::new(
            "request_duration_seconds",
            "Request duration in seconds",
        ))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    pub fn increment(&self, endpoint: &str) {
        self.requests.with_label_values(&[endpoint]).inc();
    }

    pub fn observe_duration(&self, seconds: f64) {
        self.duration.observe(seconds);
    }

    /// Count one call to `endpoint` and record its duration.
    pub fn record(&self, endpoint: &str, elapsed: Duration) {
        self.increment(endpoint);
        self.observe_duration(elapsed.as_secs_f64());
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn snapshot(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("non-UTF8 exposition output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_shows_in_snapshot() {
        let metrics = Metrics::new().unwrap();
        metrics.increment("chat_completions");
        metrics.increment("chat_completions");
        metrics.increment("embeddings");

        let text = metrics.snapshot().unwrap();
        assert!(text.contains(r#"api_requests_total{endpoint="chat_completions"} 2"#));
        assert!(text.contains(r#"api_requests_total{endpoint="embeddings"} 1"#));
    }

    #[test]
    fn test_duration_observations_accumulate() {
        let metrics = Metrics::new().unwrap();
        metrics.observe_duration(0.25);
        metrics.record("completions", Duration::from_millis(100));

        let text = metrics.snapshot().unwrap();
        assert!(text.contains("request_duration_seconds_count 2"));
    }

    #[test]
    fn test_snapshot_without_traffic_is_valid() {
        let metrics = Metrics::new().unwrap();
        let text = metrics.snapshot().unwrap();
        assert!(text.contains("request_duration_seconds"));
    }
}
