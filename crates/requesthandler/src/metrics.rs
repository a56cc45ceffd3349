use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, Encoder, HistogramVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUEST_PROCESS_TIME: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "requesthandler_request_process_time_ms",
        "Downstream request round trip in milliseconds",
        &["target", "resource", "method"],
        vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 3000.0]
    )
    .expect("register request_process_time")
});

/// Text exposition of every metric in the default registry.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return format!("# metrics encode error: {e}");
    }
    String::from_utf8(buffer).unwrap_or_default()
}
