use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

pub static UPSTREAM_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gh_upstream_requests_total",
        "Upstream GitHub calls grouped by operation and outcome",
        &["op", "outcome"]
    )
    .expect("upstream requests total")
});

pub static UPSTREAM_LATENCY_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gh_upstream_latency_seconds",
        "Latency of upstream GitHub calls grouped by operation",
        &["op"],
        vec![0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0]
    )
    .expect("upstream latency seconds")
});
