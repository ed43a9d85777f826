use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec,
};

pub static CACHE_HITS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "aggregator_cache_hits_total",
        "Aggregation requests served from the result cache"
    )
    .expect("aggregator cache hits")
});

pub static CACHE_MISSES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "aggregator_cache_misses_total",
        "Aggregation requests that missed the result cache"
    )
    .expect("aggregator cache misses")
});

pub static COALESCED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "aggregator_coalesced_requests_total",
        "Cache misses that joined an already in-flight aggregation for the same username"
    )
    .expect("aggregator coalesced requests")
});

pub static AGGREGATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "aggregator_aggregations_total",
        "Completed upstream aggregations grouped by outcome",
        &["outcome"]
    )
    .expect("aggregator aggregations total")
});
