use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("order-desk"));

// --- Domain Metrics ---

pub static ORDER_PAGES_FETCHED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("orders.pages.fetched")
        .with_description("Number of upstream order pages fetched")
        .with_unit("{page}")
        .build()
});

pub static ORDERS_LOADED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("orders.loaded")
        .with_description("Number of orders normalized and accumulated")
        .with_unit("{order}")
        .build()
});

pub static PAGE_FETCH_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("orders.page_fetch.duration")
        .with_description("Duration of single upstream page fetches in seconds")
        .with_unit("s")
        .build()
});

pub static SESSION_FAILURES: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("orders.session.failures")
        .with_description("Number of acquisition sessions ending in failure")
        .with_unit("{session}")
        .build()
});

// --- HTTP Metrics ---

pub static HTTP_REQUESTS_TOTAL: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("http.requests.total")
        .with_description("Total number of HTTP requests")
        .with_unit("{request}")
        .build()
});

pub static HTTP_REQUEST_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("http.request.duration")
        .with_description("HTTP request duration in milliseconds")
        .with_unit("ms")
        .with_boundaries(vec![
            1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0,
        ])
        .build()
});
