//! Data structures for the delivery metrics returned by the UltraCDN query
//! engine, plus the fixed set of metric names this gatherer requests.

use serde::{
    Deserialize,
    Serialize,
};

/// The seven delivery metrics requested for every distribution group.
pub const DELIVERY_METRICS: [&str; 7] = [
    "bytesdelivered",
    "requestscount",
    "bandwidthbps",
    "cachehit_requests",
    "statuscode_2xx_count",
    "statuscode_4xx_count",
    "statuscode_5xx_count",
];

/// One sample of a time series, as delivered by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub value: f64,
    pub timestamp: i64,
}

/// One metric time series for one distribution group.
///
/// The API does not echo the group in each series, so the gatherer tags every
/// series with the group id it queried for. `points` is time-ascending as
/// returned by the upstream query engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub group_id: String,
    pub target: String,
    pub points: Vec<Point>,
}
