//! # UltraCDN Stats Gatherer
//!
//! Authenticates against the UltraCDN management API, enumerates the
//! account's distribution groups, and retrieves time-series delivery metrics
//! (bytes delivered, request counts, bandwidth, cache-hit requests and
//! status-code buckets) for each group over a fixed trailing window. The
//! gathered [`MetricSeries`] records are meant to feed an external monitoring
//! pipeline; exposition is a downstream concern.
//!
//! ## Architecture
//!
//! - **`transport`**: one authenticated HTTP request/response cycle, exact-200
//!   status checking and JSON decoding
//! - **`session`**: credentials, bearer token and customer scope
//!   (`login` → `resolve_customer`)
//! - **`catalog`**: distribution-group enumeration
//! - **`gatherer`**: the seven-target aggregate time-series query per group
//! - **`orchestrator`**: one full gather cycle with bounded per-group
//!   concurrency
//!
//! Every stage's output is the precondition of the next; nothing here retries
//! or swallows errors — see [`Error`] for the caller-facing taxonomy.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gatherer;
pub mod metrics;
pub mod orchestrator;
pub mod session;
pub mod transport;

pub use catalog::DistributionGroup;
pub use config::Config;
pub use error::Error;
pub use metrics::{
    MetricSeries,
    Point,
    DELIVERY_METRICS,
};
pub use orchestrator::Orchestrator;
pub use session::{
    Credentials,
    Session,
};
pub use transport::Transport;
