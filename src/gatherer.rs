//! Time-series query construction and execution for one distribution group.
//!
//! Each gather issues a single `POST /{customerID}/query` with seven
//! aggregate-sum targets, one per delivery metric, over a fixed trailing
//! window. The window lags "now" because the upstream aggregates in 5 minute
//! intervals; querying finished buckets only avoids scraping zeroes.

use crate::{
    error::Error,
    metrics::{
        MetricSeries,
        Point,
        DELIVERY_METRICS,
    },
    session::Session,
};
use serde::Deserialize;
use tracing::debug;

/// Relative-time window understood by the upstream query engine.
pub const QUERY_START: &str = "-30min";
pub const QUERY_END: &str = "-20min";

#[derive(Deserialize)]
struct QueryEnvelope {
    response: Vec<RawSeries>,
}

#[derive(Deserialize)]
struct RawSeries {
    target: String,
    #[serde(default)]
    points: Vec<Point>,
}

/// Group ids are interpolated into a query-language expression; restrict them
/// to characters that cannot alter its structure. `.` is excluded because it
/// separates metric path segments.
fn is_valid_group_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Builds the seven target expressions for a distribution group.
pub fn build_targets(group_id: &str) -> Result<Vec<String>, Error> {
    if !is_valid_group_id(group_id) {
        return Err(Error::InvalidGroupId(group_id.to_string()));
    }
    Ok(DELIVERY_METRICS
        .iter()
        .map(|metric| {
            format!("alias(aggregate(sum({group_id}.*.*.*.{metric}),'5min', 'sum', 'true'), '{metric}')")
        })
        .collect())
}

/// Requests the seven delivery metric series for one distribution group and
/// tags each returned series with the group id.
///
/// A partial response (fewer than seven series, or a series with zero points)
/// is valid: a newly created group may have no data in the window yet.
pub async fn gather(session: &Session, group_id: &str) -> Result<Vec<MetricSeries>, Error> {
    let token = session.token()?;
    let customer_id = session.customer_id()?;

    let mut form: Vec<(&str, String)> = vec![
        ("start", QUERY_START.to_string()),
        ("end", QUERY_END.to_string()),
    ];
    for target in build_targets(group_id)? {
        form.push(("target", target));
    }

    let path = format!("/{customer_id}/query");
    let envelope: QueryEnvelope = session
        .transport()
        .post_form_json(&path, &form, Some(token))
        .await
        .map_err(Error::into_auth)?;
    debug!(group_id, series = envelope.response.len(), "gathered metric series");

    Ok(envelope
        .response
        .into_iter()
        .map(|raw| MetricSeries {
            group_id: group_id.to_string(),
            target: raw.target,
            points: raw.points,
        })
        .collect())
}
