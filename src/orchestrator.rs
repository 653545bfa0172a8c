//! Coordinates one full gather cycle:
//! login → resolve customer → list groups → gather per group.
//!
//! Per-group gathers run concurrently up to the configured limit; the session
//! is read-only by then, so the groups share it freely. No ordering is
//! guaranteed between groups' results. A cycle re-uses an existing bearer
//! token; only a session without one logs in.

use crate::{
    catalog,
    config::Config,
    error::Error,
    gatherer,
    metrics::MetricSeries,
    session::{
        Credentials,
        Session,
    },
    transport::Transport,
};
use futures::{
    stream,
    StreamExt,
};
use tracing::info;

pub struct Orchestrator {
    session: Session,
    max_concurrent_gathers: usize,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let transport = Transport::new(config.api_url.clone(), config.request_timeout)?;
        let session = Session::new(
            transport,
            Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            },
        );
        Ok(Self {
            session,
            max_concurrent_gathers: config.max_concurrent_gathers,
        })
    }

    /// Runs one gather cycle and returns every series gathered across all
    /// distribution groups. An account with zero groups yields an empty vec
    /// and performs no query.
    pub async fn run_cycle(&mut self) -> Result<Vec<MetricSeries>, Error> {
        if self.session.token().is_err() {
            self.session.login().await?;
        }
        if self.session.customer_id().is_err() {
            self.session.resolve_customer().await?;
        }

        let groups = catalog::list_groups(&self.session).await?;
        info!(groups = groups.len(), "enumerated distribution groups");

        let session = &self.session;
        let mut gathers = stream::iter(groups.iter())
            .map(|group| gatherer::gather(session, &group.id))
            .buffer_unordered(self.max_concurrent_gathers);

        let mut series = Vec::new();
        while let Some(result) = gathers.next().await {
            series.extend(result?);
        }
        info!(series = series.len(), "gather cycle complete");
        Ok(series)
    }

    /// The underlying session, e.g. to re-run `login()` after an auth failure.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
