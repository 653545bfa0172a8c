//! Authentication lifecycle against the management API.
//!
//! A [`Session`] moves through three states: unauthenticated on construction,
//! authenticated once [`Session::login`] stores a bearer token, and scoped
//! once [`Session::resolve_customer`] stores the customer identifier. All
//! gather operations require the scoped state. The accessors fail fast with
//! [`Error::NotAuthenticated`] / [`Error::NotScoped`] instead of letting an
//! unauthenticated request reach the wire.
//!
//! There is no token refresh: once acquired, the token is used until the
//! process ends or a call fails with [`Error::Auth`], at which point the
//! caller may run `login()` again.

use crate::{
    error::Error,
    transport::Transport,
};
use serde::Deserialize;
use std::fmt;
use tracing::{
    debug,
    info,
};

/// API username and password. The password never appears in logs or debug
/// output.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
pub struct Session {
    transport: Transport,
    credentials: Credentials,
    token: Option<String>,
    customer_id: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SelfEnvelope {
    response: SelfResponse,
}

#[derive(Deserialize)]
struct SelfResponse {
    #[serde(rename = "customerId")]
    customer_id: String,
}

impl Session {
    pub fn new(transport: Transport, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            token: None,
            customer_id: None,
        }
    }

    /// Performs the password-grant token request and stores the bearer token.
    ///
    /// Fails with [`Error::Config`] before any network call when a credential
    /// is empty, and with [`Error::Auth`] on a non-200 from the token
    /// endpoint. A response without an `access_token` field surfaces as
    /// [`Error::Decode`].
    pub async fn login(&mut self) -> Result<(), Error> {
        if self.credentials.username.is_empty() {
            return Err(Error::Config("username"));
        }
        if self.credentials.password.is_empty() {
            return Err(Error::Config("password"));
        }

        let form = [
            ("username", self.credentials.username.clone()),
            ("password", self.credentials.password.clone()),
            ("grant_type", "password".to_string()),
        ];
        let token: TokenResponse = self
            .transport
            .post_form_json("/auth/token", &form, None)
            .await
            .map_err(Error::into_auth)?;
        self.token = Some(token.access_token);
        debug!(username = %self.credentials.username, "acquired bearer token");
        Ok(())
    }

    /// Resolves the account scope via `GET /self` and stores the customer
    /// identifier. Idempotent; calling it again simply re-resolves.
    pub async fn resolve_customer(&mut self) -> Result<&str, Error> {
        let token = self.token()?;
        let envelope: SelfEnvelope = self
            .transport
            .get_json("/self", token)
            .await
            .map_err(Error::into_auth)?;
        let customer_id = envelope.response.customer_id;
        info!(%customer_id, "resolved customer scope");
        self.customer_id = Some(customer_id);
        self.customer_id()
    }

    /// The bearer token, or [`Error::NotAuthenticated`] before a successful login.
    pub fn token(&self) -> Result<&str, Error> {
        self.token.as_deref().ok_or(Error::NotAuthenticated)
    }

    /// The customer identifier, or [`Error::NotScoped`] before resolution.
    pub fn customer_id(&self) -> Result<&str, Error> {
        self.customer_id.as_deref().ok_or(Error::NotScoped)
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn session(username: &str, password: &str) -> Session {
        // Nothing listens here; reaching the network would fail loudly.
        let transport = Transport::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            Duration::from_millis(100),
        )
        .unwrap();
        Session::new(
            transport,
            Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn login_rejects_empty_username_before_any_network_call() {
        let mut session = session("", "secret");
        match session.login().await {
            Err(Error::Config(field)) => assert_eq!(field, "username"),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_rejects_empty_password_before_any_network_call() {
        let mut session = session("user", "");
        match session.login().await {
            Err(Error::Config(field)) => assert_eq!(field, "password"),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn accessors_fail_fast_on_a_fresh_session() {
        let session = session("user", "secret");
        assert!(matches!(session.token(), Err(Error::NotAuthenticated)));
        assert!(matches!(session.customer_id(), Err(Error::NotScoped)));
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let session = session("user", "hunter2");
        let debugged = format!("{session:?}");
        assert!(!debugged.contains("hunter2"));
        assert!(debugged.contains("<redacted>"));
    }
}
