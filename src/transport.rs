//! Thin HTTP layer over [`reqwest`].
//!
//! Performs one request/response cycle against the management API base URL,
//! requires an exact HTTP 200 (redirects included, anything else is an
//! error), and decodes the JSON body. The body is consumed on the success
//! path and dropped on error paths, so the pooled connection is always
//! released.

use crate::error::Error;
use reqwest::{
    header,
    RequestBuilder,
    StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: Url,
}

impl Transport {
    /// Builds a transport with a per-request deadline. No retries, no
    /// implicit redirect following beyond reqwest defaults.
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(Error::from_reqwest)?;
        Ok(Self { client, base_url })
    }

    /// GET an authenticated endpoint and decode its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, bearer: &str) -> Result<T, Error> {
        let url = self.join(path)?;
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(bearer);
        self.execute(request).await
    }

    /// POST a form-encoded body and decode the JSON response. `bearer` is
    /// absent only for the token endpoint itself.
    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
        bearer: Option<&str>,
    ) -> Result<T, Error> {
        let url = self.join(path)?;
        let mut request = self.client.post(url).header(header::ACCEPT, "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        self.execute(request.form(form)).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = request.send().await.map_err(Error::from_reqwest)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus { code: status });
        }
        response.json::<T>().await.map_err(Error::from_reqwest)
    }

    fn join(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|err| Error::RequestBuild(Box::new(err)))
    }
}
