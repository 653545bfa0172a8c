use reqwest::StatusCode;

/// Failures surfaced by the gathering pipeline.
///
/// Nothing in this crate retries or swallows errors; every variant propagates
/// to the caller, which decides between retrying (see [`Error::is_retryable`]),
/// re-authenticating (on [`Error::Auth`]) or giving up.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required credential is missing. Fatal: no operation can proceed.
    #[error("missing required credential: {0}")]
    Config(&'static str),

    /// The request could not be constructed (URL join or body encoding).
    #[error("failed to build request: {0}")]
    RequestBuild(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connection could not be established or timed out.
    #[error("request to the CDN API failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with something other than HTTP 200.
    #[error("unexpected HTTP status {code}")]
    HttpStatus { code: StatusCode },

    /// An authenticated endpoint rejected the call. Preserves the original
    /// status code; callers should re-run `login()` before retrying.
    #[error("authenticated call rejected with HTTP status {code}")]
    Auth { code: StatusCode },

    /// The response body is not valid JSON or does not match the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[source] reqwest::Error),

    /// An operation that needs a bearer token ran before `login()` succeeded.
    #[error("session holds no bearer token, login() must succeed first")]
    NotAuthenticated,

    /// An operation that needs the customer scope ran before `resolve_customer()` succeeded.
    #[error("customer scope is unresolved, resolve_customer() must succeed first")]
    NotScoped,

    /// The distribution group id cannot be safely interpolated into a query target.
    #[error("distribution group id {0:?} contains characters not allowed in a query target")]
    InvalidGroupId(String),
}

impl Error {
    /// Classifies a reqwest failure into the taxonomy. Status handling is not
    /// done here; the transport checks for an exact 200 itself.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::RequestBuild(Box::new(err))
        } else if err.is_decode() {
            Error::Decode(err)
        } else {
            Error::Network(err)
        }
    }

    /// Upgrades a transport-level status failure into an auth failure.
    /// Applied at every authenticated endpoint boundary.
    pub(crate) fn into_auth(self) -> Self {
        match self {
            Error::HttpStatus { code } => Error::Auth { code },
            other => other,
        }
    }

    /// Whether a caller-side retry has a chance of succeeding without any
    /// other intervention. Auth failures are excluded: they need a fresh
    /// login first.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::HttpStatus { code } => code.is_server_error(),
            _ => false,
        }
    }
}
