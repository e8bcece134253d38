#![forbid(unsafe_code)]

//! HTTP delivery of flight submissions.
//!
//! [`HttpSink`] posts each submission as JSON to the collection endpoint,
//! attaching the access token and candidate headers the endpoint expects.
//! Both header values are configuration, never source constants; they come
//! from [`SinkConfig`] builders or the `FLIGHTFORM_*` environment variables.

use async_trait::async_trait;
use flightform_engine::{FlightSubmission, SinkError, SubmissionSink};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Endpoint submissions are posted to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str =
    "https://us-central1-crm-sdk.cloudfunctions.net/flightInfoChallenge";

/// Header carrying the access token.
pub const TOKEN_HEADER: &str = "token";

/// Header naming the submitting candidate.
pub const CANDIDATE_HEADER: &str = "candidate";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_VAR: &str = "FLIGHTFORM_ENDPOINT";

/// Environment variable supplying the access token.
pub const TOKEN_VAR: &str = "FLIGHTFORM_TOKEN";

/// Environment variable supplying the candidate name.
pub const CANDIDATE_VAR: &str = "FLIGHTFORM_CANDIDATE";

/// Where and how to deliver submissions.
///
/// The token and candidate headers are only sent when configured; the
/// endpoint always has a value, defaulting to [`DEFAULT_ENDPOINT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    endpoint: String,
    token: Option<String>,
    candidate: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkConfig {
    /// The default endpoint with no credentials attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            candidate: None,
        }
    }

    /// Read the `FLIGHTFORM_*` environment variables over the defaults.
    ///
    /// Unset and empty variables leave the corresponding field untouched.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        let set = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(endpoint) = set(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        config.token = set(TOKEN_VAR);
        config.candidate = set(CANDIDATE_VAR);
        config
    }

    /// Post to a different endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Attach an access token to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach a candidate name to every request.
    #[must_use]
    pub fn with_candidate(mut self, candidate: impl Into<String>) -> Self {
        self.candidate = Some(candidate.into());
        self
    }

    /// The endpoint submissions are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured access token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The configured candidate name, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }
}

// ---------------------------------------------------------------------------
// HttpSink
// ---------------------------------------------------------------------------

/// Delivers submissions over HTTPS.
///
/// A `2xx` response counts as accepted; any other status becomes
/// [`SinkError::Status`] and the body is ignored. Connection and protocol
/// failures become [`SinkError::Transport`].
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    config: SinkConfig,
}

impl HttpSink {
    /// A sink with a fresh client.
    #[must_use]
    pub fn new(config: SinkConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// A sink reusing an existing client and its connection pool.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: SinkConfig) -> Self {
        Self { client, config }
    }

    /// The delivery configuration.
    #[must_use]
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }
}

#[async_trait]
impl SubmissionSink for HttpSink {
    async fn submit(&self, submission: &FlightSubmission) -> Result<(), SinkError> {
        tracing::debug!("posting submission to {}", self.config.endpoint);
        let mut request = self.client.post(&self.config.endpoint).json(submission);
        if let Some(token) = self.config.token() {
            request = request.header(TOKEN_HEADER, token);
        }
        if let Some(candidate) = self.config.candidate() {
            request = request.header(CANDIDATE_HEADER, candidate);
        }

        let response = request.send().await.map_err(SinkError::transport)?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!("collection endpoint accepted the submission");
            Ok(())
        } else {
            tracing::warn!("collection endpoint answered {status}");
            Err(SinkError::Status(status.as_u16()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
