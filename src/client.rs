//! Forge API client.
//!
//! Low-level HTTP client that handles bearer authentication, transient-error
//! retries and raw requests. Resource-family operations live in [`crate::api`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{ForgeError, Result};

const DEFAULT_BASE_URL: &str = "https://developer.api.autodesk.com/";
const USER_AGENT: &str = concat!("forgeapi/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Retry policy for transient upstream failures.
///
/// A request whose response status is in `retryable` is resent with
/// exponential backoff (`base_delay * 2^(attempt-1)`) until it either
/// succeeds or `max_attempts` sends have been made.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of sends, including the first.
    pub max_attempts: u32,
    /// Backoff base factor.
    pub base_delay: Duration,
    /// Status codes considered transient.
    pub retryable: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_secs(1),
            retryable: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    fn retries(&self, status: StatusCode) -> bool {
        self.retryable.contains(&status.as_u16())
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Polling policy for endpoints that answer 202 while a derivative is
/// still being extracted. The delay starts at `base_delay`, doubles up to
/// `max_delay`, and the whole wait is capped at `timeout`.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Per-request options: query parameters, extra headers, JSON body.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn queries(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Low-level Forge API client.
///
/// Holds the connection pool, the base URL, an optional bearer token and
/// the retry/poll policies. This struct is cheaply cloneable; clones
/// reference the same underlying connection pool.
///
/// Token renewal is the caller's responsibility: a 401 surfaces as
/// [`ForgeError::TokenExpired`] and the client keeps using whatever token
/// it was given until [`ForgeClient::set_token`] is called.
///
/// # Example
///
/// ```no_run
/// use forgeapi::ForgeClient;
///
/// # fn example() -> forgeapi::Result<()> {
/// let client = ForgeClient::with_token("token", "https://developer.api.autodesk.com/")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ForgeClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
    retry: Arc<RetryPolicy>,
    poll: Arc<PollPolicy>,
}

impl std::fmt::Debug for ForgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ForgeClient`] with timeout and policy overrides.
pub struct ForgeClientBuilder {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    retry: RetryPolicy,
    poll: PollPolicy,
}

impl Default for ForgeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            poll: PollPolicy::default(),
        }
    }
}

impl ForgeClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Default per-request timeout. There is no per-call override; every
    /// request uses this value.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ForgeClient> {
        // Ensure base URL ends with / so joins keep the full path
        let base_url_str = if self.base_url.ends_with('/') {
            self.base_url
        } else {
            format!("{}/", self.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(self.timeout)
            .build()
            .map_err(ForgeError::Http)?;

        Ok(ForgeClient {
            http,
            base_url: Arc::new(base_url),
            token: self.token,
            retry: Arc::new(self.retry),
            poll: Arc::new(self.poll),
        })
    }
}

impl ForgeClient {
    /// Create a client without a token against the given base URL.
    ///
    /// Operations fail with [`ForgeError::MissingToken`] until a token is
    /// attached with [`ForgeClient::set_token`].
    pub fn new(base_url: &str) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client with a bearer token against the given base URL.
    pub fn with_token(token: &str, base_url: &str) -> Result<Self> {
        Self::builder().base_url(base_url).token(token).build()
    }

    /// Start building a client with non-default timeout or policies.
    pub fn builder() -> ForgeClientBuilder {
        ForgeClientBuilder::default()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attach or replace the bearer token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ForgeError::MissingToken)
    }

    /// Send one request with retry on transient statuses, then map the
    /// final status to the error taxonomy.
    #[tracing::instrument(skip(self, opts))]
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        opts: RequestOptions,
    ) -> Result<Response> {
        let token = self.bearer()?.to_string();
        let url = self.base_url.join(endpoint)?;

        let mut attempt = 1u32;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .bearer_auth(&token);
            if !opts.query.is_empty() {
                request = request.query(&opts.query);
            }
            for (name, value) in &opts.headers {
                request = request.header(*name, value);
            }
            if let Some(body) = &opts.json {
                request = request.json(body);
            }

            let response = request.send().await.map_err(ForgeError::Http)?;
            let status = response.status();

            if self.retry.retries(status) {
                if attempt >= self.retry.max_attempts {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ForgeError::Transient {
                        status: status.as_u16(),
                        body,
                    });
                }
                let delay = self.retry.backoff(attempt);
                tracing::warn!(
                    status = status.as_u16(),
                    attempt,
                    ?delay,
                    "transient status from {endpoint}, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Self::check_response(response, endpoint).await;
        }
    }

    /// GET returning the parsed JSON payload.
    pub(crate) async fn get_json(&self, endpoint: &str, opts: RequestOptions) -> Result<Value> {
        let response = self.send(Method::GET, endpoint, opts).await?;
        Ok(response.json().await.map_err(ForgeError::Http)?)
    }

    /// POST returning the parsed JSON payload.
    pub(crate) async fn post_json(&self, endpoint: &str, opts: RequestOptions) -> Result<Value> {
        let response = self.send(Method::POST, endpoint, opts).await?;
        Ok(response.json().await.map_err(ForgeError::Http)?)
    }

    /// GET that keeps polling while the server answers 202.
    ///
    /// The identical request is resent with a doubling delay, capped at
    /// [`PollPolicy::max_delay`] per wait and [`PollPolicy::timeout`]
    /// overall; exceeding the bound fails with
    /// [`ForgeError::ProcessingTimeout`].
    pub(crate) async fn get_polling(
        &self,
        endpoint: &str,
        opts: RequestOptions,
    ) -> Result<Response> {
        let mut delay = self.poll.base_delay;
        let mut waited = Duration::ZERO;

        loop {
            let response = self.send(Method::GET, endpoint, opts.clone()).await?;
            if response.status() != StatusCode::ACCEPTED {
                return Ok(response);
            }

            if waited >= self.poll.timeout {
                return Err(ForgeError::ProcessingTimeout {
                    endpoint: endpoint.to_string(),
                    waited,
                });
            }
            tracing::debug!(?delay, ?waited, "derivative still processing at {endpoint}");
            tokio::time::sleep(delay).await;
            waited += delay;
            delay = (delay * 2).min(self.poll.max_delay);
        }
    }

    /// Map non-2xx statuses to the error taxonomy.
    async fn check_response(response: Response, endpoint: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ForgeError::TokenExpired);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ForgeError::Api {
            status: status.as_u16(),
            body,
            endpoint: endpoint.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_debug_redacts_token() {
        let client =
            ForgeClient::with_token("secret-token", "https://developer.api.autodesk.com/")
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ForgeClient"));
        assert!(debug.contains("has_token"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn base_url_trailing_slash() {
        let client1 = ForgeClient::new("https://developer.api.autodesk.com").unwrap();
        let client2 = ForgeClient::new("https://developer.api.autodesk.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn retry_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn retry_statuses() {
        let policy = RetryPolicy::default();
        for code in [429u16, 500, 502, 503, 504] {
            assert!(policy.retries(StatusCode::from_u16(code).unwrap()));
        }
        assert!(!policy.retries(StatusCode::NOT_FOUND));
        assert!(!policy.retries(StatusCode::UNAUTHORIZED));
    }
}
