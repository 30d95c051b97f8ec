//! Page retrieval from URLs, files, and stdin.
//!
//! [`fetch_url`] performs a single HTTP GET and reports the outcome as a
//! [`FetchResult`] instead of an error: only an exact `200` counts as
//! [`FetchStatus::Success`]. There is no retry. Local files and standard input
//! are read as raw bytes so every source goes through the same decoder.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{CipinError, Result};

/// Encoding assumed for page bytes unless configured otherwise.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Encoding label recorded on every [`FetchResult`]. Set from the
    /// top-level `encoding` key rather than the `[fetch]` table.
    #[serde(skip)]
    pub encoding: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: concat!("Mozilla/5.0 (compatible; cipin/", env!("CARGO_PKG_VERSION"), ")").to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// Outcome of a fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The server answered `200`.
    Success,
    /// The server answered with any other status code.
    HttpError(u16),
    /// No usable response was received.
    NetworkError(NetworkFailure),
}

/// Transport-level reasons a fetch produced no response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    /// The URL could not be parsed.
    InvalidUrl(String),
    /// The request exceeded the configured timeout.
    Timeout { timeout: u64 },
    /// DNS, connection, TLS, or body read failure.
    Transport(String),
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Success => write!(f, "HTTP 200"),
            FetchStatus::HttpError(code) => write!(f, "HTTP {}", code),
            FetchStatus::NetworkError(failure) => write!(f, "network error: {}", failure),
        }
    }
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailure::InvalidUrl(reason) => write!(f, "invalid URL: {}", reason),
            NetworkFailure::Timeout { timeout } => write!(f, "request timed out after {} seconds", timeout),
            NetworkFailure::Transport(reason) => write!(f, "{}", reason),
        }
    }
}

/// Raw result of fetching one page.
///
/// The body is left undecoded; `encoding` records the assumption the
/// extractor should decode it with. The charset the server declares is
/// ignored.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL as requested.
    pub url: String,
    /// Outcome of the request.
    pub status: FetchStatus,
    /// Response body. Empty unless `status` is [`FetchStatus::Success`].
    pub body: Vec<u8>,
    /// Text encoding to decode `body` with.
    pub encoding: String,
}

impl FetchResult {
    /// Creates a successful result.
    pub fn success(url: impl Into<String>, body: Vec<u8>, encoding: impl Into<String>) -> Self {
        Self { url: url.into(), status: FetchStatus::Success, body, encoding: encoding.into() }
    }

    /// Creates a failed result carrying no body.
    pub fn failure(url: impl Into<String>, status: FetchStatus) -> Self {
        Self { url: url.into(), status, body: Vec::new(), encoding: DEFAULT_ENCODING.to_string() }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    /// Converts a failed fetch into [`CipinError::Fetch`], otherwise yields the body.
    pub fn into_body(self) -> Result<Vec<u8>> {
        match self.status {
            FetchStatus::Success => Ok(self.body),
            status => Err(CipinError::Fetch { url: self.url, status }),
        }
    }
}

/// Fetches a page from a URL.
///
/// Performs one HTTP GET with the configured timeout and User-Agent.
/// Redirects are followed; the final status decides the outcome. A malformed
/// URL or an expired timeout is reported as [`FetchStatus::NetworkError`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> FetchResult {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    let parsed_url = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            return FetchResult::failure(url, FetchStatus::NetworkError(NetworkFailure::InvalidUrl(e.to_string())));
        }
    };

    let client = match Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()
    {
        Ok(client) => client,
        Err(e) => return FetchResult::failure(url, network_status(&e, config)),
    };

    tracing::debug!(url, timeout = config.timeout, "fetching page");

    let response = match client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return FetchResult::failure(url, network_status(&e, config)),
    };

    let code = response.status().as_u16();
    if code != 200 {
        tracing::debug!(url, code, "page returned non-200 status");
        return FetchResult::failure(url, FetchStatus::HttpError(code));
    }

    match response.bytes().await {
        Ok(body) => {
            tracing::debug!(url, bytes = body.len(), "page fetched");
            FetchResult::success(url, body.to_vec(), config.encoding.as_str())
        }
        Err(e) => FetchResult::failure(url, network_status(&e, config)),
    }
}

#[cfg(feature = "fetch")]
fn network_status(err: &reqwest::Error, config: &FetchConfig) -> FetchStatus {
    if err.is_timeout() {
        FetchStatus::NetworkError(NetworkFailure::Timeout { timeout: config.timeout })
    } else {
        FetchStatus::NetworkError(NetworkFailure::Transport(err.to_string()))
    }
}

/// Reads a page from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<Vec<u8>> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(CipinError::FileNotFound(path_buf))
    } else {
        fs::read(&path_buf).map_err(CipinError::from)
    }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<Vec<u8>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer).map_err(CipinError::from)?;

    Ok(buffer)
}
