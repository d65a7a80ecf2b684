use std::time::Duration;

use futures_util::StreamExt;
use sheets_logging::{sheets_debug, sheets_trace};

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_bytes: 8 * 1024 * 1024,
            user_agent: concat!("sheets-engine/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Retrieves a document within `timeout`. Implementations do not retry.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn download(&self, url: reqwest::Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
            sheets_trace!("received {} bytes so far", bytes.len());
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        if timeout.is_zero() {
            return Err(FetchError::new(
                FailureKind::InvalidRequest,
                "timeout must be positive",
            ));
        }
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidRequest, err.to_string()))?;

        // Bounds the whole exchange, body stream included.
        let bytes = match tokio::time::timeout(timeout, self.download(parsed, timeout)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::new(
                    FailureKind::Timeout,
                    format!("no complete response within {timeout:?}"),
                ))
            }
        };
        sheets_debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

/// Applies the timeout bound around any [`Fetcher`], so implementations that
/// ignore `timeout` still cannot block a request indefinitely.
pub(crate) async fn fetch_bounded(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    if timeout.is_zero() {
        return Err(FetchError::new(
            FailureKind::InvalidRequest,
            "timeout must be positive",
        ));
    }
    match tokio::time::timeout(timeout, fetcher.fetch(url, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::new(
            FailureKind::Timeout,
            format!("upstream did not answer within {timeout:?}"),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
