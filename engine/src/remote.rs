//! Remote endorsement calls.
//!
//! The engine only cares whether a call succeeded; response bodies are ignored.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use awaken_types::SubjectId;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("remote returned status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(e.to_string()),
        }
    }
}

/// The remote side of an optimistic endorsement.
pub trait EndorsementClient: Send + Sync + 'static {
    fn endorse(
        &self,
        subject: &SubjectId,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .timeout(timeout)
        .build()
        .map_err(|e| RemoteError::Setup(e.to_string()))
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, RemoteError> {
    let url = Url::parse(raw).map_err(|e| RemoteError::Setup(format!("invalid URL {raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(RemoteError::Setup(format!("{raw} cannot be a base URL")));
    }
    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// `POST {base_url}/endorsements/{subject}`; any 2xx counts as success.
#[derive(Debug, Clone)]
pub struct HttpEndorsementClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpEndorsementClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, subject: &SubjectId) -> Url {
        join_segments(&self.base_url, &["endorsements", subject.as_str()])
    }
}

impl EndorsementClient for HttpEndorsementClient {
    async fn endorse(&self, subject: &SubjectId) -> Result<(), RemoteError> {
        let url = self.endpoint(subject);
        let response = self.http.post(url).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(%subject, status = status.as_u16(), "endorsement accepted");
            Ok(())
        } else {
            Err(RemoteError::Status(status.as_u16()))
        }
    }
}

/// Client for offline sessions: every endorsement succeeds locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEndorsementClient;

impl EndorsementClient for LocalEndorsementClient {
    async fn endorse(&self, subject: &SubjectId) -> Result<(), RemoteError> {
        tracing::debug!(%subject, "endorsement kept local");
        Ok(())
    }
}
