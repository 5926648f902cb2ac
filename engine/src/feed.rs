//! Auxiliary panel data (statistics, activity graphs).
//!
//! Panels are fail-silent: any failure yields `None`, the panel renders
//! nothing, and nothing is retried.

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

use crate::remote::{RemoteError, http_client, join_segments, parse_base_url};

#[derive(Debug, Clone)]
pub struct PanelFeed {
    http: reqwest::Client,
    base_url: Url,
}

impl PanelFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// GET `{base_url}/{panel}` as JSON.
    pub async fn fetch(&self, panel: &str) -> Option<Value> {
        match self.try_fetch(panel).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(panel, "Panel fetch failed, hiding panel: {e}");
                None
            }
        }
    }

    async fn try_fetch(&self, panel: &str) -> Result<Value, RemoteError> {
        let url = join_segments(&self.base_url, &[panel]);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}
