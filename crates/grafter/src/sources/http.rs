//! Graph documents fetched over HTTP.

use super::GraphSource;
use crate::domain::Graph;
use crate::error::{Error, Result};
use crate::serialization::load_graph_from_value;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("grafter/", env!("CARGO_PKG_VERSION"));

/// Fetches a JSON graph document from a URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    /// Create a source for `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.fetch_error(format!("failed to build HTTP client: {e}")))
    }

    fn fetch_error(&self, message: String) -> Error {
        Error::Fetch {
            url: self.url.clone(),
            message,
        }
    }
}

#[async_trait]
impl GraphSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Graph> {
        let client = self.client()?;

        tracing::debug!(url = %self.url, "Fetching graph document");
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.fetch_error(format!("HTTP {status}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.fetch_error(format!("invalid JSON body: {e}")))?;

        load_graph_from_value(value)
    }
}
