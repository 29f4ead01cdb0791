use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::common::error::Result;

/// Client for the legislature's Senate nominations API. The endpoint returns
/// one JSON document holding both the profile and action feeds.
pub struct NominationsClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominationsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the raw nominations payload. A failed request is logged and
    /// degrades to an empty payload so the run still produces a (possibly
    /// empty) table.
    #[instrument(skip(self))]
    pub async fn fetch_nominations(&self) -> Value {
        match self.try_fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                error!("API request failed: {e}");
                Value::Array(Vec::new())
            }
        }
    }

    async fn try_fetch(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;
        let payload = response.json::<Value>().await?;
        info!("Fetched nominations payload from {}", self.base_url);
        Ok(payload)
    }
}
