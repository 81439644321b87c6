use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::filter::BarFilter;
use crate::models::reconciliation::BarGamesResponse;
use crate::models::settings::ClientSettings;
use super::traits::DetailQueryProvider;

/// Detail-query provider backed by the dashboard's HTTP API.
///
/// - **Endpoint**: `GET {base_url}/teams/{team_id}/bar-games`
/// - **Query**: `metric`, `dimension`, `context`, `pace_type`, `season`,
///   and `bucket` or `tier` depending on the dimension.
/// - **Response**: `{success, games, count, bar_value, avg_pace?, error?}`
///
/// Non-2xx statuses still carry the JSON envelope, so the body is parsed
/// regardless of status and the `success` flag decides.
pub struct HttpDetailProvider {
    client: Client,
    base_url: String,
}

impl HttpDetailProvider {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let builder = Client::builder().user_agent(settings.user_agent.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: settings.normalized_base_url().to_string(),
        })
    }

    /// Endpoint for a filter, without the query string.
    pub fn endpoint(&self, filter: &BarFilter) -> String {
        format!("{}/teams/{}/bar-games", self.base_url, filter.team_id)
    }

    /// Full request URL including the encoded query string.
    pub fn request_url(&self, filter: &BarFilter) -> Result<String, CoreError> {
        let url = reqwest::Url::parse_with_params(&self.endpoint(filter), filter.query_params())
            .map_err(|e| CoreError::Configuration(format!("Invalid request URL: {e}")))?;
        Ok(url.to_string())
    }

    /// Parse a response body into the envelope.
    pub fn parse_response(body: &str) -> Result<BarGamesResponse, CoreError> {
        serde_json::from_str(body).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse bar games response: {e}"))
        })
    }

    /// Judge a response by its status and body together.
    ///
    /// A non-2xx status is a transport failure even when the body claims
    /// `success: true`; the envelope's `error` is kept when it has one.
    pub fn interpret_response(
        status: StatusCode,
        body: &str,
    ) -> Result<BarGamesResponse, CoreError> {
        let parsed = Self::parse_response(body);
        if status.is_success() {
            return parsed;
        }
        let fallback = format!("Server responded with status {status}");
        match parsed {
            Ok(envelope) => Err(CoreError::TransportFailure(
                envelope.error.filter(|m| !m.trim().is_empty()).unwrap_or(fallback),
            )),
            Err(_) => Err(CoreError::TransportFailure(fallback)),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DetailQueryProvider for HttpDetailProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch_bar_games(&self, filter: &BarFilter) -> Result<BarGamesResponse, CoreError> {
        let url = self.request_url(filter)?;
        debug!("fetching bar games for {filter}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        Self::interpret_response(status, &body)
    }
}
