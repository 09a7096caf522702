//! seats.aero partner API client.
//!
//! Queries cached award availability. One request covers every
//! origin/destination pair of a route; batching is the API's job.

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::domain::{AvailabilityRecord, join_codes};
use crate::matcher::{AvailabilitySource, SearchQuery};

use super::convert::convert_response;
use super::error::SeatsError;
use super::types::SearchResponse;

/// Default base URL for the partner API.
const DEFAULT_BASE_URL: &str = "https://seats.aero";

/// Rows requested per search (the API's page size cap).
const PAGE_SIZE: u32 = 500;

/// Configuration for the seats client.
#[derive(Debug, Clone)]
pub struct SeatsConfig {
    /// Partner API key
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SeatsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// seats.aero API client.
#[derive(Debug, Clone)]
pub struct SeatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SeatsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SeatsConfig) -> Result<Self, SeatsError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| SeatsError::ApiError {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("partner-authorization"), api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Search cached availability for a route.
    pub async fn search_raw(&self, query: &SearchQuery) -> Result<SearchResponse, SeatsError> {
        let url = format!("{}/partnerapi/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SeatsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SeatsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SeatsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SeatsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl AvailabilitySource for SeatsClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<AvailabilityRecord>, SeatsError> {
        let response = self.search_raw(query).await?;
        if response.has_more == Some(true) {
            debug!(count = ?response.count, "search results truncated at page size");
        }
        Ok(convert_response(&response, query.cabin))
    }
}

/// Query string for a search request.
fn query_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    vec![
        ("origin_airport", join_codes(&query.origins)),
        ("destination_airport", join_codes(&query.destinations)),
        ("start_date", query.start_date.format("%Y-%m-%d").to_string()),
        ("end_date", query.end_date.format("%Y-%m-%d").to_string()),
        ("take", PAGE_SIZE.to_string()),
        ("include_trips", "false".to_string()),
        ("only_direct_flights", query.direct_only.to_string()),
        ("include_filtered", "false".to_string()),
        ("cabins", query.cabin.as_query().to_string()),
    ]
}
