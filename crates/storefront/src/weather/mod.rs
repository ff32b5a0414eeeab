//! Weather API client.
//!
//! Proxies `current.json` from api.weatherapi.com for the configured
//! coordinates. Snapshots are cached for 5 minutes (`moka`), the upstream
//! call carries a request timeout, and a missing access key disables the
//! widget rather than the whole server.

mod types;

pub use types::WeatherSnapshot;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use types::ApiResponse;

/// Upstream request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a fetched snapshot stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors from the weather client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key configured; the widget is disabled.
    #[error("weather API key is not configured")]
    Unconfigured,

    /// HTTP request failed (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Upstream(u16),

    /// Upstream payload did not parse.
    #[error("unexpected upstream payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the weather API.
///
/// Cheaply cloneable; snapshots are cached per coordinate pair.
#[derive(Clone)]
pub struct WeatherClient {
    inner: Arc<WeatherClientInner>,
}

struct WeatherClientInner {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<SecretString>,
    latitude: f64,
    longitude: f64,
    cache: Cache<String, WeatherSnapshot>,
}

impl WeatherClient {
    /// Create a new weather client.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(WeatherClientInner {
                client,
                api_url: config.api_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.clone(),
                latitude: config.latitude,
                longitude: config.longitude,
                cache,
            }),
        })
    }

    /// Current weather for the configured coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Unconfigured`] without an API key, and
    /// [`WeatherError::Http`] / [`WeatherError::Upstream`] /
    /// [`WeatherError::Parse`] when the upstream call fails.
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(WeatherError::Unconfigured)?;

        let coordinates = format!("{},{}", self.inner.latitude, self.inner.longitude);

        // Check cache
        if let Some(snapshot) = self.inner.cache.get(&coordinates).await {
            debug!("Cache hit for weather snapshot");
            return Ok(snapshot);
        }

        let url = format!("{}/current.json", self.inner.api_url);
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[
                ("key", api_key.expose_secret()),
                ("q", coordinates.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(200).collect::<String>(),
                "Weather API returned non-success status"
            );
            return Err(WeatherError::Upstream(status.as_u16()));
        }

        let payload: ApiResponse = match serde_json::from_str(&response_text) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(200).collect::<String>(),
                    "Failed to parse weather API response"
                );
                return Err(WeatherError::Parse(e));
            }
        };

        let snapshot = WeatherSnapshot::from(payload);

        // Cache the result
        self.inner
            .cache
            .insert(coordinates, snapshot.clone())
            .await;

        Ok(snapshot)
    }
}
