//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GREENGROCER_HOST` - Bind address (default: 127.0.0.1)
//! - `GREENGROCER_PORT` - Listen port (default: 3000)
//! - `GREENGROCER_BASE_URL` - Public URL; an `https://` value marks session
//!   cookies secure (default: <http://localhost:3000>)
//! - `GREENGROCER_DATA_DIR` - Directory holding `cart.json` / `wishlist.json`
//!   (default: ./data)
//! - `WEATHER_API_KEY` - api.weatherapi.com access key; the weather widget
//!   answers 503 until this is set
//! - `WEATHER_API_URL` - Upstream base URL (default: <https://api.weatherapi.com/v1>)
//! - `WEATHER_LAT` / `WEATHER_LON` - Coordinates for the weather snapshot
//!   (default: 40.71 / -74.01)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding the flat-file stores
    pub data_dir: PathBuf,
    /// Weather widget configuration
    pub weather: WeatherConfig,
}

/// Weather API configuration.
///
/// Implements `Debug` manually to redact the access key.
#[derive(Clone)]
pub struct WeatherConfig {
    /// Upstream base URL (no trailing slash)
    pub api_url: String,
    /// Access key for api.weatherapi.com; `None` disables the widget
    pub api_key: Option<SecretString>,
    /// Latitude of the forecast location
    pub latitude: f64,
    /// Longitude of the forecast location
    pub longitude: f64,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_url", &self.api_url)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GREENGROCER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GREENGROCER_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("GREENGROCER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GREENGROCER_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("GREENGROCER_BASE_URL", "http://localhost:3000");
        let data_dir = PathBuf::from(get_env_or_default("GREENGROCER_DATA_DIR", "data"));
        let weather = WeatherConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            weather,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl WeatherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: get_env_or_default("WEATHER_API_URL", "https://api.weatherapi.com/v1"),
            api_key: get_optional_env("WEATHER_API_KEY").map(SecretString::from),
            latitude: parse_coordinate("WEATHER_LAT", "40.71")?,
            longitude: parse_coordinate("WEATHER_LON", "-74.01")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a latitude/longitude environment variable.
fn parse_coordinate(key: &str, default: &str) -> Result<f64, ConfigError> {
    get_env_or_default(key, default)
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
