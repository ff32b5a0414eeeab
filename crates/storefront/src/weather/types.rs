//! Weather API payload types and unit conversions.

use serde::{Deserialize, Serialize};

/// Upstream `current.json` response (the fields we read).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub location: ApiLocation,
    pub current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLocation {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrent {
    pub last_updated: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub pressure_mb: f64,
    pub humidity: u32,
    pub wind_kph: f64,
    pub gust_kph: f64,
    pub wind_dir: String,
}

/// The weather snapshot served to clients.
///
/// Pressure arrives in millibars and is served in mmHg; wind speeds arrive
/// in km/h and are served in m/s. Both rounded to one decimal.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Upstream observation timestamp, verbatim.
    pub time: String,
    pub temp: f64,
    pub feels_like_temp: f64,
    pub pressure: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub wind_gust: f64,
    /// Wind direction as prose (e.g. "north-northeast").
    pub wind_dir: String,
}

impl From<ApiResponse> for WeatherSnapshot {
    fn from(response: ApiResponse) -> Self {
        let current = response.current;
        Self {
            city: response.location.name,
            time: current.last_updated,
            temp: current.temp_c,
            feels_like_temp: current.feelslike_c,
            pressure: mb_to_mmhg(current.pressure_mb),
            humidity: current.humidity,
            wind_speed: kph_to_ms(current.wind_kph),
            wind_gust: kph_to_ms(current.gust_kph),
            wind_dir: direction_text(&current.wind_dir),
        }
    }
}

/// Convert km/h to m/s, one decimal.
pub(crate) fn kph_to_ms(kph: f64) -> f64 {
    round1(kph / 3.6)
}

/// Convert millibars to mmHg, one decimal.
pub(crate) fn mb_to_mmhg(mb: f64) -> f64 {
    round1(mb * 0.75)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Expand a compass point into prose.
///
/// Unknown points pass through lowercased.
pub(crate) fn direction_text(compass: &str) -> String {
    let lower = compass.to_ascii_lowercase();
    match lower.as_str() {
        "n" => "north",
        "nne" => "north-northeast",
        "ne" => "northeast",
        "ene" => "east-northeast",
        "e" => "east",
        "ese" => "east-southeast",
        "se" => "southeast",
        "sse" => "south-southeast",
        "s" => "south",
        "ssw" => "south-southwest",
        "sw" => "southwest",
        "wsw" => "west-southwest",
        "w" => "west",
        "wnw" => "west-northwest",
        "nw" => "northwest",
        "nnw" => "north-northwest",
        "c" => "calm",
        _ => return lower,
    }
    .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kph_to_ms() {
        assert!((kph_to_ms(3.6) - 1.0).abs() < f64::EPSILON);
        assert!((kph_to_ms(15.1) - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mb_to_mmhg() {
        assert!((mb_to_mmhg(1000.0) - 750.0).abs() < f64::EPSILON);
        assert!((mb_to_mmhg(1013.2) - 759.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_direction_text() {
        assert_eq!(direction_text("NNW"), "north-northwest");
        assert_eq!(direction_text("e"), "east");
        assert_eq!(direction_text("C"), "calm");
        // Unknown points pass through lowercased
        assert_eq!(direction_text("VAR"), "var");
    }

    #[test]
    fn test_snapshot_from_api_response() {
        let payload = r#"{
            "location": {"name": "New York"},
            "current": {
                "last_updated": "2026-02-01 14:30",
                "temp_c": -2.5,
                "feelslike_c": -6.0,
                "pressure_mb": 1000.0,
                "humidity": 81,
                "wind_kph": 18.0,
                "gust_kph": 36.0,
                "wind_dir": "NE"
            }
        }"#;
        let response: ApiResponse = serde_json::from_str(payload).unwrap();
        let snapshot = WeatherSnapshot::from(response);

        assert_eq!(snapshot.city, "New York");
        assert_eq!(snapshot.time, "2026-02-01 14:30");
        assert!((snapshot.temp - -2.5).abs() < f64::EPSILON);
        assert!((snapshot.pressure - 750.0).abs() < f64::EPSILON);
        assert!((snapshot.wind_speed - 5.0).abs() < f64::EPSILON);
        assert!((snapshot.wind_gust - 10.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.wind_dir, "northeast");
        assert_eq!(snapshot.humidity, 81);
    }

    #[test]
    fn test_snapshot_serializes_expected_fields() {
        let snapshot = WeatherSnapshot {
            city: "New York".to_owned(),
            time: "2026-02-01 14:30".to_owned(),
            temp: 1.0,
            feels_like_temp: -1.0,
            pressure: 750.0,
            humidity: 80,
            wind_speed: 5.0,
            wind_gust: 10.0,
            wind_dir: "north".to_owned(),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["city"], "New York");
        assert_eq!(value["wind_dir"], "north");
        assert_eq!(value["humidity"], 80);
    }
}
