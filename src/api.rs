//! OpenWeatherMap API client

use serde::Deserialize;

use crate::state::WeatherReport;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Where to reach the weather service and how to authenticate.
/// Both come from the CLI / environment, never from the source.
#[derive(Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
}

/// API response for `/data/2.5/weather`
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<ConditionSummary>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f32,
    feels_like: Option<f32>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ConditionSummary {
    description: String,
}

/// Lookup error type
#[derive(Debug)]
pub enum LookupError {
    /// Any non-2xx status. The service reports unknown cities this way,
    /// so the whole class is surfaced with one fixed message.
    NotFound,
    /// Transport failure or malformed response body
    Request(reqwest::Error),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::NotFound => write!(f, "City not found"),
            LookupError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LookupError {}

/// Build the request URL for a city query. Units are fixed to metric.
pub fn request_url(settings: &ApiSettings, city: &str) -> String {
    format!(
        "{}/data/2.5/weather?q={}&units=metric&appid={}",
        settings.base_url.trim_end_matches('/'),
        urlencoding::encode(city),
        settings.api_key
    )
}

/// Fetch current weather for a city from the OpenWeatherMap API
pub async fn fetch_current_weather(
    settings: &ApiSettings,
    city: &str,
) -> Result<WeatherReport, LookupError> {
    let response = reqwest::get(request_url(settings, city))
        .await
        .map_err(LookupError::Request)?;

    if !response.status().is_success() {
        return Err(LookupError::NotFound);
    }

    let data: WeatherResponse = response.json().await.map_err(LookupError::Request)?;

    Ok(WeatherReport {
        city: data.name,
        temperature: data.main.temp,
        feels_like: data.main.feels_like,
        humidity: data.main.humidity,
        description: data.weather.into_iter().next().map(|c| c.description),
    })
}
