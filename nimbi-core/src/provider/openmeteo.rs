use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, DailySeries, ForecastRequest, HourlySeries, ModelForecast};

use super::{ForecastProvider, ModelId};

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,cloud_cover,wind_speed_10m,\
pressure_msl,apparent_temperature,uv_index,precipitation_probability,weather_code";

const DAILY_VARIABLES: &str = "sunrise,sunset";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    latitude: f64,
    longitude: f64,
    hourly: HourlySeries,
    daily: Option<DailySeries>,
}

/// Parse an Open-Meteo forecast body for a single model.
pub fn parse_forecast(model: ModelId, body: &str) -> Result<ModelForecast> {
    let parsed: OmResponse = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse Open-Meteo JSON for model {model}"))?;

    Ok(ModelForecast {
        model,
        coordinates: Coordinates {
            latitude: parsed.latitude,
            longitude: parsed.longitude,
        },
        hourly: parsed.hourly,
        daily: parsed.daily,
    })
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch_model(&self, request: &ForecastRequest, model: ModelId) -> Result<ModelForecast> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", request.latitude.to_string()),
                ("longitude", request.longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("models", model.api_name().to_string()),
                ("forecast_days", request.forecast_days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo (model {model})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo response body (model {model})"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request for model {} failed with status {}: {}",
                model,
                status,
                truncate_body(&body),
            ));
        }

        parse_forecast(model, &body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
