use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::ModelId;

/// What to fetch: a point and how many days of hourly data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub forecast_days: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parallel hourly arrays for one model at one location.
///
/// Index `i` in every array refers to `time[i]`. Numeric arrays may contain
/// `None` for hours the model did not provide, and optional variables may be
/// absent altogether.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub pressure_msl: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub uv_index: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub weather_code: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

/// One model's parsed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelForecast {
    pub model: ModelId,
    pub coordinates: Coordinates,
    pub hourly: HourlySeries,
    pub daily: Option<DailySeries>,
}

impl ModelForecast {
    /// Calendar date of the first hourly sample, in the location's local time.
    pub fn first_date(&self) -> Option<NaiveDate> {
        let first = self.hourly.time.first()?;
        NaiveDate::parse_from_str(first.get(..10)?, "%Y-%m-%d").ok()
    }

    /// Sunrise and sunset of the first forecast day, when both are known.
    pub fn first_sun_times(&self) -> Option<SunTimes> {
        let daily = self.daily.as_ref()?;
        let sunrise = daily.sunrise.first()?.clone()?;
        let sunset = daily.sunset.first()?.clone()?;
        Some(SunTimes { sunrise, sunset })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::PartlyCloudy => "partly_cloudy",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Stormy => "stormy",
            Condition::Snowy => "snowy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁️",
            Condition::Rainy => "🌧️",
            Condition::Stormy => "⛈️",
            Condition::Snowy => "❄️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTrend {
    Rising,
    Falling,
    Stable,
}

/// Summary of one 24-hour slice of one model's hourly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub temp_high: f64,
    pub temp_low: f64,
    pub precip_total: f64,
    pub precip_hours: u32,
    pub precip_probability: f64,
    pub condition: Condition,
    pub wind_max: f64,
    pub wind_avg: f64,
    pub pressure_trend: PressureTrend,
    pub feels_like_high: f64,
    pub feels_like_low: f64,
    pub uv_max: f64,
    pub avg_cloud_cover: f64,
    pub hourly_temps: Vec<f64>,
    pub hourly_precip: Vec<f64>,
}

/// How closely the other models match the primary model on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementScore {
    pub temperature: u8,
    pub precipitation: u8,
    pub condition: u8,
    pub overall: u8,
    pub agreeing_models: Vec<ModelId>,
    pub differing_models: Vec<ModelId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayComparison {
    pub date: NaiveDate,
    pub primary: DayForecast,
    /// Every model with data for this day, the primary included.
    pub models: BTreeMap<ModelId, DayForecast>,
    pub agreement: AgreementScore,
    pub temperature_spread: f64,
    pub precip_spread: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Warming,
    Cooling,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyForecast {
    pub location: String,
    pub days: Vec<DayComparison>,
    pub overall_trend: Trend,
    pub confidence: Confidence,
    pub last_updated: DateTime<Utc>,
    pub primary_model: ModelId,
}
