//! Core library for the `nimbi` weekly outlook.
//!
//! This crate defines:
//! - Fetching hourly forecasts from several numerical weather models
//! - Daily summaries, model agreement scoring and weekly trend analysis
//! - Localized narrative text for the week
//! - Configuration handling
//!
//! It is used by `nimbi-cli`, but can also be reused by other binaries or services.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod narrative;
pub mod provider;

pub use analyzer::{analyze_weekly, compute_agreement, extract_day};
pub use config::{Config, LocationConfig};
pub use error::ParseError;
pub use i18n::Language;
pub use model::{
    AgreementScore, Condition, Confidence, Coordinates, DailySeries, DayComparison, DayForecast,
    ForecastRequest, HourlySeries, ModelForecast, PressureTrend, SunTimes, Trend, WeeklyForecast,
};
pub use narrative::{NarrativeContext, NarrativeDay, WeeklyNarrative, generate_narrative};
pub use provider::{ForecastProvider, ModelId, fetch_all_models};
