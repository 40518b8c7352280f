use crate::{
    Config, ForecastRequest, ModelForecast, error::ParseError,
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, convert::TryFrom, fmt::Debug};
use tracing::{debug, warn};

pub mod openmeteo;

/// Numerical weather models the outlook compares.
///
/// Declaration order is the ordering used by every per-model map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Ecmwf,
    Gfs,
    Icon,
    Arpege,
    Gem,
    Ukmo,
}

impl ModelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Ecmwf => "ecmwf",
            ModelId::Gfs => "gfs",
            ModelId::Icon => "icon",
            ModelId::Arpege => "arpege",
            ModelId::Gem => "gem",
            ModelId::Ukmo => "ukmo",
        }
    }

    /// Value of the Open-Meteo `models` query parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            ModelId::Ecmwf => "ecmwf_ifs025",
            ModelId::Gfs => "gfs_seamless",
            ModelId::Icon => "icon_seamless",
            ModelId::Arpege => "meteofrance_arpege_world",
            ModelId::Gem => "gem_global",
            ModelId::Ukmo => "ukmo_seamless",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelId::Ecmwf => "ECMWF",
            ModelId::Gfs => "GFS",
            ModelId::Icon => "ICON",
            ModelId::Arpege => "ARPEGE",
            ModelId::Gem => "GEM",
            ModelId::Ukmo => "UKMO",
        }
    }

    pub const fn all() -> &'static [ModelId] {
        &[
            ModelId::Ecmwf,
            ModelId::Gfs,
            ModelId::Icon,
            ModelId::Arpege,
            ModelId::Gem,
            ModelId::Ukmo,
        ]
    }

    /// The high-resolution ECMWF model every other model is measured against.
    pub const fn primary() -> ModelId {
        ModelId::Ecmwf
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ModelId {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        ModelId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == lower || id.api_name() == lower)
            .ok_or_else(|| ParseError::UnknownModel(value.to_string()))
    }
}

impl std::str::FromStr for ModelId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelId::try_from(s)
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_model(
        &self,
        request: &ForecastRequest,
        model: ModelId,
    ) -> anyhow::Result<ModelForecast>;
}

/// Construct the forecast provider described by the config.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    match config.api_base_url.as_deref() {
        Some(base_url) => Box::new(OpenMeteoProvider::with_base_url(base_url.to_owned())),
        None => Box::new(OpenMeteoProvider::new()),
    }
}

/// Request every model at once and keep whichever ones succeed.
///
/// A failed model is logged and left out of the result; it never fails the
/// whole batch.
pub async fn fetch_all_models(
    provider: &dyn ForecastProvider,
    request: &ForecastRequest,
    models: &[ModelId],
) -> BTreeMap<ModelId, ModelForecast> {
    let fetches = models.iter().map(|&model| async move {
        (model, provider.fetch_model(request, model).await)
    });

    let mut forecasts = BTreeMap::new();
    for (model, result) in join_all(fetches).await {
        match result {
            Ok(forecast) => {
                debug!(model = %model, hours = forecast.hourly.time.len(), "model fetched");
                forecasts.insert(model, forecast);
            }
            Err(err) => warn!(model = %model, error = %err, "model fetch failed; skipping"),
        }
    }

    forecasts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinates, HourlySeries};

    #[test]
    fn model_id_as_str_roundtrip() {
        for id in ModelId::all() {
            let parsed = ModelId::try_from(id.as_str()).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);

            let parsed = ModelId::try_from(id.api_name()).expect("api name should parse");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn model_id_parse_is_case_insensitive() {
        assert_eq!(ModelId::try_from("ECMWF").unwrap(), ModelId::Ecmwf);
        assert_eq!(" Gfs ".parse::<ModelId>().unwrap(), ModelId::Gfs);
    }

    #[test]
    fn unknown_model_error() {
        let err = ModelId::try_from("doesnotexist").unwrap_err();
        assert_eq!(err, ParseError::UnknownModel("doesnotexist".into()));
        assert!(err.to_string().contains("Unknown model"));
    }

    #[test]
    fn primary_model_is_first_in_ordering() {
        assert_eq!(ModelId::primary(), ModelId::all()[0]);
        assert!(ModelId::Ecmwf < ModelId::Ukmo);
    }

    #[test]
    fn provider_from_config_uses_custom_base_url() {
        let mut cfg = Config::default();
        cfg.api_base_url = Some("http://localhost:8080/v1/forecast".into());

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("localhost:8080"));
    }

    #[derive(Debug)]
    struct FlakyProvider {
        failing: ModelId,
    }

    #[async_trait]
    impl ForecastProvider for FlakyProvider {
        async fn fetch_model(
            &self,
            request: &ForecastRequest,
            model: ModelId,
        ) -> anyhow::Result<ModelForecast> {
            if model == self.failing {
                anyhow::bail!("upstream returned 503");
            }

            Ok(ModelForecast {
                model,
                coordinates: Coordinates {
                    latitude: request.latitude,
                    longitude: request.longitude,
                },
                hourly: HourlySeries::default(),
                daily: None,
            })
        }
    }

    #[tokio::test]
    async fn fetch_all_models_skips_failed_models() {
        let provider = FlakyProvider { failing: ModelId::Gfs };
        let request = ForecastRequest { latitude: 37.98, longitude: 23.73, forecast_days: 7 };

        let forecasts = fetch_all_models(&provider, &request, ModelId::all()).await;

        assert_eq!(forecasts.len(), ModelId::all().len() - 1);
        assert!(!forecasts.contains_key(&ModelId::Gfs));
        assert!(forecasts.contains_key(&ModelId::Ecmwf));
        assert_eq!(forecasts[&ModelId::Icon].coordinates.latitude, 37.98);
    }

    #[tokio::test]
    async fn fetch_all_models_with_no_models_is_empty() {
        let provider = FlakyProvider { failing: ModelId::Gfs };
        let request = ForecastRequest { latitude: 0.0, longitude: 0.0, forecast_days: 7 };

        let forecasts = fetch_all_models(&provider, &request, &[]).await;
        assert!(forecasts.is_empty());
    }
}
