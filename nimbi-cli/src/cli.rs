use anyhow::Context;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use nimbi_core::{
    Config, Language, ModelId, NarrativeContext, analyze_weekly, fetch_all_models,
    generate_narrative, provider::provider_from_config,
};
use tracing::info;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nimbi", version, about = "Multi-model weekly weather outlook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default location, language and primary model.
    Configure,

    /// Show the weekly outlook for the configured or given location.
    Outlook {
        /// Latitude; overrides the configured location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude; overrides the configured location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Display name for the location.
        #[arg(long)]
        name: Option<String>,

        /// Narrative language, "en" or "el".
        #[arg(long)]
        lang: Option<Language>,

        /// Model the others are compared against, e.g. "ecmwf".
        #[arg(long)]
        primary: Option<ModelId>,

        /// Print the outlook as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List supported weather models.
    Models,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Outlook { lat, lon, name, lang, primary, json } => {
                let mut config = Config::load()?;
                if let Some(primary) = primary {
                    config.primary_model = primary;
                }
                outlook(&config, lat.zip(lon), name, lang, json).await?;
            }
            Command::Models => {
                for model in ModelId::all() {
                    println!("{:<8} {:<8} {}", model.as_str(), model.display_name(), model.api_name());
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let name = Text::new("Location name:").prompt().context("Location prompt aborted")?;
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a number, e.g. 37.98")
        .prompt()
        .context("Latitude prompt aborted")?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a number, e.g. 23.73")
        .prompt()
        .context("Longitude prompt aborted")?;
    let language = Select::new("Language:", Language::all().to_vec())
        .prompt()
        .context("Language prompt aborted")?;
    let primary = Select::new("Primary model:", ModelId::all().to_vec())
        .prompt()
        .context("Model prompt aborted")?;

    config.set_location(name, latitude, longitude);
    config.language = language;
    config.primary_model = primary;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn outlook(
    config: &Config,
    point: Option<(f64, f64)>,
    name: Option<String>,
    lang: Option<Language>,
    json: bool,
) -> anyhow::Result<()> {
    let (location, latitude, longitude) = match point {
        Some((lat, lon)) => (name.unwrap_or_else(|| format!("{lat:.2}, {lon:.2}")), lat, lon),
        None => {
            let loc = config.default_location()?;
            (name.unwrap_or_else(|| loc.name.clone()), loc.latitude, loc.longitude)
        }
    };
    let language = lang.unwrap_or(config.language);

    let provider = provider_from_config(config);
    let request = config.forecast_request(latitude, longitude);
    let models = config.enabled_models();

    info!(%location, models = models.len(), "fetching forecasts");
    let forecasts = fetch_all_models(provider.as_ref(), &request, &models).await;

    let weekly = analyze_weekly(&forecasts, &location, config.primary_model, Utc::now());

    // The series starts at local midnight of the location, which is "today" there.
    let primary = forecasts.get(&config.primary_model);
    let today = primary
        .and_then(|p| p.first_date())
        .unwrap_or_else(|| Local::now().date_naive());
    let mut context = NarrativeContext::new(today);
    if let Some(primary) = primary {
        context = context
            .with_sun_times(primary.first_sun_times())
            .with_coordinates(primary.coordinates);
    }
    let narrative = generate_narrative(&weekly, language, &context);

    if json {
        let out = serde_json::json!({ "forecast": weekly, "narrative": narrative });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::render_outlook(&narrative, &weekly));
    }

    Ok(())
}
