//! Localized text for a [`WeeklyForecast`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::i18n::{
    Language, Phrase, condition_description, condition_name, confidence_text, format_template,
    phrase, trend_sentence, weekday_name,
};
use crate::model::{Coordinates, DayComparison, SunTimes, WeeklyForecast};

/// Inputs the narrative needs besides the forecast itself.
///
/// `today` decides which days read as "Today" and "Tomorrow"; the generator
/// never consults the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeContext {
    pub today: NaiveDate,
    pub sun: Option<SunTimes>,
    pub coordinates: Option<Coordinates>,
}

impl NarrativeContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            sun: None,
            coordinates: None,
        }
    }

    pub fn with_sun_times(mut self, sun: Option<SunTimes>) -> Self {
        self.sun = sun;
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeDay {
    pub day_name: String,
    pub date: NaiveDate,
    pub headline: String,
    pub details: String,
    pub icon: String,
    pub temp_high: f64,
    pub temp_low: f64,
    pub model_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeMeta {
    pub primary_model: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyNarrative {
    pub location: String,
    pub language: Language,
    pub summary: String,
    pub days: Vec<NarrativeDay>,
    pub confidence_text: String,
    pub meta: NarrativeMeta,
}

pub fn generate_narrative(
    forecast: &WeeklyForecast,
    language: Language,
    context: &NarrativeContext,
) -> WeeklyNarrative {
    let days: Vec<NarrativeDay> = forecast
        .days
        .iter()
        .map(|comparison| narrate_day(language, comparison, context.today))
        .collect();

    let summary = week_summary(language, forecast, &days);

    WeeklyNarrative {
        location: forecast.location.clone(),
        language,
        summary,
        days,
        confidence_text: confidence_text(language, forecast.confidence).to_string(),
        meta: NarrativeMeta {
            primary_model: forecast.primary_model.display_name().to_string(),
            sunrise: context.sun.as_ref().map(|s| s.sunrise.clone()),
            sunset: context.sun.as_ref().map(|s| s.sunset.clone()),
            coordinates: context.coordinates,
        },
    }
}

fn narrate_day(lang: Language, comparison: &DayComparison, today: NaiveDate) -> NarrativeDay {
    let day = &comparison.primary;
    let high = day.temp_high.to_string();

    NarrativeDay {
        day_name: day_name(lang, day.date, today),
        date: day.date,
        headline: format_template(
            phrase(lang, Phrase::Headline),
            &[("condition", condition_name(lang, day.condition)), ("high", high.as_str())],
        ),
        details: day_details(lang, comparison),
        icon: day.condition.icon().to_string(),
        temp_high: day.temp_high,
        temp_low: day.temp_low,
        model_note: model_note(lang, comparison),
    }
}

/// "Today" and "Tomorrow" relative to `today`, the weekday name otherwise.
pub fn day_name(lang: Language, date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => phrase(lang, Phrase::Today).to_string(),
        1 => phrase(lang, Phrase::Tomorrow).to_string(),
        _ => weekday_name(lang, date.weekday()).to_string(),
    }
}

fn day_details(lang: Language, comparison: &DayComparison) -> String {
    let day = &comparison.primary;
    let agreement = &comparison.agreement;
    let mut clauses: Vec<String> = Vec::new();

    let amount = day.precip_total.to_string();
    let precip_phrase = if day.precip_total > 10.0 {
        Some(Phrase::HeavyRain)
    } else if day.precip_total > 2.0 {
        Some(Phrase::RainExpected)
    } else if day.precip_total > 0.5 {
        Some(Phrase::LightRain)
    } else {
        None
    };
    if let Some(key) = precip_phrase {
        clauses.push(format_template(phrase(lang, key), &[("amount", amount.as_str())]));
    }

    if agreement.overall >= 80 {
        clauses.push(phrase(lang, Phrase::AllModelsAgree).to_string());
    } else if !agreement.agreeing_models.is_empty() {
        let models = agreement
            .agreeing_models
            .iter()
            .map(|m| m.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        clauses.push(format_template(phrase(lang, Phrase::ModelsAlign), &[("models", models.as_str())]));
    }

    let first_differing = agreement.differing_models.first().filter(|_| agreement.overall < 70);
    if let Some(first) = first_differing {
        if comparison.temperature_spread > 3.0 {
            if let Some(other) = comparison.models.get(first) {
                let temp = other.temp_high.to_string();
                clauses.push(format_template(
                    phrase(lang, Phrase::TemperatureDisagreement),
                    &[("model", first.display_name()), ("temp", temp.as_str())],
                ));
            }
        } else if comparison.precip_spread > 5.0 {
            clauses.push(phrase(lang, Phrase::TimingDisagreement).to_string());
        }
    }

    if clauses.is_empty() {
        return condition_description(lang, day.condition).to_string();
    }

    clauses.join(". ")
}

fn model_note(lang: Language, comparison: &DayComparison) -> Option<String> {
    if comparison.agreement.overall >= 80 {
        return None;
    }

    let model = comparison.agreement.differing_models.first()?;
    let other = comparison.models.get(model)?;
    let primary = &comparison.primary;

    let temp_diff = (other.temp_high - primary.temp_high).abs();
    if temp_diff > 3.0 {
        let diff = temp_diff.to_string();
        return Some(format_template(
            phrase(lang, Phrase::TemperatureNote),
            &[("model", model.display_name()), ("diff", diff.as_str())],
        ));
    }

    let precip_diff = (other.precip_total - primary.precip_total).abs();
    if precip_diff > 5.0 {
        let amount = other.precip_total.to_string();
        return Some(format_template(
            phrase(lang, Phrase::PrecipitationNote),
            &[("model", model.display_name()), ("amount", amount.as_str())],
        ));
    }

    None
}

fn week_summary(lang: Language, forecast: &WeeklyForecast, days: &[NarrativeDay]) -> String {
    let Some(first) = forecast.days.first() else {
        return format!("{}.", phrase(lang, Phrase::NoData));
    };

    let opening = if first.primary.temp_high > 25.0 {
        Phrase::WarmWeek
    } else if first.primary.temp_high < 15.0 {
        Phrase::CoolWeek
    } else {
        Phrase::MildWeek
    };

    let mut clauses = vec![
        phrase(lang, opening).to_string(),
        trend_sentence(lang, forecast.overall_trend).to_string(),
    ];

    let rainy_day = forecast
        .days
        .iter()
        .zip(days)
        .find(|(comparison, _)| comparison.primary.precip_total > 5.0);
    if let Some((_, narrated)) = rainy_day {
        clauses.push(format_template(
            phrase(lang, Phrase::RainDay),
            &[("day", narrated.day_name.as_str())],
        ));
    }

    format!("{}.", clauses.join(". "))
}
