use std::fmt::{self, Write};

use nimbi_core::{WeeklyForecast, WeeklyNarrative};

/// Plain-text outlook: summary, one block per day, then the model table.
pub fn render_outlook(narrative: &WeeklyNarrative, forecast: &WeeklyForecast) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    write_outlook(&mut out, narrative, forecast).unwrap_or_default();
    out
}

fn write_outlook(
    out: &mut String,
    narrative: &WeeklyNarrative,
    forecast: &WeeklyForecast,
) -> fmt::Result {
    writeln!(out, "{}", narrative.location)?;
    if let Some(coords) = narrative.meta.coordinates {
        writeln!(out, "{:.2}, {:.2}", coords.latitude, coords.longitude)?;
    }
    if let (Some(sunrise), Some(sunset)) = (&narrative.meta.sunrise, &narrative.meta.sunset) {
        writeln!(out, "Sunrise {}  Sunset {}", clock(sunrise), clock(sunset))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", narrative.summary)?;
    writeln!(out, "{} ({})", narrative.confidence_text, narrative.meta.primary_model)?;

    for (day, comparison) in narrative.days.iter().zip(&forecast.days) {
        writeln!(out)?;
        writeln!(
            out,
            "{} {}  {}  {}°/{}°",
            day.icon, day.day_name, day.date, day.temp_high, day.temp_low
        )?;
        writeln!(out, "  {}", day.headline)?;
        writeln!(out, "  {}", day.details)?;
        if let Some(note) = &day.model_note {
            writeln!(out, "  Note: {note}")?;
        }

        let models = comparison
            .models
            .iter()
            .map(|(id, d)| {
                format!(
                    "{} {}°/{}mm {}",
                    id.display_name(),
                    d.temp_high,
                    d.precip_total,
                    d.condition.as_str()
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "  {models}  [agreement {}%]", comparison.agreement.overall)?;
    }

    Ok(())
}

/// "2025-06-02T06:03" -> "06:03".
fn clock(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(_, time)| time)
}
