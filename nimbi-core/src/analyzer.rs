//! Weekly multi-model analysis.
//!
//! Slices each model's hourly series into days, scores how well the other
//! models agree with the primary one, and rolls the week up into a trend and a
//! confidence level. Everything here is pure: the caller supplies "now".

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::model::{
    AgreementScore, Condition, Confidence, DayComparison, DayForecast, HourlySeries,
    ModelForecast, PressureTrend, Trend, WeeklyForecast,
};
use crate::provider::ModelId;

pub const HOURS_PER_DAY: usize = 24;
pub const WEEK_DAYS: usize = 7;

/// Summarize hours `[24 * day_index, 24 * day_index + 24)` of a series.
///
/// Returns `None` when the series does not reach the requested day or has no
/// temperature samples in it.
pub fn extract_day(series: &HourlySeries, day_index: usize) -> Option<DayForecast> {
    let start = day_index * HOURS_PER_DAY;
    if series.time.len() < start + 1 {
        return None;
    }
    let end = (start + HOURS_PER_DAY).min(series.time.len());

    let temps = present(&series.temperature_2m, start, end);
    if temps.is_empty() {
        return None;
    }

    let date = parse_date(&series.time[start])?;
    let precip = present(&series.precipitation, start, end);
    let clouds = present(&series.cloud_cover, start, end);
    let winds = present(&series.wind_speed_10m, start, end);
    let pressures = present(&series.pressure_msl, start, end);
    let apparent = series
        .apparent_temperature
        .as_deref()
        .map(|values| present(values, start, end))
        .unwrap_or_default();
    let uv = series
        .uv_index
        .as_deref()
        .map(|values| present(values, start, end))
        .unwrap_or_default();
    let probability = series
        .precipitation_probability
        .as_deref()
        .map(|values| present(values, start, end))
        .unwrap_or_default();

    let temp_high = round_half_up(max(&temps));
    let temp_low = round_half_up(min(&temps));
    let total_precip: f64 = precip.iter().sum();
    let avg_cloud_cover = mean(&clouds);

    let (feels_like_high, feels_like_low) = if apparent.is_empty() {
        (temp_high, temp_low)
    } else {
        (round_half_up(max(&apparent)), round_half_up(min(&apparent)))
    };

    Some(DayForecast {
        date,
        day_of_week: date.format("%A").to_string(),
        temp_high,
        temp_low,
        precip_total: round_to_tenth(total_precip),
        precip_hours: precip.iter().filter(|&&p| p > 0.1).count() as u32,
        precip_probability: if probability.is_empty() {
            0.0
        } else {
            round_half_up(max(&probability))
        },
        condition: classify_condition(avg_cloud_cover, total_precip, mean(&temps)),
        wind_max: if winds.is_empty() { 0.0 } else { round_half_up(max(&winds)) },
        wind_avg: round_half_up(mean(&winds)),
        pressure_trend: pressure_trend(&pressures),
        feels_like_high,
        feels_like_low,
        uv_max: if uv.is_empty() { 0.0 } else { round_to_tenth(max(&uv)) },
        avg_cloud_cover: round_half_up(avg_cloud_cover),
        hourly_temps: temps,
        hourly_precip: precip,
    })
}

/// Ordered threshold cascade; precipitation outranks cloud cover.
pub fn classify_condition(avg_cloud_cover: f64, total_precip: f64, avg_temp: f64) -> Condition {
    if total_precip > 10.0 {
        if avg_temp < 2.0 { Condition::Snowy } else { Condition::Stormy }
    } else if total_precip > 2.0 {
        if avg_temp < 2.0 { Condition::Snowy } else { Condition::Rainy }
    } else if avg_cloud_cover > 70.0 {
        Condition::Cloudy
    } else if avg_cloud_cover > 30.0 {
        Condition::PartlyCloudy
    } else {
        Condition::Sunny
    }
}

/// Compare the mean of the first six samples with the mean of the last six.
pub fn pressure_trend(pressures: &[f64]) -> PressureTrend {
    if pressures.len() < 2 {
        return PressureTrend::Stable;
    }

    let window = pressures.len().min(6);
    let first = mean(&pressures[..window]);
    let last = mean(&pressures[pressures.len() - window..]);
    let diff = last - first;

    if diff > 3.0 {
        PressureTrend::Rising
    } else if diff < -3.0 {
        PressureTrend::Falling
    } else {
        PressureTrend::Stable
    }
}

/// Score the other models' day against the primary model's day.
///
/// With no other models every dimension scores 0; the divisor is clamped to 1.
pub fn compute_agreement(
    primary: &DayForecast,
    others: &BTreeMap<ModelId, DayForecast>,
) -> AgreementScore {
    let mut agreeing_models = Vec::new();
    let mut differing_models = Vec::new();
    let mut temperature_sum = 0.0;
    let mut precipitation_sum = 0.0;
    let mut condition_sum = 0.0;

    for (&model, day) in others {
        let temp_diff = (day.temp_high - primary.temp_high).abs();
        let precip_diff = (day.precip_total - primary.precip_total).abs();
        let same_condition = day.condition == primary.condition;

        let checks = [temp_diff <= 2.0, precip_diff <= 5.0, same_condition]
            .iter()
            .filter(|&&passed| passed)
            .count();
        if checks >= 2 {
            agreeing_models.push(model);
        } else {
            differing_models.push(model);
        }

        temperature_sum += temperature_bucket(temp_diff);
        precipitation_sum += precipitation_bucket(precip_diff);
        condition_sum += if same_condition { 100.0 } else { 40.0 };
    }

    let count = others.len().max(1) as f64;
    let temperature = round_half_up(temperature_sum / count);
    let precipitation = round_half_up(precipitation_sum / count);
    let condition = round_half_up(condition_sum / count);
    let overall = round_half_up((temperature + precipitation + condition) / 3.0);

    AgreementScore {
        temperature: as_score(temperature),
        precipitation: as_score(precipitation),
        condition: as_score(condition),
        overall: as_score(overall),
        agreeing_models,
        differing_models,
    }
}

fn temperature_bucket(diff: f64) -> f64 {
    if diff <= 2.0 {
        100.0
    } else if diff <= 4.0 {
        60.0
    } else {
        30.0
    }
}

fn precipitation_bucket(diff: f64) -> f64 {
    if diff <= 3.0 {
        100.0
    } else if diff <= 8.0 {
        60.0
    } else {
        30.0
    }
}

/// Warming or cooling when the last three days' mean high differs from the
/// first three days' by more than 3°C.
pub fn temperature_trend(days: &[DayComparison]) -> Trend {
    if days.len() < 3 {
        return Trend::Stable;
    }

    let highs: Vec<f64> = days.iter().map(|d| d.primary.temp_high).collect();
    let first = mean(&highs[..3]);
    let last = mean(&highs[highs.len() - 3..]);
    let diff = last - first;

    if diff > 3.0 {
        Trend::Warming
    } else if diff < -3.0 {
        Trend::Cooling
    } else {
        Trend::Stable
    }
}

pub fn confidence_level(days: &[DayComparison]) -> Confidence {
    if days.is_empty() {
        return Confidence::Low;
    }

    let scores: Vec<f64> = days.iter().map(|d| f64::from(d.agreement.overall)).collect();
    let avg = mean(&scores);

    if avg >= 75.0 {
        Confidence::High
    } else if avg >= 50.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Build the seven-day comparison for one location.
///
/// A missing primary model yields an empty, low-confidence week. Days a model
/// cannot cover are left out of that day's comparison.
pub fn analyze_weekly(
    forecasts: &BTreeMap<ModelId, ModelForecast>,
    location: &str,
    primary_model: ModelId,
    now: DateTime<Utc>,
) -> WeeklyForecast {
    let Some(primary) = forecasts.get(&primary_model) else {
        debug!(model = %primary_model, "primary model missing; returning empty week");
        return WeeklyForecast {
            location: location.to_string(),
            days: Vec::new(),
            overall_trend: Trend::Stable,
            confidence: Confidence::Low,
            last_updated: now,
            primary_model,
        };
    };

    let mut days = Vec::with_capacity(WEEK_DAYS);
    for day_index in 0..WEEK_DAYS {
        let Some(primary_day) = extract_day(&primary.hourly, day_index) else {
            debug!(day_index, "primary model has no data for day; skipping");
            continue;
        };

        let mut others = BTreeMap::new();
        for (&model, forecast) in forecasts {
            if model == primary_model {
                continue;
            }
            match extract_day(&forecast.hourly, day_index) {
                Some(day) => {
                    others.insert(model, day);
                }
                None => debug!(model = %model, day_index, "no data for day; omitted"),
            }
        }

        days.push(compare_day(primary_model, primary_day, others));
    }

    let overall_trend = temperature_trend(&days);
    let confidence = confidence_level(&days);
    info!(
        location,
        days = days.len(),
        models = forecasts.len(),
        ?overall_trend,
        ?confidence,
        "weekly analysis complete"
    );

    WeeklyForecast {
        location: location.to_string(),
        days,
        overall_trend,
        confidence,
        last_updated: now,
        primary_model,
    }
}

fn compare_day(
    primary_model: ModelId,
    primary: DayForecast,
    others: BTreeMap<ModelId, DayForecast>,
) -> DayComparison {
    let agreement = compute_agreement(&primary, &others);

    let mut models = others;
    models.insert(primary_model, primary.clone());

    let temperature_spread = spread(models.values().map(|d| d.temp_high));
    let precip_spread = round_to_tenth(spread(models.values().map(|d| d.precip_total)));

    DayComparison {
        date: primary.date,
        primary,
        models,
        agreement,
        temperature_spread,
        precip_spread,
    }
}

fn spread(values: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() { hi - lo } else { 0.0 }
}

fn present(values: &[Option<f64>], start: usize, end: usize) -> Vec<f64> {
    values
        .iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .flatten()
        .copied()
        .collect()
}

fn parse_date(time: &str) -> Option<NaiveDate> {
    let day = time.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Halves round toward positive infinity, so -2.5 becomes -2.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

fn as_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::Coordinates;
    use chrono::{Duration, TimeZone};

    /// One entry per day: (temperature, daily precipitation, cloud cover).
    pub(crate) fn flat_series(start: NaiveDate, days: &[(f64, f64, f64)]) -> HourlySeries {
        let mut series = HourlySeries::default();
        for (offset, &(temp, precip, cloud)) in days.iter().enumerate() {
            let date = start + Duration::days(offset as i64);
            for hour in 0..HOURS_PER_DAY {
                series.time.push(format!("{date}T{hour:02}:00"));
                series.temperature_2m.push(Some(temp));
                series.precipitation.push(Some(if hour < 4 { precip / 4.0 } else { 0.0 }));
                series.cloud_cover.push(Some(cloud));
                series.wind_speed_10m.push(Some(12.0));
                series.pressure_msl.push(Some(1013.0));
            }
        }
        series
    }

    pub(crate) fn forecast(model: ModelId, series: HourlySeries) -> ModelForecast {
        ModelForecast {
            model,
            coordinates: Coordinates { latitude: 37.98, longitude: 23.73 },
            hourly: series,
            daily: None,
        }
    }

    pub(crate) fn day(temp_high: f64, precip_total: f64, condition: Condition) -> DayForecast {
        DayForecast {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            day_of_week: "Monday".into(),
            temp_high,
            temp_low: temp_high - 8.0,
            precip_total,
            precip_hours: 0,
            precip_probability: 0.0,
            condition,
            wind_max: 0.0,
            wind_avg: 0.0,
            pressure_trend: PressureTrend::Stable,
            feels_like_high: temp_high,
            feels_like_low: temp_high - 8.0,
            uv_max: 0.0,
            avg_cloud_cover: 0.0,
            hourly_temps: Vec::new(),
            hourly_precip: Vec::new(),
        }
    }

    pub(crate) fn comparison(temp_high: f64, overall: u8) -> DayComparison {
        let primary = day(temp_high, 0.0, Condition::Sunny);
        DayComparison {
            date: primary.date,
            models: BTreeMap::from([(ModelId::Ecmwf, primary.clone())]),
            primary,
            agreement: AgreementScore {
                temperature: overall,
                precipitation: overall,
                condition: overall,
                overall,
                agreeing_models: Vec::new(),
                differing_models: Vec::new(),
            },
            temperature_spread: 0.0,
            precip_spread: 0.0,
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn extract_day_summarizes_slice() {
        let mut series = flat_series(june(2), &[(20.0, 0.0, 10.0)]);
        series.temperature_2m[3] = Some(27.6);
        series.temperature_2m[4] = Some(14.4);
        series.precipitation[10] = Some(0.36);
        series.precipitation_probability = Some(vec![Some(40.0); 24]);
        series.uv_index = Some(vec![Some(6.44); 24]);

        let day = extract_day(&series, 0).expect("day 0 present");

        assert_eq!(day.date, june(2));
        assert_eq!(day.day_of_week, "Monday");
        assert_eq!(day.temp_high, 28.0);
        assert_eq!(day.temp_low, 14.0);
        assert_eq!(day.precip_total, 0.4);
        assert_eq!(day.precip_hours, 1);
        assert_eq!(day.precip_probability, 40.0);
        assert_eq!(day.uv_max, 6.4);
        assert_eq!(day.condition, Condition::Sunny);
        assert_eq!(day.wind_max, 12.0);
        assert_eq!(day.wind_avg, 12.0);
        assert_eq!(day.pressure_trend, PressureTrend::Stable);
        assert_eq!(day.feels_like_high, day.temp_high);
        assert_eq!(day.feels_like_low, day.temp_low);
        assert_eq!(day.hourly_temps.len(), 24);
    }

    #[test]
    fn extract_day_beyond_data_is_none() {
        let series = flat_series(june(2), &[(20.0, 0.0, 10.0), (21.0, 0.0, 10.0)]);
        assert!(extract_day(&series, 1).is_some());
        assert!(extract_day(&series, 2).is_none());
        assert!(extract_day(&HourlySeries::default(), 0).is_none());
    }

    #[test]
    fn extract_day_partial_day_uses_available_hours() {
        let mut series = flat_series(june(2), &[(20.0, 0.0, 10.0), (21.0, 0.0, 10.0)]);
        series.time.truncate(25);
        series.temperature_2m.truncate(25);

        let day = extract_day(&series, 1).expect("a single hour is enough");
        assert_eq!(day.hourly_temps, vec![21.0]);
        assert_eq!(day.pressure_trend, PressureTrend::Stable);
    }

    #[test]
    fn extract_day_skips_nulls_per_variable() {
        let mut series = flat_series(june(2), &[(18.0, 0.0, 80.0)]);
        series.precipitation = vec![None; 24];
        series.cloud_cover[0] = None;
        series.wind_speed_10m = Vec::new();

        let day = extract_day(&series, 0).expect("temperatures present");
        assert_eq!(day.precip_total, 0.0);
        assert_eq!(day.condition, Condition::Cloudy);
        assert_eq!(day.wind_max, 0.0);
        assert_eq!(day.wind_avg, 0.0);
    }

    #[test]
    fn extract_day_without_temperatures_is_none() {
        let mut series = flat_series(june(2), &[(18.0, 0.0, 80.0)]);
        series.temperature_2m = vec![None; 24];
        assert!(extract_day(&series, 0).is_none());
    }

    #[test]
    fn extract_day_uses_apparent_temperature_when_present() {
        let mut series = flat_series(june(2), &[(18.0, 0.0, 10.0)]);
        let mut apparent = vec![Some(17.0); 24];
        apparent[5] = Some(21.2);
        apparent[6] = None;
        series.apparent_temperature = Some(apparent);

        let day = extract_day(&series, 0).unwrap();
        assert_eq!(day.feels_like_high, 21.0);
        assert_eq!(day.feels_like_low, 17.0);
    }

    #[test]
    fn high_is_never_below_low() {
        let mut series = flat_series(june(2), &[(-3.5, 0.0, 10.0), (9.0, 0.0, 10.0)]);
        for (i, t) in series.temperature_2m.iter_mut().enumerate() {
            *t = Some(-10.0 + (i % 13) as f64 * 1.7);
        }
        for index in 0..2 {
            let day = extract_day(&series, index).unwrap();
            assert!(day.temp_high >= day.temp_low);
        }
    }

    #[test]
    fn condition_cascade_order() {
        assert_eq!(classify_condition(0.0, 12.0, 15.0), Condition::Stormy);
        assert_eq!(classify_condition(0.0, 12.0, 1.0), Condition::Snowy);
        assert_eq!(classify_condition(100.0, 5.0, 15.0), Condition::Rainy);
        assert_eq!(classify_condition(100.0, 5.0, 1.9), Condition::Snowy);
        assert_eq!(classify_condition(0.0, 5.0, 2.0), Condition::Rainy);
        assert_eq!(classify_condition(0.0, 10.5, 2.0), Condition::Stormy);
        assert_eq!(classify_condition(71.0, 2.0, 15.0), Condition::Cloudy);
        assert_eq!(classify_condition(70.0, 0.0, 15.0), Condition::PartlyCloudy);
        assert_eq!(classify_condition(30.0, 0.0, -5.0), Condition::Sunny);
        assert_eq!(classify_condition(50.0, 10.0, 15.0), Condition::Rainy);
    }

    #[test]
    fn pressure_trend_thresholds() {
        let rising: Vec<f64> = (0..24).map(|h| 1000.0 + h as f64 * 0.5).collect();
        assert_eq!(pressure_trend(&rising), PressureTrend::Rising);

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert_eq!(pressure_trend(&falling), PressureTrend::Falling);

        let step = |to: f64| [[1000.0; 6], [to; 6]].concat();
        assert_eq!(pressure_trend(&step(1003.0)), PressureTrend::Stable);
        assert_eq!(pressure_trend(&step(1003.5)), PressureTrend::Rising);
        assert_eq!(pressure_trend(&[1000.0, 1010.0]), PressureTrend::Stable);
        assert_eq!(pressure_trend(&[1000.0]), PressureTrend::Stable);
    }

    #[test]
    fn agreement_matching_model_scores_full_marks() {
        let primary = day(25.0, 0.0, Condition::Sunny);
        let others = BTreeMap::from([(ModelId::Gfs, day(26.0, 0.0, Condition::Sunny))]);

        let score = compute_agreement(&primary, &others);

        assert_eq!(score.agreeing_models, vec![ModelId::Gfs]);
        assert!(score.differing_models.is_empty());
        assert_eq!(score.overall, 100);
    }

    #[test]
    fn agreement_distant_model_lands_in_lowest_buckets() {
        let primary = day(20.0, 0.0, Condition::Sunny);
        let others = BTreeMap::from([(ModelId::Icon, day(26.0, 15.0, Condition::Stormy))]);

        let score = compute_agreement(&primary, &others);

        assert_eq!(score.differing_models, vec![ModelId::Icon]);
        assert!(score.agreeing_models.is_empty());
        assert_eq!(score.temperature, 30);
        assert_eq!(score.precipitation, 30);
        assert_eq!(score.condition, 40);
        assert_eq!(score.overall, 33);
    }

    #[test]
    fn agreement_requires_two_of_three_checks() {
        let primary = day(20.0, 0.0, Condition::Sunny);
        let others = BTreeMap::from([
            // temperature and precipitation agree, condition does not
            (ModelId::Gfs, day(21.0, 1.0, Condition::Cloudy)),
            // only the condition agrees
            (ModelId::Gem, day(25.0, 9.0, Condition::Sunny)),
        ]);

        let score = compute_agreement(&primary, &others);

        assert_eq!(score.agreeing_models, vec![ModelId::Gfs]);
        assert_eq!(score.differing_models, vec![ModelId::Gem]);
        // temperature: (100 + 30) / 2, precipitation: (100 + 30) / 2, condition: (40 + 100) / 2
        assert_eq!(score.temperature, 65);
        assert_eq!(score.precipitation, 65);
        assert_eq!(score.condition, 70);
        assert_eq!(score.overall, 67);
    }

    #[test]
    fn agreement_middle_buckets() {
        let primary = day(20.0, 0.0, Condition::Rainy);
        let others = BTreeMap::from([(ModelId::Ukmo, day(24.0, 8.0, Condition::Rainy))]);

        let score = compute_agreement(&primary, &others);
        assert_eq!(score.temperature, 60);
        assert_eq!(score.precipitation, 60);
        assert_eq!(score.condition, 100);
        assert_eq!(score.overall, 73);
        assert_eq!(score.differing_models, vec![ModelId::Ukmo]);
    }

    #[test]
    fn agreement_with_no_models_is_deterministic() {
        let primary = day(20.0, 0.0, Condition::Sunny);
        let score = compute_agreement(&primary, &BTreeMap::new());

        assert_eq!(score.temperature, 0);
        assert_eq!(score.precipitation, 0);
        assert_eq!(score.condition, 0);
        assert_eq!(score.overall, 0);
        assert!(score.agreeing_models.is_empty());
        assert!(score.differing_models.is_empty());
        assert_eq!(score, compute_agreement(&primary, &BTreeMap::new()));
    }

    #[test]
    fn agreement_partitions_every_model_exactly_once() {
        let primary = day(20.0, 2.0, Condition::PartlyCloudy);
        let others: BTreeMap<ModelId, DayForecast> = ModelId::all()
            .iter()
            .skip(1)
            .enumerate()
            .map(|(i, &model)| (model, day(17.0 + i as f64 * 1.5, i as f64 * 3.0, Condition::Rainy)))
            .collect();

        let score = compute_agreement(&primary, &others);

        let mut seen: Vec<ModelId> = score
            .agreeing_models
            .iter()
            .chain(&score.differing_models)
            .copied()
            .collect();
        seen.sort();
        assert_eq!(seen, others.keys().copied().collect::<Vec<_>>());
        for value in [score.temperature, score.precipitation, score.condition, score.overall] {
            assert!(value <= 100);
        }
    }

    #[test]
    fn trend_compares_first_and_last_three_days() {
        let warming: Vec<_> = [15.0, 14.0, 16.0, 18.0, 20.0, 21.0, 22.0]
            .iter()
            .map(|&t| comparison(t, 80))
            .collect();
        assert_eq!(temperature_trend(&warming), Trend::Warming);

        let cooling: Vec<_> = [25.0, 24.0, 23.0, 20.0, 19.0].iter().map(|&t| comparison(t, 80)).collect();
        assert_eq!(temperature_trend(&cooling), Trend::Cooling);

        let flat: Vec<_> = [20.0, 21.0, 22.0, 21.0, 20.0, 22.0, 23.0]
            .iter()
            .map(|&t| comparison(t, 80))
            .collect();
        assert_eq!(temperature_trend(&flat), Trend::Stable);

        assert_eq!(temperature_trend(&warming[..2]), Trend::Stable);
    }

    #[test]
    fn confidence_levels() {
        let week = |overall| (0..7).map(|_| comparison(20.0, overall)).collect::<Vec<_>>();
        assert_eq!(confidence_level(&week(90)), Confidence::High);
        assert_eq!(confidence_level(&week(75)), Confidence::High);
        assert_eq!(confidence_level(&week(55)), Confidence::Medium);
        assert_eq!(confidence_level(&week(20)), Confidence::Low);
        assert_eq!(confidence_level(&[]), Confidence::Low);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to_tenth(0.1 + 0.2), 0.3);
        assert_eq!(round_to_tenth(12.34), 12.3);
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap()
    }

    #[test]
    fn analyze_weekly_without_primary_is_empty() {
        let forecasts = BTreeMap::from([(
            ModelId::Gfs,
            forecast(ModelId::Gfs, flat_series(june(2), &[(20.0, 0.0, 10.0); 7])),
        )]);

        let week = analyze_weekly(&forecasts, "Athens", ModelId::Ecmwf, now());

        assert!(week.days.is_empty());
        assert_eq!(week.overall_trend, Trend::Stable);
        assert_eq!(week.confidence, Confidence::Low);
        assert_eq!(week.location, "Athens");
        assert_eq!(week.primary_model, ModelId::Ecmwf);
    }

    #[test]
    fn analyze_weekly_builds_comparisons() {
        let primary_days = [
            (15.0, 0.0, 10.0),
            (15.0, 0.0, 10.0),
            (15.0, 12.0, 90.0),
            (18.0, 0.0, 50.0),
            (21.0, 0.0, 10.0),
            (21.0, 0.0, 10.0),
            (21.0, 0.0, 10.0),
        ];
        let mut gfs_days = primary_days;
        gfs_days[2] = (22.0, 0.0, 10.0);

        let forecasts = BTreeMap::from([
            (ModelId::Ecmwf, forecast(ModelId::Ecmwf, flat_series(june(2), &primary_days))),
            (ModelId::Gfs, forecast(ModelId::Gfs, flat_series(june(2), &gfs_days))),
            // ICON only covers three days
            (ModelId::Icon, forecast(ModelId::Icon, flat_series(june(2), &primary_days[..3]))),
        ]);

        let week = analyze_weekly(&forecasts, "Athens", ModelId::Ecmwf, now());

        assert_eq!(week.days.len(), WEEK_DAYS);
        assert_eq!(week.days[0].date, june(2));
        assert_eq!(week.days[6].date, june(8));
        assert_eq!(week.overall_trend, Trend::Warming);
        assert_eq!(week.last_updated, now());

        let day0 = &week.days[0];
        assert_eq!(day0.models.len(), 3);
        assert_eq!(day0.agreement.overall, 100);
        assert_eq!(day0.agreement.agreeing_models, vec![ModelId::Gfs, ModelId::Icon]);

        let day2 = &week.days[2];
        assert_eq!(day2.primary.condition, Condition::Stormy);
        assert_eq!(day2.agreement.differing_models, vec![ModelId::Gfs]);
        assert_eq!(day2.temperature_spread, 7.0);
        assert_eq!(day2.precip_spread, 12.0);

        let day5 = &week.days[5];
        assert_eq!(day5.models.len(), 2);
        assert!(!day5.models.contains_key(&ModelId::Icon));
    }

    #[test]
    fn analyze_weekly_is_idempotent() {
        let forecasts = BTreeMap::from([
            (ModelId::Ecmwf, forecast(ModelId::Ecmwf, flat_series(june(2), &[(20.0, 3.0, 40.0); 7]))),
            (ModelId::Gem, forecast(ModelId::Gem, flat_series(june(2), &[(24.0, 9.0, 90.0); 7]))),
        ]);

        let first = analyze_weekly(&forecasts, "Thessaloniki", ModelId::Ecmwf, now());
        let second = analyze_weekly(&forecasts, "Thessaloniki", ModelId::Ecmwf, now());
        assert_eq!(first, second);
    }
}
