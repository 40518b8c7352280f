//! Phrase tables for the weekly outlook.
//!
//! Lookups are a pure `(Language, Phrase) -> template` mapping. Templates use
//! `{name}` placeholders filled by [`format_template`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::{Condition, Confidence, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    El,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::El => "el",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::En, Language::El]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "el" | "greek" => Ok(Language::El),
            _ => Err(ParseError::UnknownLanguage(value.to_string())),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::try_from(s)
    }
}

/// Keys of the narrative phrase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Today,
    Tomorrow,
    Headline,
    HeavyRain,
    RainExpected,
    LightRain,
    AllModelsAgree,
    ModelsAlign,
    TemperatureDisagreement,
    TimingDisagreement,
    TemperatureNote,
    PrecipitationNote,
    WarmWeek,
    CoolWeek,
    MildWeek,
    RainDay,
    NoData,
}

pub fn phrase(lang: Language, key: Phrase) -> &'static str {
    match lang {
        Language::En => match key {
            Phrase::Today => "Today",
            Phrase::Tomorrow => "Tomorrow",
            Phrase::Headline => "{condition} with highs near {high}°C",
            Phrase::HeavyRain => "Heavy rain expected ({amount}mm)",
            Phrase::RainExpected => "Rain expected ({amount}mm)",
            Phrase::LightRain => "Light rain possible ({amount}mm)",
            Phrase::AllModelsAgree => "All models agree on this forecast",
            Phrase::ModelsAlign => "{models} align on this forecast",
            Phrase::TemperatureDisagreement => "{model} suggests {temp}°C instead",
            Phrase::TimingDisagreement => "Models disagree on the timing of rain",
            Phrase::TemperatureNote => "{model} differs by {diff}°C",
            Phrase::PrecipitationNote => "{model} shows {amount}mm of rain",
            Phrase::WarmWeek => "A warm week ahead",
            Phrase::CoolWeek => "A cool week ahead",
            Phrase::MildWeek => "A mild week ahead",
            Phrase::RainDay => "Rain expected on {day}",
            Phrase::NoData => "No forecast data available",
        },
        Language::El => match key {
            Phrase::Today => "Σήμερα",
            Phrase::Tomorrow => "Αύριο",
            Phrase::Headline => "{condition} με μέγιστη κοντά στους {high}°C",
            Phrase::HeavyRain => "Αναμένεται έντονη βροχή ({amount}mm)",
            Phrase::RainExpected => "Αναμένεται βροχή ({amount}mm)",
            Phrase::LightRain => "Πιθανή ασθενής βροχή ({amount}mm)",
            Phrase::AllModelsAgree => "Όλα τα μοντέλα συμφωνούν σε αυτή την πρόγνωση",
            Phrase::ModelsAlign => "{models} συμφωνούν σε αυτή την πρόγνωση",
            Phrase::TemperatureDisagreement => "Το {model} δείχνει {temp}°C",
            Phrase::TimingDisagreement => "Τα μοντέλα διαφωνούν για τη χρονική στιγμή της βροχής",
            Phrase::TemperatureNote => "Το {model} διαφέρει κατά {diff}°C",
            Phrase::PrecipitationNote => "Το {model} δείχνει {amount}mm βροχής",
            Phrase::WarmWeek => "Μια ζεστή εβδομάδα μπροστά μας",
            Phrase::CoolWeek => "Μια δροσερή εβδομάδα μπροστά μας",
            Phrase::MildWeek => "Μια ήπια εβδομάδα μπροστά μας",
            Phrase::RainDay => "Βροχή αναμένεται: {day}",
            Phrase::NoData => "Δεν υπάρχουν διαθέσιμα δεδομένα πρόγνωσης",
        },
    }
}

pub fn condition_name(lang: Language, condition: Condition) -> &'static str {
    match (lang, condition) {
        (Language::En, Condition::Sunny) => "Sunny",
        (Language::En, Condition::PartlyCloudy) => "Partly cloudy",
        (Language::En, Condition::Cloudy) => "Cloudy",
        (Language::En, Condition::Rainy) => "Rainy",
        (Language::En, Condition::Stormy) => "Stormy",
        (Language::En, Condition::Snowy) => "Snowy",
        (Language::El, Condition::Sunny) => "Ηλιοφάνεια",
        (Language::El, Condition::PartlyCloudy) => "Αραιή συννεφιά",
        (Language::El, Condition::Cloudy) => "Συννεφιά",
        (Language::El, Condition::Rainy) => "Βροχή",
        (Language::El, Condition::Stormy) => "Καταιγίδες",
        (Language::El, Condition::Snowy) => "Χιόνι",
    }
}

/// Generic sentence used when no more specific detail applies to a day.
pub fn condition_description(lang: Language, condition: Condition) -> &'static str {
    match (lang, condition) {
        (Language::En, Condition::Sunny) => "Clear skies throughout the day",
        (Language::En, Condition::PartlyCloudy) => "A mix of sun and clouds",
        (Language::En, Condition::Cloudy) => "Overcast skies for most of the day",
        (Language::En, Condition::Rainy) => "Wet conditions for much of the day",
        (Language::En, Condition::Stormy) => "Stormy weather with heavy downpours",
        (Language::En, Condition::Snowy) => "Snowfall likely",
        (Language::El, Condition::Sunny) => "Καθαρός ουρανός όλη την ημέρα",
        (Language::El, Condition::PartlyCloudy) => "Εναλλαγές ήλιου και συννεφιάς",
        (Language::El, Condition::Cloudy) => "Συννεφιασμένος ουρανός το μεγαλύτερο μέρος της ημέρας",
        (Language::El, Condition::Rainy) => "Βροχερές συνθήκες για μεγάλο μέρος της ημέρας",
        (Language::El, Condition::Stormy) => "Καταιγίδες με έντονες βροχοπτώσεις",
        (Language::El, Condition::Snowy) => "Πιθανή χιονόπτωση",
    }
}

pub fn trend_sentence(lang: Language, trend: Trend) -> &'static str {
    match (lang, trend) {
        (Language::En, Trend::Warming) => "Temperatures will rise through the week",
        (Language::En, Trend::Cooling) => "Temperatures will drop through the week",
        (Language::En, Trend::Stable) => "Temperatures will stay fairly steady",
        (Language::El, Trend::Warming) => "Οι θερμοκρασίες θα ανεβαίνουν κατά τη διάρκεια της εβδομάδας",
        (Language::El, Trend::Cooling) => "Οι θερμοκρασίες θα πέφτουν κατά τη διάρκεια της εβδομάδας",
        (Language::El, Trend::Stable) => "Οι θερμοκρασίες θα παραμείνουν σχετικά σταθερές",
    }
}

pub fn confidence_text(lang: Language, confidence: Confidence) -> &'static str {
    match (lang, confidence) {
        (Language::En, Confidence::High) => "High confidence: the models are in close agreement",
        (Language::En, Confidence::Medium) => "Medium confidence: some differences between models",
        (Language::En, Confidence::Low) => "Low confidence: the models disagree significantly",
        (Language::El, Confidence::High) => "Υψηλή βεβαιότητα: τα μοντέλα συμφωνούν σε μεγάλο βαθμό",
        (Language::El, Confidence::Medium) => "Μέτρια βεβαιότητα: υπάρχουν κάποιες διαφορές μεταξύ των μοντέλων",
        (Language::El, Confidence::Low) => "Χαμηλή βεβαιότητα: τα μοντέλα διαφωνούν σημαντικά",
    }
}

pub fn weekday_name(lang: Language, weekday: Weekday) -> &'static str {
    match lang {
        Language::En => match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        },
        Language::El => match weekday {
            Weekday::Mon => "Δευτέρα",
            Weekday::Tue => "Τρίτη",
            Weekday::Wed => "Τετάρτη",
            Weekday::Thu => "Πέμπτη",
            Weekday::Fri => "Παρασκευή",
            Weekday::Sat => "Σάββατο",
            Weekday::Sun => "Κυριακή",
        },
    }
}

/// Replace every `{key}` in `template` with its value. Unknown placeholders are
/// left untouched.
pub fn format_template(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
