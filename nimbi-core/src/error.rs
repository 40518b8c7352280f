use thiserror::Error;

/// Failures turning user-supplied identifiers into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown model '{0}'. Supported models: ecmwf, gfs, icon, arpege, gem, ukmo.")]
    UnknownModel(String),

    #[error("Unknown language '{0}'. Supported languages: en, el.")]
    UnknownLanguage(String),
}
