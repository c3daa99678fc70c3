use thiserror::Error;

use crate::domain::instrument::InstrumentKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Why a single adapter call produced no instruments.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unparsable payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("api error {code}: {message}")]
    Api { code: String, message: String },
}

/// A failed fetch from one exchange endpoint.
///
/// Isolated at the aggregator boundary: one failing endpoint never aborts the
/// batch.
#[derive(Error, Debug)]
#[error("{exchange} {kind} fetch failed: {source}")]
pub struct FetchError {
    pub exchange: String,
    pub kind: InstrumentKind,
    #[source]
    pub source: FetchFailure,
}

impl FetchError {
    pub fn new(
        exchange: impl Into<String>,
        kind: InstrumentKind,
        source: impl Into<FetchFailure>,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            kind,
            source: source.into(),
        }
    }

    /// Error for an envelope that carries an explicit non-success code.
    pub fn api(
        exchange: impl Into<String>,
        kind: InstrumentKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            exchange,
            kind,
            FetchFailure::Api {
                code: code.into(),
                message: message.into(),
            },
        )
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid exchange name '{name}': {reason}")]
    InvalidExchange { name: String, reason: String },

    #[error("failed to load known instruments: {0}")]
    BaselineLoad(String),

    #[error("failed to persist instruments: {0}")]
    StorageWrite(String),

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
