use thiserror::Error;
use wasm_bindgen::JsValue;

/// Precondition failures when starting a game. The engine is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("please select a vocabulary set")]
    NoSetSelected,
    #[error("vocabulary set {0:?} does not exist")]
    UnknownSet(String),
    #[error("this vocabulary set has no words")]
    EmptySet,
    #[error("no word has at least 2 translations")]
    NoUsableWords,
}

/// Reading the persisted set collection failed. Always recovered locally.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("stored vocabulary sets are malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
#[error("invalid game configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
