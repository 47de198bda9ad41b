use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong between the browser and the backend.
///
/// Application-level refusals (a 4xx carrying `detail`) are not errors here;
/// they come back as [`crate::model::MutationOutcome::Rejected`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoardError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("server answered HTTP {0}")]
    Status(u16),

    #[error("missing element #{0}")]
    MissingElement(&'static str),

    #[error("element #{0} has the wrong type")]
    WrongElement(&'static str),

    #[error("invalid board config: {0}")]
    Config(String),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl BoardError {
    pub fn dom(err: JsValue) -> Self {
        BoardError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<gloo_net::Error> for BoardError {
    fn from(err: gloo_net::Error) -> Self {
        BoardError::Network(err.to_string())
    }
}
