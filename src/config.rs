use serde::Deserialize;
use web_sys::Document;

use crate::error::BoardError;

pub const CONFIG_SCRIPT_ID: &str = "board-config";

/// Runtime knobs, embedded in the page as
/// `<script id="board-config" type="application/json">`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base: String,
    pub message_timeout_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            message_timeout_ms: 5000,
        }
    }
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> Result<Self, BoardError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| BoardError::Config(e.to_string()))
    }

    /// Missing script means defaults; a malformed one is an error the caller
    /// decides how to report.
    pub fn from_document(doc: &Document) -> Result<Self, BoardError> {
        match doc.get_element_by_id(CONFIG_SCRIPT_ID) {
            Some(el) => Self::from_json(&el.text_content().unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_uses_defaults() {
        assert_eq!(BoardConfig::from_json("  \n").unwrap(), BoardConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg = BoardConfig::from_json(r#"{ "api_base": "https://school.example" }"#).unwrap();
        assert_eq!(cfg.api_base, "https://school.example");
        assert_eq!(cfg.message_timeout_ms, 5000);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = BoardConfig::from_json("{ api_base: ").unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }
}
