// SPDX-License-Identifier: AGPL-3.0-or-later

//! Response configuration loaded from TOML
//!
//! Lets the output format of a plugin be tuned per deployment without
//! recompiling, e.g. a single-line delimiter for systems that only read the
//! first line of output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::response::{InvalidCharacterPolicy, Response};

fn default_delimiter() -> String {
    "\n".to_string()
}

fn default_true() -> bool {
    true
}

/// Output settings of a [`Response`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseConfig {
    #[serde(default = "default_delimiter")]
    pub output_delimiter: String,
    #[serde(default = "default_true")]
    pub print_performance_data: bool,
    #[serde(default)]
    pub sort_by_severity: bool,
    #[serde(default)]
    pub json_labels: bool,
    #[serde(default)]
    pub invalid_characters: InvalidCharacterPolicy,
    /// Used by the `replace` policy
    #[serde(default)]
    pub replacement: Option<String>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            output_delimiter: default_delimiter(),
            print_performance_data: true,
            sort_by_severity: false,
            json_labels: false,
            invalid_characters: InvalidCharacterPolicy::default(),
            replacement: None,
        }
    }
}

impl ResponseConfig {
    /// Load from TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("TOML parse error: {}", e)))
    }

    /// Generate sample config
    pub fn sample_toml() -> String {
        r#"# Monitoring plugin output configuration
output_delimiter = "\n"
print_performance_data = true
sort_by_severity = false
json_labels = false
# remove | replace | remove_message | replace_message | replace_message_and_set_unknown
invalid_characters = "remove"
# replacement = "/"
"#
        .into()
    }

    /// Apply these settings to `response`
    pub fn apply(&self, response: &mut Response) -> Result<()> {
        response.set_invalid_character_behavior(
            self.invalid_characters,
            self.replacement.as_deref().unwrap_or_default(),
        )?;
        response.set_output_delimiter(self.output_delimiter.clone());
        response.set_print_metrics(self.print_performance_data);
        response.set_sort_messages_by_severity(self.sort_by_severity);
        response.set_performance_data_json_label(self.json_labels);
        Ok(())
    }
}

impl Response {
    /// Create a response with `config` applied
    pub fn with_config(default_ok_message: impl Into<String>, config: &ResponseConfig) -> Result<Self> {
        let mut response = Response::new(default_ok_message);
        config.apply(&mut response)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    #[test]
    fn test_sample_parses_to_default() {
        let config = ResponseConfig::from_toml(&ResponseConfig::sample_toml()).unwrap();
        assert_eq!(config, ResponseConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ResponseConfig::from_toml("").unwrap();
        assert_eq!(config.output_delimiter, "\n");
        assert!(config.print_performance_data);
        assert_eq!(config.invalid_characters, InvalidCharacterPolicy::Remove);
    }

    #[test]
    fn test_apply() {
        let config = ResponseConfig::from_toml(
            r#"
output_delimiter = " / "
sort_by_severity = true
invalid_characters = "replace"
replacement = "!"
"#,
        )
        .unwrap();
        let mut r = Response::with_config("fine", &config).unwrap();
        r.update_status(Status::Warning, "w|1");
        r.update_status(Status::Critical, "c");
        assert_eq!(r.output(), "CRITICAL: c / w!1");
    }

    #[test]
    fn test_apply_rejects_replace_without_replacement() {
        let config = ResponseConfig::from_toml(r#"invalid_characters = "replace""#).unwrap();
        assert!(matches!(
            Response::with_config("fine", &config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let err = ResponseConfig::from_toml(r#"invalid_characters = "explode""#).unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_missing_file() {
        let err = ResponseConfig::from_toml_file("/nonexistent/plugin.toml").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
