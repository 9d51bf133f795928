//! The six extraction settings and pattern compilation.

use crate::errors::{ExtractError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Default expression: `==highlighted==` or `**bold**` spans.
pub const DEFAULT_EXPR: &str = r"(==.+?==)|(\*\*.+?\*\*)";

/// Default content of the summary root block.
pub const DEFAULT_SUMMARY_TITLE: &str = "***Summary***";

/// Default visible label of back-reference links.
pub const DEFAULT_REF_LABEL: &str = "→";

/// Settings for one extraction run.
///
/// Keys serialize in camelCase to match the host's settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSettings {
    /// Content of the generated summary root block.
    #[serde(default = "default_summary_title")]
    pub summary_title: String,
    /// Insert the summary before (true) or after (false) the anchor.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub keep_summary_above: bool,
    /// Suffix each extract with a link back to its source block.
    #[serde(default = "default_true", deserialize_with = "lenient_bool")]
    pub keep_refs: bool,
    /// Visible label of the back-reference link.
    #[serde(default = "default_ref_label")]
    pub ref_label: String,
    /// Keep the matched delimiters in the output text.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub keep_meta: bool,
    /// Regular expression source, applied find-all per block.
    ///
    /// Uses `regex` crate syntax: look-around and backreferences are not
    /// supported and fail as [`ExtractError::InvalidPattern`].
    #[serde(default = "default_expr")]
    pub expr: String,
}

fn default_summary_title() -> String {
    DEFAULT_SUMMARY_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_ref_label() -> String {
    DEFAULT_REF_LABEL.to_string()
}

fn default_expr() -> String {
    DEFAULT_EXPR.to_string()
}

/// Accepts JSON booleans as well as the strings `"true"` and `"false"`.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => Ok(value),
        Raw::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean or \"true\"/\"false\", got \"{other}\""
            ))),
        },
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            summary_title: default_summary_title(),
            keep_summary_above: false,
            keep_refs: default_true(),
            ref_label: default_ref_label(),
            keep_meta: false,
            expr: default_expr(),
        }
    }
}

impl ExtractSettings {
    /// Creates settings with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary title.
    #[must_use]
    pub fn with_summary_title(mut self, title: impl Into<String>) -> Self {
        self.summary_title = title.into();
        self
    }

    /// Sets whether the summary goes above the anchor.
    #[must_use]
    pub fn with_keep_summary_above(mut self, above: bool) -> Self {
        self.keep_summary_above = above;
        self
    }

    /// Sets whether back-references are appended.
    #[must_use]
    pub fn with_keep_refs(mut self, keep: bool) -> Self {
        self.keep_refs = keep;
        self
    }

    /// Sets the reference label.
    #[must_use]
    pub fn with_ref_label(mut self, label: impl Into<String>) -> Self {
        self.ref_label = label.into();
        self
    }

    /// Sets whether delimiters are kept.
    #[must_use]
    pub fn with_keep_meta(mut self, keep: bool) -> Self {
        self.keep_meta = keep;
        self
    }

    /// Sets the expression source.
    #[must_use]
    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = expr.into();
        self
    }

    /// Compiles the configured expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPattern`] if the expression does not compile.
    pub fn compile_pattern(&self) -> Result<Regex> {
        Regex::new(&self.expr).map_err(|err| ExtractError::invalid_pattern(&self.expr, err))
    }
}

/// Settings resolved for a single run, with the compiled pattern.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The settings as read at the start of the run.
    pub settings: ExtractSettings,
    /// The compiled extraction pattern.
    pub pattern: Regex,
}

impl RunConfig {
    /// Compiles the pattern and freezes the settings for one run.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPattern`] if the expression does not compile.
    pub fn resolve(settings: ExtractSettings) -> Result<Self> {
        let pattern = settings.compile_pattern()?;
        Ok(Self { settings, pattern })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = ExtractSettings::default();

        assert_eq!(settings.summary_title, "***Summary***");
        assert!(!settings.keep_summary_above);
        assert!(settings.keep_refs);
        assert_eq!(settings.ref_label, "→");
        assert!(!settings.keep_meta);
        assert_eq!(settings.expr, r"(==.+?==)|(\*\*.+?\*\*)");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: ExtractSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, ExtractSettings::default());
    }

    #[test]
    fn test_camel_case_keys_and_string_booleans() {
        let settings: ExtractSettings = serde_json::from_value(json!({
            "summaryTitle": "Highlights",
            "keepSummaryAbove": "true",
            "keepRefs": "False",
            "keepMeta": true,
        }))
        .unwrap();

        assert_eq!(settings.summary_title, "Highlights");
        assert!(settings.keep_summary_above);
        assert!(!settings.keep_refs);
        assert!(settings.keep_meta);
    }

    #[test]
    fn test_rejects_non_boolean_string() {
        let result: std::result::Result<ExtractSettings, _> =
            serde_json::from_value(json!({ "keepRefs": "sometimes" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_pattern_finds_both_families() {
        let pattern = ExtractSettings::default().compile_pattern().unwrap();
        let found: Vec<&str> = pattern
            .find_iter("Keep ==this== and **that**")
            .map(|m| m.as_str())
            .collect();

        assert_eq!(found, vec!["==this==", "**that**"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RunConfig::resolve(ExtractSettings::new().with_expr("(==.+?==")).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn test_lookaround_and_backreference_rejected() {
        for expr in [r"(?<===)\w+", r"(\*\*)(.+?)\1"] {
            let err = ExtractSettings::new().with_expr(expr).compile_pattern().unwrap_err();
            assert_eq!(err.kind(), "invalid_pattern", "{expr}");
        }
    }
}
