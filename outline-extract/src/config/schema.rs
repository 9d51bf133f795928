//! Settings schema presented by the host's settings UI.

use super::{DEFAULT_EXPR, DEFAULT_REF_LABEL, DEFAULT_SUMMARY_TITLE};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Kind of a settings entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// A section heading with no value.
    Heading,
    /// A free text value.
    String,
    /// A boolean toggle.
    Boolean,
}

/// One entry of the settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Settings key.
    pub key: String,
    /// Title shown to the user.
    pub title: String,
    /// Longer description, often empty.
    #[serde(default)]
    pub description: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: SettingKind,
    /// Default value; `null` for headings.
    pub default: serde_json::Value,
}

impl SettingDescriptor {
    fn new(
        key: &str,
        title: &str,
        kind: SettingKind,
        default: serde_json::Value,
    ) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            description: String::new(),
            kind,
            default,
        }
    }
}

/// The ordered settings schema: general options, then the expression.
#[must_use]
pub fn settings_schema() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor::new(
            "generalHeading",
            "⚙️ General settings",
            SettingKind::Heading,
            serde_json::Value::Null,
        ),
        SettingDescriptor::new(
            "summaryTitle",
            "Parent block content for all extracted items",
            SettingKind::String,
            json!(DEFAULT_SUMMARY_TITLE),
        ),
        SettingDescriptor::new(
            "keepSummaryAbove",
            "Keep summary above the block for extraction?",
            SettingKind::Boolean,
            json!(false),
        ),
        SettingDescriptor::new(
            "keepRefs",
            "Keep a reference to the source block in the format [→](((uuid)))?",
            SettingKind::Boolean,
            json!(true),
        ),
        SettingDescriptor::new(
            "refLabel",
            "Label to use for reference",
            SettingKind::String,
            json!(DEFAULT_REF_LABEL),
        ),
        SettingDescriptor::new(
            "keepMeta",
            "Keep markdown meta syntax (== or **) around highlights?",
            SettingKind::Boolean,
            json!(false),
        ),
        SettingDescriptor::new(
            "advancedHeading",
            "☢️ Advanced settings",
            SettingKind::Heading,
            serde_json::Value::Null,
        ),
        SettingDescriptor::new(
            "expr",
            "Regular Expression for extracting highlights",
            SettingKind::String,
            json!(DEFAULT_EXPR),
        ),
    ]
}
