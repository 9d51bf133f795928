//! Extraction settings, their sources and the settings schema.
//!
//! Settings are read fresh at the start of every run through a
//! [`ConfigSource`] and resolved into a [`RunConfig`], which carries the
//! compiled pattern. Nothing here is cached between runs.

mod schema;
mod settings;
mod source;

pub use schema::{settings_schema, SettingDescriptor, SettingKind};
pub use settings::{RunConfig, ExtractSettings, DEFAULT_EXPR, DEFAULT_REF_LABEL, DEFAULT_SUMMARY_TITLE};
pub use source::{ConfigSource, JsonFileSource, SettingsMap};
