//! Conversion of a raw match into summary block content.

use crate::config::ExtractSettings;
use crate::core::BlockId;
use std::fmt;

/// Number of characters dropped from each end when delimiters are removed.
///
/// Both default pattern families (`==...==` and `**...**`) use two-character
/// symmetric delimiters. The strip is positional and does not look at what
/// the characters are, so a custom pattern with other delimiter widths will be
/// cut at the wrong place.
pub const DELIMITER_WIDTH: usize = 2;

/// Removes [`DELIMITER_WIDTH`] characters from both ends of `raw`.
///
/// Widths count Unicode scalar values. Inputs too short to hold both
/// delimiters yield an empty string.
#[must_use]
pub fn strip_delimiters(raw: &str) -> &str {
    let mut indices = raw.char_indices();
    let Some((start, _)) = indices.nth(DELIMITER_WIDTH) else {
        return "";
    };
    match indices.nth_back(DELIMITER_WIDTH - 1) {
        Some((end, _)) => &raw[start..end],
        None => "",
    }
}

/// Formats a back-reference link in the host's block reference syntax.
#[must_use]
pub fn format_reference(label: &str, source: impl fmt::Display) -> String {
    format!("[{label}]((({source})))")
}

/// Produces the content of a summary child block for one match.
///
/// Delimiters are stripped unless `keep_meta` is set; a back-reference to
/// `source` is appended when `keep_refs` is set. No escaping is applied.
#[must_use]
pub fn normalize(raw: &str, source: BlockId, settings: &ExtractSettings) -> String {
    let text = if settings.keep_meta {
        raw
    } else {
        strip_delimiters(raw)
    };

    if settings.keep_refs {
        format!("{text} {}", format_reference(&settings.ref_label, source))
    } else {
        text.to_string()
    }
}
