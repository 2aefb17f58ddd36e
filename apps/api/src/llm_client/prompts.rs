// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Appended to prompts whose answer is parsed as a whole JSON document.
pub const RAW_JSON_INSTRUCTION: &str =
    "Respond with only raw JSON. No explanation or markdown.";

/// Appended to skill-extraction prompts.
pub const COMMA_LIST_INSTRUCTION: &str =
    "Return as a comma-separated list of clean, lowercase skill names.";

/// Fills `{name}` placeholders in a single pass over `template`.
///
/// Substituted values are never scanned again, so user text containing `{name}` stays
/// literal. Placeholders without a value are left as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}
