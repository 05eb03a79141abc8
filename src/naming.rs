//! Canonical names derived from user-facing strings.
//!
//! Both rules are pure and total: every input string yields an output.

/// Suffix appended to every derived API-key variable name.
pub const API_KEY_SUFFIX: &str = "_API_KEY";

const ENV_REFERENCE_PREFIX: &str = "{env:";
const ENV_REFERENCE_SUFFIX: &str = "}";

/// Environment variable that holds the API key for a provider display name.
///
/// Upper-cases the name, replaces every character outside `[A-Z0-9]` with `_`
/// and appends `_API_KEY`. An empty name yields `_API_KEY`.
pub fn env_var_name(display_name: &str) -> String {
    let mut name: String = display_name
        .to_uppercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                ch
            } else {
                '_'
            }
        })
        .collect();
    name.push_str(API_KEY_SUFFIX);
    name
}

/// Display name for a model key: the part after the last `/`, or the whole key.
pub fn model_display_name(model_key: &str) -> &str {
    match model_key.rfind('/') {
        Some(idx) => &model_key[idx + 1..],
        None => model_key,
    }
}

/// Deferred-secret reference stored in `options.apiKey` (`{env:NAME}`).
pub fn env_reference(var_name: &str) -> String {
    format!("{ENV_REFERENCE_PREFIX}{var_name}{ENV_REFERENCE_SUFFIX}")
}

/// Extract the variable name from a `{env:NAME}` reference.
///
/// Returns `None` for literal values, which are treated as secrets.
pub fn parse_env_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix(ENV_REFERENCE_PREFIX)?
        .strip_suffix(ENV_REFERENCE_SUFFIX)
        .filter(|name| !name.is_empty())
}
