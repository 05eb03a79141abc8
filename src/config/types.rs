use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Schema URL written into freshly created documents.
pub const DEFAULT_SCHEMA: &str = "https://opencode.ai/config.json";

/// Root of the opencode configuration file.
///
/// Fields this editor does not manage are kept in `extra` and written back
/// verbatim on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Schema URL, passed through unchanged.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Providers keyed by their stable identifier, in file order.
    #[serde(rename = "provider", default, deserialize_with = "null_as_default")]
    pub providers: IndexMap<String, Provider>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A model provider entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provider {
    /// Human-readable name; drives the derived API-key variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Integration adapter package (e.g. "@ai-sdk/openai-compatible").
    #[serde(rename = "npm", default, skip_serializing_if = "Option::is_none")]
    pub package_ref: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: ProviderOptions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: IndexMap<String, Model>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider connection options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderOptions {
    #[serde(rename = "baseURL", default)]
    pub base_url: String,
    /// Deferred `{env:NAME}` reference, never a literal secret once saved.
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A model offered by a provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigDocument {
    /// Look up a provider by key.
    pub fn provider(&self, key: &str) -> Option<&Provider> {
        self.providers.get(key)
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            schema: Some(DEFAULT_SCHEMA.to_string()),
            providers: IndexMap::new(),
            extra: Map::new(),
        }
    }
}

impl Provider {
    /// Name shown to the user: `name`, or the key when no name is set.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => key,
        }
    }
}

/// Adapter packages offered by the editor.
pub const KNOWN_ADAPTERS: &[&str] = &[
    "@ai-sdk/openai-compatible",
    "@ai-sdk/anthropic",
    "@ai-sdk/openai",
    "@ai-sdk/google",
];

/// Next adapter in `KNOWN_ADAPTERS` order. Unknown values restart at the first.
pub fn next_adapter(current: Option<&str>) -> &'static str {
    let position = current.and_then(|value| KNOWN_ADAPTERS.iter().position(|a| *a == value));
    match position {
        Some(idx) => KNOWN_ADAPTERS[(idx + 1) % KNOWN_ADAPTERS.len()],
        None => KNOWN_ADAPTERS[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_key() {
        let provider = Provider::default();
        assert_eq!(provider.display_name("zhipu"), "zhipu");

        let named = Provider {
            name: Some("Zhipu AI".to_string()),
            ..Provider::default()
        };
        assert_eq!(named.display_name("zhipu"), "Zhipu AI");
    }

    #[test]
    fn next_adapter_cycles() {
        assert_eq!(next_adapter(Some("@ai-sdk/openai-compatible")), "@ai-sdk/anthropic");
        assert_eq!(next_adapter(Some("@ai-sdk/google")), "@ai-sdk/openai-compatible");
        assert_eq!(next_adapter(Some("custom-pkg")), "@ai-sdk/openai-compatible");
        assert_eq!(next_adapter(None), "@ai-sdk/openai-compatible");
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let raw = r#"{
            "$schema": "https://opencode.ai/config.json",
            "theme": "dark",
            "provider": {
                "p": {
                    "name": "P",
                    "npm": "@ai-sdk/openai-compatible",
                    "options": { "baseURL": "https://x", "timeout": 30 },
                    "models": { "a/b": { "name": "b", "limit": { "context": 8192 } } },
                    "disabled": false
                }
            }
        }"#;
        let doc: ConfigDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.extra.get("theme"), Some(&Value::from("dark")));
        let provider = doc.provider("p").unwrap();
        assert_eq!(provider.options.extra.get("timeout"), Some(&Value::from(30)));
        assert!(provider.models["a/b"].extra.contains_key("limit"));

        let back: ConfigDocument =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
