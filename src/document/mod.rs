//! Edit operations over the configuration document.
//!
//! Every operation takes the current document by reference and returns a
//! new one; the input is never modified. Rejected edits return an
//! `EditError` and the caller keeps its previous document.

mod keys;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::config::{ConfigDocument, Model, Provider, ProviderOptions, KNOWN_ADAPTERS};
use crate::naming::{env_reference, env_var_name, model_display_name};

pub use keys::{now_millis, unique_key};

pub const NEW_PROVIDER_PREFIX: &str = "new-provider";
pub const NEW_MODEL_PREFIX: &str = "new-model";
pub const DEFAULT_PROVIDER_NAME: &str = "New Provider";
pub const DEFAULT_MODEL_NAME: &str = "New Model";
pub const DEFAULT_BASE_URL: &str = "https://api.example.com/v1/";

/// Provider fields addressable through `set_provider_field`.
pub const FIELD_NAME: &str = "name";
pub const FIELD_PACKAGE: &str = "npm";
/// Option keys with dedicated storage.
pub const OPTION_BASE_URL: &str = "baseURL";
pub const OPTION_API_KEY: &str = "apiKey";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Key '{key}' already exists")]
    Conflict { key: String },

    #[error("Provider '{key}' not found")]
    UnknownProvider { key: String },

    #[error("Model '{key}' not found in provider '{provider}'")]
    UnknownModel { provider: String, key: String },

    #[error("Field '{field}' cannot be set to this value")]
    InvalidValue { field: String },
}

/// Replace a top-level scalar field on one provider.
///
/// `name` and `npm` take strings; any other field name is stored verbatim
/// alongside them. `options` and `models` have dedicated operations.
pub fn set_provider_field(
    doc: &ConfigDocument,
    provider_key: &str,
    field: &str,
    value: Value,
) -> Result<ConfigDocument, EditError> {
    with_provider(doc, provider_key, |provider| {
        match field {
            FIELD_NAME => provider.name = Some(expect_string(field, value)?),
            FIELD_PACKAGE => provider.package_ref = Some(expect_string(field, value)?),
            "options" | "models" => {
                return Err(EditError::InvalidValue {
                    field: field.to_string(),
                })
            }
            _ => {
                provider.extra.insert(field.to_string(), value);
            }
        }
        Ok(())
    })
}

/// Replace or insert one entry in a provider's `options`.
pub fn set_provider_option(
    doc: &ConfigDocument,
    provider_key: &str,
    option: &str,
    value: impl Into<String>,
) -> Result<ConfigDocument, EditError> {
    let value = value.into();
    with_provider(doc, provider_key, |provider| {
        match option {
            OPTION_BASE_URL => provider.options.base_url = value,
            OPTION_API_KEY => provider.options.api_key = Some(value),
            _ => {
                provider
                    .options
                    .extra
                    .insert(option.to_string(), Value::String(value));
            }
        }
        Ok(())
    })
}

/// Move a provider to a new key, keeping its position in the list.
///
/// A blank `new_key` or one equal to `old_key` leaves the document as is.
pub fn rename_provider_key(
    doc: &ConfigDocument,
    old_key: &str,
    new_key: &str,
) -> Result<ConfigDocument, EditError> {
    if new_key.trim().is_empty() || new_key == old_key {
        return Ok(doc.clone());
    }
    if !doc.providers.contains_key(old_key) {
        return Err(EditError::UnknownProvider {
            key: old_key.to_string(),
        });
    }
    if doc.providers.contains_key(new_key) {
        return Err(EditError::Conflict {
            key: new_key.to_string(),
        });
    }

    let mut next = doc.clone();
    next.providers = rekey(&doc.providers, old_key, new_key, |provider| provider.clone());
    Ok(next)
}

/// Insert a provider with default values under a fresh time-based key.
pub fn add_provider(doc: &ConfigDocument) -> (ConfigDocument, String) {
    let key = unique_key(NEW_PROVIDER_PREFIX, now_millis(), |k| {
        doc.providers.contains_key(k)
    });
    let provider = Provider {
        name: Some(DEFAULT_PROVIDER_NAME.to_string()),
        package_ref: Some(KNOWN_ADAPTERS[0].to_string()),
        options: ProviderOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            ..ProviderOptions::default()
        },
        models: IndexMap::new(),
        extra: Default::default(),
    };

    let mut next = doc.clone();
    next.providers.insert(key.clone(), provider);
    (next, key)
}

/// Remove a provider. Absent keys leave the document unchanged.
///
/// Asking the user for confirmation is the caller's job.
pub fn delete_provider(doc: &ConfigDocument, provider_key: &str) -> ConfigDocument {
    let mut next = doc.clone();
    next.providers.shift_remove(provider_key);
    next
}

/// Replace or insert a scalar field on one model.
pub fn set_model_field(
    doc: &ConfigDocument,
    provider_key: &str,
    model_key: &str,
    field: &str,
    value: Value,
) -> Result<ConfigDocument, EditError> {
    with_provider(doc, provider_key, |provider| {
        let model = provider
            .models
            .get_mut(model_key)
            .ok_or_else(|| EditError::UnknownModel {
                provider: provider_key.to_string(),
                key: model_key.to_string(),
            })?;
        match field {
            FIELD_NAME => model.name = Some(expect_string(field, value)?),
            _ => {
                model.extra.insert(field.to_string(), value);
            }
        }
        Ok(())
    })
}

/// Move a model to a new key and recompute its display name from that key.
pub fn rename_model_key(
    doc: &ConfigDocument,
    provider_key: &str,
    old_key: &str,
    new_key: &str,
) -> Result<ConfigDocument, EditError> {
    if new_key.trim().is_empty() || new_key == old_key {
        return Ok(doc.clone());
    }
    with_provider(doc, provider_key, |provider| {
        if !provider.models.contains_key(old_key) {
            return Err(EditError::UnknownModel {
                provider: provider_key.to_string(),
                key: old_key.to_string(),
            });
        }
        if provider.models.contains_key(new_key) {
            return Err(EditError::Conflict {
                key: new_key.to_string(),
            });
        }
        provider.models = rekey(&provider.models, old_key, new_key, |model| Model {
            name: Some(model_display_name(new_key).to_string()),
            ..model.clone()
        });
        Ok(())
    })
}

/// Insert a model named "New Model" under a fresh time-based key.
pub fn add_model(
    doc: &ConfigDocument,
    provider_key: &str,
) -> Result<(ConfigDocument, String), EditError> {
    let mut key = String::new();
    let next = with_provider(doc, provider_key, |provider| {
        key = unique_key(NEW_MODEL_PREFIX, now_millis(), |k| {
            provider.models.contains_key(k)
        });
        provider.models.insert(
            key.clone(),
            Model {
                name: Some(DEFAULT_MODEL_NAME.to_string()),
                ..Model::default()
            },
        );
        Ok(())
    })?;
    Ok((next, key))
}

/// Remove a model. Absent keys leave the document unchanged.
pub fn delete_model(doc: &ConfigDocument, provider_key: &str, model_key: &str) -> ConfigDocument {
    let mut next = doc.clone();
    if let Some(provider) = next.providers.get_mut(provider_key) {
        provider.models.shift_remove(model_key);
    }
    next
}

/// Point every provider's `options.apiKey` at its derived environment variable.
///
/// Runs before each save so that no literal secret is ever persisted.
pub fn apply_api_key_convention(doc: &ConfigDocument) -> ConfigDocument {
    let mut next = doc.clone();
    for (key, provider) in next.providers.iter_mut() {
        let var = env_var_name(provider.display_name(key));
        provider.options.api_key = Some(env_reference(&var));
    }
    next
}

/// Environment variable name for a provider, based on its display name.
pub fn provider_env_var(doc: &ConfigDocument, provider_key: &str) -> Option<String> {
    doc.provider(provider_key)
        .map(|provider| env_var_name(provider.display_name(provider_key)))
}

fn with_provider(
    doc: &ConfigDocument,
    provider_key: &str,
    edit: impl FnOnce(&mut Provider) -> Result<(), EditError>,
) -> Result<ConfigDocument, EditError> {
    let mut next = doc.clone();
    let provider = next
        .providers
        .get_mut(provider_key)
        .ok_or_else(|| EditError::UnknownProvider {
            key: provider_key.to_string(),
        })?;
    edit(provider)?;
    Ok(next)
}

fn rekey<V>(
    map: &IndexMap<String, V>,
    old_key: &str,
    new_key: &str,
    moved: impl Fn(&V) -> V,
) -> IndexMap<String, V>
where
    V: Clone,
{
    map.iter()
        .map(|(key, value)| {
            if key == old_key {
                (new_key.to_string(), moved(value))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

fn expect_string(field: &str, value: Value) -> Result<String, EditError> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(EditError::InvalidValue {
            field: field.to_string(),
        }),
    }
}
