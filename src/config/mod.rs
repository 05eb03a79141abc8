pub mod loader;
pub mod store;
pub mod types;

pub use loader::{parse_document, serialize_document, strip_trailing_commas, ConfigError};
pub use store::ConfigStore;
pub use types::{
    next_adapter, ConfigDocument, Model, Provider, ProviderOptions, DEFAULT_SCHEMA,
    KNOWN_ADAPTERS,
};
