//! Document assembly: the top-level generation entry point.

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::channels::{
    build_inbound_channels, build_outbound_channels, channel_parameters, merge_channels,
};
use crate::config::DocsConfig;
use crate::error::GenerateError;
use crate::messages::build_messages;
use crate::operations::build_operations;
use crate::schema::{collect_schemas, payload_types, SchemaGenerator};
use crate::types::{Routes, ASYNCAPI_VERSION};

/// A generated AsyncAPI document.
///
/// Maps keep insertion order, so the same routes always serialize to the
/// same text.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncApiDocument {
    root: Value,
}

impl AsyncApiDocument {
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Serialize as YAML.
    pub fn to_yaml(&self) -> Result<String, GenerateError> {
        serde_yaml::to_string(&self.root).map_err(|e| GenerateError::Serialization {
            message: e.to_string(),
        })
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, GenerateError> {
        serde_json::to_string_pretty(&self.root).map_err(|e| GenerateError::Serialization {
            message: e.to_string(),
        })
    }
}

/// Generates AsyncAPI documents from route descriptors.
///
/// Holds no state between calls; `generate` may be called repeatedly and
/// from several threads when the schema generator allows it.
#[derive(Debug, Clone)]
pub struct Generator<S> {
    config: DocsConfig,
    schemas: S,
}

impl<S: SchemaGenerator> Generator<S> {
    pub fn new(config: DocsConfig, schemas: S) -> Self {
        Self { config, schemas }
    }

    /// Build the complete document for `routes`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::FeatureDisabled` when generation is turned
    /// off, and any conflict, type-shape, or schema error found on the way.
    /// Nothing is returned unless every part of the document was built.
    pub fn generate(&self, routes: &Routes) -> Result<AsyncApiDocument, GenerateError> {
        if !self.config.enabled {
            return Err(GenerateError::FeatureDisabled);
        }

        let types = payload_types(routes)?;
        debug!(count = types.len(), "collected payload types");

        let schemas = collect_schemas(&types, &self.schemas)?;
        let messages = build_messages(&types)?;

        let inbound = build_inbound_channels(&routes.routes, &self.config)?;
        let outbound = build_outbound_channels(routes.responses(), &self.config)?;
        let channels = merge_channels(inbound, outbound)?;
        let operations = build_operations(routes, &self.config)?;

        let mut components = Map::new();
        components.insert("messages".to_string(), Value::Object(messages));
        components.insert("schemas".to_string(), Value::Object(schemas));
        let parameters = channel_parameters(&channels);
        if !parameters.is_empty() {
            let parameters: Map<String, Value> = parameters
                .into_iter()
                .map(|name| {
                    let definition =
                        json!({ "description": format!("Value of the `{{{}}}` address segment", name) });
                    (name, definition)
                })
                .collect();
            components.insert("parameters".to_string(), Value::Object(parameters));
        }

        info!(
            channels = channels.len(),
            operations = operations.len(),
            "generated AsyncAPI document"
        );

        let info = &self.config.info;
        let root = json!({
            "asyncapi": ASYNCAPI_VERSION,
            "info": {
                "title": info.title,
                "version": info.version,
                "description": info.description,
            },
            "channels": channels,
            "operations": operations,
            "components": components,
        });
        Ok(AsyncApiDocument { root })
    }

    /// Build the document and serialize it as YAML.
    pub fn generate_yaml(&self, routes: &Routes) -> Result<String, GenerateError> {
        self.generate(routes)?.to_yaml()
    }
}
