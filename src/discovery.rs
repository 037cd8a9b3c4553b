//! Route discovery from a declarative manifest.
//!
//! A manifest lists routes the way a framework's handler annotations would
//! describe them:
//!
//! ```yaml
//! docs:
//!   title: Rooms
//!   version: 1.2.0
//! enums:
//!   RoomView.status: [OPEN, CLOSED]
//! routes:
//!   - address: /join
//!     summary: Join a room
//!     parameters:
//!       - { name: request, type: com.example.JoinRequest }
//!       - { name: roomId, type: String, path_variable: true }
//!     response:
//!       address: /rooms/{roomId}
//!       type: com.example.RoomView
//! broadcasts:
//!   - address: /rooms
//!     type: java.util.List<com.example.RoomView>
//! ```
//!
//! Type expressions are parsed here and nowhere else; the generator only
//! ever sees typed [`PayloadType`]s.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::config::DocsConfig;
use crate::error::{GenerateError, LoadError};
use crate::loader::load_auto;
use crate::naming::parse_type_expression;
use crate::schema::SchemaCatalog;
use crate::types::{
    Documentation, ParameterDescriptor, PayloadType, ResponseDescriptor, RouteDescriptor, Routes,
};

/// Source of the routes to document.
pub trait RouteSource {
    fn discover(&self) -> Result<Routes, GenerateError>;
}

impl RouteSource for Routes {
    fn discover(&self) -> Result<Routes, GenerateError> {
        Ok(self.clone())
    }
}

/// Declared type of a parameter or response.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeEntry {
    /// Plain name or single-level generic expression.
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Generic element, when `type` is a plain name.
    #[serde(default)]
    pub generic: Option<String>,
}

impl TypeEntry {
    fn resolve(&self, route: &str, parameter: Option<&str>) -> Result<PayloadType, GenerateError> {
        let payload = parse_type_expression(&self.type_expr)
            .map_err(|e| GenerateError::unsupported_shape(route, parameter, e))?;

        match (&self.generic, payload.element.is_some()) {
            (None, _) => Ok(payload),
            (Some(generic), false) => {
                let element = parse_type_expression(generic)
                    .map_err(|e| GenerateError::unsupported_shape(route, parameter, e))?;
                if element.element.is_some() {
                    return Err(GenerateError::UnsupportedTypeShape {
                        route: route.to_string(),
                        parameter: parameter.map(String::from),
                        expression: format!("{}<{}>", self.type_expr, generic),
                        reason: "nested generic types are not supported".to_string(),
                    });
                }
                Ok(PayloadType::generic(payload.base, element.base))
            }
            (Some(generic), true) => Err(GenerateError::UnsupportedTypeShape {
                route: route.to_string(),
                parameter: parameter.map(String::from),
                expression: format!("{}<{}>", self.type_expr, generic),
                reason: "generic argument given twice".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeEntry,
    #[serde(default)]
    pub path_variable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEntry {
    pub address: String,
    #[serde(flatten)]
    pub ty: TypeEntry,
    #[serde(flatten)]
    pub docs: Documentation,
}

impl ResponseEntry {
    fn resolve(&self) -> Result<ResponseDescriptor, GenerateError> {
        let payload = self.ty.resolve(&self.address, None)?;
        Ok(ResponseDescriptor::new(self.address.clone(), payload).with_docs(self.docs.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub address: String,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
    #[serde(flatten)]
    pub docs: Documentation,
    #[serde(default)]
    pub response: Option<ResponseEntry>,
}

impl RouteEntry {
    fn resolve(&self) -> Result<RouteDescriptor, GenerateError> {
        let mut route = RouteDescriptor::new(self.address.clone()).with_docs(self.docs.clone());
        for entry in &self.parameters {
            let payload = entry.ty.resolve(&self.address, Some(&entry.name))?;
            route = route.with_parameter(ParameterDescriptor {
                name: entry.name.clone(),
                payload,
                path_variable: entry.path_variable,
            });
        }
        if let Some(response) = &self.response {
            route = route.with_response(response.resolve()?);
        }
        Ok(route)
    }
}

/// A route manifest as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Generation settings; CLI flags override these.
    #[serde(default)]
    pub docs: DocsConfig,
    /// Per-field enum overrides keyed by `Type.field`.
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub broadcasts: Vec<ResponseEntry>,
}

impl Manifest {
    /// Parse a manifest from an already-loaded JSON tree.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        serde_json::from_value(value).map_err(|source| LoadError::InvalidManifest { source })
    }

    /// Load a manifest from a file path or URL (JSON, or YAML by extension).
    pub fn load(source: &str) -> Result<Self, LoadError> {
        Self::from_value(load_auto(source)?)
    }

    /// Convert the declared entries into typed route descriptors.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::UnsupportedTypeShape` naming the route and
    /// parameter of the first type that isn't a plain or single-level
    /// generic type.
    pub fn to_routes(&self) -> Result<Routes, GenerateError> {
        let routes = self
            .routes
            .iter()
            .map(RouteEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        let broadcasts = self
            .broadcasts
            .iter()
            .map(ResponseEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Routes { routes, broadcasts })
    }

    /// Apply the manifest's enum overrides to a schema catalog.
    ///
    /// Keys without a `.` separator are ignored.
    pub fn apply_enums(&self, mut catalog: SchemaCatalog) -> SchemaCatalog {
        for (key, values) in &self.enums {
            let Some((type_name, field)) = key.rsplit_once('.') else {
                warn!(key = %key, "ignoring enum override without a field name");
                continue;
            };
            catalog = catalog.with_enum_override(type_name.trim(), field, values.clone());
        }
        catalog
    }
}

impl RouteSource for Manifest {
    fn discover(&self) -> Result<Routes, GenerateError> {
        self.to_routes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeIdent;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(value).unwrap()
    }

    #[test]
    fn routes_from_manifest() {
        let manifest = manifest(json!({
            "routes": [{
                "address": "/join",
                "summary": "Join a room",
                "parameters": [
                    { "name": "request", "type": "com.example.JoinRequest" },
                    { "name": "roomId", "type": "String", "path_variable": true }
                ],
                "response": { "address": "/rooms/{roomId}", "type": "com.example.RoomView" }
            }],
            "broadcasts": [
                { "address": "/rooms", "type": "java.util.List<com.example.RoomView>",
                  "description": "Room list" }
            ]
        }));

        let routes = manifest.discover().unwrap();
        let join = &routes.routes[0];
        assert_eq!(join.address, "/join");
        assert_eq!(join.docs.summary.as_deref(), Some("Join a room"));
        assert_eq!(join.docs.description, None);
        assert_eq!(join.parameters.len(), 2);
        assert!(join.parameters[1].path_variable);
        assert_eq!(
            join.response.as_ref().unwrap().payload,
            PayloadType::plain("com.example.RoomView")
        );

        let broadcast = &routes.broadcasts[0];
        assert_eq!(
            broadcast.payload,
            PayloadType::generic("java.util.List", "com.example.RoomView")
        );
        assert_eq!(broadcast.docs.description.as_deref(), Some("Room list"));
    }

    #[test]
    fn generic_field_annotation_style() {
        let manifest = manifest(json!({
            "broadcasts": [
                { "address": "/rooms", "type": "List", "generic": "RoomView" },
                { "address": "/status", "type": "Status", "generic": "Void" }
            ]
        }));

        let routes = manifest.to_routes().unwrap();
        assert_eq!(routes.broadcasts[0].payload, PayloadType::generic("List", "RoomView"));
        assert_eq!(routes.broadcasts[1].payload, PayloadType::plain("Status"));
    }

    #[test]
    fn generic_given_twice_is_rejected() {
        let manifest = manifest(json!({
            "broadcasts": [{ "address": "/rooms", "type": "List<RoomView>", "generic": "RoomView" }]
        }));
        let err = manifest.to_routes().unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedTypeShape { .. }));
    }

    #[test]
    fn unsupported_parameter_type_names_route_and_parameter() {
        let manifest = manifest(json!({
            "routes": [{
                "address": "/scores",
                "parameters": [{ "name": "scores", "type": "Map<String, Integer>" }]
            }]
        }));

        match manifest.to_routes().unwrap_err() {
            GenerateError::UnsupportedTypeShape {
                route,
                parameter,
                expression,
                ..
            } => {
                assert_eq!(route, "/scores");
                assert_eq!(parameter.as_deref(), Some("scores"));
                assert_eq!(expression, "Map<String, Integer>");
            }
            other => panic!("expected UnsupportedTypeShape, got {other:?}"),
        }
    }

    #[test]
    fn docs_section_overrides_defaults() {
        let manifest = manifest(json!({
            "docs": { "title": "Rooms", "version": "9.9.9", "app_prefix": "/ws" }
        }));
        assert_eq!(manifest.docs.info.title, "Rooms");
        assert_eq!(manifest.docs.info.version, "9.9.9");
        assert_eq!(manifest.docs.app_prefix, "/ws");
        assert_eq!(manifest.docs.topic_prefix, "/topic");
    }

    #[test]
    fn missing_address_is_invalid_manifest() {
        let result = Manifest::from_value(json!({ "routes": [{ "parameters": [] }] }));
        assert!(matches!(result, Err(LoadError::InvalidManifest { .. })));
    }

    #[test]
    fn enum_overrides_reach_the_catalog() {
        use crate::schema::SchemaGenerator;

        let manifest = manifest(json!({
            "enums": { "com.example.RoomView.status": ["OPEN", "CLOSED"], "broken": ["X"] }
        }));
        let catalog = manifest.apply_enums(SchemaCatalog::new().with_schema(
            "RoomView",
            json!({"type": "object", "properties": {"status": {"type": "string"}}}),
        ));

        let schema = catalog
            .generate(&TypeIdent::new("com.example.RoomView"))
            .unwrap();
        assert_eq!(schema["properties"]["status"]["enum"], json!(["OPEN", "CLOSED"]));
    }
}
