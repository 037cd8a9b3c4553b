//! JSON Schemas for payload types.
//!
//! Schema derivation itself is delegated to a [`SchemaGenerator`]. This
//! module decides which types need a schema, asks for each exactly once,
//! and keys the results by canonical name. [`SchemaCatalog`] is the
//! generator used by the CLI: pre-generated schemas plus builtin primitives.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{ConflictKind, GenerateError, LoadError, SchemaGenerationError, TypeShapeError};
use crate::loader::{load_file, navigate_fragment};
use crate::naming::{escape_pointer, is_type_name, resolve};
use crate::types::{PayloadType, Routes, TypeIdent};

/// Produces a draft JSON Schema for a type.
///
/// Internal `$ref`s in a returned schema are relative to that schema; the
/// collector rebases them onto its `components/schemas` entry.
pub trait SchemaGenerator {
    fn generate(&self, ty: &TypeIdent) -> Result<Value, SchemaGenerationError>;
}

impl<F> SchemaGenerator for F
where
    F: Fn(&TypeIdent) -> Result<Value, SchemaGenerationError>,
{
    fn generate(&self, ty: &TypeIdent) -> Result<Value, SchemaGenerationError> {
        self(ty)
    }
}

/// Distinct payload types carried by the routes, in first-seen order.
///
/// Path variables are skipped. For each route its payload parameters come
/// first, then its reply; broadcasts follow all routes.
///
/// # Errors
///
/// Returns `GenerateError::UnsupportedTypeShape` for a list whose element is
/// itself a list, and for names that aren't type names (generic brackets,
/// spaces, slashes).
pub fn payload_types(routes: &Routes) -> Result<Vec<PayloadType>, GenerateError> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();

    let mut add = |payload: &PayloadType,
                   route: &str,
                   parameter: Option<&str>|
     -> Result<(), GenerateError> {
        check_shape(payload).map_err(|e| GenerateError::unsupported_shape(route, parameter, e))?;
        if seen.insert(payload.clone()) {
            types.push(payload.clone());
        }
        Ok(())
    };

    for route in &routes.routes {
        for param in route.payload_parameters() {
            add(&param.payload, &route.address, Some(&param.name))?;
        }
        if let Some(response) = &route.response {
            add(&response.payload, &response.address, None)?;
        }
    }
    for response in &routes.broadcasts {
        add(&response.payload, &response.address, None)?;
    }

    Ok(types)
}

fn check_shape(payload: &PayloadType) -> Result<(), TypeShapeError> {
    let names = std::iter::once(&payload.base).chain(payload.element.as_ref());
    for ident in names {
        if !is_type_name(ident.as_str()) {
            return Err(TypeShapeError {
                expression: payload.to_string(),
                reason: format!("`{}` is not a type name", ident),
            });
        }
    }

    match &payload.element {
        Some(element) if payload.is_list() && element.is_list_wrapper() => Err(TypeShapeError {
            expression: payload.to_string(),
            reason: "nested generic types are not supported".to_string(),
        }),
        _ => Ok(()),
    }
}

/// The type whose structural schema backs a payload.
///
/// Lists are backed by their element; a bare list has no backing schema.
pub(crate) fn schema_type(payload: &PayloadType) -> Option<&TypeIdent> {
    if payload.is_list() {
        payload.element.as_ref()
    } else {
        Some(&payload.base)
    }
}

/// Collect the schema for every payload type, keyed by canonical name.
///
/// List wrappers never get an entry of their own; their element does.
/// Each base type is requested from `generator` once.
///
/// # Errors
///
/// Returns `GenerateError::SchemaGeneration` if the generator fails or a
/// schema holds an internal reference it can't resolve, and
/// `GenerateError::ConfigurationConflict` if two distinct types share a name.
pub fn collect_schemas<G>(
    types: &[PayloadType],
    generator: &G,
) -> Result<Map<String, Value>, GenerateError>
where
    G: SchemaGenerator + ?Sized,
{
    let mut schemas = Map::new();
    let mut owners: HashMap<String, &TypeIdent> = HashMap::new();

    for ty in types.iter().filter_map(schema_type) {
        let name = resolve(ty, None);
        if let Some(owner) = owners.get(&name) {
            if *owner != ty {
                return Err(GenerateError::ConfigurationConflict {
                    kind: ConflictKind::Schema,
                    key: name,
                    detail: format!("both {} and {} resolve to it", owner, ty),
                });
            }
            continue;
        }

        let schema = generator
            .generate(ty)
            .and_then(|schema| rebase_refs(&name, schema))
            .map_err(|source| GenerateError::SchemaGeneration {
                type_name: ty.to_string(),
                source,
            })?;
        debug!(schema = %name, type_name = %ty, "generated schema");
        owners.insert(name.clone(), ty);
        schemas.insert(name, schema);
    }

    Ok(schemas)
}

/// Point the schema's own internal `$ref`s at its place under
/// `#/components/schemas/<name>`, so they resolve inside the document.
///
/// References into `#/components/` are left alone. Any other internal
/// reference must resolve within the schema itself.
fn rebase_refs(name: &str, schema: Value) -> Result<Value, SchemaGenerationError> {
    let base = format!("#/components/schemas/{}", escape_pointer(name));
    let mut rebased = schema.clone();
    rebase_value(&mut rebased, &schema, &base)?;
    Ok(rebased)
}

fn rebase_value(value: &mut Value, root: &Value, base: &str) -> Result<(), SchemaGenerationError> {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_val)) = obj.get_mut("$ref") {
                if ref_val.starts_with('#') && !ref_val.starts_with("#/components/") {
                    if navigate_fragment(root, ref_val).is_err() {
                        return Err(SchemaGenerationError::new(format!(
                            "unresolved reference {}",
                            ref_val
                        )));
                    }
                    let rebased = format!("{}{}", base, &ref_val[1..]);
                    *ref_val = rebased;
                }
            }
            for (key, child) in obj.iter_mut() {
                if key != "$ref" {
                    rebase_value(child, root, base)?;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                rebase_value(item, root, base)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Schema for a language primitive, by simple name.
fn builtin_schema(simple_name: &str) -> Option<Value> {
    let schema = match simple_name {
        "String" | "str" | "char" | "Character" | "CharSequence" => json!({"type": "string"}),
        "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte"
        | "BigInteger" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => {
            json!({"type": "integer"})
        }
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => {
            json!({"type": "integer", "minimum": 0})
        }
        "double" | "Double" | "float" | "Float" | "BigDecimal" | "f32" | "f64" => {
            json!({"type": "number"})
        }
        "boolean" | "Boolean" | "bool" => json!({"type": "boolean"}),
        "UUID" | "Uuid" => json!({"type": "string", "format": "uuid"}),
        "LocalDateTime" | "OffsetDateTime" | "ZonedDateTime" | "Instant" | "DateTime" => {
            json!({"type": "string", "format": "date-time"})
        }
        "LocalDate" | "NaiveDate" => json!({"type": "string", "format": "date"}),
        _ => return None,
    };
    Some(schema)
}

/// Registry of pre-generated schemas.
///
/// Lookup tries the qualified type name, then the simple name, then the
/// builtin primitives. Every schema is returned with its definitions
/// inlined and any enum overrides applied, and must compile as a JSON Schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, Value>,
    enum_overrides: HashMap<String, Vec<(String, Vec<String>)>>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a qualified or simple type name.
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    /// Replace the allowed values of `field` in every schema for `type_name`.
    pub fn with_enum_override(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        self.enum_overrides
            .entry(type_name.into())
            .or_default()
            .push((field.into(), values));
        self
    }

    /// Register every `*.json`, `*.yaml` and `*.yml` file in `dir`, keyed by
    /// file stem (`RoomView.json` registers `RoomView`).
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the directory or any schema file can't be read.
    pub fn load_dir(mut self, dir: &Path) -> Result<Self, LoadError> {
        let read_error = |source| LoadError::ReadError {
            path: dir.to_path_buf(),
            source,
        };
        if !dir.is_dir() {
            return Err(LoadError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)
            .map_err(read_error)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("json" | "yaml" | "yml")
                )
            })
            .collect();
        files.sort();

        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let schema = load_file(&path)?;
            debug!(name = stem, path = %path.display(), "registered schema file");
            self.schemas.insert(stem.to_string(), schema);
        }
        Ok(self)
    }

    fn lookup(&self, ty: &TypeIdent) -> Option<Value> {
        self.schemas
            .get(ty.as_str())
            .or_else(|| self.schemas.get(ty.simple_name()))
            .cloned()
            .or_else(|| builtin_schema(ty.simple_name()))
    }

    fn apply_enum_overrides(
        &self,
        ty: &TypeIdent,
        schema: &mut Value,
    ) -> Result<(), SchemaGenerationError> {
        let overrides = self
            .enum_overrides
            .get(ty.as_str())
            .or_else(|| self.enum_overrides.get(ty.simple_name()));
        let Some(overrides) = overrides else {
            return Ok(());
        };

        for (field, values) in overrides {
            let property = schema
                .get_mut("properties")
                .and_then(|props| props.get_mut(field.as_str()))
                .and_then(Value::as_object_mut)
                .ok_or_else(|| {
                    SchemaGenerationError::new(format!(
                        "enum override for unknown field '{}'",
                        field
                    ))
                })?;
            property
                .entry("type")
                .or_insert_with(|| Value::String("string".to_string()));
            property.insert("enum".to_string(), json!(values));
        }
        Ok(())
    }
}

impl SchemaGenerator for SchemaCatalog {
    fn generate(&self, ty: &TypeIdent) -> Result<Value, SchemaGenerationError> {
        let schema = self
            .lookup(ty)
            .ok_or_else(|| SchemaGenerationError::new("no schema registered for this type"))?;
        let mut schema = inline_definitions(&schema);
        self.apply_enum_overrides(ty, &mut schema)?;

        jsonschema::validator_for(&schema)
            .map_err(|e| SchemaGenerationError::new(format!("invalid JSON Schema: {}", e)))?;
        Ok(schema)
    }
}

/// Inline internal `#/definitions/*` and `#/$defs/*` references.
///
/// The definitions section is dropped once nothing points into it.
/// Recursive references are left in place, and their definitions kept.
pub fn inline_definitions(schema: &Value) -> Value {
    let mut result = schema.clone();
    let mut recursive = false;
    inline_refs(&mut result, schema, &mut Vec::new(), &mut recursive);

    if !recursive {
        if let Value::Object(map) = &mut result {
            map.remove("definitions");
            map.remove("$defs");
        }
    }
    result
}

fn inline_refs(value: &mut Value, root: &Value, visiting: &mut Vec<String>, recursive: &mut bool) {
    match value {
        Value::Object(obj) => {
            if let Some(ref_val) = obj.get("$ref").and_then(|v| v.as_str()).map(String::from) {
                let is_definition =
                    ref_val.starts_with("#/definitions/") || ref_val.starts_with("#/$defs/");
                if is_definition {
                    if visiting.contains(&ref_val) {
                        *recursive = true;
                        return;
                    }
                    if let Ok(target) = navigate_fragment(root, &ref_val) {
                        let mut target = target.clone();
                        visiting.push(ref_val);
                        inline_refs(&mut target, root, visiting, recursive);
                        visiting.pop();

                        obj.remove("$ref");
                        if let Value::Object(target) = target {
                            for (k, v) in target {
                                obj.entry(k).or_insert(v);
                            }
                        }
                        return;
                    }
                }
            }

            for (key, child) in obj.iter_mut() {
                // definitions are inlined where used, not rewritten in place
                if key == "definitions" || key == "$defs" {
                    continue;
                }
                inline_refs(child, root, visiting, recursive);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, root, visiting, recursive);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParameterDescriptor, ResponseDescriptor, RouteDescriptor};
    use std::cell::RefCell;

    fn object_schema(ty: &TypeIdent) -> Result<Value, SchemaGenerationError> {
        Ok(json!({"type": "object", "title": ty.simple_name()}))
    }

    #[test]
    fn payload_types_skip_path_variables_and_dedupe() {
        let routes = Routes::new()
            .with_route(
                RouteDescriptor::new("/rooms/{roomId}/join")
                    .with_parameter(ParameterDescriptor::path_variable(
                        "roomId",
                        PayloadType::plain("String"),
                    ))
                    .with_parameter(ParameterDescriptor::payload(
                        "request",
                        PayloadType::plain("JoinRequest"),
                    ))
                    .with_response(ResponseDescriptor::new(
                        "/rooms/{roomId}",
                        PayloadType::plain("RoomView"),
                    )),
            )
            .with_broadcast(ResponseDescriptor::new(
                "/rooms",
                PayloadType::generic("List", "RoomView"),
            ))
            .with_broadcast(ResponseDescriptor::new(
                "/lobby",
                PayloadType::plain("RoomView"),
            ));

        let types = payload_types(&routes).unwrap();
        assert_eq!(
            types,
            [
                PayloadType::plain("JoinRequest"),
                PayloadType::plain("RoomView"),
                PayloadType::generic("List", "RoomView"),
            ]
        );
    }

    #[test]
    fn payload_types_reject_list_of_lists() {
        let routes = Routes::new().with_route(RouteDescriptor::new("/bulk").with_parameter(
            ParameterDescriptor::payload("batch", PayloadType::generic("List", "java.util.List")),
        ));

        let err = payload_types(&routes).unwrap_err();
        match err {
            GenerateError::UnsupportedTypeShape {
                route, parameter, ..
            } => {
                assert_eq!(route, "/bulk");
                assert_eq!(parameter.as_deref(), Some("batch"));
            }
            other => panic!("expected UnsupportedTypeShape, got {other:?}"),
        }
    }

    #[test]
    fn payload_types_reject_malformed_names() {
        let routes = Routes::new()
            .with_route(RouteDescriptor::new("/scores").with_parameter(
                ParameterDescriptor::payload(
                    "scores",
                    PayloadType::plain("java.util.Map<String,Room View>"),
                ),
            ))
            .with_broadcast(ResponseDescriptor::new(
                "/pages",
                PayloadType::generic("Page", "a/b"),
            ));

        match payload_types(&routes).unwrap_err() {
            GenerateError::UnsupportedTypeShape {
                route, parameter, ..
            } => {
                assert_eq!(route, "/scores");
                assert_eq!(parameter.as_deref(), Some("scores"));
            }
            other => panic!("expected UnsupportedTypeShape, got {other:?}"),
        }

        let broadcast_only = Routes::new().with_broadcast(ResponseDescriptor::new(
            "/pages",
            PayloadType::generic("Page", "a/b"),
        ));
        match payload_types(&broadcast_only).unwrap_err() {
            GenerateError::UnsupportedTypeShape {
                route, parameter, reason, ..
            } => {
                assert_eq!(route, "/pages");
                assert_eq!(parameter, None);
                assert!(reason.contains("a/b"));
            }
            other => panic!("expected UnsupportedTypeShape, got {other:?}"),
        }
    }

    #[test]
    fn recursive_refs_rebased_onto_component() {
        let tree = |_: &TypeIdent| -> Result<Value, SchemaGenerationError> {
            Ok(inline_definitions(&json!({
                "type": "object",
                "properties": { "root": { "$ref": "#/definitions/Node" } },
                "definitions": {
                    "Node": {
                        "type": "object",
                        "properties": { "children": {
                            "type": "array",
                            "items": { "$ref": "#/definitions/Node" }
                        } }
                    }
                }
            })))
        };

        let schemas = collect_schemas(&[PayloadType::plain("com.example.Tree")], &tree).unwrap();
        let schema = &schemas["Tree"];
        assert_eq!(
            schema["properties"]["root"]["properties"]["children"]["items"],
            json!({"$ref": "#/components/schemas/Tree/definitions/Node"})
        );
        assert_eq!(
            schema["definitions"]["Node"]["properties"]["children"]["items"],
            json!({"$ref": "#/components/schemas/Tree/definitions/Node"})
        );
    }

    #[test]
    fn unresolvable_internal_ref_fails() {
        let broken = |_: &TypeIdent| -> Result<Value, SchemaGenerationError> {
            Ok(json!({"type": "object", "properties": {"x": {"$ref": "#/definitions/Missing"}}}))
        };
        let err = collect_schemas(&[PayloadType::plain("Broken")], &broken).unwrap_err();
        match err {
            GenerateError::SchemaGeneration { source, .. } => {
                assert!(source.message.contains("#/definitions/Missing"))
            }
            other => panic!("expected SchemaGeneration, got {other:?}"),
        }
    }

    #[test]
    fn component_refs_left_alone() {
        let linked = |_: &TypeIdent| -> Result<Value, SchemaGenerationError> {
            Ok(json!({"$ref": "#/components/schemas/Other"}))
        };
        let schemas = collect_schemas(&[PayloadType::plain("Linked")], &linked).unwrap();
        assert_eq!(schemas["Linked"], json!({"$ref": "#/components/schemas/Other"}));
    }

    #[test]
    fn list_payload_requests_element_schema_only() {
        let types = [PayloadType::generic("java.util.List", "com.example.RoomView")];
        let schemas = collect_schemas(&types, &object_schema).unwrap();

        assert_eq!(schemas.keys().collect::<Vec<_>>(), ["RoomView"]);
    }

    #[test]
    fn bare_list_requests_nothing() {
        let schemas = collect_schemas(&[PayloadType::plain("List")], &object_schema).unwrap();
        assert!(schemas.is_empty());
    }

    #[test]
    fn each_base_type_requested_once() {
        let calls = RefCell::new(Vec::new());
        let generator = |ty: &TypeIdent| {
            calls.borrow_mut().push(ty.to_string());
            object_schema(ty)
        };
        let types = [
            PayloadType::plain("RoomView"),
            PayloadType::generic("List", "RoomView"),
            PayloadType::generic("Page", "RoomView"),
            PayloadType::generic("Page", "PlayerView"),
        ];

        let schemas = collect_schemas(&types, &generator).unwrap();
        assert_eq!(*calls.borrow(), ["RoomView", "Page"]);
        assert_eq!(schemas.keys().collect::<Vec<_>>(), ["RoomView", "Page"]);
    }

    #[test]
    fn same_simple_name_from_different_packages_conflicts() {
        let types = [
            PayloadType::plain("com.a.Status"),
            PayloadType::plain("com.b.Status"),
        ];
        let err = collect_schemas(&types, &object_schema).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ConfigurationConflict {
                kind: ConflictKind::Schema,
                ..
            }
        ));
    }

    #[test]
    fn generator_failure_aborts() {
        let generator = |_: &TypeIdent| -> Result<Value, SchemaGenerationError> {
            Err(SchemaGenerationError::new("boom"))
        };
        let err = collect_schemas(&[PayloadType::plain("RoomView")], &generator).unwrap_err();
        match err {
            GenerateError::SchemaGeneration { type_name, source } => {
                assert_eq!(type_name, "RoomView");
                assert_eq!(source.message, "boom");
            }
            other => panic!("expected SchemaGeneration, got {other:?}"),
        }
    }

    #[test]
    fn catalog_builtins() {
        let catalog = SchemaCatalog::new();
        assert_eq!(
            catalog.generate(&TypeIdent::new("java.lang.String")).unwrap(),
            json!({"type": "string"})
        );
        assert_eq!(
            catalog.generate(&TypeIdent::new("u32")).unwrap(),
            json!({"type": "integer", "minimum": 0})
        );
        assert!(catalog.generate(&TypeIdent::new("RoomView")).is_err());
    }

    #[test]
    fn catalog_prefers_qualified_name() {
        let catalog = SchemaCatalog::new()
            .with_schema("RoomView", json!({"type": "object", "title": "simple"}))
            .with_schema(
                "com.example.RoomView",
                json!({"type": "object", "title": "qualified"}),
            );

        let schema = catalog.generate(&TypeIdent::new("com.example.RoomView")).unwrap();
        assert_eq!(schema["title"], "qualified");
        let schema = catalog.generate(&TypeIdent::new("com.other.RoomView")).unwrap();
        assert_eq!(schema["title"], "simple");
    }

    #[test]
    fn catalog_applies_enum_overrides() {
        let catalog = SchemaCatalog::new()
            .with_schema(
                "RoomView",
                json!({
                    "type": "object",
                    "properties": { "status": {}, "name": { "type": "string" } }
                }),
            )
            .with_enum_override("RoomView", "status", vec!["OPEN".into(), "CLOSED".into()]);

        let schema = catalog.generate(&TypeIdent::new("RoomView")).unwrap();
        assert_eq!(
            schema["properties"]["status"],
            json!({"type": "string", "enum": ["OPEN", "CLOSED"]})
        );
    }

    #[test]
    fn catalog_rejects_override_for_unknown_field() {
        let catalog = SchemaCatalog::new()
            .with_schema("RoomView", json!({"type": "object", "properties": {}}))
            .with_enum_override("RoomView", "status", vec!["OPEN".into()]);

        let err = catalog.generate(&TypeIdent::new("RoomView")).unwrap_err();
        assert!(err.message.contains("status"));
    }

    #[test]
    fn catalog_rejects_invalid_schema() {
        let catalog = SchemaCatalog::new().with_schema("Broken", json!({"type": 12}));
        let err = catalog.generate(&TypeIdent::new("Broken")).unwrap_err();
        assert!(err.message.starts_with("invalid JSON Schema"));
    }

    #[test]
    fn catalog_loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("RoomView.json"),
            r#"{"type": "object", "properties": {"id": {"type": "string"}}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("Player.yaml"), "type: object\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = SchemaCatalog::new().load_dir(dir.path()).unwrap();
        assert_eq!(
            catalog.generate(&TypeIdent::new("RoomView")).unwrap()["properties"]["id"]["type"],
            "string"
        );
        assert_eq!(
            catalog.generate(&TypeIdent::new("Player")).unwrap(),
            json!({"type": "object"})
        );
        assert!(catalog.generate(&TypeIdent::new("notes")).is_err());
    }

    #[test]
    fn catalog_load_missing_directory() {
        let result = SchemaCatalog::new().load_dir(Path::new("/nonexistent/schemas"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn inline_definitions_removes_section() {
        let schema = json!({
            "type": "object",
            "properties": {
                "owner": { "$ref": "#/definitions/Player" },
                "players": { "type": "array", "items": { "$ref": "#/$defs/Player" } }
            },
            "definitions": { "Player": { "type": "object", "properties": { "name": { "type": "string" } } } },
            "$defs": { "Player": { "type": "object" } }
        });

        let inlined = inline_definitions(&schema);
        assert_eq!(inlined["properties"]["owner"]["properties"]["name"]["type"], "string");
        assert_eq!(inlined["properties"]["players"]["items"], json!({"type": "object"}));
        assert!(inlined.get("definitions").is_none());
        assert!(inlined.get("$defs").is_none());
    }

    #[test]
    fn inline_definitions_keeps_recursive_refs() {
        let schema = json!({
            "type": "object",
            "properties": { "root": { "$ref": "#/definitions/Node" } },
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": { "next": { "$ref": "#/definitions/Node" } }
                }
            }
        });

        let inlined = inline_definitions(&schema);
        assert_eq!(
            inlined["properties"]["root"]["properties"]["next"],
            json!({"$ref": "#/definitions/Node"})
        );
        assert!(inlined.get("definitions").is_some());
    }
}
