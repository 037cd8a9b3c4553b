//! AsyncAPI Document Generator
//!
//! Builds AsyncAPI 3.0 documents for message-oriented WebSocket endpoints.
//!
//! Routes describe what clients send (inbound addresses, under the
//! application prefix) and what the server publishes (replies and
//! broadcasts, under the topic prefix). The generator turns them into
//! channels, operations, and reusable messages and schemas, with every
//! `$ref` resolving inside the document.
//!
//! # Example
//!
//! ```
//! use asyncapi_docgen::{
//!     DocsConfig, Generator, ParameterDescriptor, PayloadType, ResponseDescriptor,
//!     RouteDescriptor, Routes, SchemaCatalog,
//! };
//! use serde_json::json;
//!
//! let routes = Routes::new().with_route(
//!     RouteDescriptor::new("/join")
//!         .with_parameter(ParameterDescriptor::payload(
//!             "request",
//!             PayloadType::plain("com.example.JoinRequest"),
//!         ))
//!         .with_response(ResponseDescriptor::new(
//!             "/rooms",
//!             PayloadType::generic("java.util.List", "com.example.RoomView"),
//!         )),
//! );
//!
//! let catalog = SchemaCatalog::new()
//!     .with_schema("JoinRequest", json!({"type": "object"}))
//!     .with_schema("RoomView", json!({"type": "object"}));
//!
//! let doc = Generator::new(DocsConfig::default(), catalog)
//!     .generate(&routes)
//!     .unwrap();
//! let root = doc.as_value();
//!
//! assert_eq!(root["operations"]["/join"]["action"], "send");
//! assert_eq!(
//!     root["components"]["messages"]["List_RoomView"]["payload"]["items"],
//!     json!({"$ref": "#/components/schemas/RoomView"})
//! );
//! ```
//!
//! # Addressing
//!
//! | Source | Channel key | Operation |
//! |--------|-------------|-----------|
//! | inbound route | `app_prefix + address` | `send`, keyed by route address |
//! | reply | `topic_prefix + address` | `reply` of the route's operation |
//! | broadcast | `topic_prefix + address` | `receive`, keyed by address |

mod channels;
mod config;
mod discovery;
mod document;
mod error;
mod linter;
mod loader;
mod messages;
mod naming;
mod operations;
mod schema;
mod types;
mod validator;

pub use channels::{
    build_inbound_channels, build_outbound_channels, channel_parameters, merge_channels,
};
pub use config::{DocsConfig, InfoConfig, DEFAULT_APP_PREFIX, DEFAULT_TOPIC_PREFIX};
pub use discovery::{Manifest, ParameterEntry, ResponseEntry, RouteEntry, RouteSource, TypeEntry};
pub use document::{AsyncApiDocument, Generator};
pub use error::{
    ConflictKind, GenerateError, LoadError, SchemaError, SchemaGenerationError, TypeShapeError,
    ValidateError,
};
pub use linter::{lint, lint_file, Diagnostic, LintResult, Severity};
pub use loader::{is_url, load_auto, load_file, load_str, navigate_fragment, Format};
pub use messages::{build_messages, payload_schema, CONTENT_TYPE};
pub use naming::{canonical_name, parse_type_expression, resolve};
pub use operations::{build_operations, Action};
pub use schema::{collect_schemas, inline_definitions, payload_types, SchemaCatalog, SchemaGenerator};
pub use types::{
    Documentation, ParameterDescriptor, PayloadType, ResponseDescriptor, RouteDescriptor, Routes,
    TypeIdent, ASYNCAPI_VERSION, LIST_WRAPPERS,
};
pub use validator::{validate_against_schema, validate_message};

#[cfg(feature = "remote")]
pub use loader::load_url;
