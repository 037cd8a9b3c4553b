//! Reusable message definitions for `components/messages`.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{ConflictKind, GenerateError};
use crate::naming::{canonical_name, resolve, schema_ref};
use crate::schema::schema_type;
use crate::types::PayloadType;

/// Content type declared on every message.
pub const CONTENT_TYPE: &str = "application/json";

/// Payload schema for a message: an inline array for lists, otherwise a
/// reference to the backing schema.
pub fn payload_schema(payload: &PayloadType) -> Value {
    match (payload.is_list(), schema_type(payload)) {
        (true, Some(element)) => json!({
            "type": "array",
            "items": schema_ref(&resolve(element, None)),
        }),
        (true, None) => json!({ "type": "array" }),
        (false, _) => schema_ref(&resolve(&payload.base, None)),
    }
}

/// Build one message per payload type, keyed by its full canonical name.
///
/// # Errors
///
/// Returns `GenerateError::ConfigurationConflict` if two distinct payload
/// types share a canonical name.
pub fn build_messages(types: &[PayloadType]) -> Result<Map<String, Value>, GenerateError> {
    let mut messages = Map::new();
    let mut owners: HashMap<String, &PayloadType> = HashMap::new();

    for payload in types {
        let name = canonical_name(payload);
        if let Some(owner) = owners.get(&name) {
            if *owner != payload {
                return Err(GenerateError::ConfigurationConflict {
                    kind: ConflictKind::Message,
                    key: name,
                    detail: format!("both {} and {} resolve to it", owner, payload),
                });
            }
            continue;
        }

        let message = json!({
            "name": name,
            "contentType": CONTENT_TYPE,
            "payload": payload_schema(payload),
        });
        debug!(message = %name, payload = %payload, "built message");
        owners.insert(name.clone(), payload);
        messages.insert(name, message);
    }

    Ok(messages)
}
