//! Payload validation against the message schemas of a generated document.

use serde_json::{json, Value};

use crate::error::{SchemaError, ValidateError};

/// Validate a payload against the named message in `components/messages`.
///
/// The message payload is compiled together with the document's
/// `components` section, so `#/components/schemas/...` references resolve
/// the same way they do inside the document.
///
/// # Errors
///
/// Returns `ValidateError::UnknownMessage` if the document has no such
/// message, `ValidateError::InvalidSchema` if its payload schema doesn't
/// compile, or `ValidateError::Invalid` listing every mismatch.
pub fn validate_message(
    document: &Value,
    message: &str,
    payload: &Value,
) -> Result<(), ValidateError> {
    let components = document.get("components").cloned().unwrap_or(json!({}));
    let message_schema = components
        .get("messages")
        .and_then(|m| m.get(message))
        .and_then(|m| m.get("payload"))
        .cloned()
        .ok_or_else(|| ValidateError::UnknownMessage {
            name: message.to_string(),
        })?;

    let schema = json!({
        "allOf": [message_schema],
        "components": components,
    });
    validate_against_schema(&schema, payload)
}

/// Validate a payload against a standalone JSON Schema.
pub fn validate_against_schema(schema: &Value, payload: &Value) -> Result<(), ValidateError> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| ValidateError::InvalidSchema {
            message: e.to_string(),
        })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(payload)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}
