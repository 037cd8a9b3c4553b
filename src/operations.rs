//! Operations: `send` for inbound routes, `receive` for broadcasts.

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::DocsConfig;
use crate::error::{ConflictKind, GenerateError};
use crate::naming::{canonical_name, channel_ref, message_ref};
use crate::types::{Documentation, ResponseDescriptor, Routes};

/// Operation action as seen from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Send,
    Receive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Send => "send",
            Action::Receive => "receive",
        }
    }
}

fn operation_body(action: Action, channel: Value, docs: &Documentation) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("action".to_string(), json!(action.as_str()));
    body.insert("channel".to_string(), channel);
    if let Some(summary) = &docs.summary {
        body.insert("summary".to_string(), json!(summary));
    }
    if let Some(description) = &docs.description {
        body.insert("description".to_string(), json!(description));
    }
    body
}

fn reply_body(response: &ResponseDescriptor, config: &DocsConfig) -> Value {
    json!({
        "channel": channel_ref(&config.outbound_key(&response.address)),
        "messages": [message_ref(&canonical_name(&response.payload))],
    })
}

fn insert_operation(
    operations: &mut Map<String, Value>,
    id: &str,
    action: Action,
    body: Map<String, Value>,
) -> Result<(), GenerateError> {
    if let Some(existing) = operations.get(id) {
        return Err(GenerateError::ConfigurationConflict {
            kind: ConflictKind::Operation,
            key: id.to_string(),
            detail: format!(
                "{} and {} operations",
                existing["action"].as_str().unwrap_or("unknown"),
                action.as_str()
            ),
        });
    }
    debug!(operation = id, action = action.as_str(), "built operation");
    operations.insert(id.to_string(), Value::Object(body));
    Ok(())
}

/// Build operations keyed by route or response address.
///
/// Inbound routes produce `send` operations (with a `reply` when the route
/// declares one); broadcasts produce `receive` operations. Routes without a
/// reply are skipped when `config.require_reply` is set.
///
/// # Errors
///
/// Returns `GenerateError::ConfigurationConflict` if two operations share an id.
pub fn build_operations(
    routes: &Routes,
    config: &DocsConfig,
) -> Result<Map<String, Value>, GenerateError> {
    let mut operations = Map::new();

    for route in &routes.routes {
        if route.response.is_none() && config.require_reply {
            warn!(route = %route.address, "skipping route without a reply");
            continue;
        }

        let channel = channel_ref(&config.inbound_key(&route.address));
        let mut body = operation_body(Action::Send, channel, &route.docs);

        let mut messages: Vec<Value> = Vec::new();
        for param in route.payload_parameters() {
            let reference = message_ref(&canonical_name(&param.payload));
            if !messages.contains(&reference) {
                messages.push(reference);
            }
        }
        body.insert("messages".to_string(), Value::Array(messages));

        if let Some(response) = &route.response {
            body.insert("reply".to_string(), reply_body(response, config));
        }

        insert_operation(&mut operations, &route.address, Action::Send, body)?;
    }

    for response in &routes.broadcasts {
        let channel = channel_ref(&config.outbound_key(&response.address));
        let mut body = operation_body(Action::Receive, channel, &response.docs);
        body.insert(
            "messages".to_string(),
            json!([message_ref(&canonical_name(&response.payload))]),
        );

        insert_operation(&mut operations, &response.address, Action::Receive, body)?;
    }

    Ok(operations)
}
