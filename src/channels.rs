//! Channels: one per inbound route address and one per response address.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::DocsConfig;
use crate::error::{ConflictKind, GenerateError};
use crate::naming::{canonical_name, message_ref, parameter_ref, path_placeholders};
use crate::types::{ResponseDescriptor, RouteDescriptor};

/// Channel map that refuses duplicate keys.
#[derive(Debug, Default)]
struct ChannelMap {
    channels: Map<String, Value>,
    declared_by: HashMap<String, String>,
}

impl ChannelMap {
    fn insert(&mut self, key: String, channel: Value, origin: String) -> Result<(), GenerateError> {
        if let Some(first) = self.declared_by.get(&key) {
            return Err(GenerateError::ConfigurationConflict {
                kind: ConflictKind::Channel,
                key,
                detail: format!("{} and {}", first, origin),
            });
        }
        debug!(channel = %key, %origin, "built channel");
        self.declared_by.insert(key.clone(), origin);
        self.channels.insert(key, channel);
        Ok(())
    }
}

fn channel_body(key: &str, messages: Map<String, Value>, parameters: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("address".to_string(), json!(key));
    if !messages.is_empty() {
        body.insert("messages".to_string(), Value::Object(messages));
    }
    if !parameters.is_empty() {
        body.insert("parameters".to_string(), Value::Object(parameters));
    }
    Value::Object(body)
}

/// Channels for client-to-server routes, keyed by `app_prefix + address`.
///
/// Payload parameters become message references; path variables, and any
/// address placeholder without a declared path variable, become channel
/// parameters.
///
/// # Errors
///
/// Returns `GenerateError::ConfigurationConflict` if two routes share a key.
pub fn build_inbound_channels(
    routes: &[RouteDescriptor],
    config: &DocsConfig,
) -> Result<Map<String, Value>, GenerateError> {
    let mut map = ChannelMap::default();

    for route in routes {
        let key = config.inbound_key(&route.address);

        let mut messages = Map::new();
        for param in route.payload_parameters() {
            let name = canonical_name(&param.payload);
            messages.insert(name.clone(), message_ref(&name));
        }

        let mut parameters = Map::new();
        let declared = route.path_variables().map(|p| p.name.clone());
        for name in declared.chain(path_placeholders(&route.address)) {
            if !parameters.contains_key(&name) {
                parameters.insert(name.clone(), parameter_ref(&name));
            }
        }

        let channel = channel_body(&key, messages, parameters);
        map.insert(key, channel, format!("route '{}'", route.address))?;
    }

    Ok(map.channels)
}

/// Channels for server-to-client responses, keyed by `topic_prefix + address`.
///
/// Takes each response with the route it replies to (`None` for a
/// broadcast), as yielded by [`Routes::responses`](crate::Routes::responses).
/// Each channel carries
/// exactly the response's own message.
///
/// # Errors
///
/// Returns `GenerateError::ConfigurationConflict` if two responses share a
/// key, naming the routes that declared them.
pub fn build_outbound_channels<'a, I>(
    responses: I,
    config: &DocsConfig,
) -> Result<Map<String, Value>, GenerateError>
where
    I: IntoIterator<Item = (&'a ResponseDescriptor, Option<&'a RouteDescriptor>)>,
{
    let mut map = ChannelMap::default();

    for (response, origin) in responses {
        let key = config.outbound_key(&response.address);

        let name = canonical_name(&response.payload);
        let mut messages = Map::new();
        messages.insert(name.clone(), message_ref(&name));

        let parameters: Map<String, Value> = path_placeholders(&response.address)
            .into_iter()
            .map(|p| {
                let reference = parameter_ref(&p);
                (p, reference)
            })
            .collect();

        let channel = channel_body(&key, messages, parameters);
        let origin = match origin {
            Some(route) => format!("reply to route '{}'", route.address),
            None => format!("broadcast '{}'", response.address),
        };
        map.insert(key, channel, origin)?;
    }

    Ok(map.channels)
}

/// Combine inbound and outbound channels, inbound first.
///
/// # Errors
///
/// Returns `GenerateError::ConfigurationConflict` if both sides produced the
/// same key, which happens when the two prefixes coincide.
pub fn merge_channels(
    inbound: Map<String, Value>,
    outbound: Map<String, Value>,
) -> Result<Map<String, Value>, GenerateError> {
    let mut channels = inbound;
    for (key, channel) in outbound {
        if channels.contains_key(&key) {
            return Err(GenerateError::ConfigurationConflict {
                kind: ConflictKind::Channel,
                key,
                detail: "an inbound route and a response".to_string(),
            });
        }
        channels.insert(key, channel);
    }
    Ok(channels)
}

/// Names of all channel parameters, in order of first appearance.
pub fn channel_parameters(channels: &Map<String, Value>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for channel in channels.values() {
        let Some(parameters) = channel.get("parameters").and_then(Value::as_object) else {
            continue;
        };
        for name in parameters.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}
