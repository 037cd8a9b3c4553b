//! Canonical names, type expressions, and reference strings.
//!
//! Canonical names are used verbatim as YAML keys and JSON Pointer segments,
//! so they never contain generic brackets or qualifier separators:
//!
//! | Payload type | Canonical name |
//! |--------------|----------------|
//! | `com.example.RoomView` | `RoomView` |
//! | `java.util.List<com.example.RoomView>` | `List_RoomView` |
//! | `Page<RoomView>` | `Page_RoomView` |

use serde_json::{json, Value};

use crate::error::TypeShapeError;
use crate::types::{PayloadType, TypeIdent};

/// Canonical name for a base type and optional generic element.
pub fn resolve(base: &TypeIdent, element: Option<&TypeIdent>) -> String {
    match element {
        Some(element) => format!("{}_{}", base.simple_name(), element.simple_name()),
        None => base.simple_name().to_string(),
    }
}

/// Canonical name for a payload type.
pub fn canonical_name(payload: &PayloadType) -> String {
    resolve(&payload.base, payload.element.as_ref())
}

/// Parse a declared type such as `java.util.List<com.example.RoomView>`.
///
/// Accepts a plain name or a single-level generic with one argument.
///
/// # Errors
///
/// Returns `TypeShapeError` for nested or multi-argument generics and for
/// anything that is not a type name.
pub fn parse_type_expression(expression: &str) -> Result<PayloadType, TypeShapeError> {
    let shape_error = |reason: &str| TypeShapeError {
        expression: expression.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = expression.trim();
    let Some(open) = trimmed.find('<') else {
        if trimmed.contains('>') {
            return Err(shape_error("unbalanced generic brackets"));
        }
        return parse_ident(trimmed)
            .map(PayloadType::plain)
            .ok_or_else(|| shape_error("not a type name"));
    };

    let inner = trimmed[open + 1..]
        .strip_suffix('>')
        .ok_or_else(|| shape_error("unbalanced generic brackets"))?;
    if inner.contains('<') || inner.contains('>') {
        return Err(shape_error("nested generic types are not supported"));
    }
    if inner.contains(',') {
        return Err(shape_error("multiple generic arguments are not supported"));
    }

    let base = parse_ident(&trimmed[..open]).ok_or_else(|| shape_error("not a type name"))?;
    let element = parse_ident(inner).ok_or_else(|| shape_error("missing generic argument"))?;
    Ok(PayloadType::generic(base, element))
}

fn parse_ident(s: &str) -> Option<TypeIdent> {
    let s = s.trim();
    // unit type, only meaningful as a "no generic" argument
    if s == "()" {
        return Some(TypeIdent::new(s));
    }
    is_type_name(s).then(|| TypeIdent::new(s))
}

/// Whether `name` is a (possibly qualified) type name whose simple name is
/// safe to use as a document key.
pub fn is_type_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '$'))
        && name.split("::").all(|segment| !segment.is_empty())
        && !TypeIdent::new(name).simple_name().is_empty()
}

/// Escape a single JSON Pointer segment (RFC 6901).
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Reverse of [`escape_pointer`].
pub fn unescape_pointer(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// `{identifier}` placeholders in an address, in order of first appearance.
pub fn path_placeholders(address: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = address;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &after[end + 1..];
    }
    names
}

/// `{"$ref": "#/components/schemas/<name>"}`
pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", escape_pointer(name)) })
}

/// `{"$ref": "#/components/messages/<name>"}`
pub fn message_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/messages/{}", escape_pointer(name)) })
}

/// `{"$ref": "#/components/parameters/<name>"}`
pub fn parameter_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/parameters/{}", escape_pointer(name)) })
}

/// `{"$ref": "#/channels/<key>"}` with the channel key pointer-escaped.
pub fn channel_ref(key: &str) -> Value {
    json!({ "$ref": format!("#/channels/{}", escape_pointer(key)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_is_unqualified() {
        let payload = PayloadType::plain("com.example.RoomView");
        assert_eq!(canonical_name(&payload), "RoomView");
    }

    #[test]
    fn generic_name_joins_with_underscore() {
        let payload = PayloadType::generic("java.util.List", "com.example.RoomView");
        assert_eq!(canonical_name(&payload), "List_RoomView");
    }

    #[test]
    fn void_generic_resolves_to_base() {
        let payload = PayloadType::generic("RoomView", "Void");
        assert_eq!(canonical_name(&payload), "RoomView");
    }

    #[test]
    fn parse_plain_and_generic() {
        assert_eq!(
            parse_type_expression("com.example.RoomView").unwrap(),
            PayloadType::plain("com.example.RoomView")
        );
        assert_eq!(
            parse_type_expression(" java.util.List< com.example.RoomView > ").unwrap(),
            PayloadType::generic("java.util.List", "com.example.RoomView")
        );
        assert_eq!(
            parse_type_expression("Vec<crate::rooms::RoomView>").unwrap(),
            PayloadType::generic("Vec", "crate::rooms::RoomView")
        );
    }

    #[test]
    fn parse_rejects_multi_argument_generics() {
        let err = parse_type_expression("Map<String, RoomView>").unwrap_err();
        assert_eq!(err.expression, "Map<String, RoomView>");
        assert!(err.reason.contains("multiple"));
    }

    #[test]
    fn parse_rejects_nested_generics() {
        let err = parse_type_expression("List<List<RoomView>>").unwrap_err();
        assert!(err.reason.contains("nested"));
    }

    #[test]
    fn parse_rejects_malformed_expressions() {
        assert!(parse_type_expression("").is_err());
        assert!(parse_type_expression("List<>").is_err());
        assert!(parse_type_expression("List<RoomView").is_err());
        assert!(parse_type_expression("RoomView>").is_err());
        assert!(parse_type_expression("<RoomView>").is_err());
        assert!(parse_type_expression("Room View").is_err());
        assert!(parse_type_expression("RoomView[]").is_err());
    }

    #[test]
    fn type_names() {
        assert!(is_type_name("com.example.RoomView"));
        assert!(is_type_name("crate::rooms::RoomView"));
        assert!(is_type_name("Outer$Inner"));
        assert!(!is_type_name("Map<String,Room View>"));
        assert!(!is_type_name("a/b"));
        assert!(!is_type_name("com.example."));
        assert!(!is_type_name(""));
    }

    #[test]
    fn pointer_escaping() {
        assert_eq!(escape_pointer("/app/join"), "~1app~1join");
        assert_eq!(escape_pointer("a~b"), "a~0b");
        assert_eq!(unescape_pointer("~1app~1join"), "/app/join");
        assert_eq!(unescape_pointer(&escape_pointer("/x~1/y")), "/x~1/y");
    }

    #[test]
    fn placeholders_in_order_without_duplicates() {
        assert_eq!(
            path_placeholders("/rooms/{roomId}/players/{playerId}/{roomId}"),
            ["roomId", "playerId"]
        );
        assert!(path_placeholders("/status").is_empty());
        assert!(path_placeholders("/broken/{name").is_empty());
    }

    #[test]
    fn refs() {
        assert_eq!(
            channel_ref("/topic/rooms/{roomId}"),
            json!({"$ref": "#/channels/~1topic~1rooms~1{roomId}"})
        );
        assert_eq!(
            message_ref("List_RoomView"),
            json!({"$ref": "#/components/messages/List_RoomView"})
        );
        assert_eq!(
            schema_ref("RoomView"),
            json!({"$ref": "#/components/schemas/RoomView"})
        );
        assert_eq!(
            parameter_ref("roomId"),
            json!({"$ref": "#/components/parameters/roomId"})
        );
    }
}
