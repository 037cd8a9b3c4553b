//! Document linting - static analysis of AsyncAPI documents.
//!
//! Checks a generated (or hand-edited) document for:
//! - an unsupported `asyncapi` version
//! - `$ref` values that don't resolve inside the document
//! - channel address placeholders without a declared parameter
//! - unused schemas and messages

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::loader::{load_auto, navigate_fragment};
use crate::naming::{escape_pointer, path_placeholders};
use crate::types::ASYNCAPI_VERSION;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic message from linting.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// JSON Pointer to the issue (e.g., "/channels/~1app~1join/messages")
    pub path: String,
    pub message: String,
}

/// Result of linting one document.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub errors: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }
}

/// Lint a document loaded from a file path or URL.
///
/// # Errors
///
/// Returns `LoadError` if the document can't be loaded or parsed.
pub fn lint_file(source: &str) -> Result<LintResult, LoadError> {
    Ok(lint(&load_auto(source)?))
}

/// Lint an AsyncAPI document.
pub fn lint(document: &Value) -> LintResult {
    let mut diagnostics = Vec::new();

    match document.get("asyncapi").and_then(Value::as_str) {
        Some(ASYNCAPI_VERSION) => {}
        Some(other) => diagnostics.push(error(
            "E001",
            "/asyncapi",
            format!("unsupported AsyncAPI version {}, expected {}", other, ASYNCAPI_VERSION),
        )),
        None => diagnostics.push(error("E001", "/asyncapi", "missing asyncapi version".into())),
    }

    let mut refs = HashSet::new();
    check_refs(document, "", document, &mut refs, &mut diagnostics);
    check_channel_parameters(document, &mut diagnostics);
    check_unused(document, "schemas", "W002", &refs, &mut diagnostics);
    check_unused(document, "messages", "W003", &refs, &mut diagnostics);

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    LintResult {
        errors,
        warnings: diagnostics.len() - errors,
        diagnostics,
    }
}

fn error(code: &str, path: &str, message: String) -> Diagnostic {
    Diagnostic {
        severity: Severity::Error,
        code: code.to_string(),
        path: path.to_string(),
        message,
    }
}

fn warning(code: &str, path: &str, message: String) -> Diagnostic {
    Diagnostic {
        severity: Severity::Warning,
        code: code.to_string(),
        path: path.to_string(),
        message,
    }
}

/// Recursively check $ref values, recording every internal target.
fn check_refs(
    value: &Value,
    path: &str,
    root: &Value,
    refs: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_val)) = map.get("$ref") {
                if !ref_val.starts_with('#') {
                    diagnostics.push(warning(
                        "W001",
                        path,
                        format!("external reference not checked: {}", ref_val),
                    ));
                } else if navigate_fragment(root, ref_val).is_err() {
                    diagnostics.push(error(
                        "E002",
                        path,
                        format!("reference not found: {}", ref_val),
                    ));
                } else {
                    refs.insert(ref_val.clone());
                }
            }

            for (key, val) in map {
                let child_path = format!("{}/{}", path, escape_pointer(key));
                check_refs(val, &child_path, root, refs, diagnostics);
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                let child_path = format!("{}/{}", path, i);
                check_refs(item, &child_path, root, refs, diagnostics);
            }
        }
        _ => {}
    }
}

/// Every `{placeholder}` in a channel address needs a channel parameter.
fn check_channel_parameters(document: &Value, diagnostics: &mut Vec<Diagnostic>) {
    let Some(channels) = document.get("channels").and_then(Value::as_object) else {
        return;
    };

    for (key, channel) in channels {
        let address = channel
            .get("address")
            .and_then(Value::as_str)
            .unwrap_or(key);
        let declared = channel.get("parameters").and_then(Value::as_object);
        for name in path_placeholders(address) {
            if !declared.map(|p| p.contains_key(&name)).unwrap_or(false) {
                diagnostics.push(error(
                    "E003",
                    &format!("/channels/{}/parameters", escape_pointer(key)),
                    format!("address placeholder {{{}}} has no parameter", name),
                ));
            }
        }
    }
}

/// Components that no `$ref` points at.
fn check_unused(
    document: &Value,
    section: &str,
    code: &str,
    refs: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(entries) = document
        .get("components")
        .and_then(|c| c.get(section))
        .and_then(Value::as_object)
    else {
        return;
    };

    for name in entries.keys() {
        let pointer = format!("#/components/{}/{}", section, escape_pointer(name));
        if !refs.contains(&pointer) {
            diagnostics.push(warning(
                code,
                &pointer[1..],
                format!("{} '{}' is never referenced", section.trim_end_matches('s'), name),
            ));
        }
    }
}
