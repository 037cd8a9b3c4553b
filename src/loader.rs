//! Loading JSON and YAML documents from files, strings, and HTTP URLs.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::naming::unescape_pointer;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Text format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Infer the format from a file name or URL: `.yaml`/`.yml` is YAML,
    /// anything else is JSON.
    pub fn from_source(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        let path = lower.split(['?', '#']).next().unwrap_or(&lower);
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Json
        }
    }
}

/// Parse a document from a string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` or `LoadError::InvalidYaml` on parse failure.
pub fn load_str(content: &str, format: Format) -> Result<Value, LoadError> {
    match format {
        Format::Json => {
            serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
        }
        Format::Yaml => {
            serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml { source })
        }
    }
}

/// Load a document from a file path, choosing the format by extension.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or a parse error if the content doesn't match its format.
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_str(&content, Format::from_source(&path.to_string_lossy()))
}

/// Load a document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails,
/// or a parse error if the body doesn't match its format.
#[cfg(feature = "remote")]
pub fn load_url(url: &str) -> Result<Value, LoadError> {
    let network_error = |source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(network_error)?;

    let is_yaml_content = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("yaml"))
        .unwrap_or(false);

    let body = response.text().map_err(network_error)?;
    let format = if is_yaml_content {
        Format::Yaml
    } else {
        Format::from_source(url)
    };
    load_str(&body, format)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a document from a file path or URL.
///
/// URL loading requires the `remote` feature.
pub fn load_auto(source: &str) -> Result<Value, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_file(Path::new(source))
    }
}

/// Navigate a JSON Pointer fragment (e.g., `#/components/schemas/RoomView`).
///
/// Segments are unescaped (`~1` = `/`, `~0` = `~`) before lookup.
pub fn navigate_fragment<'a>(root: &'a Value, fragment: &str) -> Result<&'a Value, LoadError> {
    let path = fragment.trim_start_matches('#').trim_start_matches('/');
    if path.is_empty() {
        return Ok(root);
    }

    let mut current = root;
    for part in path.split('/') {
        let key = unescape_pointer(part);
        let next = match current {
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            other => other.get(&key),
        };
        current = next.ok_or_else(|| LoadError::PointerNotFound {
            pointer: fragment.to_string(),
        })?;
    }
    Ok(current)
}
