//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Set when `data` is substitute content shown after a failed load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                error: None,
            },
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.meta.error = error;
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format data that may be a fallback, recording the load error in `meta`
pub fn format_json_with_error<T: Serialize + ?Sized>(
    data: &T,
    error: Option<&str>,
) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data).with_error(error.map(str::to_string));
    serde_json::to_string_pretty(&output)
}
