//! JSON format implementation
//!
//! Reads and writes the canonical tree in its wire shape, the nested `object`-tagged mapping the
//! editor exchanges. This is the only lossless format: parsing what it serialized gives back
//! the same value.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::Value;
use std::collections::HashMap;

/// Format implementation for the canonical tree as JSON
pub struct JsonFormat;

impl JsonFormat {
    fn to_string(value: &Value, pretty: bool) -> Result<String, FormatError> {
        let result = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Canonical editor value as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        Self::to_string(value, false)
    }

    fn serialize_with_options(
        &self,
        value: &Value,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = false;
        for (key, raw) in options {
            match key.as_str() {
                "pretty" => {
                    pretty = match raw.as_str() {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(FormatError::NotSupported(format!(
                                "Invalid value '{other}' for json option 'pretty'"
                            )))
                        }
                    }
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown json option '{other}'"
                    )))
                }
            }
        }
        Self::to_string(value, pretty)
    }
}
