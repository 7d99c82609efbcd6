//! Typed access to tool call arguments.

use crate::error::SupportError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    /// Wrap raw arguments. Some models send the object as a JSON string; it is
    /// parsed here so accessors see an object either way.
    pub fn new(value: serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(trimmed).unwrap_or(serde_json::Value::String(raw))
                }
            }
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, SupportError> {
        self.get_str_opt(key)
            .ok_or_else(|| SupportError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_str_reports_missing_key() {
        let args = ToolArguments::new(serde_json::json!({"iata_code": "SFO"}));
        assert_eq!(args.get_str("iata_code").unwrap(), "SFO");
        assert!(matches!(args.get_str("flight_number"), Err(SupportError::InvalidArgument(_))));
    }

    #[test]
    fn string_encoded_arguments_are_parsed() {
        let args = ToolArguments::new(serde_json::json!("{\"name\": \"Jane Doe\"}"));
        assert_eq!(args.get_str_opt("name"), Some("Jane Doe"));
    }

    #[test]
    fn blank_string_becomes_empty_object() {
        let args = ToolArguments::new(serde_json::json!("   "));
        assert!(args.raw().as_object().unwrap().is_empty());
    }
}
