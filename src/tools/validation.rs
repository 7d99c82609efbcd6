//! Validate model-supplied tool arguments against the tool's JSON Schema.
//!
//! This catches structurally broken calls (missing fields, wrong JSON types)
//! before a tool runs. Format rules such as "two letters and digits" belong to
//! [`crate::validators`] and produce customer guidance instead.

/// Top-level check: object type, required field presence, property types.
///
/// Returns `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if schema.get("type").and_then(|v| v.as_str()) == Some("object") && !args.is_object() {
        return Err(format!(
            "expected object arguments, got {}",
            json_type_name(args)
        ));
    }

    let Some(obj) = args.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for name in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(name) {
                return Err(format!("missing required field '{name}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            let expected = properties
                .get(key)
                .and_then(|p| p.get("type"))
                .and_then(|t| t.as_str());
            if let Some(expected) = expected {
                if !value_matches_type(value, expected) {
                    return Err(format!(
                        "field '{key}' expected type '{expected}', got {}",
                        json_type_name(value)
                    ));
                }
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seat_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "confirmation_number": { "type": "string" },
                "new_seat": { "type": "string" },
            },
            "required": ["confirmation_number", "new_seat"],
        })
    }

    #[test]
    fn rejects_non_object_args() {
        let err = validate_arguments(&json!("12A"), &seat_schema()).unwrap_err();
        assert!(err.contains("expected object"));
    }

    #[test]
    fn rejects_when_any_required_field_is_absent() {
        let err = validate_arguments(&json!({ "confirmation_number": "ABC123" }), &seat_schema())
            .unwrap_err();
        assert_eq!(err, "missing required field 'new_seat'");
    }

    #[test]
    fn rejects_number_where_string_expected() {
        let err = validate_arguments(
            &json!({ "confirmation_number": 123456, "new_seat": "12A" }),
            &seat_schema(),
        )
        .unwrap_err();
        assert!(err.contains("field 'confirmation_number' expected type 'string'"));
    }

    #[test]
    fn accepts_complete_args_and_ignores_extras() {
        let args = json!({ "confirmation_number": "ABC123", "new_seat": "12A", "note": true });
        assert!(validate_arguments(&args, &seat_schema()).is_ok());
    }

    #[test]
    fn accepts_anything_against_empty_schema() {
        assert!(validate_arguments(&serde_json::Value::Null, &json!({})).is_ok());
    }
}
