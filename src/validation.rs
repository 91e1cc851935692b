//! Field validation for the edit path.
//!
//! Validation runs before commit: on failure the stored record is retained
//! unchanged and the caller is informed synchronously.

use crate::error::{DeployCoreError, Result};
use crate::models::{DeploymentObject, ObjectDetails};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

static NEW_VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn new_version_pattern() -> &'static Regex {
    NEW_VERSION_PATTERN
        .get_or_init(|| Regex::new(r"^\d+\.\d+(\.\d+)?$").expect("version pattern is valid"))
}

/// Validate a flow object's new-version string against the dotted-version
/// pattern (`1.0` or `1.2.3`)
pub fn validate_new_version(version: &str) -> Result<()> {
    if new_version_pattern().is_match(version) {
        Ok(())
    } else {
        Err(DeployCoreError::Validation(format!(
            "Invalid version format '{version}' for new version; use a format like 1.0 or 1.2.3"
        )))
    }
}

/// Parse raw editor text into structured service properties. The text must
/// be a JSON object; anything else is rejected before it reaches the store.
pub fn parse_service_properties(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        DeployCoreError::Validation(format!("Invalid JSON format in service properties: {e}"))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DeployCoreError::Validation(format!(
            "Service properties must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Type-dispatched validation applied by the edit path before commit
pub fn validate_object(object: &DeploymentObject) -> Result<()> {
    match &object.details {
        ObjectDetails::Flow(flow) => validate_new_version(&flow.new_version),
        // Script, service, and S2S payloads are fully typed; nothing left to check
        ObjectDetails::Script(_) | ObjectDetails::Service(_) | ObjectDetails::S2sConfig(_) => {
            Ok(())
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_version_formats() {
        assert!(validate_new_version("1.0").is_ok());
        assert!(validate_new_version("1.2.3").is_ok());
        assert!(validate_new_version("10.20.30").is_ok());
        assert!(validate_new_version("0.1").is_ok());
    }

    #[test]
    fn test_invalid_version_formats() {
        assert!(validate_new_version("abc").is_err());
        assert!(validate_new_version("1").is_err());
        assert!(validate_new_version("1.2.3.4").is_err());
        assert!(validate_new_version("1.2-rc1").is_err());
        assert!(validate_new_version("v1.2").is_err());
        assert!(validate_new_version("").is_err());
    }

    #[test]
    fn test_parse_service_properties_object() {
        let map = parse_service_properties(r#"{"Max Pool Size": "10"}"#).unwrap();
        assert_eq!(map.get("Max Pool Size").unwrap(), "10");
    }

    #[test]
    fn test_parse_service_properties_malformed() {
        let err = parse_service_properties("{invalid json").unwrap_err();
        assert!(matches!(err, DeployCoreError::Validation(_)));
    }

    #[test]
    fn test_parse_service_properties_non_object() {
        let err = parse_service_properties(r#"["a", "b"]"#).unwrap_err();
        assert!(matches!(err, DeployCoreError::Validation(_)));
        assert!(err.to_string().contains("an array"));
    }
}
