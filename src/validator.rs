//! # Schema Validation
//!
//! Hooks depend on JSON Schema evaluation only through the [`SchemaValidator`]
//! trait. [`JsonSchemaValidator`] is the default implementation, backed by the
//! `jsonschema` crate and compiled once per hook.
//!
//! ## Settings
//!
//! | Variable | Default | Effect |
//! |----------|---------|--------|
//! | `BRRTR_VALIDATION_COERCE_TYPES` | `false` | Decode string query/cookie values to the declared property type before validating |
//! | `BRRTR_VALIDATION_ALL_ERRORS` | `true` | Report every violation instead of only the first |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;

/// One schema violation, as reported in a 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorDetail {
    /// JSON pointer to the offending value (empty for the root)
    pub instance_path: String,
    /// JSON pointer to the schema keyword that failed
    pub schema_path: String,
    /// Human-readable description
    pub message: String,
}

/// Narrow seam to a JSON Schema engine.
///
/// Implementations are compiled for one schema and shared across requests.
pub trait SchemaValidator: Send + Sync {
    /// Validate `value`, returning every violation on failure.
    fn validate(&self, value: &Value) -> Result<(), Vec<ValidationErrorDetail>>;
}

/// Validation behaviour shared by every parameter hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Decode string values to the type declared by the property schema
    pub coerce_types: bool,
    /// Report all violations (otherwise only the first)
    pub all_errors: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            coerce_types: false,
            all_errors: true,
        }
    }
}

impl ValidationSettings {
    /// Load settings from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `BRRTR_VALIDATION_*` overrides on top of `self`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let flag = |name: &str, fallback: bool| {
            env::var(name)
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(fallback)
        };
        Self {
            coerce_types: flag("BRRTR_VALIDATION_COERCE_TYPES", self.coerce_types),
            all_errors: flag("BRRTR_VALIDATION_ALL_ERRORS", self.all_errors),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// [`SchemaValidator`] backed by a compiled `jsonschema::Validator`.
pub struct JsonSchemaValidator {
    compiled: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns the engine's description of the problem if the schema is not a
    /// valid JSON Schema document.
    pub fn compile(schema: &Value) -> Result<Self, String> {
        jsonschema::validator_for(schema)
            .map(|compiled| Self { compiled })
            .map_err(|e| e.to_string())
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, value: &Value) -> Result<(), Vec<ValidationErrorDetail>> {
        let errors: Vec<ValidationErrorDetail> = self
            .compiled
            .iter_errors(value)
            .map(|e| ValidationErrorDetail {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Decode string members of `value` according to the property schemas of
/// `schema`.
///
/// Only object values are touched; members whose string cannot be decoded are
/// left as strings so validation reports them. Array properties accept either
/// a comma-separated string (`tag=a,b`) or an array of strings from a repeated
/// key (`tag=a&tag=b`).
#[must_use]
pub fn coerce_params(value: &Value, schema: &Value) -> Value {
    let (Some(object), Some(properties)) = (
        value.as_object(),
        schema.get("properties").and_then(Value::as_object),
    ) else {
        return value.clone();
    };

    let coerced: Map<String, Value> = object
        .iter()
        .map(|(name, member)| {
            let decoded = match (member, properties.get(name)) {
                (Value::String(raw), Some(prop_schema)) => decode_value(raw, prop_schema),
                (Value::Array(items), Some(prop_schema)) => decode_repeated(items, prop_schema),
                _ => member.clone(),
            };
            (name.clone(), decoded)
        })
        .collect();
    Value::Object(coerced)
}

fn convert_primitive(val: &str, schema: Option<&Value>) -> Value {
    match schema.and_then(|s| s.get("type")).and_then(Value::as_str) {
        Some("integer") => val
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(val.to_string())),
        Some("number") => val
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(val.to_string())),
        Some("boolean") => val
            .parse::<bool>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(val.to_string())),
        _ => Value::String(val.to_string()),
    }
}

fn decode_value(raw: &str, schema: &Value) -> Value {
    match schema.get("type").and_then(Value::as_str) {
        Some("array") => {
            let items_schema = schema.get("items");
            let parts = raw
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|p| convert_primitive(p.trim(), items_schema))
                .collect::<Vec<_>>();
            Value::Array(parts)
        }
        _ => convert_primitive(raw, Some(schema)),
    }
}

/// Repeated query keys (`?tag=a&tag=b`) arrive as an array of strings.
fn decode_repeated(items: &[Value], schema: &Value) -> Value {
    if schema.get("type").and_then(Value::as_str) != Some("array") {
        return Value::Array(items.to_vec());
    }
    let items_schema = schema.get("items");
    Value::Array(
        items
            .iter()
            .map(|item| match item {
                Value::String(raw) => convert_primitive(raw, items_schema),
                other => other.clone(),
            })
            .collect(),
    )
}
