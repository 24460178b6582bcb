//! Schema metadata for models
//!
//! Every model declares its fields once as a `&'static [FieldSpec]`. The
//! attribute-to-type map, the attribute-to-wire-key map, and the JSON Schema
//! are all derived from that table, so the wire contract lives in one place.

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Configuration;
use crate::error::{ModelError, Result};
use crate::mapping::{Mapping, Serializable};

/// Declared type of a field on the wire
#[derive(Debug, Clone, Copy)]
pub enum WireType {
    String,
    Integer,
    Boolean,
    StringList,
    /// Nested model; `schema(strict)` produces its JSON Schema
    Model {
        type_name: &'static str,
        schema: fn(bool) -> Value,
    },
    ModelList {
        type_name: &'static str,
        schema: fn(bool) -> Value,
    },
}

impl WireType {
    /// Type name in the generator's notation (`str`, `list[str]`, ...)
    pub fn type_name(&self) -> String {
        match self {
            WireType::String => "str".to_string(),
            WireType::Integer => "int".to_string(),
            WireType::Boolean => "bool".to_string(),
            WireType::StringList => "list[str]".to_string(),
            WireType::Model { type_name, .. } => type_name.to_string(),
            WireType::ModelList { type_name, .. } => format!("list[{}]", type_name),
        }
    }

    fn json_type(&self) -> &'static str {
        match self {
            WireType::String => "string",
            WireType::Integer => "integer",
            WireType::Boolean => "boolean",
            WireType::StringList | WireType::ModelList { .. } => "array",
            WireType::Model { .. } => "object",
        }
    }

    fn json_schema(&self, strict: bool, nullable: bool) -> Value {
        let mut schema = match self {
            WireType::Model { schema, .. } => schema(strict),
            WireType::StringList => json!({"items": {"type": "string"}}),
            WireType::ModelList { schema, .. } => json!({"items": schema(strict)}),
            _ => json!({}),
        };
        let ty = if nullable {
            json!([self.json_type(), "null"])
        } else {
            json!(self.json_type())
        };
        if let Value::Object(ref mut obj) = schema {
            obj.insert("type".to_string(), ty);
        }
        schema
    }
}

/// One declared field: attribute name, wire key, type, presence rule
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub attr: &'static str,
    pub wire_key: &'static str,
    pub wire_type: WireType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(
        attr: &'static str,
        wire_key: &'static str,
        wire_type: WireType,
        required: bool,
    ) -> Self {
        Self {
            attr,
            wire_key,
            wire_type,
            required,
        }
    }
}

/// Build the JSON Schema of a field table
///
/// `strict` mirrors client-side validation: when off, required fields may be
/// null or missing.
pub fn json_schema_for(type_name: &str, fields: &[FieldSpec], strict: bool) -> Value {
    let mut properties = Mapping::new();
    let mut required = Vec::new();

    for field in fields {
        let nullable = !(strict && field.required);
        properties.insert(
            field.wire_key.to_string(),
            field.wire_type.json_schema(strict, nullable),
        );
        if strict && field.required {
            required.push(Value::String(field.wire_key.to_string()));
        }
    }

    let mut schema = json!({
        "title": type_name,
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = Value::Array(required);
    }
    schema
}

/// A generated API model
pub trait Model: Serializable + Sized + 'static {
    /// Name of the type in the API definition
    const TYPE_NAME: &'static str;

    /// Declared fields in wire order
    const FIELDS: &'static [FieldSpec];

    /// Unvalidated wire shape used at the deserialization boundary
    type Raw: DeserializeOwned;

    /// Build a validated model from its wire shape
    fn from_raw(raw: Self::Raw, config: &Configuration) -> Result<Self>;

    /// Attribute name -> type name
    fn openapi_types() -> Vec<(&'static str, String)> {
        Self::FIELDS
            .iter()
            .map(|f| (f.attr, f.wire_type.type_name()))
            .collect()
    }

    /// Attribute name -> wire key
    fn attribute_map() -> Vec<(&'static str, &'static str)> {
        Self::FIELDS.iter().map(|f| (f.attr, f.wire_key)).collect()
    }

    fn json_schema(strict: bool) -> Value {
        json_schema_for(Self::TYPE_NAME, Self::FIELDS, strict)
    }

    /// Build from an already parsed document; type mismatches are parse errors
    fn from_value(value: &Value, config: &Configuration) -> Result<Self> {
        let raw = <Self::Raw as Deserialize>::deserialize(value).map_err(|e| {
            ModelError::ParseError {
                details: format!("{}: {}", Self::TYPE_NAME, e),
            }
        })?;
        Self::from_raw(raw, config)
    }

    fn from_json(json: &str, config: &Configuration) -> Result<Self> {
        let raw: Self::Raw = serde_json::from_str(json)?;
        tracing::debug!(model = Self::TYPE_NAME, "parsed JSON document");
        Self::from_raw(raw, config)
    }

    /// YAML goes through a JSON value first so scalars keep their YAML
    /// type (`name: 1` is a number, not the string "1")
    fn from_yaml(yaml: &str, config: &Configuration) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        tracing::debug!(model = Self::TYPE_NAME, "parsed YAML document");
        Self::from_value(&value, config)
    }

    /// Equality against a value of any type; false unless `other` is `Self`
    fn eq_dyn(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self.to_mapping() == other.to_mapping())
    }
}

/// Schema validation error details
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// JSON pointer to the offending value (empty for the document root)
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "[{}] {}", path, self.message)
    }
}

/// Compiled JSON Schema of one model
pub struct SchemaValidator {
    model: &'static str,
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    pub fn for_model<M: Model>(config: &Configuration) -> Result<Self> {
        let schema = M::json_schema(config.client_side_validation);
        let validator =
            jsonschema::Validator::new(&schema).map_err(|e| ModelError::SchemaCompile {
                reason: format!("{}: {}", M::TYPE_NAME, e),
            })?;
        Ok(Self {
            model: M::TYPE_NAME,
            validator,
        })
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Check `value`, collecting every violation
    pub fn validate(&self, value: &Value) -> Result<()> {
        let errors: Vec<SchemaError> = self
            .validator
            .iter_errors(value)
            .map(|e| SchemaError {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(model = self.model, count = errors.len(), "schema violations");
            Err(ModelError::SchemaValidationFailed { errors })
        }
    }
}
