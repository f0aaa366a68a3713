//! Block records as authored in page content.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::params::Params;

/// A typed, parameterized unit of page content.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// Block type name (e.g., "table")
    pub block_type: String,

    /// Parameters for the renderer
    pub params: Params,

    /// Why the authored entry could not be read as a record
    pub error: Option<SchemaError>,
}

impl BlockRecord {
    /// Create a block record.
    pub fn new(block_type: impl Into<String>, params: Params) -> Self {
        Self {
            block_type: block_type.into(),
            params,
            error: None,
        }
    }

    /// A stand-in for an entry that is not a valid record.
    ///
    /// The composer renders it as a failed placeholder.
    pub fn invalid(error: SchemaError) -> Self {
        Self {
            block_type: String::new(),
            params: Params::new(),
            error: Some(error),
        }
    }

    /// Build a record, keeping a malformed entry as an invalid record.
    pub fn from_value_lenient(value: Value) -> Self {
        Self::from_value(value).unwrap_or_else(Self::invalid)
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Build a record from a JSON value.
    ///
    /// Accepts the flat shape `{type, ...params}` and the nested shape
    /// `{type, params: {...}}`. Nested entries win over flat ones.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let Value::Object(mut map) = value else {
            return Err(SchemaError::NotAnObject);
        };

        let block_type = match map.remove("type") {
            Some(Value::String(t)) if !t.trim().is_empty() => t.trim().to_string(),
            Some(_) | None => return Err(SchemaError::MissingType),
        };

        let nested = match map.remove("params") {
            Some(Value::Object(nested)) => Some(nested),
            Some(Value::Null) | None => None,
            Some(other) => {
                // Not a parameter object; keep it as an ordinary parameter.
                map.insert("params".to_string(), other);
                None
            }
        };

        let mut params = map;
        if let Some(nested) = nested {
            params.extend(nested);
        }

        Ok(Self::new(block_type, params))
    }

    /// Record as the nested JSON shape.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "type": self.block_type,
            "params": self.params,
        })
    }
}

/// Malformed entries deserialize as invalid records so one bad entry
/// never fails the list it sits in.
impl<'de> Deserialize<'de> for BlockRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(BlockRecord::from_value_lenient(value))
    }
}

impl Serialize for BlockRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Errors for malformed block records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Block record must be an object")]
    NotAnObject,

    #[error("Block record is missing a string 'type'")]
    MissingType,
}
