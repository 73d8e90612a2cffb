use serde_json::{Map, Number, Value};

#[derive(Debug, thiserror::Error)]
/// Errors raised while mapping gateway JSON into result types.
///
/// Missing or `null` fields are never errors; they take the field's default.
pub enum MappingError {
    /// The payload is not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A field holds a value that cannot be read as the expected type.
    #[error("field `{field}` must be {expected}, found {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A numeric field does not fit the target integer type.
    #[error("field `{field}` does not fit {expected}: {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    /// The response body is not valid JSON or lacks the envelope.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry of the response envelope failed to map.
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<MappingError>,
    },
}

/// Types that can be built from one JSON object returned by the gateway.
pub trait FromJson: Sized {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError>;

    /// Map a JSON value, failing only when it is not an object or a field has
    /// the wrong type.
    fn from_json(value: &Value) -> Result<Self, MappingError> {
        Self::from_object(&JsonObject::new(value)?)
    }
}

#[derive(Debug, Clone, Copy)]
/// Read-only view over a JSON object with per-type "value or default" accessors.
///
/// Keys are matched exactly; an absent key and a `null` value are treated alike.
pub struct JsonObject<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    pub fn new(value: &'a Value) -> Result<Self, MappingError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(MappingError::NotAnObject {
                found: kind(other),
            }),
        }
    }

    pub fn from_map(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The value under `key`, unless absent or `null`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    /// Text field; numbers and booleans are rendered as their JSON text.
    pub fn string_or(&self, key: &'static str, default: &str) -> Result<String, MappingError> {
        match self.get(key) {
            None => Ok(default.to_owned()),
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Number(number)) => Ok(number.to_string()),
            Some(Value::Bool(flag)) => Ok(flag.to_string()),
            Some(other) => Err(invalid_type(key, "a string", other)),
        }
    }

    pub fn optional_i64(&self, key: &'static str) -> Result<Option<i64>, MappingError> {
        self.get(key).map(|value| coerce_i64(key, value)).transpose()
    }

    pub fn i64_or(&self, key: &'static str, default: i64) -> Result<i64, MappingError> {
        Ok(self.optional_i64(key)?.unwrap_or(default))
    }

    pub fn optional_i32(&self, key: &'static str) -> Result<Option<i32>, MappingError> {
        self.optional_i64(key)?
            .map(|value| {
                i32::try_from(value).map_err(|_| MappingError::OutOfRange {
                    field: key,
                    expected: "a 32-bit integer",
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    pub fn i32_or(&self, key: &'static str, default: i32) -> Result<i32, MappingError> {
        Ok(self.optional_i32(key)?.unwrap_or(default))
    }
}

/// Integers, integral floats, and decimal strings are accepted.
fn coerce_i64(key: &'static str, value: &Value) -> Result<i64, MappingError> {
    match value {
        Value::Number(number) => number_to_i64(key, number),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_type(key, "an integer", value)),
        other => Err(invalid_type(key, "an integer", other)),
    }
}

fn number_to_i64(key: &'static str, number: &Number) -> Result<i64, MappingError> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.is_u64() {
        return Err(MappingError::OutOfRange {
            field: key,
            expected: "a 64-bit integer",
            value: number.to_string(),
        });
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => Ok(float as i64),
        _ => Err(MappingError::InvalidType {
            field: key,
            expected: "an integer",
            found: number.to_string(),
        }),
    }
}

fn invalid_type(key: &'static str, expected: &'static str, found: &Value) -> MappingError {
    MappingError::InvalidType {
        field: key,
        expected,
        found: found.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
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
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_null_fields_take_defaults() {
        let value = json!({"text": null, "count": null});
        let object = JsonObject::new(&value).unwrap();

        assert_eq!(object.string_or("text", "fallback").unwrap(), "fallback");
        assert_eq!(object.string_or("missing", "").unwrap(), "");
        assert_eq!(object.i64_or("count", 7).unwrap(), 7);
        assert_eq!(object.i32_or("missing", -1).unwrap(), -1);
        assert_eq!(object.optional_i64("count").unwrap(), None);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let value = json!({"defaultsender": "3000"});
        let object = JsonObject::new(&value).unwrap();
        assert_eq!(object.string_or("DefaultSender", "Unknown").unwrap(), "Unknown");
    }

    #[test]
    fn integers_accept_numeric_strings_and_integral_floats() {
        let value = json!({"a": "  42 ", "b": 12.0, "c": -3});
        let object = JsonObject::new(&value).unwrap();
        assert_eq!(object.i64_or("a", 0).unwrap(), 42);
        assert_eq!(object.i64_or("b", 0).unwrap(), 12);
        assert_eq!(object.i32_or("c", 0).unwrap(), -3);
    }

    #[test]
    fn non_numeric_text_in_numeric_field_is_an_error() {
        let value = json!({"cost": "cheap", "rate": 1.5, "flag": true});
        let object = JsonObject::new(&value).unwrap();

        let err = object.i32_or("cost", 0).unwrap_err();
        match err {
            MappingError::InvalidType {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "cost");
                assert_eq!(expected, "an integer");
                assert_eq!(found, "\"cheap\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            object.i64_or("rate", 0),
            Err(MappingError::InvalidType { field: "rate", .. })
        ));
        assert!(matches!(
            object.i64_or("flag", 0),
            Err(MappingError::InvalidType { field: "flag", .. })
        ));
    }

    #[test]
    fn out_of_range_values_are_reported() {
        let value = json!({"small": 3_000_000_000_i64, "huge": u64::MAX});
        let object = JsonObject::new(&value).unwrap();
        assert!(matches!(
            object.i32_or("small", 0),
            Err(MappingError::OutOfRange { field: "small", .. })
        ));
        assert_eq!(object.i64_or("small", 0).unwrap(), 3_000_000_000);
        assert!(matches!(
            object.i64_or("huge", 0),
            Err(MappingError::OutOfRange { field: "huge", .. })
        ));
    }

    #[test]
    fn strings_render_scalars_and_reject_containers() {
        let value = json!({"n": 3000, "b": false, "list": [1]});
        let object = JsonObject::new(&value).unwrap();
        assert_eq!(object.string_or("n", "").unwrap(), "3000");
        assert_eq!(object.string_or("b", "").unwrap(), "false");
        let err = object.string_or("list", "").unwrap_err();
        assert_eq!(err.to_string(), "field `list` must be a string, found [1]");
    }

    #[test]
    fn non_objects_are_structural_errors() {
        let err = JsonObject::new(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
        assert!(matches!(
            JsonObject::new(&Value::Null),
            Err(MappingError::NotAnObject { found: "null" })
        ));
    }
}
