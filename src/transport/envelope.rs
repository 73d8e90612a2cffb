use serde::Deserialize;
use serde_json::Value;

use super::reader::{FromJson, MappingError};
use crate::domain::{ApiResponse, ReturnCode};

#[derive(Debug, Deserialize)]
struct EnvelopeJson {
    #[serde(rename = "return")]
    return_block: ReturnJson,
    #[serde(default)]
    entries: Value,
}

#[derive(Debug, Deserialize)]
struct ReturnJson {
    status: ReturnStatus,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReturnStatus {
    Int(i32),
    Text(String),
}

impl ReturnStatus {
    fn into_return_code(self) -> Result<ReturnCode, MappingError> {
        match self {
            Self::Int(code) => Ok(ReturnCode::new(code)),
            Self::Text(text) => match text.trim().parse::<i32>() {
                Ok(code) => Ok(ReturnCode::new(code)),
                Err(_) => Err(MappingError::InvalidType {
                    field: "status",
                    expected: "an integer",
                    found: text,
                }),
            },
        }
    }
}

/// Decode a gateway response body of the form
/// `{"return": {"status": .., "message": ..}, "entries": ..}`.
///
/// `entries` may be an array, a single object, or absent/`null`. The return
/// status may arrive as a number or as numeric text.
pub fn decode_response<T: FromJson>(body: &str) -> Result<ApiResponse<T>, MappingError> {
    let parsed: EnvelopeJson = serde_json::from_str(body)?;
    let return_code = parsed.return_block.status.into_return_code()?;
    if return_code.known().is_none() {
        tracing::debug!(status = return_code.as_i32(), "unrecognized return code");
    }

    let entries = match &parsed.entries {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| map_entry(index, item))
            .collect::<Result<Vec<T>, MappingError>>()?,
        single => vec![map_entry(0, single)?],
    };

    tracing::debug!(
        status = return_code.as_i32(),
        entries = entries.len(),
        "decoded response envelope"
    );

    Ok(ApiResponse {
        return_code,
        message: parsed.return_block.message.unwrap_or_default(),
        entries,
    })
}

fn map_entry<T: FromJson>(index: usize, item: &Value) -> Result<T, MappingError> {
    T::from_json(item).map_err(|err| {
        tracing::warn!(index, error = %err, "response entry failed to map");
        MappingError::Entry {
            index,
            source: Box::new(err),
        }
    })
}
