use super::reader::{FromJson, JsonObject, MappingError};
use crate::domain::{ReceiveResult, SendResult};

const MESSAGE_ID: &str = "messageid";
const MESSAGE: &str = "message";
const SENDER: &str = "sender";
const RECEPTOR: &str = "receptor";
const DATE: &str = "date";
const STATUS: &str = "status";
const STATUS_TEXT: &str = "statustext";
const COST: &str = "cost";

impl FromJson for ReceiveResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            message_id: object.optional_i64(MESSAGE_ID)?,
            message: object.string_or(MESSAGE, "")?,
            sender: object.string_or(SENDER, "")?,
            receptor: object.string_or(RECEPTOR, "")?,
            date: object.optional_i64(DATE)?,
        })
    }
}

impl FromJson for SendResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            message_id: object.i64_or(MESSAGE_ID, 0)?,
            message: object.string_or(MESSAGE, "")?,
            status: object.i32_or(STATUS, Self::MISSING_STATUS)?,
            status_text: object.string_or(STATUS_TEXT, "")?,
            sender: object.string_or(SENDER, "")?,
            receptor: object.string_or(RECEPTOR, "")?,
            date: object.i64_or(DATE, 0)?,
            cost: object.i32_or(COST, 0)?,
        })
    }
}
