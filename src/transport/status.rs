use super::reader::{FromJson, JsonObject, MappingError};
use crate::domain::{MessageStatusCode, StatusByLocalIdResult, StatusResult};

const MESSAGE_ID: &str = "messageid";
const STATUS: &str = "status";
const STATUS_TEXT: &str = "statustext";
const LOCAL_ID: &str = "localid";

impl FromJson for StatusResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        let status = object.optional_i64(STATUS)?.map(MessageStatusCode::new);
        if let Some(code) = status.filter(|code| code.is_unrecognized()) {
            tracing::debug!(status = code.as_i64(), "unrecognized delivery status code");
        }

        Ok(Self {
            message_id: object.i64_or(MESSAGE_ID, Self::MISSING_MESSAGE_ID)?,
            status,
            status_text: object.string_or(STATUS_TEXT, "")?,
        })
    }
}

impl FromJson for StatusByLocalIdResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            status: StatusResult::from_object(object)?,
            local_id: object.i64_or(LOCAL_ID, Self::MISSING_LOCAL_ID)?,
        })
    }
}
