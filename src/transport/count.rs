use super::reader::{FromJson, JsonObject, MappingError};
use crate::domain::{CountKind, CountPostalCodeResult, EpochMillis, MessageCount};

impl<K: CountKind> FromJson for MessageCount<K> {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self::from_parts(
            EpochMillis::new(object.i64_or(Self::START_DATE_FIELD, 0)?),
            EpochMillis::new(object.i64_or(Self::END_DATE_FIELD, 0)?),
            object.i64_or(Self::SUM_COUNT_FIELD, 0)?,
        ))
    }
}

impl FromJson for CountPostalCodeResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            section: object.string_or(Self::SECTION_FIELD, "")?,
            value: object.i64_or(Self::VALUE_FIELD, 0)?,
        })
    }
}
