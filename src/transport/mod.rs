//! Transport layer: wire-format details (JSON field names, defaults, coercion).

mod account;
mod count;
mod envelope;
mod message;
mod reader;
mod status;

pub use envelope::decode_response;
pub use reader::{FromJson, JsonObject, MappingError};
