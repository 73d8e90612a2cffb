//! Typed result models for the Kavenegar SMS gateway API.
//!
//! The crate is split the usual way: a domain layer of strong types and derived
//! queries, and a transport layer that owns the wire-format quirks (exact JSON
//! keys, `null`-as-missing, numbers sent as strings). It does not perform HTTP
//! calls; feed it the JSON your transport produced.
//!
//! ```rust
//! use kavenegar::{FromJson, SendResult, StatusResult};
//!
//! let sent = SendResult::from_json(&serde_json::json!({
//!     "messageid": 42,
//!     "status": 1,
//!     "receptor": "09121234567",
//!     "cost": 120
//! }))?;
//! assert!(sent.is_success());
//!
//! // Unknown status codes are kept, not rejected.
//! let status = StatusResult::from_json(&serde_json::json!({ "messageid": 42, "status": 999 }))?;
//! assert!(status.is_unrecognized());
//! # Ok::<(), kavenegar::MappingError>(())
//! ```
#![forbid(unsafe_code)]

pub mod domain;
mod transport;

pub use domain::{
    AccountConfigResult, AccountInfoResult, AccountStatus, ApiResponse, ConfigUpdate,
    CountInboxResult, CountOutboxResult, CountPostalCodeResult, CreditLevel, DeliveryStatus,
    EpochMillis, MessageChannel, MessageStatusCode, PhoneNumber, ReceiveResult, ResultCode,
    ReturnCode, SendResult, StatusByLocalIdResult, StatusResult, ValidationError,
};
pub use transport::{FromJson, JsonObject, MappingError, decode_response};
