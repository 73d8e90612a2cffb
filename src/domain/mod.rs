//! Domain layer: result types, code taxonomies and derived queries (no I/O).

mod account;
mod count;
mod message;
mod response;
mod status;
mod validation;
mod value;

pub use account::{AccountConfigResult, AccountInfoResult, AccountStatus, ConfigUpdate, CreditLevel};
pub use count::{
    CountInboxResult, CountKind, CountOutboxResult, CountPostalCodeResult, Inbox, MessageCount,
    Outbox,
};
pub use message::{ReceiveResult, SendResult};
pub use response::ApiResponse;
pub use status::{StatusByLocalIdResult, StatusResult};
pub use validation::ValidationError;
pub use value::{
    DeliveryStatus, EpochMillis, MessageChannel, MessageStatusCode, PhoneNumber, ResultCode,
    ReturnCode,
};
