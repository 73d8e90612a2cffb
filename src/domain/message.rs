use std::fmt;

use crate::domain::validation::ValidationError;
use crate::domain::value::{DeliveryStatus, PhoneNumber};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A message received on one of the account's lines (`sms/receive`).
pub struct ReceiveResult {
    pub(crate) message_id: Option<i64>,
    pub(crate) message: String,
    pub(crate) sender: String,
    pub(crate) receptor: String,
    pub(crate) date: Option<i64>,
}

impl ReceiveResult {
    pub fn message_id(&self) -> Option<i64> {
        self.message_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receptor(&self) -> &str {
        &self.receptor
    }

    /// Receive time as reported by the server.
    pub fn date(&self) -> Option<i64> {
        self.date
    }

    pub fn is_message_empty(&self) -> bool {
        self.message.trim().is_empty()
    }

    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.message
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// Parse the sender, assuming [`PhoneNumber::DEFAULT_REGION`] for local numbers.
    pub fn sender_number(&self) -> Result<PhoneNumber, ValidationError> {
        PhoneNumber::parse_local_field("sender", &self.sender)
    }

    pub fn receptor_number(&self) -> Result<PhoneNumber, ValidationError> {
        PhoneNumber::parse_local_field("receptor", &self.receptor)
    }
}

impl fmt::Display for ReceiveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From: {}, To: {}, At: ", self.sender, self.receptor)?;
        match self.date {
            Some(date) => write!(f, "{date}")?,
            None => f.write_str("N/A")?,
        }
        write!(f, ", Message: {}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Outcome of sending one message to one receptor (`sms/send`).
pub struct SendResult {
    pub(crate) message_id: i64,
    pub(crate) message: String,
    pub(crate) status: i32,
    pub(crate) status_text: String,
    pub(crate) sender: String,
    pub(crate) receptor: String,
    pub(crate) date: i64,
    pub(crate) cost: i32,
}

impl SendResult {
    /// Status code the gateway uses for an accepted message.
    pub const SUCCESS_STATUS: i32 = 1;
    /// Status used when the server omits one.
    pub const MISSING_STATUS: i32 = -1;

    pub fn message_id(&self) -> i64 {
        self.message_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw status code.
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receptor(&self) -> &str {
        &self.receptor
    }

    pub fn date(&self) -> i64 {
        self.date
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// `true` only for [`SendResult::SUCCESS_STATUS`].
    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS_STATUS
    }

    /// The status read as a delivery status, if it is a known one.
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        DeliveryStatus::from_code(self.status)
    }

    pub fn receptor_number(&self) -> Result<PhoneNumber, ValidationError> {
        PhoneNumber::parse_local_field("receptor", &self.receptor)
    }
}

impl fmt::Display for SendResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MessageID: {} | Status: {} | To: {} | Cost: {}",
            self.message_id, self.status_text, self.receptor, self.cost
        )
    }
}
