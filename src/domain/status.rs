use std::fmt;

use crate::domain::value::{DeliveryStatus, MessageStatusCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status of a sent message (`sms/status`).
///
/// `status` is `None` when the server sent no status at all; an unknown code is
/// kept as an unrecognized [`MessageStatusCode`].
pub struct StatusResult {
    pub(crate) message_id: i64,
    pub(crate) status: Option<MessageStatusCode>,
    pub(crate) status_text: String,
}

impl StatusResult {
    /// Message id used when the server omits one.
    pub const MISSING_MESSAGE_ID: i64 = -1;

    pub fn message_id(&self) -> i64 {
        self.message_id
    }

    /// Raw status as sent by the server.
    pub fn status_code(&self) -> Option<MessageStatusCode> {
        self.status
    }

    /// Known delivery status, `None` when missing or unrecognized.
    pub fn status(&self) -> Option<DeliveryStatus> {
        self.status.and_then(MessageStatusCode::known)
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// A status code was present but has no known meaning.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self.status, Some(code) if code.is_unrecognized())
    }

    /// `true` only for [`DeliveryStatus::Delivered`].
    pub fn is_successful(&self) -> bool {
        self.status() == Some(DeliveryStatus::Delivered)
    }

    pub fn is_final(&self) -> bool {
        self.status.is_some_and(MessageStatusCode::is_final)
    }
}

impl fmt::Display for StatusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message ID: {} | Status: {} ({})",
            self.message_id,
            self.status_text,
            StatusLabel(self.status)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status looked up by the caller's local id (`sms/statuslocalmessageid`).
pub struct StatusByLocalIdResult {
    pub(crate) status: StatusResult,
    pub(crate) local_id: i64,
}

impl StatusByLocalIdResult {
    /// Local id used when the server omits one.
    pub const MISSING_LOCAL_ID: i64 = -1;

    pub fn local_id(&self) -> i64 {
        self.local_id
    }

    /// The underlying status result.
    pub fn as_status(&self) -> &StatusResult {
        &self.status
    }

    pub fn into_status(self) -> StatusResult {
        self.status
    }

    pub fn message_id(&self) -> i64 {
        self.status.message_id()
    }

    pub fn status_code(&self) -> Option<MessageStatusCode> {
        self.status.status_code()
    }

    pub fn status(&self) -> Option<DeliveryStatus> {
        self.status.status()
    }

    pub fn status_text(&self) -> &str {
        self.status.status_text()
    }

    pub fn is_successful(&self) -> bool {
        self.status.is_successful()
    }

    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }

    pub fn is_unrecognized(&self) -> bool {
        self.status.is_unrecognized()
    }

    pub fn is_valid_local_id(&self) -> bool {
        self.local_id > 0
    }

    pub fn has_same_local_id(&self, other: &Self) -> bool {
        self.local_id == other.local_id
    }

    /// Reached a final status other than delivered.
    pub fn is_failed(&self) -> bool {
        self.is_final() && !self.is_successful()
    }
}

impl fmt::Display for StatusByLocalIdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Local ID: {} | Status: {} ({})",
            self.local_id,
            self.status.status_text,
            StatusLabel(self.status.status)
        )
    }
}

struct StatusLabel(Option<MessageStatusCode>);

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => match code.known() {
                Some(status) => write!(f, "{status:?}"),
                None => write!(f, "unrecognized {}", code.as_i64()),
            },
            None => f.write_str("none"),
        }
    }
}
