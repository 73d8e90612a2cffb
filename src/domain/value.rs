use std::fmt;

use chrono::{DateTime, Utc};
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Point in time as milliseconds since the Unix epoch.
///
/// The gateway reports missing timestamps as `0`; such values are "not set".
pub struct EpochMillis(i64);

impl EpochMillis {
    /// Milliseconds in one day.
    pub const MILLIS_PER_DAY: i64 = 86_400_000;

    /// Layout used by [`EpochMillis::formatted`] (UTC).
    pub const DISPLAY_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Wrap a raw millisecond value (no range validation is performed).
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Get the underlying milliseconds.
    pub fn value(self) -> i64 {
        self.0
    }

    /// Returns `true` for strictly positive timestamps.
    pub fn is_set(self) -> bool {
        self.0 > 0
    }

    /// Render as `yyyy-MM-dd HH:mm:ss` in UTC, or `None` when not set.
    pub fn formatted(self) -> Option<String> {
        if !self.is_set() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .map(|dt| dt.format(Self::DISPLAY_FORMAT).to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Delivery status of a message as tracked by the gateway.
pub enum DeliveryStatus {
    Queued,
    Scheduled,
    SentToCenter,
    Delivered,
    Undelivered,
    Canceled,
    Filtered,
    Received,
    Incorrect,
}

impl DeliveryStatus {
    /// Every known variant, in wire-code order.
    pub const ALL: [Self; 9] = [
        Self::Queued,
        Self::Scheduled,
        Self::SentToCenter,
        Self::Delivered,
        Self::Undelivered,
        Self::Canceled,
        Self::Filtered,
        Self::Received,
        Self::Incorrect,
    ];

    /// Convert a raw integer status into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::Queued,
            2 => Self::Scheduled,
            4 => Self::SentToCenter,
            10 => Self::Delivered,
            11 => Self::Undelivered,
            13 => Self::Canceled,
            14 => Self::Filtered,
            50 => Self::Received,
            100 => Self::Incorrect,
            _ => return None,
        })
    }

    /// Wire code for this status.
    pub fn code(self) -> i32 {
        match self {
            Self::Queued => 1,
            Self::Scheduled => 2,
            Self::SentToCenter => 4,
            Self::Delivered => 10,
            Self::Undelivered => 11,
            Self::Canceled => 13,
            Self::Filtered => 14,
            Self::Received => 50,
            Self::Incorrect => 100,
        }
    }

    /// Whether no further status transition is expected.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Undelivered | Self::Canceled | Self::Incorrect
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Queued => "Message is queued for sending.",
            Self::Scheduled => "Message is scheduled to be sent.",
            Self::SentToCenter => "Message has been sent to the operator center.",
            Self::Delivered => "Message has been successfully delivered.",
            Self::Undelivered => "Message could not be delivered.",
            Self::Canceled => "Message was canceled before being sent.",
            Self::Filtered => "Message was filtered due to content restrictions.",
            Self::Received => "Message was received by the server.",
            Self::Incorrect => "Message contained incorrect data or destination.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message status code as reported by the gateway.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct MessageStatusCode(i64);

impl MessageStatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the gateway.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known delivery status, if one exists.
    pub fn known(self) -> Option<DeliveryStatus> {
        i32::try_from(self.0).ok().and_then(DeliveryStatus::from_code)
    }

    /// Returns `true` if the code has no known [`DeliveryStatus`].
    pub fn is_unrecognized(self) -> bool {
        self.known().is_none()
    }

    /// Returns `true` for known final statuses; unrecognized codes are never final.
    pub fn is_final(self) -> bool {
        matches!(self.known(), Some(status) if status.is_final())
    }
}

impl From<DeliveryStatus> for MessageStatusCode {
    fn from(value: DeliveryStatus) -> Self {
        Self(i64::from(value.code()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Where the handset stores an outgoing message.
pub enum MessageChannel {
    Flash,
    MobileMemory,
    SimMemory,
    AppMemory,
}

impl MessageChannel {
    /// Every known variant, in wire-code order.
    pub const ALL: [Self; 4] = [
        Self::Flash,
        Self::MobileMemory,
        Self::SimMemory,
        Self::AppMemory,
    ];

    /// Convert a raw integer message type into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Flash,
            1 => Self::MobileMemory,
            2 => Self::SimMemory,
            3 => Self::AppMemory,
            _ => return None,
        })
    }

    /// Wire code for this channel.
    pub fn code(self) -> i32 {
        match self {
            Self::Flash => 0,
            Self::MobileMemory => 1,
            Self::SimMemory => 2,
            Self::AppMemory => 3,
        }
    }

    /// Whether `code` names a known channel.
    pub fn is_valid_code(code: i32) -> bool {
        Self::from_code(code).is_some()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Flash => "Flash Message",
            Self::MobileMemory => "Mobile Memory Message",
            Self::SimMemory => "SIM Memory Message",
            Self::AppMemory => "App Memory Message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known result codes returned in the response envelope.
///
/// The list is not assumed complete: unknown codes are preserved as [`ReturnCode`]
/// and return `None` from [`ResultCode::from_code`].
pub enum ResultCode {
    NotChecked,
    Approved,
    InvalidApiKey,
    ExpiredApiKey,
    AccountDisabled,
    NotEnoughCredit,
    ServerIsBusy,
    UndefinedCommand,
    RequestFailed,
    ParametersBroken,
    InvalidRecipient,
    InvalidSenderNumber,
    EmptyMessage,
    RecipientListTooLarge,
    InvalidDate,
    MessageTooLarge,
    RecipientCountMismatch,
}

impl ResultCode {
    /// Every known variant, in wire-code order.
    pub const ALL: [Self; 17] = [
        Self::NotChecked,
        Self::Approved,
        Self::InvalidApiKey,
        Self::ExpiredApiKey,
        Self::AccountDisabled,
        Self::NotEnoughCredit,
        Self::ServerIsBusy,
        Self::UndefinedCommand,
        Self::RequestFailed,
        Self::ParametersBroken,
        Self::InvalidRecipient,
        Self::InvalidSenderNumber,
        Self::EmptyMessage,
        Self::RecipientListTooLarge,
        Self::InvalidDate,
        Self::MessageTooLarge,
        Self::RecipientCountMismatch,
    ];

    /// Convert a raw integer result code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            99 => Self::NotChecked,
            100 => Self::Approved,
            101 => Self::InvalidApiKey,
            102 => Self::ExpiredApiKey,
            103 => Self::AccountDisabled,
            104 => Self::NotEnoughCredit,
            105 => Self::ServerIsBusy,
            106 => Self::UndefinedCommand,
            107 => Self::RequestFailed,
            108 => Self::ParametersBroken,
            110 => Self::InvalidRecipient,
            111 => Self::InvalidSenderNumber,
            112 => Self::EmptyMessage,
            113 => Self::RecipientListTooLarge,
            114 => Self::InvalidDate,
            115 => Self::MessageTooLarge,
            116 => Self::RecipientCountMismatch,
            _ => return None,
        })
    }

    /// Wire code for this result.
    pub fn code(self) -> i32 {
        match self {
            Self::NotChecked => 99,
            Self::Approved => 100,
            Self::InvalidApiKey => 101,
            Self::ExpiredApiKey => 102,
            Self::AccountDisabled => 103,
            Self::NotEnoughCredit => 104,
            Self::ServerIsBusy => 105,
            Self::UndefinedCommand => 106,
            Self::RequestFailed => 107,
            Self::ParametersBroken => 108,
            Self::InvalidRecipient => 110,
            Self::InvalidSenderNumber => 111,
            Self::EmptyMessage => 112,
            Self::RecipientListTooLarge => 113,
            Self::InvalidDate => 114,
            Self::MessageTooLarge => 115,
            Self::RecipientCountMismatch => 116,
        }
    }

    /// Upper-snake name as used in gateway documentation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotChecked => "NOT_CHECKED",
            Self::Approved => "APPROVED",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::ExpiredApiKey => "EXPIRED_API_KEY",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::NotEnoughCredit => "NOT_ENOUGH_CREDIT",
            Self::ServerIsBusy => "SERVER_IS_BUSY",
            Self::UndefinedCommand => "UNDEFINED_COMMAND",
            Self::RequestFailed => "REQUEST_FAILED",
            Self::ParametersBroken => "PARAMETERS_BROKEN",
            Self::InvalidRecipient => "INVALID_RECIPIENT",
            Self::InvalidSenderNumber => "INVALID_SENDER_NUMBER",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::RecipientListTooLarge => "RECIPIENT_LIST_TOO_LARGE",
            Self::InvalidDate => "INVALID_DATE",
            Self::MessageTooLarge => "MESSAGE_TOO_LARGE",
            Self::RecipientCountMismatch => "RECIPIENT_COUNT_MISMATCH",
        }
    }

    /// Whether this result indicates invalid/expired credentials or a disabled account.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey | Self::ExpiredApiKey | Self::AccountDisabled
        )
    }

    /// Whether the request itself was rejected as malformed.
    pub fn is_validation_error(self) -> bool {
        matches!(
            self,
            Self::ParametersBroken
                | Self::InvalidRecipient
                | Self::InvalidSenderNumber
                | Self::EmptyMessage
                | Self::RecipientListTooLarge
                | Self::InvalidDate
                | Self::MessageTooLarge
                | Self::RecipientCountMismatch
        )
    }

    /// Whether this result is likely transient and the request can be retried.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::ServerIsBusy)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Result code carried by the response envelope (`return.status`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ReturnCode(i32);

impl ReturnCode {
    /// Construct a return code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the gateway.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known result code, if one exists.
    pub fn known(self) -> Option<ResultCode> {
        ResultCode::from_code(self.0)
    }

    pub fn is_approved(self) -> bool {
        self.known() == Some(ResultCode::Approved)
    }

    /// Returns `true` if this code is considered retryable by the crate.
    pub fn is_retryable(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this code represents an authentication/authorization error.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

#[derive(Debug, Clone)]
/// A sender or receptor line, normalized to E.164.
///
/// The gateway reports lines in local Iranian form (`0912...`) as often as in
/// international form, so parsing defaults to [`PhoneNumber::DEFAULT_REGION`].
/// Two lines are equal when their E.164 forms are.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    calling_code: u16,
}

impl PhoneNumber {
    /// Field reported in errors by [`PhoneNumber::parse`] and [`PhoneNumber::parse_local`].
    pub const FIELD: &'static str = "receptor";

    /// Region assumed for lines without a country prefix.
    pub const DEFAULT_REGION: country::Id = country::Id::IR;

    /// Calling code of [`PhoneNumber::DEFAULT_REGION`].
    pub const DOMESTIC_CALLING_CODE: u16 = 98;

    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::parse_field(Self::FIELD, default_region, input.into())
    }

    /// Parse using [`PhoneNumber::DEFAULT_REGION`].
    pub fn parse_local(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse_field(Self::FIELD, Some(Self::DEFAULT_REGION), input.into())
    }

    /// Like [`PhoneNumber::parse_local`], naming `field` when the input is blank.
    pub(crate) fn parse_local_field(
        field: &'static str,
        input: &str,
    ) -> Result<Self, ValidationError> {
        Self::parse_field(field, Some(Self::DEFAULT_REGION), input.to_owned())
    }

    fn parse_field(
        field: &'static str,
        default_region: Option<country::Id>,
        input: String,
    ) -> Result<Self, ValidationError> {
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self {
            raw,
            e164,
            calling_code: parsed.code().value(),
        })
    }

    /// Input as the gateway reported it, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    pub fn calling_code(&self) -> u16 {
        self.calling_code
    }

    /// Whether the line belongs to [`PhoneNumber::DEFAULT_REGION`].
    pub fn is_domestic(&self) -> bool {
        self.calling_code == Self::DOMESTIC_CALLING_CODE
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_status_round_trips_every_variant() {
        for status in DeliveryStatus::ALL {
            assert_eq!(DeliveryStatus::from_code(status.code()), Some(status));
        }
        for code in [0, 3, 5, 12, 15, 49, 51, 99, 101, -1, i32::MAX] {
            assert_eq!(DeliveryStatus::from_code(code), None);
        }
    }

    #[test]
    fn only_terminal_statuses_are_final() {
        let finals = DeliveryStatus::ALL
            .into_iter()
            .filter(|status| status.is_final())
            .collect::<Vec<_>>();
        assert_eq!(
            finals,
            vec![
                DeliveryStatus::Delivered,
                DeliveryStatus::Undelivered,
                DeliveryStatus::Canceled,
                DeliveryStatus::Incorrect,
            ]
        );
    }

    #[test]
    fn message_status_code_preserves_unknown_codes() {
        let delivered = MessageStatusCode::new(10);
        assert_eq!(delivered.known(), Some(DeliveryStatus::Delivered));
        assert!(delivered.is_final());

        let unknown = MessageStatusCode::new(999);
        assert!(unknown.is_unrecognized());
        assert!(!unknown.is_final());
        assert_eq!(unknown.as_i64(), 999);

        let wide = MessageStatusCode::new(i64::from(i32::MAX) + 10);
        assert!(wide.is_unrecognized());
        assert!(!wide.is_final());

        assert_eq!(
            MessageStatusCode::from(DeliveryStatus::Queued),
            MessageStatusCode::new(1)
        );
    }

    #[test]
    fn message_channel_round_trips_and_validates() {
        for channel in MessageChannel::ALL {
            assert_eq!(MessageChannel::from_code(channel.code()), Some(channel));
        }
        assert!(MessageChannel::is_valid_code(2));
        assert!(!MessageChannel::is_valid_code(4));
        assert!(!MessageChannel::is_valid_code(-1));
        assert_eq!(MessageChannel::SimMemory.label(), "SIM Memory Message");
    }

    #[test]
    fn result_code_round_trips_and_skips_gap() {
        for code in ResultCode::ALL {
            assert_eq!(ResultCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ResultCode::from_code(109), None);
        assert_eq!(ResultCode::from_code(98), None);
        assert_eq!(ResultCode::from_code(117), None);
        assert_eq!(ResultCode::NotEnoughCredit.to_string(), "NOT_ENOUGH_CREDIT(104)");
    }

    #[test]
    fn return_code_knows_retryable_and_auth_errors() {
        let busy = ReturnCode::new(105);
        assert!(busy.is_retryable());
        assert!(!busy.is_auth_error());

        let expired = ReturnCode::new(102);
        assert!(expired.is_auth_error());
        assert!(!expired.is_approved());

        assert!(ReturnCode::new(100).is_approved());
        assert!(ResultCode::MessageTooLarge.is_validation_error());

        let unknown = ReturnCode::new(418);
        assert!(unknown.known().is_none());
        assert!(!unknown.is_retryable());
        assert!(!unknown.is_auth_error());
    }

    #[test]
    fn epoch_millis_formats_only_when_set() {
        assert_eq!(EpochMillis::new(0).formatted(), None);
        assert_eq!(EpochMillis::new(-5).formatted(), None);
        assert_eq!(
            EpochMillis::new(1_700_000_000_000).formatted().as_deref(),
            Some("2023-11-14 22:13:20")
        );
        assert!(EpochMillis::now().is_set());
    }

    #[test]
    fn phone_number_parsing_uses_local_region() {
        let local = PhoneNumber::parse_local(" 09121234567 ").unwrap();
        let international = PhoneNumber::parse(None, "+989121234567").unwrap();
        assert_eq!(local, international);
        assert_eq!(local.e164(), "+989121234567");
        assert_eq!(local.raw(), "09121234567");
        assert!(local.is_domestic());
        assert_eq!(local.calling_code(), PhoneNumber::DOMESTIC_CALLING_CODE);
        assert!(PhoneNumber::parse_local("").is_err());
    }

    #[test]
    fn foreign_line_is_not_domestic() {
        let foreign = PhoneNumber::parse_local("+442079460958").unwrap();
        assert_eq!(foreign.e164(), "+442079460958");
        assert_eq!(foreign.calling_code(), 44);
        assert!(!foreign.is_domestic());
    }

    #[test]
    fn blank_line_names_the_field() {
        assert_eq!(
            PhoneNumber::parse_local_field("sender", "  "),
            Err(ValidationError::Empty { field: "sender" })
        );
    }
}
