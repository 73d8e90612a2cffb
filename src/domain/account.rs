use std::fmt;

use serde_json::{Value, json};

use crate::domain::validation::ValidationError;
use crate::domain::value::EpochMillis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditLevel {
    High,
    Medium,
    Low,
}

impl CreditLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for CreditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Overall account state, derived from expiration and remaining credit.
pub enum AccountStatus {
    Active,
    Expired,
    InsufficientCredit,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::InsufficientCredit => "Insufficient Credit",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account balance and expiration (`account/info`).
pub struct AccountInfoResult {
    pub(crate) remain_credit: i64,
    pub(crate) expire_date: EpochMillis,
    pub(crate) account_type: String,
}

impl AccountInfoResult {
    /// Wire key for the remaining credit.
    pub const REMAIN_CREDIT_FIELD: &'static str = "remaincredit";
    /// Wire key for the expiration timestamp (milliseconds).
    pub const EXPIRE_DATE_FIELD: &'static str = "expiredate";
    /// Wire key for the account type.
    pub const TYPE_FIELD: &'static str = "type";

    /// Account type used when the server omits it.
    pub const UNKNOWN_TYPE: &'static str = "Unknown";

    /// Lowest credit considered [`CreditLevel::High`].
    pub const HIGH_CREDIT_THRESHOLD: i64 = 10_000;
    /// Lowest credit considered [`CreditLevel::Medium`].
    pub const MEDIUM_CREDIT_THRESHOLD: i64 = 1_000;
    /// Warning window used by callers that have no policy of their own.
    pub const DEFAULT_EXPIRATION_WARNING_DAYS: i64 = 5;

    pub fn remain_credit(&self) -> i64 {
        self.remain_credit
    }

    pub fn expire_date(&self) -> EpochMillis {
        self.expire_date
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    /// Whether the expiration date lies in the past.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(EpochMillis::now())
    }

    pub fn is_expired_at(&self, now: EpochMillis) -> bool {
        now > self.expire_date
    }

    pub fn has_sufficient_credit(&self, threshold: i64) -> bool {
        self.remain_credit >= threshold
    }

    pub fn credit_level(&self) -> CreditLevel {
        if self.remain_credit >= Self::HIGH_CREDIT_THRESHOLD {
            CreditLevel::High
        } else if self.remain_credit >= Self::MEDIUM_CREDIT_THRESHOLD {
            CreditLevel::Medium
        } else {
            CreditLevel::Low
        }
    }

    /// Whole days left before expiration, `0` once expired.
    pub fn days_until_expiration(&self) -> i64 {
        self.days_until_expiration_at(EpochMillis::now())
    }

    pub fn days_until_expiration_at(&self, now: EpochMillis) -> i64 {
        if self.expire_date > now {
            self.expire_date.value().saturating_sub(now.value()) / EpochMillis::MILLIS_PER_DAY
        } else {
            0
        }
    }

    /// Expiration takes precedence over credit.
    pub fn account_status(&self) -> AccountStatus {
        self.account_status_at(EpochMillis::now())
    }

    pub fn account_status_at(&self, now: EpochMillis) -> AccountStatus {
        if self.is_expired_at(now) {
            AccountStatus::Expired
        } else if !self.has_sufficient_credit(1) {
            AccountStatus::InsufficientCredit
        } else {
            AccountStatus::Active
        }
    }

    /// Whether the account is still valid but expires within `warning_days`.
    pub fn should_warn_expiration(&self, warning_days: i64) -> bool {
        self.should_warn_expiration_at(warning_days, EpochMillis::now())
    }

    pub fn should_warn_expiration_at(&self, warning_days: i64, now: EpochMillis) -> bool {
        !self.is_expired_at(now) && self.days_until_expiration_at(now) <= warning_days
    }

    /// Low credit, or expiration within `warning_days`.
    pub fn needs_upgrade(&self, warning_days: i64) -> bool {
        self.needs_upgrade_at(warning_days, EpochMillis::now())
    }

    pub fn needs_upgrade_at(&self, warning_days: i64, now: EpochMillis) -> bool {
        self.credit_level() == CreditLevel::Low
            || self.should_warn_expiration_at(warning_days, now)
    }

    pub fn is_trial_account(&self) -> bool {
        self.account_type.eq_ignore_ascii_case("trial")
    }

    pub fn is_premium_account(&self) -> bool {
        self.account_type.eq_ignore_ascii_case("premium")
            || self.account_type.eq_ignore_ascii_case("enterprise")
    }

    /// Expiration as `yyyy-MM-dd HH:mm:ss` (UTC), `N/A` when unset.
    pub fn formatted_expire_date(&self) -> String {
        self.expire_date
            .formatted()
            .unwrap_or_else(|| "N/A".to_owned())
    }

    /// Wire representation using the server's keys.
    pub fn to_json(&self) -> Value {
        json!({
            "remaincredit": self.remain_credit,
            "expiredate": self.expire_date.value(),
            "type": self.account_type,
        })
    }
}

impl fmt::Display for AccountInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {} | Status: {} | Credit: {} | Expires: {}",
            self.account_type,
            self.account_status(),
            self.remain_credit,
            self.formatted_expire_date()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account settings (`account/config`).
///
/// Flags are kept as the server's text and interpreted on read; any value other
/// than a case-insensitive `true` counts as disabled. Updates go through
/// [`AccountConfigResult::with_update`] and return a new value.
pub struct AccountConfigResult {
    pub(crate) api_logs: String,
    pub(crate) daily_report: String,
    pub(crate) debug_mode: String,
    pub(crate) default_sender: String,
    pub(crate) resend_failed: String,
    pub(crate) min_credit_alarm: i32,
}

impl AccountConfigResult {
    pub const API_LOGS_FIELD: &'static str = "apilogs";
    pub const DAILY_REPORT_FIELD: &'static str = "dailyreport";
    pub const DEBUG_MODE_FIELD: &'static str = "debugmode";
    pub const DEFAULT_SENDER_FIELD: &'static str = "DefaultSender";
    pub const RESEND_FAILED_FIELD: &'static str = "resendfailed";
    pub const MIN_CREDIT_ALARM_FIELD: &'static str = "Mincreditalarm";

    /// Flag text used when the server omits a flag.
    pub const FLAG_OFF: &'static str = "false";
    /// Sender used when the server omits one.
    pub const UNKNOWN_SENDER: &'static str = "Unknown";

    pub fn api_logs(&self) -> &str {
        &self.api_logs
    }

    pub fn daily_report(&self) -> &str {
        &self.daily_report
    }

    pub fn debug_mode(&self) -> &str {
        &self.debug_mode
    }

    pub fn default_sender(&self) -> &str {
        &self.default_sender
    }

    pub fn resend_failed(&self) -> &str {
        &self.resend_failed
    }

    pub fn min_credit_alarm(&self) -> i32 {
        self.min_credit_alarm
    }

    pub fn is_api_logs_enabled(&self) -> bool {
        parse_flag(&self.api_logs)
    }

    pub fn is_daily_report_enabled(&self) -> bool {
        parse_flag(&self.daily_report)
    }

    pub fn is_debug_mode_enabled(&self) -> bool {
        parse_flag(&self.debug_mode)
    }

    pub fn is_resend_failed_enabled(&self) -> bool {
        parse_flag(&self.resend_failed)
    }

    /// Whether `current_credit` is below the configured alarm threshold.
    pub fn is_credit_low(&self, current_credit: i64) -> bool {
        current_credit < i64::from(self.min_credit_alarm)
    }

    pub fn is_valid_sender(&self) -> bool {
        !self.default_sender.trim().is_empty()
    }

    pub fn is_configured(&self) -> bool {
        self.is_valid_sender() && self.min_credit_alarm >= 0
    }

    /// Return a copy with one field replaced.
    pub fn with_update(mut self, update: ConfigUpdate) -> Self {
        match update {
            ConfigUpdate::ApiLogs(on) => self.api_logs = flag_text(on),
            ConfigUpdate::DailyReport(on) => self.daily_report = flag_text(on),
            ConfigUpdate::DebugMode(on) => self.debug_mode = flag_text(on),
            ConfigUpdate::DefaultSender(sender) => self.default_sender = sender,
            ConfigUpdate::ResendFailed(on) => self.resend_failed = flag_text(on),
            ConfigUpdate::MinCreditAlarm(alarm) => self.min_credit_alarm = alarm,
        }
        self
    }

    /// Consume the settings and return them with every field at its default.
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Return a copy with a negative credit alarm clamped to `0`.
    pub fn with_defaults_applied(mut self) -> Self {
        if self.min_credit_alarm < 0 {
            self.min_credit_alarm = 0;
        }
        self
    }

    /// Wire representation using the server's keys.
    pub fn to_json(&self) -> Value {
        json!({
            "apilogs": self.api_logs,
            "dailyreport": self.daily_report,
            "debugmode": self.debug_mode,
            "DefaultSender": self.default_sender,
            "resendfailed": self.resend_failed,
            "Mincreditalarm": self.min_credit_alarm,
        })
    }
}

impl Default for AccountConfigResult {
    fn default() -> Self {
        Self {
            api_logs: Self::FLAG_OFF.to_owned(),
            daily_report: Self::FLAG_OFF.to_owned(),
            debug_mode: Self::FLAG_OFF.to_owned(),
            default_sender: Self::UNKNOWN_SENDER.to_owned(),
            resend_failed: Self::FLAG_OFF.to_owned(),
            min_credit_alarm: 0,
        }
    }
}

impl fmt::Display for AccountConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sender: {} | Debug: {} | DailyReport: {} | Credit Alarm: {}",
            self.default_sender, self.debug_mode, self.daily_report, self.min_credit_alarm
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single change to an [`AccountConfigResult`].
pub enum ConfigUpdate {
    ApiLogs(bool),
    DailyReport(bool),
    DebugMode(bool),
    DefaultSender(String),
    ResendFailed(bool),
    MinCreditAlarm(i32),
}

impl ConfigUpdate {
    /// Build an update from a field name and its textual value.
    ///
    /// Field names match the wire keys case-insensitively. Flag values follow the
    /// same rule as the flag accessors.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        Ok(match field.to_ascii_lowercase().as_str() {
            "apilogs" => Self::ApiLogs(parse_flag(value)),
            "dailyreport" => Self::DailyReport(parse_flag(value)),
            "debugmode" => Self::DebugMode(parse_flag(value)),
            "defaultsender" => Self::DefaultSender(value.to_owned()),
            "resendfailed" => Self::ResendFailed(parse_flag(value)),
            "mincreditalarm" => {
                let alarm = value.trim().parse::<i32>().map_err(|_| {
                    ValidationError::InvalidNumber {
                        field: AccountConfigResult::MIN_CREDIT_ALARM_FIELD,
                        input: value.to_owned(),
                    }
                })?;
                Self::MinCreditAlarm(alarm)
            }
            _ => {
                return Err(ValidationError::UnknownField {
                    field: field.to_owned(),
                });
            }
        })
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn flag_text(on: bool) -> String {
    let text = if on { "true" } else { "false" };
    text.to_owned()
}
