use super::reader::{FromJson, JsonObject, MappingError};
use crate::domain::{AccountConfigResult, AccountInfoResult, EpochMillis};

impl FromJson for AccountInfoResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            remain_credit: object.i64_or(Self::REMAIN_CREDIT_FIELD, 0)?,
            expire_date: EpochMillis::new(object.i64_or(Self::EXPIRE_DATE_FIELD, 0)?),
            account_type: object.string_or(Self::TYPE_FIELD, Self::UNKNOWN_TYPE)?,
        })
    }
}

impl FromJson for AccountConfigResult {
    fn from_object(object: &JsonObject<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            api_logs: object.string_or(Self::API_LOGS_FIELD, Self::FLAG_OFF)?,
            daily_report: object.string_or(Self::DAILY_REPORT_FIELD, Self::FLAG_OFF)?,
            debug_mode: object.string_or(Self::DEBUG_MODE_FIELD, Self::FLAG_OFF)?,
            default_sender: object.string_or(Self::DEFAULT_SENDER_FIELD, Self::UNKNOWN_SENDER)?,
            resend_failed: object.string_or(Self::RESEND_FAILED_FIELD, Self::FLAG_OFF)?,
            min_credit_alarm: object.i32_or(Self::MIN_CREDIT_ALARM_FIELD, 0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{AccountStatus, CreditLevel};

    use super::*;

    #[test]
    fn account_info_from_empty_object_uses_defaults() {
        let info = AccountInfoResult::from_json(&json!({})).unwrap();
        assert_eq!(info.remain_credit(), 0);
        assert_eq!(info.expire_date(), EpochMillis::new(0));
        assert_eq!(info.account_type(), "Unknown");
        assert!(info.is_expired());
        assert_eq!(info.account_status(), AccountStatus::Expired);
        assert_eq!(info.credit_level(), CreditLevel::Low);
    }

    #[test]
    fn account_info_premium_far_future() {
        let json = json!({
            "remaincredit": 15000,
            "expiredate": 4_102_444_800_000_i64,
            "type": "premium"
        });
        let info = AccountInfoResult::from_json(&json).unwrap();
        assert_eq!(info.credit_level(), CreditLevel::High);
        assert!(info.is_premium_account());
        assert_eq!(info.account_status(), AccountStatus::Active);
        assert!(!info.needs_upgrade(AccountInfoResult::DEFAULT_EXPIRATION_WARNING_DAYS));
    }

    #[test]
    fn account_info_null_fields_use_defaults() {
        let json = json!({"remaincredit": null, "expiredate": "1700000000000", "type": null});
        let info = AccountInfoResult::from_json(&json).unwrap();
        assert_eq!(info.remain_credit(), 0);
        assert_eq!(info.expire_date().value(), 1_700_000_000_000);
        assert_eq!(info.account_type(), "Unknown");
    }

    #[test]
    fn account_info_rejects_non_numeric_credit() {
        let err = AccountInfoResult::from_json(&json!({"remaincredit": "plenty"})).unwrap_err();
        assert!(matches!(
            err,
            MappingError::InvalidType {
                field: "remaincredit",
                ..
            }
        ));
    }

    #[test]
    fn account_config_reads_mixed_case_keys() {
        let json = json!({
            "apilogs": "justfaults",
            "dailyreport": "enabled",
            "debugmode": true,
            "DefaultSender": "10004346",
            "resendfailed": "TRUE",
            "Mincreditalarm": 1000
        });
        let config = AccountConfigResult::from_json(&json).unwrap();
        assert_eq!(config.api_logs(), "justfaults");
        assert!(!config.is_api_logs_enabled());
        assert!(!config.is_daily_report_enabled());
        assert!(config.is_debug_mode_enabled());
        assert!(config.is_resend_failed_enabled());
        assert_eq!(config.default_sender(), "10004346");
        assert_eq!(config.min_credit_alarm(), 1000);
        assert!(config.is_configured());
        assert_eq!(AccountConfigResult::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn account_config_from_empty_object_matches_default() {
        let config = AccountConfigResult::from_json(&json!({})).unwrap();
        assert_eq!(config, AccountConfigResult::default());
        assert_eq!(config.default_sender(), "Unknown");
        assert!(config.is_configured());

        let lowercase_only = json!({"defaultsender": "3000", "mincreditalarm": 5});
        let config = AccountConfigResult::from_json(&lowercase_only).unwrap();
        assert_eq!(config.default_sender(), "Unknown");
        assert_eq!(config.min_credit_alarm(), 0);
    }
}
