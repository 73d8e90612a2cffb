use std::fmt;
use std::marker::PhantomData;

use serde_json::{Value, json};

use crate::domain::value::EpochMillis;

/// Direction of a [`MessageCount`].
pub trait CountKind {
    /// Human-readable name used in summaries.
    const LABEL: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Received messages (`sms/countinbox`).
pub struct Inbox;

impl CountKind for Inbox {
    const LABEL: &'static str = "Inbox";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Sent messages (`sms/countoutbox`).
pub struct Outbox;

impl CountKind for Outbox {
    const LABEL: &'static str = "Outbox";
}

/// Number of inbox messages in a date range.
pub type CountInboxResult = MessageCount<Inbox>;
/// Number of outbox messages in a date range.
pub type CountOutboxResult = MessageCount<Outbox>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message total over `[start_date, end_date]`, both in epoch milliseconds.
///
/// Rates are only meaningful for a valid range (`start > 0` and `end > start`);
/// every rate is `0.0` otherwise.
pub struct MessageCount<K> {
    pub(crate) start_date: EpochMillis,
    pub(crate) end_date: EpochMillis,
    pub(crate) sum_count: i64,
    pub(crate) kind: PhantomData<K>,
}

impl<K: CountKind> MessageCount<K> {
    pub const START_DATE_FIELD: &'static str = "startdate";
    pub const END_DATE_FIELD: &'static str = "enddate";
    pub const SUM_COUNT_FIELD: &'static str = "sumcount";

    pub(crate) fn from_parts(
        start_date: EpochMillis,
        end_date: EpochMillis,
        sum_count: i64,
    ) -> Self {
        Self {
            start_date,
            end_date,
            sum_count,
            kind: PhantomData,
        }
    }

    pub fn start_date(&self) -> EpochMillis {
        self.start_date
    }

    pub fn end_date(&self) -> EpochMillis {
        self.end_date
    }

    pub fn sum_count(&self) -> i64 {
        self.sum_count
    }

    pub fn is_empty(&self) -> bool {
        self.sum_count <= 0
    }

    pub fn is_date_range_valid(&self) -> bool {
        self.start_date.is_set() && self.end_date > self.start_date
    }

    /// Length of the range, never negative.
    pub fn duration_millis(&self) -> i64 {
        self.end_date
            .value()
            .saturating_sub(self.start_date.value())
            .max(0)
    }

    pub fn messages_per_day(&self) -> f64 {
        if !self.is_date_range_valid() {
            return 0.0;
        }
        let days = self.duration_millis() as f64 / EpochMillis::MILLIS_PER_DAY as f64;
        self.sum_count as f64 / days
    }

    pub fn messages_per_second(&self) -> f64 {
        if !self.is_date_range_valid() {
            return 0.0;
        }
        let seconds = self.duration_millis() as f64 / 1000.0;
        self.sum_count as f64 / seconds
    }

    /// Whether `timestamp` falls inside a valid range (bounds inclusive).
    pub fn is_within_range(&self, timestamp: EpochMillis) -> bool {
        self.is_date_range_valid() && timestamp >= self.start_date && timestamp <= self.end_date
    }

    pub fn is_above_threshold(&self, threshold: i64) -> bool {
        self.sum_count >= threshold
    }

    pub fn formatted_date_range(&self) -> String {
        let format = |ts: EpochMillis| ts.formatted().unwrap_or_else(|| "N/A".to_owned());
        format!("{} to {}", format(self.start_date), format(self.end_date))
    }

    /// Wire representation using the server's keys.
    pub fn to_json(&self) -> Value {
        json!({
            "startdate": self.start_date.value(),
            "enddate": self.end_date.value(),
            "sumcount": self.sum_count,
        })
    }
}

impl<K: CountKind> fmt::Display for MessageCount<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Summary: Messages={}, Duration={} ms ({:.2} days), AvgRate={:.2} msg/sec",
            K::LABEL,
            self.sum_count,
            self.duration_millis(),
            self.duration_millis() as f64 / EpochMillis::MILLIS_PER_DAY as f64,
            self.messages_per_second()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message count for one postal-code section (`sms/countpostalcode`).
pub struct CountPostalCodeResult {
    pub(crate) section: String,
    pub(crate) value: i64,
}

impl CountPostalCodeResult {
    pub const SECTION_FIELD: &'static str = "section";
    pub const VALUE_FIELD: &'static str = "value";

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    pub fn has_same_section(&self, other: &Self) -> bool {
        self.section.to_lowercase() == other.section.to_lowercase()
    }

    /// Strictly greater than `threshold`.
    pub fn is_above_threshold(&self, threshold: i64) -> bool {
        self.value > threshold
    }

    /// `value / max_value`, or `0.0` when `max_value` is not positive.
    pub fn normalized_score(&self, max_value: i64) -> f64 {
        if max_value > 0 {
            self.value as f64 / max_value as f64
        } else {
            0.0
        }
    }

    pub fn section_contains(&self, keyword: &str) -> bool {
        self.section
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    pub fn with_value(&self, value: i64) -> Self {
        Self {
            section: self.section.clone(),
            value,
        }
    }

    /// The result with the higher count; `self` on a tie.
    pub fn max<'a>(&'a self, other: &'a Self) -> &'a Self {
        if self.value >= other.value { self } else { other }
    }

    /// The result with the lower count; `self` on a tie.
    pub fn min<'a>(&'a self, other: &'a Self) -> &'a Self {
        if self.value <= other.value { self } else { other }
    }

    /// Wire representation using the server's keys.
    pub fn to_json(&self) -> Value {
        json!({
            "section": self.section,
            "value": self.value,
        })
    }
}

impl fmt::Display for CountPostalCodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section: {}, Message Count: {}", self.section, self.value)
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    const DAY: i64 = EpochMillis::MILLIS_PER_DAY;

    fn inbox(start: i64, end: i64, sum: i64) -> CountInboxResult {
        MessageCount::from_parts(EpochMillis::new(start), EpochMillis::new(end), sum)
    }

    fn postal(section: &str, value: i64) -> CountPostalCodeResult {
        CountPostalCodeResult {
            section: section.to_owned(),
            value,
        }
    }

    #[test]
    fn zero_range_has_no_rate() {
        let count = inbox(0, 0, 0);
        assert!(!count.is_date_range_valid());
        assert!(count.is_empty());
        assert_eq!(count.messages_per_day(), 0.0);
        assert_eq!(count.messages_per_second(), 0.0);
        assert_eq!(count.duration_millis(), 0);
    }

    #[test]
    fn inverted_or_degenerate_ranges_are_invalid() {
        let inverted = inbox(10 * DAY, 5 * DAY, 100);
        assert!(!inverted.is_date_range_valid());
        assert_eq!(inverted.duration_millis(), 0);
        assert_eq!(inverted.messages_per_day(), 0.0);

        let same = inbox(DAY, DAY, 100);
        assert!(!same.is_date_range_valid());
        assert_eq!(same.messages_per_second(), 0.0);

        let no_start =
            MessageCount::<Outbox>::from_parts(EpochMillis::new(0), EpochMillis::new(DAY), 5);
        assert!(!no_start.is_date_range_valid());
        assert_eq!(no_start.messages_per_day(), 0.0);
    }

    #[test]
    fn rates_scale_with_range() {
        let count = inbox(DAY, 3 * DAY, 100);
        assert!(count.is_date_range_valid());
        assert_eq!(count.messages_per_day(), 50.0);
        assert!((count.messages_per_second() - 100.0 / 172_800.0).abs() < 1e-12);
        assert!(count.is_within_range(EpochMillis::new(2 * DAY)));
        assert!(count.is_within_range(EpochMillis::new(3 * DAY)));
        assert!(!count.is_within_range(EpochMillis::new(4 * DAY)));
        assert!(count.is_above_threshold(100));
        assert!(!count.is_above_threshold(101));
    }

    #[test]
    fn summary_names_the_direction() {
        let outbox = MessageCount::<Outbox>::from_parts(
            EpochMillis::new(DAY),
            EpochMillis::new(2 * DAY),
            86_400,
        );
        assert_eq!(
            outbox.to_string(),
            "Outbox Summary: Messages=86400, Duration=86400000 ms (1.00 days), AvgRate=1.00 msg/sec"
        );
        assert_eq!(
            inbox(0, 1_700_000_000_000, 1).formatted_date_range(),
            "N/A to 2023-11-14 22:13:20"
        );
    }

    #[test]
    fn postal_code_ties_favor_receiver() {
        let a = postal("Tehran", 10);
        let b = postal("Shiraz", 10);
        assert!(ptr::eq(a.max(&b), &a));
        assert!(ptr::eq(a.min(&b), &a));
        assert!(ptr::eq(b.max(&a), &b));
        assert!(ptr::eq(b.min(&a), &b));
    }

    #[test]
    fn postal_code_max_min_pick_by_value() {
        let low = postal("a", 1);
        let high = postal("b", 2);
        assert!(ptr::eq(low.max(&high), &high));
        assert!(ptr::eq(low.min(&high), &low));

        let folded = [postal("x", 3), postal("y", 7), postal("z", 7)];
        let best = folded[1..].iter().fold(&folded[0], |acc, item| acc.max(item));
        assert_eq!(best.section(), "y");
    }

    #[test]
    fn postal_code_queries() {
        let count = postal("North-Tehran", 40);
        assert!(count.has_same_section(&postal("north-tehran", 1)));
        assert!(count.section_contains("TEHRAN"));
        assert!(!count.section_contains("shiraz"));
        assert!(count.is_above_threshold(39));
        assert!(!count.is_above_threshold(40));
        assert_eq!(count.normalized_score(80), 0.5);
        assert_eq!(count.normalized_score(0), 0.0);
        assert!(count.with_value(0).is_empty());
        assert_eq!(count.with_value(0).section(), "North-Tehran");
        assert_eq!(count.to_string(), "Section: North-Tehran, Message Count: 40");
    }
}
