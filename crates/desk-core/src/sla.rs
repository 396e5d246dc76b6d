//! Day-count SLA math.
//!
//! A ticket is within SLA when the whole days between opening and closing do
//! not exceed the allowance. Partial days are truncated.

use chrono::{DateTime, Utc};

use crate::enums::SlaStatus;

/// Default number of whole days a ticket may stay open and still be in SLA.
pub const DEFAULT_SLA_DAYS: i64 = 2;

/// Whole days between `opened` and `closed`. `None` unless both are present.
#[must_use]
pub fn days_to_close(opened: Option<DateTime<Utc>>, closed: Option<DateTime<Utc>>) -> Option<i64> {
    match (opened, closed) {
        (Some(opened), Some(closed)) => Some((closed - opened).num_days()),
        _ => None,
    }
}

/// Classify a day count against the allowance.
#[must_use]
pub const fn classify(days: Option<i64>, allowed_days: i64) -> SlaStatus {
    match days {
        None => SlaStatus::Open,
        Some(days) if days <= allowed_days => SlaStatus::Within,
        Some(_) => SlaStatus::Outside,
    }
}

/// Arithmetic mean of the closed tickets' day counts.
#[must_use]
pub fn mean_days<I>(days: I) -> Option<f64>
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = days
        .into_iter()
        .fold((0i64, 0u32), |(sum, count), d| (sum + d, count + 1));
    if count == 0 {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(sum as f64 / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn truncates_partial_days() {
        assert_eq!(days_to_close(Some(at(1, 9)), Some(at(3, 8))), Some(1));
        assert_eq!(days_to_close(Some(at(1, 9)), Some(at(3, 9))), Some(2));
    }

    #[test]
    fn missing_side_gives_none() {
        assert_eq!(days_to_close(None, Some(at(3, 9))), None);
        assert_eq!(days_to_close(Some(at(1, 9)), None), None);
    }

    #[rstest]
    #[case(None, SlaStatus::Open)]
    #[case(Some(0), SlaStatus::Within)]
    #[case(Some(2), SlaStatus::Within)]
    #[case(Some(3), SlaStatus::Outside)]
    fn classifies_against_default_allowance(#[case] days: Option<i64>, #[case] expected: SlaStatus) {
        assert_eq!(classify(days, DEFAULT_SLA_DAYS), expected);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean_days(Vec::new()), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean_days([1, 2, 6]), Some(3.0));
    }
}
