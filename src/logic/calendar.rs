use chrono::{Months, NaiveDate};

/// Add calendar months, clamping the day to the end of a shorter target
/// month (Jan 31 + 1 month = Feb 28 or Feb 29).
///
/// Saturates at `NaiveDate::MAX` instead of failing past the end of the
/// supported calendar.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed number of whole days from `from` to `to`; negative when `to` is
/// earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_plain() {
        assert_eq!(add_months(date(2024, 1, 1), 6), date(2024, 7, 1));
        assert_eq!(add_months(date(2024, 11, 15), 3), date(2025, 2, 15));
        assert_eq!(add_months(date(2024, 5, 10), 0), date(2024, 5, 10));
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 3, 31), 1), date(2024, 4, 30));
        assert_eq!(add_months(date(2024, 2, 29), 12), date(2025, 2, 28));
    }

    #[test]
    fn add_months_saturates() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 31)), 30);
        assert_eq!(days_between(date(2024, 8, 1), date(2024, 7, 1)), -31);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 3, 1)), 0);
    }
}
