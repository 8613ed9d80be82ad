//! Calendar quarters (Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec), labelled by
//! their last day.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: i32,
    /// 1..=4
    number: u32,
}

impl Quarter {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            number: date.month0() / 3 + 1,
        }
    }

    pub fn of_timestamp(ts: NaiveDateTime) -> Self {
        Self::of(ts.date())
    }

    /// Last calendar day of the quarter; the label used in report output.
    pub fn end_date(&self) -> NaiveDate {
        let (year, month) = if self.number == 4 {
            (self.year + 1, 1)
        } else {
            (self.year, self.number * 3 + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .expect("day before a month start is always a valid date")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn mid_february_is_first_quarter() {
        let q = Quarter::of(d(2023, 2, 15));
        assert_eq!(q, Quarter::of(d(2023, 1, 1)));
        assert_eq!(q.end_date(), d(2023, 3, 31));
    }

    #[test]
    fn april_first_starts_second_quarter() {
        let q = Quarter::of(d(2023, 4, 1));
        assert_eq!(q.end_date(), d(2023, 6, 30));
        assert_ne!(q, Quarter::of(d(2023, 3, 31)));
        assert_eq!(q, Quarter::of(d(2023, 6, 30)));
    }

    #[test]
    fn fourth_quarter_ends_on_new_years_eve() {
        let q = Quarter::of(d(2013, 10, 1));
        assert_eq!(q.end_date(), d(2013, 12, 31));
    }

    #[test]
    fn timestamps_bucket_by_date() {
        let ts = d(2014, 9, 30).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Quarter::of_timestamp(ts).end_date(), d(2014, 9, 30));
    }

    #[test]
    fn quarters_order_chronologically() {
        assert!(Quarter::of(d(2013, 12, 31)) < Quarter::of(d(2014, 1, 1)));
        assert!(Quarter::of(d(2014, 3, 31)) < Quarter::of(d(2014, 4, 1)));
    }
}
