//! Half-open date ranges for hotel stays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A half-open stay interval `[check_in, check_out)`.
///
/// The check-out date is exclusive: a stay ending on a given day and
/// another beginning on that same day occupy the room back to back
/// without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    /// First night of the stay (inclusive).
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
}

impl StayRange {
    /// Create a stay range, rejecting empty or inverted intervals.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, AppError> {
        if check_in >= check_out {
            return Err(AppError::validation(format!(
                "check-out date {check_out} must be after check-in date {check_in}"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Whether two stays occupy the room on at least one common night.
    ///
    /// Adjacent stays (one ending the day the other begins) do not
    /// overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Number of nights in the stay. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether the given date falls on an occupied night of this stay.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayRange {
        StayRange::new(date(from.0, from.1, from.2), date(to.0, to.1, to.2)).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(StayRange::new(date(2026, 3, 10), date(2026, 3, 5)).is_err());
    }

    #[test]
    fn rejects_zero_night_range() {
        assert!(StayRange::new(date(2026, 3, 10), date(2026, 3, 10)).is_err());
    }

    #[test]
    fn adjacent_stays_do_not_overlap() {
        let first = range((2026, 3, 1), (2026, 3, 5));
        let second = range((2026, 3, 5), (2026, 3, 9));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn partial_overlap_detected() {
        let first = range((2026, 3, 1), (2026, 3, 5));
        let second = range((2026, 3, 4), (2026, 3, 8));
        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = range((2026, 3, 1), (2026, 3, 10));
        let inner = range((2026, 3, 3), (2026, 3, 5));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn identical_ranges_overlap() {
        let a = range((2026, 3, 1), (2026, 3, 5));
        let b = range((2026, 3, 1), (2026, 3, 5));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let a = range((2026, 3, 1), (2026, 3, 5));
        let b = range((2026, 3, 20), (2026, 3, 25));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn nights_counts_the_half_open_interval() {
        assert_eq!(range((2026, 3, 1), (2026, 3, 5)).nights(), 4);
        assert_eq!(range((2026, 3, 1), (2026, 3, 2)).nights(), 1);
    }

    #[test]
    fn contains_excludes_checkout_day() {
        let stay = range((2026, 3, 1), (2026, 3, 5));
        assert!(stay.contains(date(2026, 3, 1)));
        assert!(stay.contains(date(2026, 3, 4)));
        assert!(!stay.contains(date(2026, 3, 5)));
        assert!(!stay.contains(date(2026, 2, 28)));
    }
}
