//! Group discount and cancellation policy for block bookings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use roomhub_core::config::BookingConfig;

/// Outcome of applying the group discount policy to a block.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DiscountBreakdown {
    /// Whether the block met the discount threshold.
    pub eligible: bool,
    /// Discount percentage applied (zero when ineligible).
    pub percentage: Decimal,
    /// Amount subtracted from the original total.
    pub discount_amount: Decimal,
    /// Amount payable after the discount.
    pub final_amount: Decimal,
    /// What the agency saves versus booking rooms individually.
    pub savings: Decimal,
}

/// Applies the group discount and cancellation-window policy.
///
/// All arithmetic is exact decimal arithmetic; no floating point is
/// involved anywhere in the money path.
#[derive(Debug, Clone)]
pub struct DiscountCalculator {
    config: BookingConfig,
}

impl DiscountCalculator {
    /// Creates a calculator using the given booking policy.
    pub fn new(config: BookingConfig) -> Self {
        Self { config }
    }

    /// Computes the discount for a block of `rooms_count` rooms with the
    /// given undiscounted total.
    ///
    /// Blocks at or above the configured room threshold get the flat
    /// configured percentage; smaller blocks pay full price.
    pub fn calculate_discount(&self, rooms_count: u32, original_amount: Decimal) -> DiscountBreakdown {
        if rooms_count < self.config.discount_min_rooms {
            return DiscountBreakdown {
                eligible: false,
                percentage: Decimal::ZERO,
                discount_amount: Decimal::ZERO,
                final_amount: original_amount,
                savings: Decimal::ZERO,
            };
        }

        let percentage = Decimal::from(self.config.discount_percent);
        // Round the discount, not the total, so the two always sum back
        // to the original amount.
        let discount_amount = (original_amount * percentage / Decimal::from(100)).round_dp(2);

        DiscountBreakdown {
            eligible: true,
            percentage,
            discount_amount,
            final_amount: original_amount - discount_amount,
            savings: discount_amount,
        }
    }

    /// Whole days remaining until check-in, rounded up.
    ///
    /// A check-in later today counts as zero; a check-in tomorrow
    /// morning counts as one.
    pub fn days_until_check_in(&self, check_in: NaiveDate, now: DateTime<Utc>) -> i64 {
        let check_in_start = check_in.and_time(NaiveTime::MIN).and_utc();
        let seconds = (check_in_start - now).num_seconds();
        if seconds <= 0 {
            return 0;
        }
        (seconds + 86_399) / 86_400
    }

    /// Whether a block starting at `check_in` may still be canceled.
    ///
    /// Cancellation closes once fewer than the configured number of whole
    /// days remain; exactly the minimum is still allowed.
    pub fn can_cancel(&self, check_in: NaiveDate, now: DateTime<Utc>) -> bool {
        self.days_until_check_in(check_in, now) >= self.config.block_cancel_min_days
    }

    /// The minimum number of whole days required for cancellation.
    pub fn cancellation_min_days(&self) -> i64 {
        self.config.block_cancel_min_days
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn calculator() -> DiscountCalculator {
        DiscountCalculator::new(BookingConfig::default())
    }

    #[test]
    fn three_rooms_get_the_group_discount() {
        let breakdown = calculator().calculate_discount(3, Decimal::from(1000));
        assert!(breakdown.eligible);
        assert_eq!(breakdown.percentage, Decimal::from(15));
        assert_eq!(breakdown.discount_amount, Decimal::from(150));
        assert_eq!(breakdown.final_amount, Decimal::from(850));
        assert_eq!(breakdown.savings, Decimal::from(150));
    }

    #[test]
    fn two_rooms_pay_full_price() {
        let breakdown = calculator().calculate_discount(2, Decimal::from(1000));
        assert!(!breakdown.eligible);
        assert_eq!(breakdown.percentage, Decimal::ZERO);
        assert_eq!(breakdown.discount_amount, Decimal::ZERO);
        assert_eq!(breakdown.final_amount, Decimal::from(1000));
        assert_eq!(breakdown.savings, Decimal::ZERO);
    }

    #[test]
    fn discount_rounds_to_cents_and_sums_back() {
        // 15% of 333.33 is 49.9995; the discount rounds to 50.00 and the
        // parts still sum to the original.
        let breakdown = calculator().calculate_discount(4, Decimal::new(333_33, 2));
        assert_eq!(breakdown.discount_amount, Decimal::new(50_00, 2));
        assert_eq!(
            breakdown.discount_amount + breakdown.final_amount,
            Decimal::new(333_33, 2)
        );
    }

    #[test]
    fn cancellation_window_boundaries() {
        let calc = calculator();
        let now = Utc::now();
        let date_in = |days: i64| (now + Duration::days(days)).date_naive();

        assert!(calc.can_cancel(date_in(8), now));
        assert!(calc.can_cancel(date_in(7), now));
        assert!(!calc.can_cancel(date_in(6), now));
        assert!(!calc.can_cancel(now.date_naive(), now));
    }

    #[test]
    fn days_until_check_in_rounds_up() {
        let calc = calculator();
        let now = Utc::now();
        let tomorrow = (now + Duration::days(1)).date_naive();
        assert_eq!(calc.days_until_check_in(tomorrow, now), 1);
        assert_eq!(calc.days_until_check_in(now.date_naive(), now), 0);
    }
}
