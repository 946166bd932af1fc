//! Payment reconciliation rules applied before an invoice is written.

use rust_decimal::Decimal;

use roomhub_core::error::AppError;
use roomhub_entity::reservation::PaymentMethod;

/// The settled payment figures after applying method-specific rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledPayment {
    /// Amount recorded as paid.
    pub amount_paid: Decimal,
    /// Change returned to the guest (cash only).
    pub change_amount: Decimal,
    /// Card processor reference, when applicable.
    pub transaction_id: Option<String>,
}

/// Normalizes tendered payments per method.
///
/// Card payments settle for the exact invoice total and must carry a
/// processor transaction id. Cash may overpay; the surplus is returned
/// as change. Underpayment is rejected for every method.
#[derive(Debug, Clone, Default)]
pub struct PaymentReconciler;

impl PaymentReconciler {
    /// Creates a new reconciler.
    pub fn new() -> Self {
        Self
    }

    /// Reconciles a tendered payment against the invoice total.
    pub fn reconcile(
        &self,
        method: PaymentMethod,
        total: Decimal,
        amount_paid: Decimal,
        transaction_id: Option<&str>,
    ) -> Result<ReconciledPayment, AppError> {
        if amount_paid < total {
            return Err(AppError::validation(
                "amount paid cannot be less than total amount",
            ));
        }

        match method {
            PaymentMethod::CreditCard => {
                let txn = transaction_id
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        AppError::validation("A transaction id is required for card payments")
                    })?;
                Ok(ReconciledPayment {
                    // The processor captures the exact total; any excess
                    // tendered is never charged.
                    amount_paid: total,
                    change_amount: Decimal::ZERO,
                    transaction_id: Some(txn.to_string()),
                })
            }
            PaymentMethod::Cash => Ok(ReconciledPayment {
                amount_paid,
                change_amount: amount_paid - total,
                transaction_id: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn cash_overpayment_returns_change() {
        let r = PaymentReconciler::new()
            .reconcile(PaymentMethod::Cash, dec(100), dec(120), None)
            .unwrap();
        assert_eq!(r.amount_paid, dec(120));
        assert_eq!(r.change_amount, dec(20));
        assert_eq!(r.transaction_id, None);
    }

    #[test]
    fn cash_exact_payment_has_no_change() {
        let r = PaymentReconciler::new()
            .reconcile(PaymentMethod::Cash, dec(100), dec(100), None)
            .unwrap();
        assert_eq!(r.change_amount, Decimal::ZERO);
    }

    #[test]
    fn card_requires_a_transaction_id() {
        let reconciler = PaymentReconciler::new();
        assert!(
            reconciler
                .reconcile(PaymentMethod::CreditCard, dec(100), dec(100), None)
                .is_err()
        );
        assert!(
            reconciler
                .reconcile(PaymentMethod::CreditCard, dec(100), dec(100), Some("  "))
                .is_err()
        );
    }

    #[test]
    fn card_settles_for_the_exact_total() {
        let r = PaymentReconciler::new()
            .reconcile(PaymentMethod::CreditCard, dec(100), dec(150), Some("txn-1"))
            .unwrap();
        assert_eq!(r.amount_paid, dec(100));
        assert_eq!(r.change_amount, Decimal::ZERO);
        assert_eq!(r.transaction_id.as_deref(), Some("txn-1"));
    }

    #[test]
    fn underpayment_is_rejected_for_every_method() {
        let reconciler = PaymentReconciler::new();
        assert!(
            reconciler
                .reconcile(PaymentMethod::Cash, dec(100), dec(99), None)
                .is_err()
        );
        assert!(
            reconciler
                .reconcile(PaymentMethod::CreditCard, dec(100), dec(99), Some("txn-1"))
                .is_err()
        );
    }
}
