//! Checkout — payment reconciliation and invoice creation.

pub mod reconciler;
pub mod service;

pub use reconciler::{PaymentReconciler, ReconciledPayment};
pub use service::{CheckoutRequest, CheckoutService, LineItemRequest};
