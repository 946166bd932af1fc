//! Checkout service — settles the bill and closes the stay.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::error::{AppError, ErrorKind};
use roomhub_database::repositories::{InvoiceRepository, ReservationRepository, RoomRepository};
use roomhub_entity::invoice::{Invoice, InvoiceLineItem};
use roomhub_entity::reservation::{PaymentMethod, ReservationStatus};

use crate::context::RequestContext;

use super::reconciler::PaymentReconciler;

/// A billable line supplied at checkout, on top of the stay and any
/// previously posted charges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// What is being billed.
    pub description: String,
    /// Billed amount.
    pub amount: Decimal,
    /// Optional service category.
    pub service_type: Option<String>,
}

/// Request to check a guest out and settle the bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// How the balance is paid.
    pub payment_method: PaymentMethod,
    /// Amount tendered by the guest.
    pub amount_paid: Decimal,
    /// Card processor reference, required for card payments.
    pub transaction_id: Option<String>,
    /// Payment due date for invoiced agencies.
    pub due_date: Option<NaiveDate>,
    /// Extra billable lines added at the desk.
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

#[derive(Debug, Serialize)]
struct BilledLine {
    description: String,
    amount: Decimal,
    service_type: Option<String>,
}

/// Settles reservations into invoices.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Room repository, used for the lodging line description.
    room_repo: Arc<RoomRepository>,
    /// Invoice repository.
    invoice_repo: Arc<InvoiceRepository>,
    /// Payment reconciler.
    reconciler: PaymentReconciler,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        room_repo: Arc<RoomRepository>,
        invoice_repo: Arc<InvoiceRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            reservation_repo,
            room_repo,
            invoice_repo,
            reconciler: PaymentReconciler::new(),
            rbac,
        }
    }

    /// Checks a guest out, writing the invoice and closing the stay in
    /// one transaction.
    ///
    /// The invoice bills the stay itself, every charge posted during the
    /// stay, and any extra lines supplied in the request.
    pub async fn check_out(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        req: CheckoutRequest,
    ) -> Result<Invoice, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::CheckoutProcess)?;

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;
        if reservation.status != ReservationStatus::CheckedIn {
            return Err(AppError::validation(
                "Only checked-in reservations can be checked out",
            ));
        }

        let room = self
            .room_repo
            .find_by_id(reservation.room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))?;

        let charges = self.reservation_repo.charges(reservation.id).await?;
        let charges_total: Decimal = charges.iter().map(|c| c.amount).sum();

        let mut lines = Vec::with_capacity(charges.len() + req.line_items.len() + 1);
        lines.push(BilledLine {
            description: format!(
                "Room {} ({} nights)",
                room.room_number,
                reservation.stay().nights()
            ),
            amount: reservation.total_amount - charges_total,
            service_type: Some("lodging".to_string()),
        });
        for charge in &charges {
            lines.push(BilledLine {
                description: charge.description.clone(),
                amount: charge.amount,
                service_type: Some("additional".to_string()),
            });
        }

        let mut extras_total = Decimal::ZERO;
        for item in &req.line_items {
            if item.description.trim().is_empty() {
                return Err(AppError::validation("Line item description cannot be empty"));
            }
            if item.amount < Decimal::ZERO {
                return Err(AppError::validation(
                    "Line item amount must not be negative",
                ));
            }
            extras_total += item.amount;
            lines.push(BilledLine {
                description: item.description.clone(),
                amount: item.amount,
                service_type: item.service_type.clone(),
            });
        }

        let total = reservation.total_amount + extras_total;

        let payment = self.reconciler.reconcile(
            req.payment_method,
            total,
            req.amount_paid,
            req.transaction_id.as_deref(),
        )?;

        let line_items = serde_json::to_value(&lines).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to encode invoice lines", e)
        })?;

        let invoice = self
            .reservation_repo
            .checkout(
                reservation.id,
                req.payment_method,
                &line_items,
                total,
                payment.amount_paid,
                payment.change_amount,
                payment.transaction_id.as_deref(),
                req.due_date,
            )
            .await?;

        info!(
            reservation_id = %reservation.id,
            invoice_id = %invoice.id,
            total = %invoice.total_amount,
            method = %invoice.payment_method,
            "Guest checked out"
        );

        Ok(invoice)
    }

    /// Gets the invoice issued for a reservation, with its lines.
    pub async fn invoice(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
    ) -> Result<(Invoice, Vec<InvoiceLineItem>), AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::InvoiceRead)?;

        let invoice = self
            .invoice_repo
            .find_by_reservation(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("No invoice exists for this reservation"))?;
        let lines = self.invoice_repo.line_items(invoice.id).await?;
        Ok((invoice, lines))
    }
}
