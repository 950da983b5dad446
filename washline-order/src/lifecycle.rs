use chrono::{DateTime, Utc};
use uuid::Uuid;

use washline_catalog::{quote, ClothQuantity, PricingError, Service};

use crate::flow;
use crate::models::{Order, OrderStatus, PaymentMethod, PaymentStatus, Timestamps};
use crate::payment;
use crate::pii::Masked;

/// Who an order belongs to and where it goes
#[derive(Debug, Clone)]
pub struct ClientDetails {
    pub client_id: String,
    pub client_name: String,
    pub phone: String,
    pub delivery_address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order contains no garments")]
    EmptyOrder,

    #[error("invalid catalog entry: {0}")]
    InvalidCatalogEntry(#[from] PricingError),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("payment must be completed before delivery")]
    PaymentRequired,

    #[error("order not found: {0}")]
    NotFound(Uuid),
}

/// Create a new order in `placed` status.
///
/// The total is quoted here, copied into the order, and never recomputed.
/// Card and UPI payments settle immediately; cash stays pending until
/// [`record_payment`].
pub fn place(
    service: &Service,
    client: ClientDetails,
    clothes: ClothQuantity,
    payment_method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<Order, OrderError> {
    if clothes.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    let total_cost = quote(service, &clothes)?;

    let paid_upfront = payment::settles_upfront(payment_method);
    let mut timestamps = Timestamps::new(now);
    if paid_upfront {
        timestamps.stamp_paid(now);
    }

    Ok(Order {
        id: Uuid::new_v4(),
        client_id: client.client_id,
        client_name: client.client_name,
        client_phone: Masked(client.phone),
        delivery_address: client.delivery_address,
        service: service.name.clone(),
        clothes,
        total_cost,
        status: OrderStatus::Placed,
        payment_method,
        payment_status: if paid_upfront { PaymentStatus::Completed } else { PaymentStatus::Pending },
        notes: None,
        timestamps,
    })
}

/// Advance an order to `target`.
///
/// Valid targets are the immediate successor stage, `rejected` from
/// `placed`, and `client-confirmed` from `out-for-delivery`. The delivery
/// leg (entering `client-confirmed` or `delivered`) is payment-gated.
///
/// Re-issuing the current status is a no-op rather than an error: the stage
/// timestamp is not overwritten, but supplied notes are applied. This is
/// how notes get updated without a stage change.
///
/// A failed validation returns before anything is mutated.
pub fn advance(
    order: &mut Order,
    target: OrderStatus,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<(), OrderError> {
    if target == order.status {
        if let Some(n) = notes {
            order.notes = Some(n);
        }
        return Ok(());
    }

    if !flow::is_allowed(order.status, target) {
        return Err(OrderError::InvalidTransition { from: order.status, to: target });
    }

    let payment_gated = matches!(target, OrderStatus::Delivered | OrderStatus::ClientConfirmed);
    if payment_gated && !payment::can_deliver(order) {
        return Err(OrderError::PaymentRequired);
    }

    order.status = target;
    order.timestamps.stamp(target, now);
    if let Some(n) = notes {
        order.notes = Some(n);
    }
    Ok(())
}

/// Mark payment received and stamp `paidAt` (first entry wins). Independent
/// of the status flow; never touches `status`. Idempotent.
pub fn record_payment(order: &mut Order, now: DateTime<Utc>) {
    order.payment_status = PaymentStatus::Completed;
    order.timestamps.stamp_paid(now);
}
