use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use washline_catalog::ClothQuantity;

use crate::pii::Masked;

/// Order status across the fulfillment pipeline.
///
/// `Rejected` is absorbing and reachable only from `Placed`;
/// `ClientConfirmed` is the client's acknowledgment sub-state between
/// `OutForDelivery` and `Delivered`. Everything else moves strictly
/// forward, one stage at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Placed,
    Accepted,
    PickedUp,
    Washing,
    Ironing,
    Packing,
    OutForDelivery,
    ClientConfirmed,
    Delivered,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Accepted => "accepted",
            Self::PickedUp => "picked-up",
            Self::Washing => "washing",
            Self::Ironing => "ironing",
            Self::Packing => "packing",
            Self::OutForDelivery => "out-for-delivery",
            Self::ClientConfirmed => "client-confirmed",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable label shown on cards and timelines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Accepted => "Order Accepted",
            Self::PickedUp => "Picked Up",
            Self::Washing => "Washing",
            Self::Ironing => "Ironing",
            Self::Packing => "Packing",
            Self::OutForDelivery => "Out for Delivery",
            Self::ClientConfirmed => "Confirmed by Client",
            Self::Delivered => "Delivered",
            Self::Rejected => "Rejected",
        }
    }

    /// Once delivered or rejected, an order never changes status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Dashboard filter buckets over order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    /// Freshly placed, awaiting an accept/reject decision
    Pending,
    /// Somewhere in the pipeline between acceptance and delivery
    Active,
    /// Delivered or rejected
    Completed,
}

impl StatusCategory {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::Pending => status == OrderStatus::Placed,
            Self::Active => status != OrderStatus::Placed && !status.is_terminal(),
            Self::Completed => status.is_terminal(),
        }
    }
}

/// Sparse per-stage entry instants. `placed_at` is fixed at creation; every
/// other slot is written exactly once, the first time its stage is reached,
/// and never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub placed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub washing_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ironing_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn new(placed_at: DateTime<Utc>) -> Self {
        Self {
            placed_at,
            accepted_at: None,
            picked_up_at: None,
            washing_at: None,
            ironing_at: None,
            packing_at: None,
            out_for_delivery_at: None,
            client_confirmed_at: None,
            delivered_at: None,
            rejected_at: None,
            paid_at: None,
        }
    }

    /// Record the instant a stage was entered; first entry wins
    pub fn stamp(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        let slot = match status {
            OrderStatus::Placed => return, // fixed at creation
            OrderStatus::Accepted => &mut self.accepted_at,
            OrderStatus::PickedUp => &mut self.picked_up_at,
            OrderStatus::Washing => &mut self.washing_at,
            OrderStatus::Ironing => &mut self.ironing_at,
            OrderStatus::Packing => &mut self.packing_at,
            OrderStatus::OutForDelivery => &mut self.out_for_delivery_at,
            OrderStatus::ClientConfirmed => &mut self.client_confirmed_at,
            OrderStatus::Delivered => &mut self.delivered_at,
            OrderStatus::Rejected => &mut self.rejected_at,
        };
        if slot.is_none() {
            *slot = Some(at);
        }
    }

    /// Record the payment instant; first entry wins
    pub fn stamp_paid(&mut self, at: DateTime<Utc>) {
        if self.paid_at.is_none() {
            self.paid_at = Some(at);
        }
    }

    /// When the given stage was entered, if it has been
    pub fn recorded(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        match status {
            OrderStatus::Placed => Some(self.placed_at),
            OrderStatus::Accepted => self.accepted_at,
            OrderStatus::PickedUp => self.picked_up_at,
            OrderStatus::Washing => self.washing_at,
            OrderStatus::Ironing => self.ironing_at,
            OrderStatus::Packing => self.packing_at,
            OrderStatus::OutForDelivery => self.out_for_delivery_at,
            OrderStatus::ClientConfirmed => self.client_confirmed_at,
            OrderStatus::Delivered => self.delivered_at,
            OrderStatus::Rejected => self.rejected_at,
        }
    }
}

/// The single source of truth for a laundry order.
///
/// `total_cost` is quoted once at creation and never recomputed, so later
/// catalog edits cannot change what an existing order owes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub client_id: String,
    pub client_name: String,
    pub client_phone: Masked<String>,
    pub delivery_address: String,
    pub service: String,
    pub clothes: ClothQuantity,
    pub total_cost: i32,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamps: Timestamps,
}

/// Issue report filed by a client against an order. A side channel keyed by
/// order id, not part of the status flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub order_id: Uuid,
    pub client_id: String,
    pub reason: String,
    pub filed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::PickedUp).unwrap(), "\"picked-up\"");
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out-for-delivery\""
        );
        let status: OrderStatus = serde_json::from_str("\"client-confirmed\"").unwrap();
        assert_eq!(status, OrderStatus::ClientConfirmed);
    }

    #[test]
    fn test_category_buckets() {
        use OrderStatus::*;
        assert!(StatusCategory::Pending.matches(Placed));
        assert!(!StatusCategory::Pending.matches(Accepted));

        for status in [Accepted, PickedUp, Washing, Ironing, Packing, OutForDelivery, ClientConfirmed] {
            assert!(StatusCategory::Active.matches(status), "{status} should be active");
        }
        assert!(!StatusCategory::Active.matches(Placed));
        assert!(!StatusCategory::Active.matches(Delivered));

        assert!(StatusCategory::Completed.matches(Delivered));
        assert!(StatusCategory::Completed.matches(Rejected));
    }

    #[test]
    fn test_timestamps_stamp_once() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::minutes(5);

        let mut ts = Timestamps::new(t0);
        ts.stamp(OrderStatus::Accepted, t0);
        ts.stamp(OrderStatus::Accepted, t1);
        assert_eq!(ts.accepted_at, Some(t0));

        ts.stamp_paid(t0);
        ts.stamp_paid(t1);
        assert_eq!(ts.paid_at, Some(t0));

        // Placed is fixed at creation
        ts.stamp(OrderStatus::Placed, t1);
        assert_eq!(ts.placed_at, t0);
    }

    #[test]
    fn test_timestamps_sparse_serialization() {
        let mut ts = Timestamps::new(Utc::now());
        ts.stamp(OrderStatus::Accepted, Utc::now());

        let json = serde_json::to_value(&ts).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("placedAt"));
        assert!(obj.contains_key("acceptedAt"));
    }
}
