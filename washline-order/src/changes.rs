use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{self, OrderError};
use crate::models::{Order, OrderStatus};

/// A typed partial update to an order.
///
/// Each variant touches only the fields it names, so the store can apply
/// two concurrent updates to different fields of the same order without
/// one clobbering the other. This replaces the free-form patch payloads
/// the admin dashboard used to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OrderUpdate {
    /// Move the order to `target`, optionally updating notes in the same
    /// write. Re-issuing the current status updates notes only.
    Status {
        target: OrderStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// Overwrite the admin notes, valid at any stage
    Notes { notes: String },
    /// Record payment received; never touches status
    Payment,
}

impl OrderUpdate {
    /// Apply the update in place. A failed validation leaves the order
    /// exactly as it was.
    pub fn apply(self, order: &mut Order, now: DateTime<Utc>) -> Result<(), OrderError> {
        match self {
            Self::Status { target, notes } => lifecycle::advance(order, target, notes, now),
            Self::Notes { notes } => {
                order.notes = Some(notes);
                Ok(())
            }
            Self::Payment => {
                lifecycle::record_payment(order, now);
                Ok(())
            }
        }
    }
}
