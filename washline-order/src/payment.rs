use crate::models::{Order, PaymentMethod, PaymentStatus};

/// Non-cash methods (card, UPI) settle when the order is placed; only cash
/// stays pending until the shop records it.
pub fn settles_upfront(method: PaymentMethod) -> bool {
    method != PaymentMethod::Cash
}

/// Gate for the delivery leg: an order may only reach the client-confirmed
/// or delivered stage once payment is settled. For cash that means a
/// recorded payment; anything else settled at creation.
pub fn can_deliver(order: &Order) -> bool {
    order.payment_status == PaymentStatus::Completed || order.payment_method != PaymentMethod::Cash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::tests::sample_order;

    #[test]
    fn test_settlement_by_method() {
        assert!(!settles_upfront(PaymentMethod::Cash));
        assert!(settles_upfront(PaymentMethod::Card));
        assert!(settles_upfront(PaymentMethod::Upi));
    }

    #[test]
    fn test_cash_blocks_until_completed() {
        let mut order = sample_order(PaymentMethod::Cash);
        assert!(!can_deliver(&order));

        order.payment_status = PaymentStatus::Completed;
        assert!(can_deliver(&order));
    }

    #[test]
    fn test_non_cash_is_never_blocked() {
        let order = sample_order(PaymentMethod::Upi);
        assert!(can_deliver(&order));
    }
}
