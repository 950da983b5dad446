use crate::models::OrderStatus;

/// The forward-only fulfillment pipeline, in order. `Rejected` and
/// `ClientConfirmed` live off the pipeline and are handled as explicit
/// exceptions in [`is_allowed`].
pub const STATUS_FLOW: [OrderStatus; 8] = [
    OrderStatus::Placed,
    OrderStatus::Accepted,
    OrderStatus::PickedUp,
    OrderStatus::Washing,
    OrderStatus::Ironing,
    OrderStatus::Packing,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

/// Position of a status within the pipeline, if it is on it
pub fn stage_index(status: OrderStatus) -> Option<usize> {
    STATUS_FLOW.iter().position(|s| *s == status)
}

/// The stage immediately following `current`, or `None` at the end of the
/// line. `ClientConfirmed` resolves forward to `Delivered`; `Rejected` is
/// absorbing.
pub fn next_stage(current: OrderStatus) -> Option<OrderStatus> {
    match current {
        OrderStatus::ClientConfirmed => Some(OrderStatus::Delivered),
        OrderStatus::Rejected => None,
        _ => stage_index(current).and_then(|i| STATUS_FLOW.get(i + 1)).copied(),
    }
}

/// Whether the flow alone permits `current -> target`. Payment gating for
/// the delivery leg is checked separately by the lifecycle.
///
/// Beyond the immediate successor, only two side-transitions exist:
/// rejection of a freshly placed order, and the client acknowledging a
/// delivery in progress.
pub fn is_allowed(current: OrderStatus, target: OrderStatus) -> bool {
    if next_stage(current) == Some(target) {
        return true;
    }
    matches!(
        (current, target),
        (OrderStatus::Placed, OrderStatus::Rejected)
            | (OrderStatus::OutForDelivery, OrderStatus::ClientConfirmed)
    )
}
