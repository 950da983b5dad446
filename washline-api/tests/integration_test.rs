use std::sync::Arc;

use washline_catalog::{default_services, ClothQuantity};
use washline_order::{
    place, ClientDetails, Order, OrderError, OrderStatus, OrderUpdate, PaymentMethod,
    PaymentStatus, StatusCategory,
};
use washline_store::{MemoryStore, OrderStore, ReportStore, ServiceStore};

fn client() -> ClientDetails {
    ClientDetails {
        client_id: "client-1".to_string(),
        client_name: "Asha".to_string(),
        phone: "9876543210".to_string(),
        delivery_address: "12 MG Road".to_string(),
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.seed(default_services()).await;
    store
}

async fn placed_order(store: &MemoryStore, method: PaymentMethod) -> Order {
    let service = store.get_service("normal_wash").await.unwrap();
    let clothes = ClothQuantity { shirt: 2, pant: 1, ..Default::default() };
    let order = place(&service, client(), clothes, method, chrono::Utc::now()).unwrap();
    store.create(order).await.unwrap()
}

async fn set_status(store: &MemoryStore, order: &Order, target: OrderStatus) -> Order {
    store
        .update(order.id, OrderUpdate::Status { target, notes: None })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_cash_order_end_to_end() {
    let store = seeded_store().await;
    let mut rx = store.subscribe();

    let order = placed_order(&store, PaymentMethod::Cash).await;
    assert_eq!(order.total_cost, 65);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    // Creation pushed the first snapshot
    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.len(), 1);

    // Admin walks the pipeline forward
    set_status(&store, &order, OrderStatus::Accepted).await;
    set_status(&store, &order, OrderStatus::PickedUp).await;
    set_status(&store, &order, OrderStatus::Washing).await;
    set_status(&store, &order, OrderStatus::Ironing).await;
    set_status(&store, &order, OrderStatus::Packing).await;
    let current = set_status(&store, &order, OrderStatus::OutForDelivery).await;
    assert_eq!(current.status, OrderStatus::OutForDelivery);

    // Cash outstanding: neither the handover nor the client confirmation go through
    let err = store
        .update(order.id, OrderUpdate::Status { target: OrderStatus::Delivered, notes: None })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PaymentRequired));

    let err = store
        .update(order.id, OrderUpdate::Status { target: OrderStatus::ClientConfirmed, notes: None })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PaymentRequired));

    // Client pays, confirms; admin finalizes
    let paid = store.update(order.id, OrderUpdate::Payment).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Completed);
    assert_eq!(paid.status, OrderStatus::OutForDelivery);
    assert!(paid.timestamps.paid_at.is_some());

    let confirmed = set_status(&store, &order, OrderStatus::ClientConfirmed).await;
    assert_eq!(confirmed.status, OrderStatus::ClientConfirmed);

    let delivered = set_status(&store, &order, OrderStatus::Delivered).await;
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.timestamps.delivered_at.is_some());

    // The quoted total never moved
    assert_eq!(delivered.total_cost, 65);

    // Terminal: nothing moves it again
    let err = store
        .update(order.id, OrderUpdate::Status { target: OrderStatus::Accepted, notes: None })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    let completed = store.list(Some(StatusCategory::Completed)).await.unwrap();
    assert_eq!(completed.len(), 1);
    assert!(store.list(Some(StatusCategory::Pending)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejection_and_reporting() {
    let store = seeded_store().await;
    let order = placed_order(&store, PaymentMethod::Upi).await;

    let rejected = store
        .update(
            order.id,
            OrderUpdate::Status {
                target: OrderStatus::Rejected,
                notes: Some("outside delivery area".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, OrderStatus::Rejected);
    assert_eq!(rejected.notes.as_deref(), Some("outside delivery area"));

    let report_id = store
        .file(order.id, "client-1", "order was rejected without a call".to_string())
        .await
        .unwrap();
    let reports = store.list_for_order(order.id).await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, report_id);
}

#[tokio::test]
async fn test_notes_only_update_keeps_stage() {
    let store = seeded_store().await;
    let order = placed_order(&store, PaymentMethod::Card).await;
    let accepted = set_status(&store, &order, OrderStatus::Accepted).await;

    // Re-issuing the current status with notes is the notes-update path
    let updated = store
        .update(
            order.id,
            OrderUpdate::Status {
                target: OrderStatus::Accepted,
                notes: Some("gate code 4411".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, OrderStatus::Accepted);
    assert_eq!(updated.notes.as_deref(), Some("gate code 4411"));
    assert_eq!(updated.timestamps.accepted_at, accepted.timestamps.accepted_at);
}
